use std::io::{self, Write};

use anyhow::Context;

use crate::{
    compile::GlyphRecord,
    error::{BmFontError, BmFontResult},
};

use super::{
    contract::{FieldType, LookupContract, Struct, LOOKUP},
    FontArtifact, PackedPage,
};

const TYPES_GUARD: &str = "BMFONT_TYPES";

fn c_type(ty: FieldType) -> String {
    match ty {
        FieldType::U16 => "uint16_t".to_owned(),
        FieldType::I16 => "int16_t".to_owned(),
        FieldType::U32 => "uint32_t".to_owned(),
        FieldType::ArrayOf(name) => format!("const struct {} *", name),
    }
}

fn write_struct(out: &mut impl Write, s: &Struct) -> io::Result<()> {
    writeln!(out, "struct {}\n{{", s.name)?;
    for field in s.fields {
        let ty = c_type(field.ty);
        let sep = if ty.ends_with('*') { "" } else { " " };
        writeln!(out, "    {}{}{};", ty, sep, field.name)?;
    }
    writeln!(out, "}};\n")
}

fn write_accessor(out: &mut impl Write, contract: &LookupContract) -> io::Result<()> {
    let present = contract
        .absent_when_zero
        .iter()
        .map(|field| format!("chr->{} != 0", field))
        .collect::<Vec<_>>()
        .join(" || ");

    writeln!(
        out,
        "static inline const struct {glyph} *{name}(const struct {font} *font,
                                               unsigned int id)
{{
    size_t left = 0;
    size_t right = font->slices_count;
    int found = 0;

    while (left < right && !found)
    {{
        size_t m = left + (right - left) / 2;
        if (id > font->slices[m].end)
            left = m + 1;
        else
        {{
            if (id >= font->slices[m].start)
                found = 1;
            right = m;
        }}
    }}

    if (found)
    {{
        const struct {glyph} *chr =
            font->slices[right].chars + (id - font->slices[right].start);
        if ({present})
            return chr;
    }}
    return NULL;
}}",
        glyph = contract.glyph.name,
        font = contract.font.name,
        name = contract.name,
        present = present,
    )
}

fn write_preface(out: &mut impl Write, contract: &LookupContract) -> io::Result<()> {
    writeln!(out, "#include <stddef.h>")?;
    writeln!(out, "#include <stdint.h>\n")?;
    writeln!(out, "#ifndef {}", TYPES_GUARD)?;
    writeln!(out, "#    define {}\n", TYPES_GUARD)?;

    write_struct(out, &contract.glyph)?;
    write_struct(out, &contract.slice)?;
    write_struct(out, &contract.font)?;
    write_accessor(out, contract)?;

    writeln!(out, "#endif /* !{} */\n", TYPES_GUARD)
}

fn write_record(out: &mut impl Write, id: u32, record: &GlyphRecord) -> io::Result<()> {
    let GlyphRecord {
        x,
        y,
        width,
        height,
        xoffset,
        yoffset,
        xadvance,
    } = record;

    if *record == GlyphRecord::ABSENT {
        return writeln!(out, "    {{ 0, 0, 0, 0, 0, 0, 0 }}, // (invalid) {}", id);
    }

    writeln!(
        out,
        "    {{ {}, {}, {}, {}, {}, {}, {} }}, // {}",
        x, y, width, height, xoffset, yoffset, xadvance, id
    )
}

fn write_page(out: &mut impl Write, ident: &str, page: &PackedPage) -> io::Result<()> {
    let row_len = page.width.div_ceil(8);

    writeln!(out, "// {}", page.name)?;
    writeln!(out, "#define {}_WIDTH {}", ident, page.width)?;
    writeln!(out, "#define {}_HEIGHT {}", ident, page.height)?;
    writeln!(
        out,
        "const unsigned char {}[{}] = {{",
        ident,
        page.data.len()
    )?;

    if row_len > 0 {
        for row in page.data.chunks(row_len) {
            write!(out, "   ")?;
            for byte in row {
                write!(out, " 0x{:02x},", byte)?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "}};")
}

/// Writes the artifact as a self-contained C header
pub fn write_header(out: &mut impl Write, artifact: &FontArtifact) -> BmFontResult<()> {
    // `slices_count` is a uint16_t
    let count = artifact.font.slices().len();
    if count > usize::from(u16::MAX) {
        anyhow::bail!(BmFontError::TooManySlices { count });
    }

    write_tables(out, artifact).context("failed to write header")
}

fn write_tables(out: &mut impl Write, artifact: &FontArtifact) -> io::Result<()> {
    let ident = artifact.ident();
    let slices = artifact.font.slices();

    writeln!(out, "#ifndef {}_H\n#define {}_H\n", ident, ident)?;
    write_preface(out, &LOOKUP)?;

    if let Some(common) = &artifact.common {
        writeln!(out, "#define {}_LINE_HEIGHT {}", ident, common.line_height)?;
        writeln!(out, "#define {}_BASE {}", ident, common.base)?;
        writeln!(out, "#define {}_SCALE_W {}", ident, common.scale_w)?;
        writeln!(out, "#define {}_SCALE_H {}\n", ident, common.scale_h)?;
    }

    for (i, slice) in slices.iter().enumerate() {
        writeln!(
            out,
            "const struct {} {}_SLICE_{}[] = {{",
            LOOKUP.glyph.name, ident, i
        )?;
        for (id, record) in slice.code_points() {
            write_record(out, id, record)?;
        }
        writeln!(out, "}};")?;
    }

    if !slices.is_empty() {
        writeln!(
            out,
            "const struct {} {}_SLICES[] = {{",
            LOOKUP.slice.name, ident
        )?;
        for (i, slice) in slices.iter().enumerate() {
            writeln!(
                out,
                "    {{ {}, {}, {}_SLICE_{} }},",
                slice.start(),
                slice.end(),
                ident,
                i
            )?;
        }
        writeln!(out, "}};")?;
    }

    for (i, page) in artifact.pages.iter().enumerate() {
        write_page(out, &format!("{}_DATA_{}", ident, i), page)?;
    }

    if slices.is_empty() {
        writeln!(out, "const struct {} {} = {{ 0, NULL }};", LOOKUP.font.name, ident)?;
    } else {
        writeln!(
            out,
            "const struct {} {} = {{ {}, {}_SLICES }};",
            LOOKUP.font.name,
            ident,
            slices.len(),
            ident
        )?;
    }

    writeln!(out, "#endif /* !{}_H */", ident)
}
