//! Syntax-independent description of the data a generated artifact exposes
//! and of the accessor that searches it.

/// Type of a single field of an emitted structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    U16,
    I16,
    U32,

    /// Reference to the first element of an immutable array of the named
    /// structure
    ArrayOf(&'static str),
}

impl FieldType {
    pub const fn size(self, pointer_size: usize) -> usize {
        match self {
            Self::U16 | Self::I16 => 2,
            Self::U32 => 4,
            Self::ArrayOf(..) => pointer_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> Field {
    Field { name, ty }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Struct {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Struct {
    /// Packed size of the structure, padding not included
    pub fn size(&self, pointer_size: usize) -> usize {
        self.fields.iter().map(|f| f.ty.size(pointer_size)).sum()
    }
}

pub const GLYPH: Struct = Struct {
    name: "bmfont_char",
    fields: &[
        field("x", FieldType::U16),
        field("y", FieldType::U16),
        field("width", FieldType::U16),
        field("height", FieldType::U16),
        field("xoffset", FieldType::I16),
        field("yoffset", FieldType::I16),
        field("xadvance", FieldType::I16),
    ],
};

pub const SLICE: Struct = Struct {
    name: "bmfont_slice",
    fields: &[
        field("start", FieldType::U32),
        field("end", FieldType::U32),
        field("chars", FieldType::ArrayOf(GLYPH.name)),
    ],
};

pub const FONT: Struct = Struct {
    name: "bmfont",
    fields: &[
        field("slices_count", FieldType::U16),
        field("slices", FieldType::ArrayOf(SLICE.name)),
    ],
};

/// The accessor every artifact exposes:
/// `find(font, id) -> Option<glyph>`.
///
/// Lower-bound binary search over the slice table for the leftmost slice
/// with `id <= end`. That slice holds `id` only if `id >= start`, in which
/// case the record at `id - start` is returned unless it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupContract {
    pub name: &'static str,
    pub font: Struct,
    pub slice: Struct,
    pub glyph: Struct,

    /// Fields that are all zero in an absent record
    pub absent_when_zero: &'static [&'static str],
}

pub const LOOKUP: LookupContract = LookupContract {
    name: "bmfont_char_info",
    font: FONT,
    slice: SLICE,
    glyph: GLYPH,
    absent_when_zero: &["width", "xadvance"],
};
