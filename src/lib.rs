//! Compiler from binary BMFont descriptors to statically searchable glyph
//! tables.
//!
//! The sparse code point space of a font is compressed into slices: dense
//! arrays of glyph records over near-contiguous code point ranges. The
//! slices are then emitted, together with a binary search accessor, as a C
//! header that needs no allocation at runtime.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

pub mod block;
pub mod compile;
pub mod config;
mod context;
pub mod emit;
pub mod error;
mod page;
mod parse_binary;

#[cfg(test)]
mod test_util;

pub use crate::{
    block::BlockReader,
    compile::{CompiledFont, GlyphRecord, RangeCompiler, Slice},
    config::CompileOptions,
    context::{CompilationContext, CompiledContainer},
    emit::{FontArtifact, PackedPage, SizeReport},
    error::{error_kind, BmFontError, BmFontResult, ErrorKind},
    page::GrayImage,
};

/// Reads every block of a container and compiles its glyphs
pub fn read_container(reader: impl Read) -> BmFontResult<CompiledContainer> {
    let mut reader = BlockReader::new(reader);
    reader.read_header()?;

    let mut ctx = CompilationContext::new();
    while let Some(block) = reader.next_block()? {
        ctx.handle_block(&block)?;
    }

    ctx.finish()
}

/// Loads and packs every page named by the container
pub fn pack_pages(container: &CompiledContainer, page_dir: &Path) -> BmFontResult<Vec<PackedPage>> {
    log::info!("exporting pages...");

    container
        .pages
        .iter()
        .map(|name| -> BmFontResult<PackedPage> {
            let image = GrayImage::load(&page_dir.join(name))?;

            Ok(PackedPage {
                name: name.clone(),
                width: image.width(),
                height: image.height(),
                data: image.pack()?,
            })
        })
        .collect()
}

/// Writes the header to a temporary file next to `dest` and only moves it
/// into place once it is complete
fn persist_header(dest: &Path, artifact: &FontArtifact) -> BmFontResult<()> {
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create output file in `{}`", dir.display()))?;

    {
        let mut w = BufWriter::new(file.as_file_mut());
        emit::write_header(&mut w, artifact)?;
        w.flush().context("failed to write output file")?;
    }

    file.persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to save output file `{}`", dest.display()))?;

    Ok(())
}

/// Compiles the font descriptor at `input` into a C header. Without an
/// explicit `output` the header name is derived from the font name and size.
pub fn compile_file(
    input: &Path,
    output: Option<&Path>,
    options: &CompileOptions,
) -> BmFontResult<(PathBuf, SizeReport)> {
    let file = File::open(input)
        .with_context(|| format!("could not open font file `{}`", input.display()))?;

    let container = read_container(BufReader::new(file))?;

    let pages = if options.export_pages {
        let page_dir = match &options.page_dir {
            Some(dir) => dir.as_path(),
            None => input.parent().unwrap_or_else(|| Path::new("")),
        };

        pack_pages(&container, page_dir)?
    } else {
        Vec::new()
    };

    let artifact = FontArtifact {
        info: container.info,
        common: container.common,
        font: container.font,
        pages,
    };

    let dest = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(artifact.file_name()),
    };

    log::info!("saving output to `{}`", dest.display());
    persist_header(&dest, &artifact)?;

    let report = artifact.size_report(options.pointer_size);
    log::info!("successfully saved output file ({}b)", report.total());

    Ok((dest, report))
}
