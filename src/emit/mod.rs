//! Serialization of a compiled font into a generated artifact

use crate::{
    block::{CommonMetrics, FontInfo},
    compile::CompiledFont,
};

mod c_header;
pub mod contract;

pub use c_header::write_header;

/// A texture page packed to one bit per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPage {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Everything that ends up in a generated artifact
#[derive(Debug, Clone)]
pub struct FontArtifact {
    pub info: FontInfo,
    pub common: Option<CommonMetrics>,
    pub font: CompiledFont,
    pub pages: Vec<PackedPage>,
}

impl FontArtifact {
    /// `bmfont_<font name>_<size>`, snake cased
    pub fn base_name(&self) -> String {
        format!(
            "bmfont_{}_{}",
            self.info.font_name,
            self.info.font_size.unsigned_abs()
        )
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                '_'
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
    }

    pub fn file_name(&self) -> String {
        format!("{}.h", self.base_name())
    }

    /// Upper-cased base name usable as an identifier in the generated code
    pub fn ident(&self) -> String {
        self.base_name()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Number of bytes the emitted tables occupy on a target with the given
    /// pointer size
    pub fn size_report(&self, pointer_size: usize) -> SizeReport {
        SizeReport {
            records: self.font.record_count() * contract::GLYPH.size(pointer_size),
            slices: self.font.slices().len() * contract::SLICE.size(pointer_size),
            font: contract::FONT.size(pointer_size),
            pages: self.pages.iter().map(|p| p.data.len()).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeReport {
    pub records: usize,
    pub slices: usize,
    pub font: usize,
    pub pages: usize,
}

impl SizeReport {
    pub const fn total(&self) -> usize {
        self.records + self.slices + self.font + self.pages
    }
}
