//! Compresses the sparse code point space of a font into slices: dense
//! arrays of glyph records over near-contiguous code point ranges.

use crate::{
    block::GlyphMetric,
    error::{BmFontError, BmFontResult},
};

mod lookup;

/// Largest gap between a slice boundary and a code point that still merges
/// the code point into the slice
pub const TOLERANCE: u32 = 6;

/// Slices whose occupancy falls below this ratio are reported
const LOW_OCCUPANCY: f64 = 0.5;

/// Per-slot glyph metrics stored in a compiled slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphRecord {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub xoffset: i16,
    pub yoffset: i16,
    pub xadvance: i16,
}

impl GlyphRecord {
    /// Placeholder for a code point with no glyph inside a slice
    pub const ABSENT: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
        xoffset: 0,
        yoffset: 0,
        xadvance: 0,
    };

    /// Whether a lookup treats this record as a missing glyph.
    ///
    /// A real glyph with no width and no advance is indistinguishable from
    /// the absent sentinel.
    pub const fn is_absent(&self) -> bool {
        self.width == 0 && self.xadvance == 0
    }
}

impl From<&GlyphMetric> for GlyphRecord {
    fn from(glyph: &GlyphMetric) -> Self {
        Self {
            x: glyph.x,
            y: glyph.y,
            width: glyph.width,
            height: glyph.height,
            xoffset: glyph.xoffset,
            yoffset: glyph.yoffset,
            xadvance: glyph.xadvance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    start: u32,
    end: u32,

    /// Indexed by `code_point - start`
    records: Vec<GlyphRecord>,

    /// Number of records that came from the font rather than gap filling
    glyphs: u32,
}

impl Slice {
    fn new(glyph: &GlyphMetric) -> Self {
        Self {
            start: glyph.id,
            end: glyph.id,
            records: vec![GlyphRecord::from(glyph)],
            glyphs: 1,
        }
    }

    /// Extends the slice up to `glyph.id`, filling the gap with absent records
    fn append(&mut self, glyph: &GlyphMetric) {
        debug_assert!(self.end < glyph.id);

        for gap in self.end + 1..glyph.id {
            log::trace!("filling gap at {}", gap);
            self.records.push(GlyphRecord::ABSENT);
        }

        self.records.push(GlyphRecord::from(glyph));
        self.end = glyph.id;
        self.glyphs += 1;
    }

    pub const fn start(&self) -> u32 {
        self.start
    }

    pub const fn end(&self) -> u32 {
        self.end
    }

    pub fn records(&self) -> &[GlyphRecord] {
        &self.records
    }

    pub const fn glyph_count(&self) -> u32 {
        self.glyphs
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    pub fn occupancy(&self) -> f64 {
        f64::from(self.glyphs) / self.capacity() as f64
    }

    fn tolerates(&self, id: u32) -> bool {
        let left = self.start.saturating_sub(TOLERANCE);
        let right = self.end.saturating_add(TOLERANCE);

        (left..=right).contains(&id)
    }

    /// Every slot of the slice with the code point it stands for
    pub fn code_points(&self) -> impl Iterator<Item = (u32, &GlyphRecord)> {
        (self.start..=self.end).zip(self.records.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledFont {
    slices: Vec<Slice>,
}

impl CompiledFont {
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Total number of records across all slices, including gap fillers
    pub fn record_count(&self) -> usize {
        self.slices.iter().map(Slice::capacity).sum()
    }

    pub fn glyph_count(&self) -> usize {
        self.slices.iter().map(|s| s.glyphs as usize).sum()
    }
}

/// Single-pass slice builder. Glyphs must be pushed in strictly ascending
/// code point order.
#[derive(Debug, Default)]
pub struct RangeCompiler {
    slices: Vec<Slice>,
    last_id: Option<u32>,
}

impl RangeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, glyph: &GlyphMetric) -> BmFontResult<()> {
        let id = glyph.id;

        if let Some(previous) = self.last_id {
            if id <= previous {
                anyhow::bail!(BmFontError::UnsortedCodePoints {
                    previous,
                    found: id,
                });
            }
        }
        self.last_id = Some(id);

        // ids ascend, so only the newest slice can still be extended
        match self.slices.last_mut() {
            Some(slice) if slice.tolerates(id) => slice.append(glyph),
            last => {
                if let Some(finished) = last {
                    log::debug!("closed slice: {} - {}", finished.start, finished.end);
                }

                self.slices.push(Slice::new(glyph));
            }
        }

        Ok(())
    }

    pub fn extend<'a>(
        &mut self,
        glyphs: impl IntoIterator<Item = &'a GlyphMetric>,
    ) -> BmFontResult<()> {
        for glyph in glyphs {
            self.push(glyph)?;
        }

        Ok(())
    }

    pub fn finish(self) -> CompiledFont {
        log::info!("generated {} slices:", self.slices.len());

        for (i, slice) in self.slices.iter().enumerate() {
            log::info!(
                "- range {}: {} - {} ({}/{} -> {:.2}%)",
                i,
                slice.start,
                slice.end,
                slice.glyphs,
                slice.capacity(),
                slice.occupancy() * 100.0
            );

            if slice.occupancy() < LOW_OCCUPANCY {
                log::warn!("range {} is mostly padding", i);
            }
        }

        CompiledFont {
            slices: self.slices,
        }
    }
}

/// Compiles a full glyph array in one call
pub fn compile(glyphs: &[GlyphMetric]) -> BmFontResult<CompiledFont> {
    let mut compiler = RangeCompiler::new();
    compiler.extend(glyphs)?;

    Ok(compiler.finish())
}
