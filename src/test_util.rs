//! Builders for synthetic containers used across the unit tests

use crate::block::{BlockKind, FontInfo, GlyphMetric, InfoFlags, SIGNATURE, SUPPORTED_VERSION};

pub struct ContainerBuilder {
    bytes: Vec<u8>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        let mut bytes = SIGNATURE.to_vec();
        bytes.push(SUPPORTED_VERSION);

        Self { bytes }
    }

    pub fn block(mut self, kind: BlockKind, payload: &[u8]) -> Self {
        self.bytes.push(kind as u8);
        self.bytes
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.bytes.extend_from_slice(payload);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// A glyph with non-zero, id-dependent metrics
pub fn glyph(id: u32) -> GlyphMetric {
    GlyphMetric {
        id,
        x: (id % 256) as u16,
        y: (id / 256 % 256) as u16,
        width: (id % 11 + 1) as u16,
        height: 12,
        xoffset: -((id % 3) as i16),
        yoffset: (id % 5) as i16,
        xadvance: (id % 7 + 4) as i16,
        page: 0,
        chnl: 15,
    }
}

pub fn glyph_bytes(glyph: &GlyphMetric) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&glyph.id.to_le_bytes());
    bytes.extend_from_slice(&glyph.x.to_le_bytes());
    bytes.extend_from_slice(&glyph.y.to_le_bytes());
    bytes.extend_from_slice(&glyph.width.to_le_bytes());
    bytes.extend_from_slice(&glyph.height.to_le_bytes());
    bytes.extend_from_slice(&glyph.xoffset.to_le_bytes());
    bytes.extend_from_slice(&glyph.yoffset.to_le_bytes());
    bytes.extend_from_slice(&glyph.xadvance.to_le_bytes());
    bytes.push(glyph.page);
    bytes.push(glyph.chnl);
    bytes
}

pub fn chars_bytes(ids: &[u32]) -> Vec<u8> {
    ids.iter().flat_map(|&id| glyph_bytes(&glyph(id))).collect()
}

pub fn info(name: &str) -> FontInfo {
    FontInfo {
        font_size: 12,
        flags: InfoFlags(0),
        charset: 0,
        stretch_h: 100,
        aa: 1,
        padding_up: 0,
        padding_right: 0,
        padding_down: 0,
        padding_left: 0,
        spacing_horiz: 1,
        spacing_vert: 1,
        outline: 0,
        font_name: name.to_owned(),
    }
}

pub fn info_bytes(name: &str, size: i16) -> Vec<u8> {
    let mut bytes = size.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0, 0, 100, 0, 1, 0, 0, 0, 0, 1, 1, 0]);
    bytes.extend_from_slice(name.as_bytes());
    bytes.push(b'\0');
    bytes
}

/// A common block for 16x8 pages
pub fn common_bytes(pages: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&10u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(&pages.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 4, 4, 4]);
    bytes
}
