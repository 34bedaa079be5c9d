use crate::{
    error::{BmFontError, BmFontResult},
    parse_binary::BinaryParser,
};

use super::PayloadParser;

/// Size of a single glyph record inside a chars block
pub const GLYPH_METRIC_SIZE: usize = 4 + 2 + 2 + 2 + 2 + 2 + 2 + 2 + 1 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetric {
    pub id: u32,

    /// Left position of the glyph image in the texture
    pub x: u16,

    /// Top position of the glyph image in the texture
    pub y: u16,

    pub width: u16,
    pub height: u16,

    /// How much the current position should be offset when copying the image
    /// from the texture to the screen
    pub xoffset: i16,
    pub yoffset: i16,

    /// How much the current position should be advanced after drawing the glyph
    pub xadvance: i16,

    /// Texture page where the glyph image is found
    pub page: u8,

    /// Texture channel where the glyph is found (1 = blue, 2 = green,
    /// 4 = red, 8 = alpha, 15 = all channels)
    pub chnl: u8,
}

pub fn decode_chars(payload: &[u8]) -> BmFontResult<Vec<GlyphMetric>> {
    if payload.len() % GLYPH_METRIC_SIZE != 0 {
        anyhow::bail!(BmFontError::MisalignedCharsBlock {
            size: payload.len(),
            record_size: GLYPH_METRIC_SIZE,
        });
    }

    let mut parser = PayloadParser::new(payload);
    let mut glyphs = Vec::with_capacity(payload.len() / GLYPH_METRIC_SIZE);

    while parser.remaining() > 0 {
        glyphs.push(GlyphMetric {
            id: parser.parse_u32()?,
            x: parser.parse_u16()?,
            y: parser.parse_u16()?,
            width: parser.parse_u16()?,
            height: parser.parse_u16()?,
            xoffset: parser.parse_i16()?,
            yoffset: parser.parse_i16()?,
            xadvance: parser.parse_i16()?,
            page: parser.parse_u8()?,
            chnl: parser.parse_u8()?,
        });
    }

    Ok(glyphs)
}
