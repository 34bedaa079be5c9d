use crate::{error::BmFontResult, parse_binary::BinaryParser};

use super::PayloadParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonMetrics {
    /// Distance in pixels between each line of text
    pub line_height: u16,

    /// Number of pixels from the absolute top of the line to the base of the characters
    pub base: u16,

    /// Width of the texture
    pub scale_w: u16,

    /// Height of the texture
    pub scale_h: u16,

    pub pages: u16,

    /// Set if the monochrome characters have been packed into each of the
    /// texture channels
    pub packed: bool,

    pub alpha_chnl: u8,
    pub red_chnl: u8,
    pub green_chnl: u8,
    pub blue_chnl: u8,
}

pub fn decode_common(payload: &[u8]) -> BmFontResult<CommonMetrics> {
    let mut parser = PayloadParser::new(payload);

    Ok(CommonMetrics {
        line_height: parser.parse_u16()?,
        base: parser.parse_u16()?,
        scale_w: parser.parse_u16()?,
        scale_h: parser.parse_u16()?,
        pages: parser.parse_u16()?,
        // bits 0-6 reserved, bit 7 (least significant) packed
        packed: parser.parse_u8()? & 1 != 0,
        alpha_chnl: parser.parse_u8()?,
        red_chnl: parser.parse_u8()?,
        green_chnl: parser.parse_u8()?,
        blue_chnl: parser.parse_u8()?,
    })
}
