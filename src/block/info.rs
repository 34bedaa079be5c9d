use crate::{error::BmFontResult, parse_binary::BinaryParser};

use super::PayloadParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    pub font_size: i16,
    pub flags: InfoFlags,
    pub charset: u8,

    /// Font height stretch in percent; 100 means no stretch
    pub stretch_h: u16,

    /// Supersampling level used, 1 means no supersampling
    pub aa: u8,

    pub padding_up: u8,
    pub padding_right: u8,
    pub padding_down: u8,
    pub padding_left: u8,
    pub spacing_horiz: u8,
    pub spacing_vert: u8,
    pub outline: u8,
    pub font_name: String,
}

/// Bit 0 in the format's numbering is the most significant bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoFlags(pub u8);

impl InfoFlags {
    const SMOOTH: u8 = 1 << 7;
    const UNICODE: u8 = 1 << 6;
    const ITALIC: u8 = 1 << 5;
    const BOLD: u8 = 1 << 4;
    const FIXED_HEIGHT: u8 = 1 << 3;

    pub const fn smooth(self) -> bool {
        self.0 & Self::SMOOTH != 0
    }

    pub const fn unicode(self) -> bool {
        self.0 & Self::UNICODE != 0
    }

    pub const fn italic(self) -> bool {
        self.0 & Self::ITALIC != 0
    }

    pub const fn bold(self) -> bool {
        self.0 & Self::BOLD != 0
    }

    pub const fn fixed_height(self) -> bool {
        self.0 & Self::FIXED_HEIGHT != 0
    }
}

pub fn decode_info(payload: &[u8]) -> BmFontResult<FontInfo> {
    let mut parser = PayloadParser::new(payload);

    Ok(FontInfo {
        font_size: parser.parse_i16()?,
        flags: InfoFlags(parser.parse_u8()?),
        charset: parser.parse_u8()?,
        stretch_h: parser.parse_u16()?,
        aa: parser.parse_u8()?,
        padding_up: parser.parse_u8()?,
        padding_right: parser.parse_u8()?,
        padding_down: parser.parse_u8()?,
        padding_left: parser.parse_u8()?,
        spacing_horiz: parser.parse_u8()?,
        spacing_vert: parser.parse_u8()?,
        outline: parser.parse_u8()?,
        font_name: parser.parse_cstr(),
    })
}
