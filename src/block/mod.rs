//! Framing of the binary BMFont container into typed, length-prefixed blocks
//!
//! <https://www.angelcode.com/products/bmfont/doc/file_format.html#bin>

use std::io::{self, Read};

use anyhow::Context;

use crate::{
    error::{BmFontError, BmFontResult},
    parse_binary::BinaryParser,
};

mod chars;
mod common;
mod info;
mod kerning;
mod pages;

pub use chars::{decode_chars, GlyphMetric, GLYPH_METRIC_SIZE};
pub use common::{decode_common, CommonMetrics};
pub use info::{decode_info, FontInfo, InfoFlags};
pub use kerning::decode_kerning;
pub use pages::decode_pages;

pub const SIGNATURE: [u8; 3] = *b"BMF";
pub const SUPPORTED_VERSION: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Info = 1,
    Common = 2,
    Pages = 3,
    Chars = 4,
    Kerning = 5,
}

impl BlockKind {
    pub const fn from_u8(b: u8) -> Option<Self> {
        Some(match b {
            1 => Self::Info,
            2 => Self::Common,
            3 => Self::Pages,
            4 => Self::Chars,
            5 => Self::Kerning,
            _ => return None,
        })
    }

    /// Smallest payload a well-formed block of this kind can have
    pub const fn min_size(self) -> usize {
        match self {
            Self::Info => 15,
            Self::Common => 15,
            Self::Pages => 1,
            Self::Chars => GLYPH_METRIC_SIZE,
            Self::Kerning => 1,
        }
    }
}

#[derive(Debug)]
pub struct Block {
    pub kind: BlockKind,
    pub payload: Vec<u8>,
}

/// Reads blocks sequentially from a container stream
pub struct BlockReader<R> {
    reader: R,
}

impl<R: Read> BlockReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Validates the signature and version. Must be called before the first
    /// call to [`BlockReader::next_block`].
    pub fn read_header(&mut self) -> BmFontResult<()> {
        let mut signature = [0; 3];
        self.read_fully(&mut signature, "signature")?;

        if signature != SIGNATURE {
            anyhow::bail!(BmFontError::InvalidSignature { found: signature });
        }

        let mut version = [0; 1];
        self.read_fully(&mut version, "version")?;

        if version[0] != SUPPORTED_VERSION {
            anyhow::bail!(BmFontError::UnsupportedVersion { found: version[0] });
        }

        Ok(())
    }

    /// Returns `None` at a clean end of stream
    pub fn next_block(&mut self) -> BmFontResult<Option<Block>> {
        let mut tag = [0; 1];
        if self.read_some(&mut tag, "block kind")? == 0 {
            return Ok(None);
        }

        let kind = match BlockKind::from_u8(tag[0]) {
            Some(kind) => kind,
            None => anyhow::bail!(BmFontError::UnknownBlockKind { found: tag[0] }),
        };

        let mut size = [0; 4];
        self.read_fully(&mut size, "block size")?;
        let size = u32::from_le_bytes(size);

        if (size as usize) < kind.min_size() {
            anyhow::bail!(BmFontError::BlockTooSmall {
                kind,
                size,
                min_size: kind.min_size(),
            });
        }

        let mut payload = Vec::new();
        if payload.try_reserve_exact(size as usize).is_err() {
            anyhow::bail!(BmFontError::AllocationFailed {
                size: size as usize
            });
        }

        // only the bytes actually present are written, whatever the declared size
        (&mut self.reader)
            .take(u64::from(size))
            .read_to_end(&mut payload)
            .context("failed to read block payload")?;

        if payload.len() != size as usize {
            anyhow::bail!(BmFontError::UnexpectedEof {
                operation: "block payload",
                expected: size as usize,
                found: payload.len(),
            });
        }

        log::debug!("read {:?} block ({}b)", kind, size);

        Ok(Some(Block { kind, payload }))
    }

    fn read_some(&mut self, buf: &mut [u8], operation: &'static str) -> BmFontResult<usize> {
        let mut total = 0;

        while total < buf.len() {
            match self.reader.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).with_context(|| format!("failed to read {}", operation)),
            }
        }

        Ok(total)
    }

    fn read_fully(&mut self, buf: &mut [u8], operation: &'static str) -> BmFontResult<()> {
        let found = self.read_some(buf, operation)?;

        if found != buf.len() {
            anyhow::bail!(BmFontError::UnexpectedEof {
                operation,
                expected: buf.len(),
                found,
            });
        }

        Ok(())
    }
}

/// Cursor over a single block's payload
pub(crate) struct PayloadParser<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> PayloadParser<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }
}

impl BinaryParser for PayloadParser<'_> {
    fn buffer(&self) -> &[u8] {
        self.buffer
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn cursor_mut(&mut self) -> &mut usize {
        &mut self.cursor
    }
}
