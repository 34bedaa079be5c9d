use std::fmt;

use crate::block::BlockKind;

pub type BmFontResult<T> = anyhow::Result<T>;

/// Coarse classification of a [`BmFontError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream could not be opened, read, or written
    Io,

    /// The container is malformed
    Protocol,

    /// The glyph data breaks an ordering precondition the lookup table relies on
    ContractViolation,

    /// An internal buffer could not be allocated
    Resource,
}

#[derive(Debug)]
pub enum BmFontError {
    /// A read returned fewer bytes than required
    UnexpectedEof {
        operation: &'static str,
        expected: usize,
        found: usize,
    },
    InvalidSignature {
        found: [u8; 3],
    },
    UnsupportedVersion {
        found: u8,
    },
    UnknownBlockKind {
        found: u8,
    },
    BlockTooSmall {
        kind: BlockKind,
        size: u32,
        min_size: usize,
    },
    MisalignedCharsBlock {
        size: usize,
        record_size: usize,
    },
    DuplicateBlock {
        kind: BlockKind,
    },
    MissingBlock {
        kind: BlockKind,
    },
    TooManyPages {
        declared: u16,
        found: usize,
    },
    UnsupportedPageImage {
        reason: &'static str,
    },
    EmptyPageName {
        index: usize,
    },
    PageWidthNotByteAligned {
        width: usize,
    },
    PageDataLength {
        expected: usize,
        found: usize,
    },

    /// Code points must be strictly ascending for the binary search to be correct
    UnsortedCodePoints {
        previous: u32,
        found: u32,
    },

    AllocationFailed {
        size: usize,
    },

    /// The slice count of the emitted font record is a `uint16_t`
    TooManySlices {
        count: usize,
    },
}

impl BmFontError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedEof { .. } => ErrorKind::Io,
            Self::InvalidSignature { .. }
            | Self::UnsupportedVersion { .. }
            | Self::UnknownBlockKind { .. }
            | Self::BlockTooSmall { .. }
            | Self::MisalignedCharsBlock { .. }
            | Self::DuplicateBlock { .. }
            | Self::MissingBlock { .. }
            | Self::TooManyPages { .. }
            | Self::UnsupportedPageImage { .. }
            | Self::EmptyPageName { .. }
            | Self::TooManySlices { .. }
            | Self::PageWidthNotByteAligned { .. }
            | Self::PageDataLength { .. } => ErrorKind::Protocol,
            Self::UnsortedCodePoints { .. } => ErrorKind::ContractViolation,
            Self::AllocationFailed { .. } => ErrorKind::Resource,
        }
    }
}

/// Classifies an error produced anywhere in the crate. Errors that did not
/// originate as a [`BmFontError`] are I/O failures from the underlying
/// stream or image decoder.
pub fn error_kind(err: &anyhow::Error) -> ErrorKind {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<BmFontError>())
        .map_or(ErrorKind::Io, BmFontError::kind)
}

impl fmt::Display for BmFontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                operation,
                expected,
                found,
            } => write!(
                f,
                "unexpected end of file while reading {} (read: {}b, expected: {}b)",
                operation, found, expected
            ),
            Self::InvalidSignature { found } => {
                write!(f, "invalid signature {:?}", String::from_utf8_lossy(found))
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported font version ({})", found)
            }
            Self::UnknownBlockKind { found } => write!(f, "unknown block id {}", found),
            Self::BlockTooSmall {
                kind,
                size,
                min_size,
            } => write!(
                f,
                "block size too small for {:?} (size: {}b, expected: >={}b)",
                kind, size, min_size
            ),
            Self::MisalignedCharsBlock { size, record_size } => write!(
                f,
                "chars block size is not a multiple of the record size (size: {}b, record: {}b)",
                size, record_size
            ),
            Self::DuplicateBlock { kind } => write!(f, "duplicate {:?} block", kind),
            Self::MissingBlock { kind } => write!(f, "missing {:?} block", kind),
            Self::TooManyPages { declared, found } => write!(
                f,
                "found {} page names but the common block declares {}",
                found, declared
            ),
            Self::UnsupportedPageImage { reason } => {
                write!(f, "unsupported page image: {}", reason)
            }
            Self::EmptyPageName { index } => write!(f, "page {} has an empty file name", index),
            Self::PageWidthNotByteAligned { width } => write!(
                f,
                "page width must be a multiple of 8 (width: {}px)",
                width
            ),
            Self::PageDataLength { expected, found } => write!(
                f,
                "page pixel buffer has the wrong length (length: {}b, expected: {}b)",
                found, expected
            ),
            Self::UnsortedCodePoints { previous, found } => write!(
                f,
                "chars are not sorted in ascending order (code point {} follows {})",
                found, previous
            ),
            Self::AllocationFailed { size } => {
                write!(f, "not enough memory to allocate buffer (size: {}b)", size)
            }
            Self::TooManySlices { count } => write!(
                f,
                "too many slices for the font record (count: {}, max: {})",
                count,
                u16::MAX
            ),
        }
    }
}

impl std::error::Error for BmFontError {}
