//! Error types for huffpack

use thiserror::Error;

/// Malformations detected while parsing a container or decoding its
/// bit stream. Never produced by the compression path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("container too small: {0} bytes, need at least 9")]
    ContainerTooSmall(usize),

    #[error("magic marker mismatch")]
    BadMagic,

    #[error("declared tree length {declared} exceeds the {available} bytes available")]
    TreeLengthOverrun { declared: usize, available: usize },

    #[error("padding count {0} out of range 0..=7")]
    InvalidPadding(u8),

    #[error("tree blob truncated at offset {0}")]
    TruncatedTree(usize),

    #[error("invalid tree tag {tag:#04x} at offset {offset}")]
    InvalidTreeTag { tag: u8, offset: usize },

    #[error("{0} trailing bytes after a complete tree")]
    TrailingTreeBytes(usize),

    #[error("tree nests deeper than a 256-symbol alphabet allows")]
    TreeTooDeep,

    #[error("padding count {pad} exceeds the {bits}-bit stream")]
    PaddingOverrun { pad: u8, bits: u64 },

    #[error("corrupt bit stream: walk ended inside a code")]
    CorruptBitStream,
}

/// Top-level error for compress/decompress calls.
#[derive(Error, Debug)]
pub enum CompressError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("symbol {0:#04x} missing from the code table")]
    MissingCode(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
