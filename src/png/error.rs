use std::collections::TryReserveError;

use miniz_oxide::MZError;

use super::PngChunkType;

/// Result alias for everything in the [`png`](crate::png) module.
pub type PngResult<T> = Result<T, PngError>;

/// An error from decoding PNG data.
#[derive(Debug, thiserror::Error)]
pub enum PngError {
  /// The data isn't shaped like a PNG: a bad signature, an unknown method
  /// value in the header, or a chunk payload that doesn't parse.
  #[error("malformed PNG: {0}")]
  Format(&'static str),

  /// The data is valid PNG, but uses something this decoder doesn't do.
  #[error("unsupported PNG feature: {0}")]
  UnsupportedFeature(&'static str),

  /// The header's color type and bit depth pair can't be unpacked.
  #[error("unsupported color type {color_type} with bit depth {bit_depth}")]
  UnsupportedColorType { color_type: u8, bit_depth: u8 },

  /// The stream ended partway through the chunk container.
  #[error("PNG data truncated while reading {what}")]
  Truncated { what: &'static str },

  /// The image data stream ended before all scanlines were filled.
  #[error("image data ended early: row {row} needed {expected} bytes but only {produced} were inflated")]
  ShortInflate { row: u32, expected: usize, produced: usize },

  /// The zlib data couldn't be decompressed.
  #[error("zlib decompression failed: {0:?}")]
  Inflate(MZError),

  /// A chunk's declared CRC didn't match the computed one.
  #[error("CRC mismatch in {chunk} chunk: declared {declared:#010X}, actual {actual:#010X}")]
  CrcMismatch { chunk: PngChunkType, declared: u32, actual: u32 },

  /// A chunk declared a length over the configured limit.
  #[error("{chunk} chunk length {len} exceeds the limit")]
  ChunkTooLarge { chunk: PngChunkType, len: u32 },

  /// The image has more pixels than the configured `max_pixels`.
  #[error("image dimensions {width}x{height} exceed the pixel limit")]
  DimensionsTooLarge { width: u32, height: u32 },

  /// The allocator couldn't give us enough space.
  #[error("allocation failed")]
  Alloc,

  /// The underlying stream failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
impl From<TryReserveError> for PngError {
  #[inline]
  fn from(_: TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<MZError> for PngError {
  #[inline]
  fn from(e: MZError) -> Self {
    Self::Inflate(e)
  }
}
