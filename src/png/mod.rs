//! Holds all the tools for decoding PNG data.
//!
//! ## Automated PNG Decoding
//! If you just want the pixels, [`decode_file`] takes a path and gives back a
//! [`Pixbuf`] of 8-bit RGB or RGBA pixels. For any other source of bytes make
//! a [`PngDecoder`] around a [`Read`](std::io::Read) and call
//! [`get_pixbuf`](PngDecoder::get_pixbuf).
//!
//! ```no_run
//! use pngcore::png::*;
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let mut decoder = PngDecoder::new(bytes);
//! let pixbuf = decoder.get_pixbuf()?;
//! let title = decoder.lookup_text("Title")?;
//! # Ok::<(), PngError>(())
//! ```
//!
//! ## How The Data Is Laid Out
//! A PNG is an 8 byte signature followed by "chunks". Each chunk is a big
//! endian length, a 4 byte tag, the payload, and a CRC of the tag and payload.
//! There's four "critical" chunk types:
//! * **Header** ([`IHDR`]) - The image's dimensions, pixel format, and if the
//!   image is interlaced or not.
//! * **Palette** ([`PLTE`]) - If an image uses indexed color it will have a
//!   palette of what index values map to what `RGB8` values.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream, see
//!   [`ChunkInflater`].
//! * **End** (`IEND`) - The last chunk, lets you know you had the full PNG and
//!   your data wasn't truncated accidentally.
//!
//! Everything else is "ancillary": transparency ([`tRNS`]), text
//! ([`TextChunk`], [`iTXt`]), the modification time ([`tIME`]), color space
//! info, and so on.
//!
//! When storing the PNG, the raw pixel values are first "filtered" (to try and
//! make them more compression-friendly), and then compressed into a zlib data
//! stream. To decode the PNG you reverse the operations: decompress, then
//! unfilter each scanline (see [`ScanlineDecoder`]), then unpack the samples
//! into whole pixels.
//!
//! If you want to look at the chunks of some bytes already in memory without
//! any decoding, use [`RawPngChunkIter`].

use core::fmt::Debug;

use log::{debug, trace, warn};

use crate::*;

mod error;
pub use error::*;

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod trns;
pub use trns::*;

mod text;
pub use text::*;

mod time;
pub use time::*;

mod iccp;
pub use iccp::*;

mod chunks;
pub use chunks::*;

mod reader;
pub use reader::*;

mod inflater;
pub use inflater::*;

mod unfilter;
pub use unfilter::*;

mod scanline;
pub use scanline::*;

mod unpack;
pub use unpack::*;

mod decoder;
pub use decoder::*;

#[cfg(test)]
mod tests;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  if bytes.len() < 8 {
    return false;
  }
  let mut i = 0;
  while i < 8 {
    if bytes[i] != PNG_SIGNATURE[i] {
      return false;
    }
    i += 1;
  }
  true
}

/// What to do when a chunk's declared CRC doesn't match its bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrcCheck {
  /// Don't even compute it.
  Ignore,
  /// Log a warning and keep going.
  #[default]
  Warn,
  /// Stop with [`PngError::CrcMismatch`].
  Error,
}

/// Settings for reading a PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  pub crc_check: CrcCheck,
  /// Any chunk declaring a longer payload is rejected before anything is
  /// allocated for it.
  pub max_chunk_len: u32,
  /// Images with more pixels than this are rejected before their pixel
  /// data is touched. The default allows up to 17,000 by 17,000.
  pub max_pixels: u64,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self {
      crc_check: CrcCheck::default(),
      max_chunk_len: 0x7FFF_FFFF,
      max_pixels: 17_000 * 17_000,
    }
  }
}
