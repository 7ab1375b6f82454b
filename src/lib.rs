#![forbid(unsafe_code)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for decoding PNG data into 8-bit RGB or RGBA pixel buffers.
//!
//! The decoder walks the PNG chunk container, feeds every `IDAT` chunk into a
//! single zlib stream, then unfilters and unpacks each scanline into a
//! [`Pixbuf`]. Text, time, and color profile chunks are also decoded so that
//! callers can pull metadata out of the same chunk list.
//!
//! ```no_run
//! let pixbuf = pngcore::png::decode_file("photo.png")?;
//! println!("{}x{} alpha:{}", pixbuf.width, pixbuf.height, pixbuf.has_alpha);
//! # Ok::<(), pngcore::png::PngError>(())
//! ```

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod pixel_formats;
pub use pixel_formats::*;

pub mod ascii_array;
pub use ascii_array::*;

pub mod bit_depth_changes;
pub use bit_depth_changes::*;

pub mod pixbuf;
pub use pixbuf::*;

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod png;
