//! Module for pixel formats.
//!
//! The decoder always produces 8 bits per channel, so only the two 8-bit
//! layouts are needed here:
//! * [`RGB8`] is what a PNG palette entry holds, and what an opaque
//!   [`Pixbuf`](crate::Pixbuf) stores per pixel.
//! * [`RGBA8`] is what a [`Pixbuf`](crate::Pixbuf) with alpha stores per
//!   pixel.
//!
//! ## Between Bit Depths
//! When the source data has fewer than 8 bits per channel, the value is used
//! as the top bits and then the bit pattern is copied down until all 8 bits
//! are filled in (see
//! [`rescale_sample_to_8`](crate::rescale_sample_to_8)). When the
//! source has 16 bits per channel only the high byte is kept.

use bytemuck::{Pod, Zeroable};

/// An RGB value, 8-bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// An 8-bits per channel RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl From<RGB8> for RGBA8 {
  #[inline]
  #[must_use]
  fn from(RGB8 { r, g, b }: RGB8) -> Self {
    Self { r, g, b, a: u8::MAX }
  }
}
