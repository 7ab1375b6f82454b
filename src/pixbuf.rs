//! Provides the heap-allocated pixel buffer that decoding produces.

use crate::pixel_formats::{RGB8, RGBA8};

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// pixel index.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// An 8-bits per channel image, either RGB or RGBA.
///
/// * Pixels are stored row-major, top row first.
/// * Each pixel is 3 bytes (`r, g, b`) or, when `has_alpha` is set, 4 bytes
///   (`r, g, b, a`).
/// * Rows are tightly packed, so `row_stride` is always `width *
///   bytes_per_pixel`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pixbuf {
  pub width: u32,
  pub height: u32,
  pub row_stride: usize,
  pub has_alpha: bool,
  pub pixels: Vec<u8>,
}
impl Pixbuf {
  /// The number of bytes each pixel takes up (3 or 4).
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    if self.has_alpha {
      4
    } else {
      3
    }
  }

  /// Gets one row of pixel bytes, or `None` if `y` is out of bounds.
  #[inline]
  #[must_use]
  pub fn row(&self, y: u32) -> Option<&[u8]> {
    if y < self.height {
      let start = (y as usize) * self.row_stride;
      self.pixels.get(start..start + self.row_stride)
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  ///
  /// Images without alpha report an alpha of 255.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<RGBA8> {
    if x < self.width && y < self.height {
      let bpp = self.bytes_per_pixel();
      let i = xy_width_to_index(x, y, self.width) * bpp;
      match self.pixels.get(i..i + bpp)? {
        [r, g, b] => Some(RGB8 { r: *r, g: *g, b: *b }.into()),
        [r, g, b, a] => Some(RGBA8 { r: *r, g: *g, b: *b, a: *a }),
        _ => None,
      }
    } else {
      None
    }
  }
}

#[test]
fn test_pixbuf_get() {
  let rgb = Pixbuf {
    width: 2,
    height: 1,
    row_stride: 6,
    has_alpha: false,
    pixels: vec![1, 2, 3, 4, 5, 6],
  };
  assert_eq!(rgb.get(1, 0), Some(RGBA8 { r: 4, g: 5, b: 6, a: 255 }));
  assert_eq!(rgb.get(2, 0), None);
  assert_eq!(rgb.row(0), Some(&[1, 2, 3, 4, 5, 6][..]));
  assert_eq!(rgb.row(1), None);

  let rgba = Pixbuf {
    width: 1,
    height: 2,
    row_stride: 4,
    has_alpha: true,
    pixels: vec![1, 2, 3, 4, 5, 6, 7, 8],
  };
  assert_eq!(rgba.get(0, 1), Some(RGBA8 { r: 5, g: 6, b: 7, a: 8 }));
}
