use super::*;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Gray = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data. There may optionally be a transparency
  /// chunk.
  Indexed = 3,
  /// Greyscale + Alpha
  GrayAlpha = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of samples per pixel in this type of color.
  #[inline]
  #[must_use]
  pub const fn scanline_components(self) -> usize {
    match self {
      Self::Gray => 1,
      Self::RGB => 3,
      Self::Indexed => 1,
      Self::GrayAlpha => 2,
      Self::RGBA => 4,
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Gray,
      2 => PngColorType::RGB,
      3 => PngColorType::Indexed,
      4 => PngColorType::GrayAlpha,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::Format("unknown color type")),
    })
  }
}

/// Zlib is the only compression method PNG has ever defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompressionMethod {
  Zlib,
}

/// Adaptive filtering (a filter type byte per scanline) is the only filter
/// method PNG has ever defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterMethod {
  Adaptive,
}

/// How the scanlines are ordered within the image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InterlaceMethod {
  None,
  /// Seven reduced images. Not supported by the pixel decoder.
  Adam7,
}

/// `IHDR`: Image header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per sample. Checked against the color type only when pixels are
  /// requested.
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  pub compression_method: CompressionMethod,
  pub filter_method: FilterMethod,
  pub interlace_method: InterlaceMethod,
}
impl IHDR {
  /// Number of bytes in one filtered scanline, including the leading filter
  /// type byte.
  ///
  /// Pass 0 is the full image. Passes 1 through 7 would be the Adam7 reduced
  /// images, which aren't supported, so they're an error rather than a wrong
  /// answer.
  pub fn scanline_length(&self, pass: u8) -> PngResult<usize> {
    match (pass, self.interlace_method) {
      (0, _) => {}
      (_, InterlaceMethod::Adam7) => {
        return Err(PngError::UnsupportedFeature("Adam7 interlaced scanlines"))
      }
      (_, InterlaceMethod::None) => {
        return Err(PngError::Format("interlace pass on a non-interlaced image"))
      }
    }
    let bits_per_line = (self.width as usize)
      .checked_mul(self.bits_per_pixel())
      .ok_or(PngError::Format("image width overflows"))?;
    Ok(1 + (bits_per_line + 7) / 8)
  }

  /// Bits in a single pixel (all samples).
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.scanline_components()
  }

  /// The distance, in bytes, between a byte and its "left neighbor" when
  /// unfiltering.
  ///
  /// Pixels smaller than a byte still use a distance of 1.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    let bytes = self.bits_per_pixel() / 8;
    if bytes == 0 {
      1
    } else {
      bytes
    }
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match *value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        Ok(Self {
          width: u32::from_be_bytes([w0, w1, w2, w3]),
          height: u32::from_be_bytes([h0, h1, h2, h3]),
          bit_depth,
          color_type: PngColorType::try_from(color_type)?,
          compression_method: match compression_method {
            0 => CompressionMethod::Zlib,
            _ => return Err(PngError::Format("unknown compression method")),
          },
          filter_method: match filter_method {
            0 => FilterMethod::Adaptive,
            _ => return Err(PngError::Format("unknown filter method")),
          },
          interlace_method: match interlace_method {
            0 => InterlaceMethod::None,
            1 => InterlaceMethod::Adam7,
            _ => return Err(PngError::Format("unknown interlace method")),
          },
        })
      }
      _ => Err(PngError::Format("IHDR must be 13 bytes")),
    }
  }
}
