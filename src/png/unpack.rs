use super::*;

/// Turns reconstructed scanlines into 8-bit RGB or RGBA pixels.
///
/// Picked once per image from the header's color type and bit depth, then
/// run on each line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelUnpacker<'p> {
  /// Palette indexes of 1, 2, 4, or 8 bits. `alphas` is the `tRNS` table, if
  /// any, and an image with one gets an alpha channel.
  Indexed { depth: u8, palette: &'p PLTE, alphas: Option<Vec<u8>> },
  /// Gray (and maybe alpha) samples of 1, 2, 4, or 8 bits.
  Gray { depth: u8, alpha: bool },
  /// Gray (and maybe alpha) samples of 16 bits.
  Gray16 { alpha: bool },
  /// RGB (and maybe alpha) samples of 8 bits.
  Rgb8 { alpha: bool },
  /// RGB (and maybe alpha) samples of 16 bits.
  Rgb16 { alpha: bool },
}
impl<'p> PixelUnpacker<'p> {
  /// Picks the unpacker for an image.
  ///
  /// ## Failure
  /// * [`PngError::UnsupportedColorType`] if the color type and bit depth
  ///   aren't a pair this can unpack.
  /// * [`PngError::Format`] if the image is indexed but there's no palette.
  pub fn new(ihdr: &IHDR, palette: Option<&'p PLTE>, trns: Option<&tRNS>) -> PngResult<Self> {
    use PngColorType::*;
    let unsupported = PngError::UnsupportedColorType {
      color_type: ihdr.color_type as u8,
      bit_depth: ihdr.bit_depth,
    };
    Ok(match (ihdr.color_type, ihdr.bit_depth) {
      (Indexed, depth @ (1 | 2 | 4 | 8)) => PixelUnpacker::Indexed {
        depth,
        palette: palette.ok_or(PngError::Format("indexed color image has no PLTE"))?,
        alphas: trns.map(tRNS::to_alphas),
      },
      (Gray, depth @ (1 | 2 | 4 | 8)) => PixelUnpacker::Gray { depth, alpha: false },
      (GrayAlpha, depth @ (1 | 2 | 4 | 8)) => PixelUnpacker::Gray { depth, alpha: true },
      (Gray, 16) => PixelUnpacker::Gray16 { alpha: false },
      (GrayAlpha, 16) => PixelUnpacker::Gray16 { alpha: true },
      (RGB, 8) => PixelUnpacker::Rgb8 { alpha: false },
      (RGBA, 8) => PixelUnpacker::Rgb8 { alpha: true },
      (RGB, 16) => PixelUnpacker::Rgb16 { alpha: false },
      (RGBA, 16) => PixelUnpacker::Rgb16 { alpha: true },
      _ => return Err(unsupported),
    })
  }

  /// If the output pixels are RGBA rather than RGB.
  #[inline]
  #[must_use]
  pub fn has_alpha(&self) -> bool {
    match self {
      PixelUnpacker::Indexed { alphas, .. } => alphas.is_some(),
      PixelUnpacker::Gray { alpha, .. }
      | PixelUnpacker::Gray16 { alpha }
      | PixelUnpacker::Rgb8 { alpha }
      | PixelUnpacker::Rgb16 { alpha } => *alpha,
    }
  }

  /// Bytes per output pixel.
  #[inline]
  #[must_use]
  pub fn output_bytes_per_pixel(&self) -> usize {
    if self.has_alpha() {
      4
    } else {
      3
    }
  }

  /// Unpacks one line of pixel bytes (no filter byte) into `dest`.
  ///
  /// `dest` gets exactly one output pixel per `dest` chunk of
  /// [`output_bytes_per_pixel`](Self::output_bytes_per_pixel) bytes, so its
  /// length sets the width.
  ///
  /// ## Panics
  /// * If `src` is too short for the width `dest` implies.
  #[track_caller]
  pub fn unpack_row(&self, src: &[u8], dest: &mut [u8]) {
    let out_bpp = self.output_bytes_per_pixel();
    match self {
      PixelUnpacker::Indexed { depth, palette, alphas } => {
        for (x, px) in dest.chunks_exact_mut(out_bpp).enumerate() {
          let i = sample_at(src, *depth, x);
          let RGB8 { r, g, b } = palette.lookup(i);
          px[..3].copy_from_slice(&[r, g, b]);
          if let Some(alphas) = alphas {
            px[3] = tRNS::index_alpha(alphas, i);
          }
        }
      }
      PixelUnpacker::Gray { depth, alpha } => {
        let components = if *alpha { 2 } else { 1 };
        for (x, px) in dest.chunks_exact_mut(out_bpp).enumerate() {
          let y = rescale_sample_to_8(*depth, sample_at(src, *depth, x * components));
          px[..3].fill(y);
          if *alpha {
            px[3] = rescale_sample_to_8(*depth, sample_at(src, *depth, x * components + 1));
          }
        }
      }
      PixelUnpacker::Gray16 { alpha } => {
        let in_bpp = if *alpha { 4 } else { 2 };
        for (px, samples) in dest.chunks_exact_mut(out_bpp).zip(src.chunks_exact(in_bpp)) {
          px[..3].fill(truncate_sample_to_8([samples[0], samples[1]]));
          if *alpha {
            px[3] = truncate_sample_to_8([samples[2], samples[3]]);
          }
        }
      }
      PixelUnpacker::Rgb8 { .. } => {
        let len = dest.len();
        dest.copy_from_slice(&src[..len]);
      }
      PixelUnpacker::Rgb16 { .. } => {
        for (out, sample) in dest.iter_mut().zip(src.chunks_exact(2)) {
          *out = truncate_sample_to_8([sample[0], sample[1]]);
        }
      }
    }
  }
}

/// Gets sample `i` of a line, where samples are `depth` bits each and packed
/// with the highest bits first.
#[inline]
#[must_use]
#[track_caller]
fn sample_at(src: &[u8], depth: u8, i: usize) -> u8 {
  match depth {
    8 => src[i],
    _ => {
      let bit = i * depth as usize;
      let shift = 8 - depth as usize - (bit % 8);
      let mask = (1_u8 << depth) - 1;
      (src[bit / 8] >> shift) & mask
    }
  }
}
