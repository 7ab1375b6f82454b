use super::*;

/// The per-scanline filter types of PNG's adaptive filter method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngFilterType {
  None = 0,
  Sub = 1,
  Up = 2,
  Average = 3,
  Paeth = 4,
}
impl TryFrom<u8> for PngFilterType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngFilterType::None,
      1 => PngFilterType::Sub,
      2 => PngFilterType::Up,
      3 => PngFilterType::Average,
      4 => PngFilterType::Paeth,
      _ => return Err(PngError::Format("unknown scanline filter type")),
    })
  }
}

/// Picks whichever of `a` (left), `b` (up), or `c` (up-left) is closest to
/// `a + b - c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // these tests must run in this order: ties go to a, then b, then c
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Unfilters one scanline in place.
///
/// * `line` is the full filtered line: the filter type byte followed by the
///   filtered bytes.
/// * `previous` is the already-unfiltered line above (also with its leading
///   byte), or `None` for the first line of the image, in which case the line
///   above is treated as all zeroes.
/// * `bytes_per_pixel` is how far back the "left" byte is. Pixels smaller than
///   a byte use 1.
///
/// All the math wraps around modulo 256. Afterwards the filter byte is set to
/// 0 (None), so unfiltering the same line again changes nothing.
pub fn unfilter_scanline(
  previous: Option<&[u8]>, line: &mut [u8], bytes_per_pixel: usize,
) -> PngResult<()> {
  let (f, pixels) = match line.split_first_mut() {
    Some(split) => split,
    None => return Ok(()),
  };
  let up: &[u8] = previous.and_then(|p| p.get(1..)).unwrap_or(&[]);
  let b_at = |x: usize| up.get(x).copied().unwrap_or(0);
  let bpp = bytes_per_pixel.max(1);

  match PngFilterType::try_from(*f)? {
    PngFilterType::None => (),
    PngFilterType::Sub => {
      for x in bpp..pixels.len() {
        pixels[x] = pixels[x].wrapping_add(pixels[x - bpp]);
      }
    }
    PngFilterType::Up => {
      pixels.iter_mut().zip(up.iter().copied()).for_each(|(p, b)| *p = p.wrapping_add(b));
    }
    PngFilterType::Average => {
      for x in 0..pixels.len() {
        let a = if x >= bpp { pixels[x - bpp] } else { 0 };
        let b = b_at(x);
        pixels[x] = pixels[x].wrapping_add(((a as u32 + b as u32) / 2) as u8);
      }
    }
    PngFilterType::Paeth => {
      for x in 0..pixels.len() {
        let (a, c) = if x >= bpp { (pixels[x - bpp], b_at(x - bpp)) } else { (0, 0) };
        let b = b_at(x);
        pixels[x] = pixels[x].wrapping_add(paeth_predict(a, b, c));
      }
    }
  }
  *f = PngFilterType::None as u8;
  Ok(())
}
