#![allow(non_camel_case_types)]

use super::*;

/// A parsed PNG chunk.
///
/// The chunk tag decides the variant. Any tag this crate doesn't know is kept
/// as [`PngChunk::Other`] with its raw bytes, so nothing in the file is lost.
#[derive(Debug, Clone, PartialEq)]
#[allow(nonstandard_style)]
pub enum PngChunk {
  IHDR(IHDR),
  PLTE(PLTE),
  /// Image data is left compressed, see [`ChunkInflater`].
  IDAT(Vec<u8>),
  IEND,
  tRNS(tRNS),
  tEXt(TextChunk),
  zTXt(TextChunk),
  iTXt(iTXt),
  tIME(tIME),
  iCCP(iCCP),
  gAMA(gAMA),
  cHRM(cHRM),
  sRGB(sRGB),
  pHYs(pHYs),
  bKGD(bKGD),
  Other(RawPngChunk),
}
impl TryFrom<RawPngChunk> for PngChunk {
  type Error = PngError;
  fn try_from(raw: RawPngChunk) -> Result<Self, Self::Error> {
    let data = raw.data.as_slice();
    Ok(match raw.type_ {
      PngChunkType::IHDR => PngChunk::IHDR(IHDR::try_from(data)?),
      PngChunkType::PLTE => PngChunk::PLTE(PLTE::try_from(data)?),
      PngChunkType::IDAT => PngChunk::IDAT(raw.data),
      PngChunkType::IEND => PngChunk::IEND,
      PngChunkType::tRNS => PngChunk::tRNS(tRNS::from(data)),
      PngChunkType::tEXt => PngChunk::tEXt(TextChunk::from_text_bytes(data)?),
      PngChunkType::zTXt => PngChunk::zTXt(TextChunk::from_ztxt_bytes(data)?),
      PngChunkType::iTXt => PngChunk::iTXt(iTXt::try_from(data)?),
      PngChunkType::tIME => PngChunk::tIME(tIME::try_from(data)?),
      PngChunkType::iCCP => PngChunk::iCCP(iCCP::try_from(data)?),
      PngChunkType::gAMA => match *data {
        [g0, g1, g2, g3] => PngChunk::gAMA(gAMA { gamma: u32::from_be_bytes([g0, g1, g2, g3]) }),
        _ => return Err(PngError::Format("gAMA must be 4 bytes")),
      },
      PngChunkType::cHRM => {
        if data.len() != (4 * 8) {
          return Err(PngError::Format("cHRM must be 32 bytes"));
        }
        PngChunk::cHRM(cHRM {
          white_x: u32_be(&data[0..4]),
          white_y: u32_be(&data[4..8]),
          red_x: u32_be(&data[8..12]),
          red_y: u32_be(&data[12..16]),
          green_x: u32_be(&data[16..20]),
          green_y: u32_be(&data[20..24]),
          blue_x: u32_be(&data[24..28]),
          blue_y: u32_be(&data[28..32]),
        })
      }
      PngChunkType::sRGB => PngChunk::sRGB(sRGB {
        intent: match *data {
          [0] => SrgbIntent::Perceptual,
          [1] => SrgbIntent::RelativeColorimetric,
          [2] => SrgbIntent::Saturation,
          [3] => SrgbIntent::AbsoluteColorimetric,
          _ => return Err(PngError::Format("sRGB intent must be one byte of 0 to 3")),
        },
      }),
      PngChunkType::pHYs => {
        if data.len() != 9 || data[8] > 1 {
          return Err(PngError::Format("pHYs must be 9 bytes with a unit of 0 or 1"));
        }
        PngChunk::pHYs(pHYs {
          ppu_x: u32_be(&data[0..4]),
          ppu_y: u32_be(&data[4..8]),
          is_meters: data[8] != 0,
        })
      }
      PngChunkType::bKGD => match *data {
        [i] => PngChunk::bKGD(bKGD::Index { i }),
        [y0, y1] => PngChunk::bKGD(bKGD::Gray { y: u16_be([y0, y1]) }),
        [r0, r1, g0, g1, b0, b1] => PngChunk::bKGD(bKGD::Rgb {
          r: u16_be([r0, r1]),
          g: u16_be([g0, g1]),
          b: u16_be([b0, b1]),
        }),
        _ => return Err(PngError::Format("bKGD must be 1, 2, or 6 bytes")),
      },
      _ => PngChunk::Other(raw),
    })
  }
}
impl PngChunk {
  /// The tag this chunk had in the file.
  #[must_use]
  pub fn chunk_type(&self) -> PngChunkType {
    match self {
      PngChunk::IHDR(_) => PngChunkType::IHDR,
      PngChunk::PLTE(_) => PngChunkType::PLTE,
      PngChunk::IDAT(_) => PngChunkType::IDAT,
      PngChunk::IEND => PngChunkType::IEND,
      PngChunk::tRNS(_) => PngChunkType::tRNS,
      PngChunk::tEXt(_) => PngChunkType::tEXt,
      PngChunk::zTXt(_) => PngChunkType::zTXt,
      PngChunk::iTXt(_) => PngChunkType::iTXt,
      PngChunk::tIME(_) => PngChunkType::tIME,
      PngChunk::iCCP(_) => PngChunkType::iCCP,
      PngChunk::gAMA(_) => PngChunkType::gAMA,
      PngChunk::cHRM(_) => PngChunkType::cHRM,
      PngChunk::sRGB(_) => PngChunkType::sRGB,
      PngChunk::pHYs(_) => PngChunkType::pHYs,
      PngChunk::bKGD(_) => PngChunkType::bKGD,
      PngChunk::Other(raw) => raw.type_,
    }
  }

  /// The keyword and text, if this is any of the three text chunk types.
  #[must_use]
  pub fn keyword_and_text(&self) -> Option<(&str, &str)> {
    match self {
      PngChunk::tEXt(t) | PngChunk::zTXt(t) => Some((&t.keyword, &t.text)),
      PngChunk::iTXt(t) => Some((&t.keyword, &t.text)),
      _ => None,
    }
  }
}

/// `cHRM`: Primary chromaticities and white point
///
/// Values are stored as an integer 100,000 the floating point value.
///
/// **Example:** A value of 0.3127 would be stored as the integer 31270.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `cHRM` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct cHRM {
  pub white_x: u32,
  pub white_y: u32,
  pub red_x: u32,
  pub red_y: u32,
  pub green_x: u32,
  pub green_y: u32,
  pub blue_x: u32,
  pub blue_y: u32,
}

/// `gAMA`: Image gamma
///
/// Values are stored as an integer 100,000 the floating point value.
///
/// **Example:** A gamma of 1/2.2 would be stored as the integer 45,455.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct gAMA {
  pub gamma: u32,
}

/// The rendering intent of an `sRGB` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SrgbIntent {
  /// for images preferring good adaptation to the output device gamut at the
  /// expense of colorimetric accuracy, such as photographs.
  Perceptual = 0,
  /// for images requiring colour appearance matching (relative to the output
  /// device white point), such as logos.
  RelativeColorimetric = 1,
  /// for images preferring preservation of saturation at the expense of hue and
  /// lightness, such as charts and graphs.
  Saturation = 2,
  /// for images requiring preservation of absolute colorimetry, such as
  /// previews of images destined for a different output device (proofs).
  AbsoluteColorimetric = 3,
}

/// `sRGB`: Standard RGB colour space
///
/// If `sRGB` is present it overrides any `gAMA` and/or `cHRM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct sRGB {
  pub intent: SrgbIntent,
}

/// `pHYs`: Physical pixel dimensions
///
/// When `is_meters` is set then `x` and `y` are in pixels per meter.
/// Otherwise they have no unit and define an aspect ratio only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct pHYs {
  pub ppu_x: u32,
  pub ppu_y: u32,
  pub is_meters: bool,
}

/// `bKGD`: Background colour
///
/// The variant should match the color type of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum bKGD {
  Gray { y: u16 },
  Rgb { r: u16, g: u16, b: u16 },
  Index { i: u8 },
}
