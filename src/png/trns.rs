use super::*;

/// `tRNS`: Transparency
///
/// * `Gray` and `Rgb` each store a single color key. The `tRNS` chunk always
///   uses a `u16` to store the value, even if the image's bit depth is less
///   than 16.
/// * `Index` has an alpha value that goes along with each palette entry. The
///   slice can be shorter than the palette, and all missing entries have an
///   alpha of 255.
///
/// **Note:** The parser picks `Gray` or `Rgb` based on the data length alone,
/// since a chunk can't see the header. Use [`tRNS::to_alphas`] when the image
/// is indexed color, which always gives back the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub enum tRNS {
  Gray { y: u16 },
  Rgb { r: u16, g: u16, b: u16 },
  Index(Vec<u8>),
}
impl From<&[u8]> for tRNS {
  #[inline]
  fn from(data: &[u8]) -> Self {
    match *data {
      [y0, y1] => tRNS::Gray { y: u16_be([y0, y1]) },
      [r0, r1, g0, g1, b0, b1] => {
        tRNS::Rgb { r: u16_be([r0, r1]), g: u16_be([g0, g1]), b: u16_be([b0, b1]) }
      }
      _ => tRNS::Index(data.to_vec()),
    }
  }
}
impl tRNS {
  /// Gets the alpha values for each palette index.
  #[must_use]
  pub fn to_alphas(&self) -> Vec<u8> {
    match self {
      tRNS::Gray { y } => y.to_be_bytes().to_vec(),
      tRNS::Rgb { r, g, b } => {
        let [r0, r1] = r.to_be_bytes();
        let [g0, g1] = g.to_be_bytes();
        let [b0, b1] = b.to_be_bytes();
        vec![r0, r1, g0, g1, b0, b1]
      }
      tRNS::Index(alphas) => alphas.clone(),
    }
  }

  /// Gets the alpha for one palette index.
  #[inline]
  #[must_use]
  pub fn index_alpha(alphas: &[u8], index: u8) -> u8 {
    alphas.get(index as usize).copied().unwrap_or(u8::MAX)
  }
}

#[test]
fn test_trns_by_length() {
  assert_eq!(tRNS::from(&[0x01, 0x02][..]), tRNS::Gray { y: 0x0102 });
  assert_eq!(tRNS::from(&[0, 1, 0, 2, 0, 3][..]), tRNS::Rgb { r: 1, g: 2, b: 3 });
  assert_eq!(tRNS::from(&[9, 8, 7][..]), tRNS::Index(vec![9, 8, 7]));
  // an indexed image with exactly two alpha entries still gets them back
  assert_eq!(tRNS::from(&[0x00, 0x80][..]).to_alphas(), vec![0x00, 0x80]);
  assert_eq!(tRNS::index_alpha(&[0, 128], 1), 128);
  assert_eq!(tRNS::index_alpha(&[0, 128], 2), 255);
}
