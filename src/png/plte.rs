use super::*;

/// `PLTE`: Palette
///
/// Palette entries are always RGB.
///
/// If you want to have a paletted image with transparency then the transparency
/// info goes in a separate transparency chunk.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PLTE(Vec<RGB8>);
impl TryFrom<&[u8]> for PLTE {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    match bytemuck::try_cast_slice::<u8, RGB8>(data) {
      Ok(entries) => Ok(Self(entries.to_vec())),
      Err(_) => Err(PngError::Format("PLTE length is not a multiple of 3")),
    }
  }
}
impl Debug for PLTE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    let entries = self.entries();
    f.debug_tuple("PLTE").field(&&entries[..entries.len().min(4)]).field(&entries.len()).finish()
  }
}
impl PLTE {
  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub fn entries(&self) -> &[RGB8] {
    &self.0
  }

  /// Gets the color for a palette index.
  ///
  /// Out of range indexes give black rather than an error.
  #[inline]
  #[must_use]
  pub fn lookup(&self, index: u8) -> RGB8 {
    self.0.get(index as usize).copied().unwrap_or_default()
  }
}

#[test]
fn test_plte_lookup() {
  let palette = PLTE::try_from(&[1, 2, 3, 4, 5, 6][..]).unwrap();
  assert_eq!(palette.entries(), &[RGB8 { r: 1, g: 2, b: 3 }, RGB8 { r: 4, g: 5, b: 6 }]);
  assert_eq!(palette.lookup(1), RGB8 { r: 4, g: 5, b: 6 });
  assert_eq!(palette.lookup(2), RGB8::default());
  assert!(PLTE::try_from(&[1, 2, 3, 4][..]).is_err());
}
