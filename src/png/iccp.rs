use super::*;

/// `iCCP`: Embedded ICC profile
///
/// * The profile `name` may be any convenient name for referring to the
///   profile. It is case-sensitive.
/// * The `profile` is already inflated from the chunk's zlib data stream.
/// * If this chunk is present, then the `sRGB` chunk *should not* be present.
#[derive(Clone, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct iCCP {
  /// Should contain Latin-1 text.
  pub name: String,
  pub profile: Vec<u8>,
}
impl TryFrom<&[u8]> for iCCP {
  type Error = PngError;
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let (name, rest) = split_at_null(data).ok_or(PngError::Format("iCCP has no name"))?;
    match rest {
      [0, zlib_data @ ..] => {
        Ok(iCCP { name: latin1_to_string(name), profile: inflate_zlib(zlib_data)? })
      }
      _ => Err(PngError::Format("iCCP compression method must be 0")),
    }
  }
}
impl Debug for iCCP {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("iCCP")
      .field("name", &self.name)
      .field("profile", &(&self.profile[..self.profile.len().min(12)], self.profile.len()))
      .finish()
  }
}

#[test]
fn test_iccp_inflates_profile() {
  let profile: Vec<u8> = (0..=255).collect();
  let mut data = b"sRGB IEC61966-2.1\0\0".to_vec();
  data.extend(miniz_oxide::deflate::compress_to_vec_zlib(&profile, 6));
  let iccp = iCCP::try_from(&data[..]).unwrap();
  assert_eq!(iccp.name, "sRGB IEC61966-2.1");
  assert_eq!(iccp.profile, profile);

  data[18] = 1;
  assert!(iCCP::try_from(&data[..]).is_err());
}
