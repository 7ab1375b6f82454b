use super::*;

/// The 4-byte tag that says what kind of chunk a chunk is.
///
/// The case of each letter is meaningful:
/// * 1st: upper case is critical, lower case is ancillary.
/// * 2nd: upper case is public, lower case is private.
/// * 3rd: upper case is the only valid option right now, lower case is
///   reserved.
/// * 4th: upper case is unsafe to copy, lower case is safe to copy.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const zTXt: Self = Self(*b"zTXt");
  pub const iTXt: Self = Self(*b"iTXt");
  pub const tIME: Self = Self(*b"tIME");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const bKGD: Self = Self(*b"bKGD");

  /// Critical chunks must be understood to display the image.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    self.0[0].is_ascii_uppercase()
  }
  /// Private chunks are not registered with the PNG spec.
  #[inline]
  #[must_use]
  pub const fn is_private(self) -> bool {
    self.0[1].is_ascii_lowercase()
  }
  /// The reserved bit should always be clear (upper case) in valid data.
  #[inline]
  #[must_use]
  pub const fn is_reserved(self) -> bool {
    self.0[2].is_ascii_lowercase()
  }
  /// Editors that don't understand the chunk may still copy it to a modified
  /// image.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    self.0[3].is_ascii_lowercase()
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    Debug::fmt(&AsciiArray(self.0), f)
  }
}
impl core::fmt::Display for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&AsciiArray(self.0), f)
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawPngChunk {
  pub type_: PngChunkType,
  pub data: Vec<u8>,
  pub declared_crc: u32,
}
impl RawPngChunk {
  /// Computes the CRC over the type and payload, for comparison with the
  /// `declared_crc`.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.type_.0.iter().copied().chain(self.data.iter().copied()))
  }
}
impl Debug for RawPngChunk {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// A chunk borrowed out of a byte slice, see [`RawPngChunkIter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPngChunkRef<'b> {
  pub type_: PngChunkType,
  pub data: &'b [u8],
  pub declared_crc: u32,
}

/// An iterator that produces successive raw chunks from in-memory PNG bytes.
///
/// This never allocates and never panics, no matter what bytes you give it.
/// When the data runs out partway through a chunk, iteration just stops. Use
/// [`PngDecoder`] when you want errors reported instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RawPngChunkIter<'b>(&'b [u8]);
impl<'b> RawPngChunkIter<'b> {
  /// Pass the full PNG bytes.
  ///
  /// If the bytes don't start with the PNG signature the iterator is empty.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [137, 80, 78, 71, 13, 10, 26, 10, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }
}
impl<'b> Iterator for RawPngChunkIter<'b> {
  type Item = RawPngChunkRef<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let (len_bytes, rest) = try_split(self.0, 4)?;
    let chunk_len = u32_be(len_bytes) as usize;
    let (type_bytes, rest) = try_split(rest, 4)?;
    let (data, rest) = try_split(rest, chunk_len)?;
    let (crc_bytes, rest) = try_split(rest, 4)?;
    let type_ = PngChunkType([type_bytes[0], type_bytes[1], type_bytes[2], type_bytes[3]]);
    self.0 = if type_ == PngChunkType::IEND { &[] } else { rest };
    Some(RawPngChunkRef { type_, data, declared_crc: u32_be(crc_bytes) })
  }
}

#[inline]
fn try_split(bytes: &[u8], n: usize) -> Option<(&[u8], &[u8])> {
  if bytes.len() >= n {
    Some(bytes.split_at(n))
  } else {
    None
  }
}

#[test]
fn test_chunk_type_property_bits() {
  let ihdr = PngChunkType::IHDR;
  assert!(ihdr.is_critical());
  assert!(!ihdr.is_private());
  assert!(!ihdr.is_reserved());
  assert!(!ihdr.is_safe_to_copy());

  let text = PngChunkType::tEXt;
  assert!(!text.is_critical());
  assert!(!text.is_private());
  assert!(!text.is_reserved());
  assert!(text.is_safe_to_copy());

  let odd = PngChunkType(*b"prVt");
  assert!(!odd.is_critical());
  assert!(odd.is_private());
  assert!(!odd.is_reserved());
  assert!(odd.is_safe_to_copy());

  assert!(PngChunkType(*b"ABcD").is_reserved());
  assert_eq!(format!("{}", PngChunkType::iCCP), "iCCP");
  assert_eq!(format!("{:?}", PngChunkType::iCCP), "\"iCCP\"");
}
