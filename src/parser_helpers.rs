//! Just has shorthands for various byte parsing things you'd want to do.

#[inline]
#[must_use]
pub fn u16_be(bytes: [u8; 2]) -> u16 {
  u16::from_be_bytes(bytes)
}

/// Reads a big-endian `u32` from the start of the slice.
///
/// ## Panics
/// * If the slice is shorter than 4 bytes.
#[inline]
#[must_use]
#[track_caller]
pub fn u32_be(bytes: &[u8]) -> u32 {
  u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Splits a slice at the first null byte, dropping the null.
///
/// Returns `None` if there's no null byte at all.
#[inline]
pub fn split_at_null(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
  let mut it = bytes.splitn(2, |u| u == &0_u8);
  let head = it.next()?;
  let tail = it.next()?;
  Some((head, tail))
}

/// Decodes Latin-1 (ISO 8859-1) bytes, which map one-to-one onto the first
/// 256 unicode code points.
#[inline]
#[must_use]
pub fn latin1_to_string(bytes: &[u8]) -> String {
  bytes.iter().copied().map(char::from).collect()
}

#[test]
fn test_split_at_null() {
  assert_eq!(split_at_null(b"Title\0hello"), Some((&b"Title"[..], &b"hello"[..])));
  assert_eq!(split_at_null(b"Title\0"), Some((&b"Title"[..], &b""[..])));
  assert_eq!(split_at_null(b"\0a\0b"), Some((&b""[..], &b"a\0b"[..])));
  assert_eq!(split_at_null(b"Title"), None);
}

#[test]
fn test_latin1_to_string() {
  assert_eq!(latin1_to_string(b"caf\xE9"), "café");
  assert_eq!(latin1_to_string(b""), "");
}
