use bitfrob::u8_replicate_bits;

/// Rescales a sample of `depth` bits (stored in the low bits of `sample`) to
/// the full `0..=255` range.
///
/// For depths below 8 the bit pattern is replicated downward, which gives the
/// same result as `(sample * 255 + max / 2) / max` for every possible sample.
/// A depth of 8 is passed through unchanged.
///
/// ## Panics
/// * If `depth` is not 1, 2, 4, or 8.
#[inline]
#[must_use]
#[track_caller]
pub fn rescale_sample_to_8(depth: u8, sample: u8) -> u8 {
  match depth {
    1 | 2 | 4 => u8_replicate_bits(depth as u32, sample),
    8 => sample,
    _ => panic!("illegal sample depth: {depth}"),
  }
}

/// Reduces a big-endian 16-bit sample to 8 bits by keeping only the high
/// byte.
#[inline]
#[must_use]
pub const fn truncate_sample_to_8(sample: [u8; 2]) -> u8 {
  sample[0]
}

#[test]
fn test_rescale_sample_matches_integer_scaling() {
  for depth in [1_u8, 2, 4, 8] {
    let max = u8::MAX >> (8 - depth);
    for sample in 0..=max {
      let expected = ((sample as u32 * 255 + max as u32 / 2) / max as u32) as u8;
      assert_eq!(rescale_sample_to_8(depth, sample), expected, "depth {depth}, sample {sample}");
    }
  }
}

#[test]
fn test_truncate_sample_keeps_high_byte() {
  assert_eq!(truncate_sample_to_8([0xAB, 0xCD]), 0xAB);
  assert_eq!(truncate_sample_to_8([0x00, 0xFF]), 0x00);
}
