use super::*;

use miniz_oxide::deflate::compress_to_vec_zlib;
use std::io::Read;

// A tiny encoder for building test images.

fn push_chunk(png: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
  png.extend_from_slice(&(data.len() as u32).to_be_bytes());
  png.extend_from_slice(tag);
  png.extend_from_slice(data);
  let crc = png_crc(tag.iter().copied().chain(data.iter().copied()));
  png.extend_from_slice(&crc.to_be_bytes());
}

fn ihdr_bytes(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&width.to_be_bytes());
  v.extend_from_slice(&height.to_be_bytes());
  v.extend_from_slice(&[bit_depth, color_type, 0, 0, interlace]);
  v
}

fn filter_line(filter: u8, prev: &[u8], cur: &[u8], bpp: usize) -> Vec<u8> {
  let mut out = vec![filter];
  for x in 0..cur.len() {
    let a = if x >= bpp { cur[x - bpp] } else { 0 };
    let b = prev[x];
    let c = if x >= bpp { prev[x - bpp] } else { 0 };
    let predicted = match filter {
      0 => 0,
      1 => a,
      2 => b,
      3 => ((a as u16 + b as u16) / 2) as u8,
      4 => paeth_predict(a, b, c),
      _ => unreachable!(),
    };
    out.push(cur[x].wrapping_sub(predicted));
  }
  out
}

/// Filters each line (cycling through every filter type) and compresses the
/// result into one zlib stream.
fn encode_lines(lines: &[Vec<u8>], bpp: usize) -> Vec<u8> {
  let zero = vec![0; lines.first().map_or(0, Vec::len)];
  let mut prev: &[u8] = &zero;
  let mut filtered = Vec::new();
  for (y, line) in lines.iter().enumerate() {
    filtered.extend(filter_line((y % 5) as u8, prev, line, bpp));
    prev = line;
  }
  compress_to_vec_zlib(&filtered, 6)
}

/// Signature, `IHDR`, the extra chunks, the zlib stream cut into exactly
/// `idat_count` `IDAT` chunks, then `IEND`.
fn assemble(ihdr: &[u8], extra: &[(&[u8; 4], Vec<u8>)], zlib: &[u8], idat_count: usize) -> Vec<u8> {
  let mut png = PNG_SIGNATURE.to_vec();
  push_chunk(&mut png, b"IHDR", ihdr);
  for (tag, data) in extra {
    push_chunk(&mut png, tag, data);
  }
  for i in 0..idat_count {
    let start = zlib.len() * i / idat_count;
    let end = zlib.len() * (i + 1) / idat_count;
    push_chunk(&mut png, b"IDAT", &zlib[start..end]);
  }
  push_chunk(&mut png, b"IEND", &[]);
  png
}

struct Lcg(u32);
impl Lcg {
  fn next_u8(&mut self) -> u8 {
    self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
    (self.0 >> 16) as u8
  }
}

fn components(color_type: u8) -> usize {
  match color_type {
    0 | 3 => 1,
    2 => 3,
    4 => 2,
    6 => 4,
    _ => unreachable!(),
  }
}

fn expected_sample(line: &[u8], depth: u8, i: usize) -> u16 {
  match depth {
    16 => u16::from_be_bytes([line[2 * i], line[2 * i + 1]]),
    8 => line[i] as u16,
    _ => {
      let per_byte = 8 / depth as usize;
      let shift = 8 - depth as usize * (i % per_byte + 1);
      ((line[i / per_byte] >> shift) & ((1 << depth) - 1)) as u16
    }
  }
}

fn expected_to_8(depth: u8, v: u16) -> u8 {
  match depth {
    16 => (v >> 8) as u8,
    _ => {
      let max = (1_u32 << depth) - 1;
      ((v as u32 * 255 + max / 2) / max) as u8
    }
  }
}

fn expected_pixels(
  color_type: u8, depth: u8, width: usize, lines: &[Vec<u8>], palette: &[[u8; 3]],
) -> Vec<u8> {
  let mut out = Vec::new();
  for line in lines {
    for x in 0..width {
      let s = |i: usize| expected_to_8(depth, expected_sample(line, depth, i));
      match color_type {
        0 => out.extend([s(x); 3]),
        2 => out.extend([s(x * 3), s(x * 3 + 1), s(x * 3 + 2)]),
        3 => {
          let i = expected_sample(line, depth, x) as usize;
          out.extend(palette.get(i).copied().unwrap_or([0, 0, 0]));
        }
        4 => out.extend([s(x * 2), s(x * 2), s(x * 2), s(x * 2 + 1)]),
        6 => out.extend([s(x * 4), s(x * 4 + 1), s(x * 4 + 2), s(x * 4 + 3)]),
        _ => unreachable!(),
      }
    }
  }
  out
}

const SUPPORTED: &[(u8, u8)] = &[
  (0, 1),
  (0, 2),
  (0, 4),
  (0, 8),
  (0, 16),
  (2, 8),
  (2, 16),
  (3, 1),
  (3, 2),
  (3, 4),
  (3, 8),
  (4, 8),
  (4, 16),
  (6, 8),
  (6, 16),
];

/// A random image as `(png bytes, expected pixels)`.
fn random_image(
  color_type: u8, depth: u8, width: u32, height: u32, idat_count: usize, seed: u32,
) -> (Vec<u8>, Vec<u8>) {
  let mut rng = Lcg(seed);
  let bits_per_pixel = components(color_type) * depth as usize;
  let line_len = (width as usize * bits_per_pixel + 7) / 8;
  let lines: Vec<Vec<u8>> =
    (0..height).map(|_| (0..line_len).map(|_| rng.next_u8()).collect()).collect();
  let palette: Vec<[u8; 3]> = if color_type == 3 {
    (0..(1_usize << depth)).map(|_| [rng.next_u8(), rng.next_u8(), rng.next_u8()]).collect()
  } else {
    Vec::new()
  };
  let mut extra = Vec::new();
  if color_type == 3 {
    extra.push((b"PLTE", palette.concat()));
  }
  let zlib = encode_lines(&lines, (bits_per_pixel / 8).max(1));
  let png = assemble(&ihdr_bytes(width, height, depth, color_type, 0), &extra, &zlib, idat_count);
  (png, expected_pixels(color_type, depth, width as usize, &lines, &palette))
}

#[test]
fn test_round_trip_every_supported_pair() {
  for (n, &(color_type, depth)) in SUPPORTED.iter().enumerate() {
    let (png, expected) = random_image(color_type, depth, 7, 6, 1, n as u32 + 1);
    let pixbuf = PngDecoder::new(png.as_slice())
      .get_pixbuf()
      .unwrap_or_else(|e| panic!("type {color_type} depth {depth}: {e}"));
    let has_alpha = matches!(color_type, 4 | 6);
    assert_eq!(pixbuf.width, 7);
    assert_eq!(pixbuf.height, 6);
    assert_eq!(pixbuf.has_alpha, has_alpha, "type {color_type} depth {depth}");
    assert_eq!(pixbuf.row_stride, 7 * if has_alpha { 4 } else { 3 });
    assert_eq!(pixbuf.pixels, expected, "type {color_type} depth {depth}");
  }
}

#[test]
fn test_idat_split_decodes_identically() {
  let decode = |idat_count| {
    let (png, expected) = random_image(6, 8, 13, 9, idat_count, 77);
    let pixbuf = PngDecoder::new(png.as_slice()).get_pixbuf().unwrap();
    assert_eq!(pixbuf.pixels, expected);
    pixbuf
  };
  let one = decode(1);
  assert_eq!(decode(2), one);
  assert_eq!(decode(7), one);
}

#[test]
fn test_rgb_sub_then_up() {
  let filtered = [1, 10, 20, 30, 5, 5, 5, 2, 1, 1, 1, 2, 2, 2];
  let png = assemble(&ihdr_bytes(2, 2, 8, 2, 0), &[], &compress_to_vec_zlib(&filtered, 6), 1);
  let pixbuf = PngDecoder::new(png.as_slice()).get_pixbuf().unwrap();
  assert!(!pixbuf.has_alpha);
  assert_eq!(pixbuf.row_stride, 6);
  assert_eq!(pixbuf.pixels, vec![10, 20, 30, 15, 25, 35, 11, 21, 31, 17, 27, 37]);
}

struct CountingReader<'a> {
  inner: &'a [u8],
  count: usize,
}
impl Read for CountingReader<'_> {
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    let n = self.inner.read(buf)?;
    self.count += n;
    Ok(n)
  }
}

#[test]
fn test_bad_signature_reads_only_the_signature() {
  let mut bytes = vec![0_u8; 100];
  bytes[..4].copy_from_slice(b"GIF8");
  let mut counter = CountingReader { inner: &bytes, count: 0 };
  {
    let mut decoder = PngDecoder::new(&mut counter);
    assert!(matches!(decoder.get_pixbuf(), Err(PngError::Format(_))));
    // the source is gone after the failure
    assert!(matches!(decoder.chunks(), Err(PngError::Format(_))));
    assert!(matches!(decoder.lookup_text("Title"), Err(PngError::Format(_))));
    assert!(matches!(decoder.get_pixbuf(), Err(PngError::Format(_))));
  }
  assert_eq!(counter.count, 8);
}

#[test]
fn test_indexed_with_partial_trns() {
  let palette = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];
  let extra = [(b"PLTE", palette.concat()), (b"tRNS", vec![0, 128])];
  // 2 bit indexes 0, 1, 2, 3 (3 is past the palette)
  let zlib = compress_to_vec_zlib(&[0, 0b00_01_10_11], 6);
  let png = assemble(&ihdr_bytes(4, 1, 2, 3, 0), &extra, &zlib, 1);
  let pixbuf = PngDecoder::new(png.as_slice()).get_pixbuf().unwrap();
  assert!(pixbuf.has_alpha);
  assert_eq!(pixbuf.get(0, 0), Some(RGBA8 { r: 255, g: 0, b: 0, a: 0 }));
  assert_eq!(pixbuf.get(1, 0), Some(RGBA8 { r: 0, g: 255, b: 0, a: 128 }));
  assert_eq!(pixbuf.get(2, 0), Some(RGBA8 { r: 0, g: 0, b: 255, a: 255 }));
  assert_eq!(pixbuf.get(3, 0), Some(RGBA8 { r: 0, g: 0, b: 0, a: 255 }));
}

#[test]
fn test_gray_color_key_is_not_applied() {
  let extra = [(b"tRNS", vec![0, 5])];
  let zlib = compress_to_vec_zlib(&[0, 5, 6], 6);
  let png = assemble(&ihdr_bytes(2, 1, 8, 0, 0), &extra, &zlib, 1);
  let pixbuf = PngDecoder::new(png.as_slice()).get_pixbuf().unwrap();
  assert!(!pixbuf.has_alpha);
  assert_eq!(pixbuf.pixels, vec![5, 5, 5, 6, 6, 6]);
}

#[test]
fn test_indexed_without_palette() {
  let zlib = compress_to_vec_zlib(&[0, 0], 6);
  let png = assemble(&ihdr_bytes(1, 1, 8, 3, 0), &[], &zlib, 1);
  assert!(matches!(PngDecoder::new(png.as_slice()).get_pixbuf(), Err(PngError::Format(_))));
}

#[test]
fn test_interlaced_is_unsupported() {
  let zlib = compress_to_vec_zlib(&[0; 8], 6);
  let png = assemble(&ihdr_bytes(2, 2, 8, 0, 1), &[], &zlib, 1);
  let mut decoder = PngDecoder::new(png.as_slice());
  let ihdr = decoder.header().unwrap();
  assert_eq!(ihdr.interlace_method, InterlaceMethod::Adam7);
  assert!(matches!(ihdr.scanline_length(1), Err(PngError::UnsupportedFeature(_))));
  assert!(matches!(decoder.get_pixbuf(), Err(PngError::UnsupportedFeature(_))));

  let flat = IHDR { interlace_method: InterlaceMethod::None, ..ihdr };
  assert_eq!(flat.scanline_length(0).unwrap(), 3);
  assert!(matches!(flat.scanline_length(1), Err(PngError::Format(_))));
}

#[test]
fn test_zero_dimensions() {
  let zlib = compress_to_vec_zlib(&[], 6);
  let png = assemble(&ihdr_bytes(0, 3, 8, 0, 0), &[], &zlib, 1);
  assert!(matches!(PngDecoder::new(png.as_slice()).get_pixbuf(), Err(PngError::Format(_))));
}

#[test]
fn test_short_image_data() {
  // 4 lines are needed, only 2 are present
  let zlib = compress_to_vec_zlib(&[0, 1, 2, 3, 4, 0, 1, 2, 3, 4], 6);
  let png = assemble(&ihdr_bytes(4, 4, 8, 0, 0), &[], &zlib, 1);
  match PngDecoder::new(png.as_slice()).get_pixbuf() {
    Err(PngError::ShortInflate { row, expected, produced }) => {
      assert_eq!((row, expected, produced), (2, 5, 0));
    }
    other => panic!("expected a short inflate, got {other:?}"),
  }
}

#[test]
fn test_huge_header_with_little_data_fails_on_first_line() {
  // 67 bytes of PNG claiming 40,000 by 40,000 gray pixels
  let zlib = compress_to_vec_zlib(&[0, 1], 6);
  let png = assemble(&ihdr_bytes(40_000, 40_000, 8, 0, 0), &[], &zlib, 1);
  let options = DecodeOptions { max_pixels: u64::MAX, ..DecodeOptions::default() };
  match PngDecoder::with_options(png.as_slice(), options).get_pixbuf() {
    Err(PngError::ShortInflate { row, expected, produced }) => {
      assert_eq!((row, expected, produced), (0, 40_001, 2));
    }
    other => panic!("expected a short inflate, got {other:?}"),
  }
}

#[test]
fn test_pixel_limit() {
  let zlib = compress_to_vec_zlib(&[0, 1], 6);
  let png = assemble(&ihdr_bytes(40_000, 40_000, 8, 0, 0), &[], &zlib, 1);
  assert!(matches!(
    PngDecoder::new(png.as_slice()).get_pixbuf(),
    Err(PngError::DimensionsTooLarge { width: 40_000, height: 40_000 })
  ));

  // the limit is inclusive
  let zlib = compress_to_vec_zlib(&[0, 1, 2, 0, 3, 4], 6);
  let png = assemble(&ihdr_bytes(2, 2, 8, 0, 0), &[], &zlib, 1);
  let options = DecodeOptions { max_pixels: 4, ..DecodeOptions::default() };
  assert!(PngDecoder::with_options(png.as_slice(), options).get_pixbuf().is_ok());
  let options = DecodeOptions { max_pixels: 3, ..DecodeOptions::default() };
  assert!(matches!(
    PngDecoder::with_options(png.as_slice(), options).get_pixbuf(),
    Err(PngError::DimensionsTooLarge { width: 2, height: 2 })
  ));
}

#[test]
fn test_unsupported_depth_reported_at_decode() {
  let zlib = compress_to_vec_zlib(&[0, 0, 0], 6);
  let png = assemble(&ihdr_bytes(1, 1, 4, 2, 0), &[], &zlib, 1);
  let mut decoder = PngDecoder::new(png.as_slice());
  assert_eq!(decoder.header().unwrap().bit_depth, 4);
  assert!(matches!(
    decoder.get_pixbuf(),
    Err(PngError::UnsupportedColorType { color_type: 2, bit_depth: 4 })
  ));
}

#[test]
fn test_truncated_stream() {
  let (png, _) = random_image(0, 8, 3, 3, 1, 5);
  for cut in [4, 6, 12, 20] {
    let short = &png[..png.len() - cut];
    assert!(
      matches!(PngDecoder::new(short).chunks(), Err(PngError::Truncated { .. })),
      "cut {cut}"
    );
  }
  assert!(matches!(PngDecoder::new(&png[..5]).chunks(), Err(PngError::Truncated { .. })));
}

#[test]
fn test_chunk_length_limit() {
  let (png, _) = random_image(0, 8, 3, 3, 1, 5);
  let options = DecodeOptions { max_chunk_len: 8, ..DecodeOptions::default() };
  match PngDecoder::with_options(png.as_slice(), options).chunks() {
    Err(PngError::ChunkTooLarge { chunk, len }) => {
      assert_eq!(chunk, PngChunkType::IHDR);
      assert_eq!(len, 13);
    }
    other => panic!("expected a chunk length error, got {other:?}"),
  }
}

#[test]
fn test_crc_policies() {
  let zlib = compress_to_vec_zlib(&[0, 9], 6);
  let mut png = assemble(&ihdr_bytes(1, 1, 8, 0, 0), &[(b"tEXt", b"Title\0Hi".to_vec())], &zlib, 1);
  // signature, IHDR, then the tEXt chunk's last CRC byte
  let text_crc_end = 8 + (12 + 13) + (12 + 8);
  png[text_crc_end - 1] ^= 0xFF;

  let with = |crc_check| DecodeOptions { crc_check, ..DecodeOptions::default() };
  for check in [CrcCheck::Ignore, CrcCheck::Warn] {
    let mut decoder = PngDecoder::with_options(png.as_slice(), with(check));
    assert_eq!(decoder.lookup_text("Title").unwrap().as_deref(), Some("Hi"));
    assert_eq!(decoder.get_pixbuf().unwrap().pixels, vec![9, 9, 9]);
  }
  match PngDecoder::with_options(png.as_slice(), with(CrcCheck::Error)).chunks() {
    Err(PngError::CrcMismatch { chunk, declared, actual }) => {
      assert_eq!(chunk, PngChunkType::tEXt);
      assert_ne!(declared, actual);
    }
    other => panic!("expected a CRC error, got {other:?}"),
  }
  assert_eq!(DecodeOptions::default().crc_check, CrcCheck::Warn);
}

#[test]
fn test_metadata_chunks() {
  let ztxt = [b"Comment\0\0".as_slice(), compress_to_vec_zlib(b"Squished", 6).as_slice()].concat();
  let itxt = b"Author\0\0\0en\0Autor\0Caf\xC3\xA9".to_vec();
  let iccp = [b"Display\0\0".as_slice(), compress_to_vec_zlib(&[1, 2, 3, 4], 6).as_slice()].concat();
  let extra = [
    (b"tEXt", b"Title\0First".to_vec()),
    (b"tEXt", b"Title\0Second".to_vec()),
    (b"zTXt", ztxt),
    (b"iTXt", itxt),
    (b"tIME", vec![0x07, 0xD9, 2, 13, 23, 31, 30]),
    (b"iCCP", iccp),
    (b"prIv", vec![7, 7]),
  ];
  let zlib = compress_to_vec_zlib(&[0, 1], 6);
  let png = assemble(&ihdr_bytes(1, 1, 8, 0, 0), &extra, &zlib, 1);
  let mut decoder = PngDecoder::new(png.as_slice());

  assert_eq!(decoder.lookup_text("Title").unwrap().as_deref(), Some("First"));
  assert_eq!(decoder.lookup_text("Comment").unwrap().as_deref(), Some("Squished"));
  assert_eq!(decoder.lookup_text("Author").unwrap().as_deref(), Some("Café"));
  assert_eq!(decoder.lookup_text("Missing").unwrap(), None);

  let time = decoder.modification_time().unwrap().unwrap();
  assert_eq!(time, tIME { year: 2009, month: 2, day: 13, hour: 23, minute: 31, second: 30 });
  assert_eq!(
    time.to_system_time(),
    Some(std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_234_567_890))
  );

  let icc = decoder.icc_profile().unwrap().unwrap();
  assert_eq!(icc.name, "Display");
  assert_eq!(icc.profile, vec![1, 2, 3, 4]);

  let chunks = decoder.chunks().unwrap();
  assert_eq!(chunks.first().map(PngChunk::chunk_type), Some(PngChunkType::IHDR));
  assert_eq!(chunks.last(), Some(&PngChunk::IEND));
  assert!(chunks.iter().any(|c| c.chunk_type() == PngChunkType(*b"prIv")));

  assert_eq!(decoder.get_pixbuf().unwrap().pixels, vec![1, 1, 1]);
}

#[test]
fn test_bytes_after_iend_are_left_alone() {
  let (mut png, expected) = random_image(2, 8, 2, 2, 1, 9);
  png.extend_from_slice(&[1, 2, 3]);
  let mut rest = png.as_slice();
  {
    let mut decoder = PngDecoder::new(&mut rest);
    assert_eq!(decoder.get_pixbuf().unwrap().pixels, expected);
  }
  assert_eq!(rest, &[1, 2, 3]);
}

#[test]
fn test_raw_chunk_iter_matches_reader() {
  let (png, _) = random_image(3, 4, 5, 5, 3, 11);
  let raw: Vec<PngChunkType> = RawPngChunkIter::new(&png).map(|c| c.type_).collect();
  let mut decoder = PngDecoder::new(png.as_slice());
  let read: Vec<PngChunkType> = decoder.chunks().unwrap().iter().map(PngChunk::chunk_type).collect();
  assert_eq!(raw, read);
  assert_eq!(
    read,
    vec![
      PngChunkType::IHDR,
      PngChunkType::PLTE,
      PngChunkType::IDAT,
      PngChunkType::IDAT,
      PngChunkType::IDAT,
      PngChunkType::IEND
    ]
  );
}
