use super::*;

use std::io::{ErrorKind, Read};

/// Reads an entire PNG chunk container out of a stream.
///
/// The stream must be positioned at the signature. Reading stops right after
/// the `IEND` chunk, so any bytes after that are left in the stream.
///
/// ## Failure
/// * [`PngError::Format`] if the signature is wrong. Only the 8 signature
///   bytes will have been read.
/// * [`PngError::Truncated`] if the stream ends partway through the signature
///   or any chunk, or before `IEND`.
/// * [`PngError::ChunkTooLarge`] if a chunk declares a length over
///   `options.max_chunk_len`.
/// * [`PngError::CrcMismatch`] if a CRC is wrong and `options.crc_check` is
///   [`CrcCheck::Error`].
/// * Any error from parsing a chunk payload.
pub fn read_chunks<R: Read>(mut reader: R, options: &DecodeOptions) -> PngResult<Vec<PngChunk>> {
  let mut signature = [0_u8; 8];
  read_exact_or_truncated(&mut reader, &mut signature, "signature")?;
  if !is_png_header_correct(&signature) {
    return Err(PngError::Format("bad PNG signature"));
  }

  let mut chunks = Vec::new();
  loop {
    let raw = read_raw_chunk(&mut reader, options)?;
    check_crc(&raw, options.crc_check)?;
    trace!("{raw:?}");
    let is_end = raw.type_ == PngChunkType::IEND;
    chunks.push(PngChunk::try_from(raw)?);
    if is_end {
      break;
    }
  }
  debug!("read {} chunks", chunks.len());
  Ok(chunks)
}

fn read_raw_chunk<R: Read>(reader: &mut R, options: &DecodeOptions) -> PngResult<RawPngChunk> {
  let mut len_bytes = [0_u8; 4];
  read_exact_or_truncated(reader, &mut len_bytes, "chunk length")?;
  let len = u32::from_be_bytes(len_bytes);

  let mut type_bytes = [0_u8; 4];
  read_exact_or_truncated(reader, &mut type_bytes, "chunk type")?;
  let type_ = PngChunkType(type_bytes);

  if len > options.max_chunk_len {
    return Err(PngError::ChunkTooLarge { chunk: type_, len });
  }

  // Growing the buffer as bytes actually arrive means a lying length on a
  // short stream can't force a huge allocation up front.
  let mut data = Vec::new();
  reader.by_ref().take(u64::from(len)).read_to_end(&mut data)?;
  if data.len() != len as usize {
    return Err(PngError::Truncated { what: "chunk data" });
  }

  let mut crc_bytes = [0_u8; 4];
  read_exact_or_truncated(reader, &mut crc_bytes, "chunk CRC")?;
  Ok(RawPngChunk { type_, data, declared_crc: u32::from_be_bytes(crc_bytes) })
}

fn check_crc(raw: &RawPngChunk, crc_check: CrcCheck) -> PngResult<()> {
  if crc_check == CrcCheck::Ignore {
    return Ok(());
  }
  let actual = raw.compute_actual_crc();
  if actual == raw.declared_crc {
    return Ok(());
  }
  match crc_check {
    CrcCheck::Error => {
      Err(PngError::CrcMismatch { chunk: raw.type_, declared: raw.declared_crc, actual })
    }
    _ => {
      warn!(
        "CRC mismatch in {} chunk: declared {:#010X}, actual {actual:#010X}",
        raw.type_, raw.declared_crc
      );
      Ok(())
    }
  }
}

fn read_exact_or_truncated<R: Read>(
  reader: &mut R, buf: &mut [u8], what: &'static str,
) -> PngResult<()> {
  reader.read_exact(buf).map_err(|e| match e.kind() {
    ErrorKind::UnexpectedEof => PngError::Truncated { what },
    _ => PngError::Io(e),
  })
}
