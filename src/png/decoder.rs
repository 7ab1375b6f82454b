use super::*;

use std::{
  fs::File,
  io::{BufReader, Read},
  path::Path,
};

/// Decodes a PNG from any [`Read`] source.
///
/// The chunks are read the first time anything asks for them, and then kept.
/// The source is dropped right after that read (success or failure), so a
/// decoder made by [`open`](PngDecoder::open) closes its file early. Pass
/// `&mut file` instead if you want to keep the file yourself.
///
/// Each call to [`get_pixbuf`](PngDecoder::get_pixbuf) decodes the pixels
/// again from the kept chunks.
///
/// If that first read fails, the error is returned once. Every later call
/// that needs the chunks then fails with [`PngError::Format`], since the
/// source is gone.
pub struct PngDecoder<R> {
  source: Option<R>,
  options: DecodeOptions,
  chunks: Option<Vec<PngChunk>>,
}
impl<R> Debug for PngDecoder<R> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngDecoder")
      .field("source_open", &self.source.is_some())
      .field("options", &self.options)
      .field("chunks", &self.chunks.as_ref().map(Vec::len))
      .finish()
  }
}
impl PngDecoder<BufReader<File>> {
  /// Opens a file to decode.
  ///
  /// ## Failure
  /// * [`PngError::Io`] if the file can't be opened.
  pub fn open(path: impl AsRef<Path>) -> PngResult<Self> {
    let file = File::open(path)?;
    Ok(Self::new(BufReader::new(file)))
  }
}
impl<R: Read> PngDecoder<R> {
  /// A decoder with the default [`DecodeOptions`].
  #[inline]
  #[must_use]
  pub fn new(source: R) -> Self {
    Self::with_options(source, DecodeOptions::default())
  }

  #[inline]
  #[must_use]
  pub fn with_options(source: R, options: DecodeOptions) -> Self {
    Self { source: Some(source), options, chunks: None }
  }

  /// All chunks in file order, `IEND` included.
  ///
  /// ## Failure
  /// * Any error from [`read_chunks`]. The source is gone after that, so
  ///   later calls fail with [`PngError::Format`].
  pub fn chunks(&mut self) -> PngResult<&[PngChunk]> {
    if self.chunks.is_none() {
      let source = self
        .source
        .take()
        .ok_or(PngError::Format("an earlier read of the PNG chunks failed"))?;
      self.chunks = Some(read_chunks(source, &self.options)?);
    }
    Ok(self.chunks.as_deref().unwrap_or_default())
  }

  /// The image header, which must be the first chunk.
  ///
  /// ## Failure
  /// * Anything [`chunks`](Self::chunks) reports.
  /// * [`PngError::Format`] if the first chunk isn't `IHDR`.
  pub fn header(&mut self) -> PngResult<IHDR> {
    match self.chunks()?.first() {
      Some(PngChunk::IHDR(ihdr)) => Ok(*ihdr),
      _ => Err(PngError::Format("the first chunk must be IHDR")),
    }
  }

  /// Decodes the image into 8-bit RGB or RGBA pixels.
  ///
  /// ## Failure
  /// * [`PngError::Format`] if `IHDR` isn't first, the width or height is
  ///   0, an indexed image has no `PLTE`, or a line has an unknown filter.
  /// * [`PngError::UnsupportedFeature`] for Adam7 interlaced images.
  /// * [`PngError::UnsupportedColorType`] for color type and bit depth pairs
  ///   that can't be unpacked.
  /// * [`PngError::ShortInflate`] or [`PngError::Inflate`] when the image
  ///   data is short or corrupt.
  /// * [`PngError::DimensionsTooLarge`] if the image has more pixels than
  ///   [`DecodeOptions::max_pixels`].
  /// * [`PngError::Alloc`] if the buffers can't be allocated.
  /// * Anything [`chunks`](Self::chunks) reports, including the
  ///   [`PngError::Format`] every call gets after a failed first read.
  pub fn get_pixbuf(&mut self) -> PngResult<Pixbuf> {
    let ihdr = self.header()?;
    if ihdr.interlace_method == InterlaceMethod::Adam7 {
      return Err(PngError::UnsupportedFeature("Adam7 interlacing"));
    }
    if ihdr.width == 0 || ihdr.height == 0 {
      return Err(PngError::Format("image width and height must be non-zero"));
    }
    if u64::from(ihdr.width) * u64::from(ihdr.height) > self.options.max_pixels {
      return Err(PngError::DimensionsTooLarge { width: ihdr.width, height: ihdr.height });
    }
    debug!("decoding {ihdr:?}");

    let chunks = self.chunks()?;
    let palette = chunks.iter().find_map(|c| match c {
      PngChunk::PLTE(plte) => Some(plte),
      _ => None,
    });
    // a color key on gray or RGB images isn't applied
    let trns = chunks.iter().find_map(|c| match c {
      PngChunk::tRNS(trns) if ihdr.color_type == PngColorType::Indexed => Some(trns),
      _ => None,
    });
    let unpacker = PixelUnpacker::new(&ihdr, palette, trns)?;

    let mut inflater = ChunkInflater::new();
    for chunk in chunks {
      if let PngChunk::IDAT(data) = chunk {
        inflater.add(data);
      }
    }
    let mut lines = ScanlineDecoder::new(&mut inflater, ihdr.scanline_length(0)?, ihdr.height)?;

    let row_stride = (ihdr.width as usize)
      .checked_mul(unpacker.output_bytes_per_pixel())
      .ok_or(PngError::Format("image width overflows"))?;
    let total = row_stride
      .checked_mul(ihdr.height as usize)
      .ok_or(PngError::Format("image size overflows"))?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(total)?;
    pixels.resize(total, 0);

    let filter_bpp = ihdr.bytes_per_pixel();
    for (y, dest) in (0..ihdr.height).zip(pixels.chunks_exact_mut(row_stride)) {
      lines.reconstruct_row(y, filter_bpp)?;
      let src = lines.row(y).ok_or(PngError::Format("scanline out of bounds"))?;
      unpacker.unpack_row(src, dest);
    }

    let has_alpha = unpacker.has_alpha();
    debug!("decoded {}x{} pixels, alpha: {has_alpha}", ihdr.width, ihdr.height);
    Ok(Pixbuf { width: ihdr.width, height: ihdr.height, row_stride, has_alpha, pixels })
  }

  /// The text of the first `tEXt`, `zTXt`, or `iTXt` chunk with this keyword.
  ///
  /// ## Failure
  /// * Anything [`chunks`](Self::chunks) reports, including the
  ///   [`PngError::Format`] every call gets after a failed first read.
  pub fn lookup_text(&mut self, keyword: &str) -> PngResult<Option<String>> {
    Ok(self.chunks()?.iter().find_map(|c| match c.keyword_and_text() {
      Some((k, text)) if k == keyword => Some(text.to_string()),
      _ => None,
    }))
  }

  /// The `tIME` chunk, if any.
  pub fn modification_time(&mut self) -> PngResult<Option<tIME>> {
    Ok(self.chunks()?.iter().find_map(|c| match c {
      PngChunk::tIME(t) => Some(*t),
      _ => None,
    }))
  }

  /// The `iCCP` chunk, if any.
  pub fn icc_profile(&mut self) -> PngResult<Option<&iCCP>> {
    Ok(self.chunks()?.iter().find_map(|c| match c {
      PngChunk::iCCP(icc) => Some(icc),
      _ => None,
    }))
  }
}

/// Opens and decodes a PNG file in one step.
pub fn decode_file(path: impl AsRef<Path>) -> PngResult<Pixbuf> {
  PngDecoder::open(path)?.get_pixbuf()
}
