use super::*;

/// Holds every filtered scanline of an image and unfilters them in place.
///
/// Each line is `scanline_length` bytes: the filter type byte, then the
/// filtered pixel bytes. Once a line has been reconstructed its filter byte
/// reads as 0 and the rest of the line is plain pixel data.
#[derive(Clone)]
pub struct ScanlineDecoder {
  buffer: Vec<u8>,
  scanline_length: usize,
  height: u32,
}
impl Debug for ScanlineDecoder {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ScanlineDecoder")
      .field("scanline_length", &self.scanline_length)
      .field("height", &self.height)
      .finish()
  }
}
impl ScanlineDecoder {
  /// Inflates all `height` lines of `scanline_length` bytes each.
  ///
  /// The buffer only grows by a line once the line before it was filled.
  ///
  /// ## Failure
  /// * [`PngError::ShortInflate`] if the image data runs out before every line
  ///   is full.
  /// * [`PngError::Alloc`] if the buffer can't be allocated.
  /// * Anything the inflater reports.
  pub fn new(
    inflater: &mut ChunkInflater<'_>, scanline_length: usize, height: u32,
  ) -> PngResult<Self> {
    scanline_length
      .checked_mul(height as usize)
      .ok_or(PngError::Format("image size overflows"))?;
    // grows one line at a time, so a header promising more data than the
    // stream holds fails before the whole image is allocated
    let mut buffer = Vec::new();
    for row in 0..height {
      let offset = buffer.len();
      buffer.try_reserve(scanline_length)?;
      buffer.resize(offset + scanline_length, 0);
      let produced = inflater.inflate(&mut buffer, offset, scanline_length)?;
      if produced < scanline_length {
        return Err(PngError::ShortInflate { row, expected: scanline_length, produced });
      }
    }
    if !inflater.is_finished() {
      debug!("image data has bytes past the last scanline");
    }
    Ok(Self { buffer, scanline_length, height })
  }

  /// Bytes per line, including the filter type byte.
  #[inline]
  #[must_use]
  pub const fn scanline_length(&self) -> usize {
    self.scanline_length
  }

  /// Number of lines.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// Unfilters line `row` in place.
  ///
  /// The line above must already be reconstructed, so go top to bottom.
  /// Reconstructing a line twice does nothing the second time.
  ///
  /// ## Failure
  /// * [`PngError::Format`] for an unknown filter type byte.
  ///
  /// ## Panics
  /// * If `row` is not less than the height.
  #[track_caller]
  pub fn reconstruct_row(&mut self, row: u32, bytes_per_pixel: usize) -> PngResult<()> {
    assert!(row < self.height, "row {row} out of bounds");
    let start = (row as usize) * self.scanline_length;
    let (above, rest) = self.buffer.split_at_mut(start);
    let previous = if row == 0 { None } else { Some(&above[start - self.scanline_length..]) };
    unfilter_scanline(previous, &mut rest[..self.scanline_length], bytes_per_pixel)
  }

  /// Unfilters every line, top to bottom.
  pub fn reconstruct_all(&mut self, bytes_per_pixel: usize) -> PngResult<()> {
    for row in 0..self.height {
      self.reconstruct_row(row, bytes_per_pixel)?;
    }
    Ok(())
  }

  /// The pixel bytes of a line (without the filter type byte), or `None` if
  /// `row` is out of bounds.
  #[inline]
  #[must_use]
  pub fn row(&self, row: u32) -> Option<&[u8]> {
    if row < self.height {
      let start = (row as usize) * self.scanline_length;
      self.buffer.get(start + 1..start + self.scanline_length)
    } else {
      None
    }
  }

  /// The whole buffer, filter bytes included.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.buffer
  }
}
