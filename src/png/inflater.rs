use super::*;

use std::collections::VecDeque;

use miniz_oxide::{
  inflate::stream::{inflate, InflateState},
  DataFormat, MZError, MZFlush, MZStatus,
};

/// Decompresses a zlib stream that's been split across any number of chunks.
///
/// PNG allows the image data to be cut into as many `IDAT` chunks as the
/// encoder likes, and the cut points have no relation to the zlib stream's own
/// structure. Rather than gluing all the chunks into one big buffer first,
/// this queues the chunks and feeds them to a single decompressor as it asks
/// for more input.
pub struct ChunkInflater<'b> {
  pending: VecDeque<&'b [u8]>,
  input: &'b [u8],
  state: Box<InflateState>,
  finished: bool,
}
impl Default for ChunkInflater<'_> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl Debug for ChunkInflater<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ChunkInflater")
      .field("pending", &self.pending.len())
      .field("input", &self.input.len())
      .field("finished", &self.finished)
      .finish()
  }
}
impl<'b> ChunkInflater<'b> {
  /// A new inflater with no chunks queued.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self {
      pending: VecDeque::new(),
      input: &[],
      state: InflateState::new_boxed(DataFormat::Zlib),
      finished: false,
    }
  }

  /// Queues one more chunk of the compressed stream.
  #[inline]
  pub fn add(&mut self, chunk: &'b [u8]) {
    self.pending.push_back(chunk);
  }

  /// Moves the next queued chunk into place once the current input is used
  /// up. Empty chunks are skipped.
  #[inline]
  pub fn fill(&mut self) {
    while self.input.is_empty() {
      match self.pending.pop_front() {
        Some(chunk) => self.input = chunk,
        None => break,
      }
    }
  }

  /// If the zlib stream has reached its end marker.
  #[inline]
  #[must_use]
  pub const fn is_finished(&self) -> bool {
    self.finished
  }

  /// Inflates up to `length` bytes into `buffer[offset..offset + length]`.
  ///
  /// Returns how many bytes were actually written. This is less than `length`
  /// only when the stream ends (or the queued chunks run out) first, and it's
  /// up to the caller to decide if that's a problem.
  ///
  /// ## Failure
  /// * [`PngError::Inflate`] if the compressed data is corrupt.
  ///
  /// ## Panics
  /// * If `offset + length` is past the end of `buffer`.
  pub fn inflate(&mut self, buffer: &mut [u8], offset: usize, length: usize) -> PngResult<usize> {
    let out = &mut buffer[offset..offset + length];
    let mut produced = 0;
    while produced < length && !self.finished {
      self.fill();
      let result = inflate(&mut self.state, self.input, &mut out[produced..], MZFlush::None);
      self.input = &self.input[result.bytes_consumed..];
      produced += result.bytes_written;
      match result.status {
        Ok(MZStatus::StreamEnd) => self.finished = true,
        Ok(MZStatus::Ok) => (),
        Ok(MZStatus::NeedDict) => return Err(PngError::Inflate(MZError::Data)),
        // the decompressor wants more input than we have right now
        Err(MZError::Buf) => (),
        Err(e) => return Err(PngError::Inflate(e)),
      }
      if result.bytes_consumed == 0 && result.bytes_written == 0 {
        // fill() already ran, so no progress means there's no input left
        break;
      }
    }
    trace!("inflated {produced} of {length} requested bytes, finished: {}", self.finished);
    Ok(produced)
  }
}
