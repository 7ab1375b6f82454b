use super::*;

/// `tEXt` or `zTXt`: Textual data.
///
/// Both chunk types decode to the same thing: a Latin-1 keyword and Latin-1
/// text. The `zTXt` text is zlib compressed within the chunk, and it's
/// already inflated by the time you see it here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextChunk {
  /// Normally 1-79 bytes, such as `Title`, `Author`, or `Description`.
  pub keyword: String,
  pub text: String,
}
impl TextChunk {
  /// Parses a `tEXt` payload: keyword, null, text.
  pub fn from_text_bytes(data: &[u8]) -> PngResult<Self> {
    let (keyword, text) = split_at_null(data).ok_or(PngError::Format("tEXt has no keyword"))?;
    Ok(Self { keyword: latin1_to_string(keyword), text: latin1_to_string(text) })
  }

  /// Parses a `zTXt` payload: keyword, null, compression method, zlib data.
  pub fn from_ztxt_bytes(data: &[u8]) -> PngResult<Self> {
    let (keyword, rest) = split_at_null(data).ok_or(PngError::Format("zTXt has no keyword"))?;
    match rest {
      [0, zlib_data @ ..] => {
        let text = inflate_zlib(zlib_data)?;
        Ok(Self { keyword: latin1_to_string(keyword), text: latin1_to_string(&text) })
      }
      [_, ..] => Err(PngError::Format("zTXt compression method must be 0")),
      [] => Err(PngError::Format("zTXt has no compression method")),
    }
  }
}

/// `iTXt`: International textual data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct iTXt {
  /// Latin-1, the same as the keyword of the other text chunks.
  pub keyword: String,
  /// If the text was zlib compressed within the chunk.
  pub compressed: bool,
  /// An RFC-3066 language tag, eg `en-US`, or empty for unspecified.
  pub language: String,
  /// The keyword value, translated into the target language
  pub translated_keyword: String,
  /// The (already decompressed) text, in the target language.
  pub text: String,
}
impl TryFrom<&[u8]> for iTXt {
  type Error = PngError;
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let (keyword, rest) = split_at_null(data).ok_or(PngError::Format("iTXt has no keyword"))?;
    let (compressed, rest) = match rest {
      [0, 0, rest @ ..] => (false, rest),
      [1, 0, rest @ ..] => (true, rest),
      [0 | 1, _, ..] => return Err(PngError::Format("iTXt compression method must be 0")),
      _ => return Err(PngError::Format("iTXt has a bad compression flag")),
    };
    let (language, rest) =
      split_at_null(rest).ok_or(PngError::Format("iTXt has no language tag"))?;
    let (translated_keyword, text) =
      split_at_null(rest).ok_or(PngError::Format("iTXt has no translated keyword"))?;
    let text = if compressed { inflate_zlib(text)? } else { text.to_vec() };
    Ok(Self {
      keyword: latin1_to_string(keyword),
      compressed,
      language: latin1_to_string(language),
      translated_keyword: utf8_to_string(translated_keyword.to_vec())?,
      text: utf8_to_string(text)?,
    })
  }
}

#[inline]
fn utf8_to_string(bytes: Vec<u8>) -> PngResult<String> {
  String::from_utf8(bytes).map_err(|_| PngError::Format("iTXt text is not UTF-8"))
}

/// Inflates a complete zlib stream held within a single chunk.
pub(crate) fn inflate_zlib(zlib_data: &[u8]) -> PngResult<Vec<u8>> {
  miniz_oxide::inflate::decompress_to_vec_zlib(zlib_data)
    .map_err(|_| PngError::Format("bad zlib data within a chunk"))
}
