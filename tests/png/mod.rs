use pngcore::png::{PngDecoder, RawPngChunkIter, PNG_SIGNATURE};
use walkdir::WalkDir;

#[test]
fn test_RawPngChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    for _ in RawPngChunkIter::new(&v) {
      //
    }
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in RawPngChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_PngDecoder_no_panics() {
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    if !entry.file_type().is_file() {
      continue;
    }
    match PngDecoder::open(entry.path()).and_then(|mut d| d.get_pixbuf()) {
      Ok(pixbuf) => println!("{}: {}x{}", entry.path().display(), pixbuf.width, pixbuf.height),
      Err(e) => println!("{}: {e}", entry.path().display()),
    }
  }
  // random data behind a real signature gets past the first check and into
  // the chunk parsing
  for _ in 0..50 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(1024));
    let mut decoder = PngDecoder::new(v.as_slice());
    let _ = decoder.get_pixbuf();
    let _ = decoder.lookup_text("Title");
  }
}
