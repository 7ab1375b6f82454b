use pngcore::png::{PngDecoder, PngError};

fn main() {
  env_logger::init();
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    println!("Reading `{}`...", path.display());
    if let Err(e) = print_chunks(path) {
      println!("{e}");
    }
  }
}

fn print_chunks(path: &std::path::Path) -> Result<(), PngError> {
  let mut decoder = PngDecoder::open(path)?;
  for (n, chunk) in decoder.chunks()?.iter().enumerate() {
    println!("{n}: {chunk:?}");
  }
  if let Some(time) = decoder.modification_time()? {
    println!("modified: {time:?} ({:?})", time.to_system_time());
  }
  let pixbuf = decoder.get_pixbuf()?;
  println!("{}x{} alpha:{}", pixbuf.width, pixbuf.height, pixbuf.has_alpha);
  Ok(())
}
