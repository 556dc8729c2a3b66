use std::io::Cursor;

use image::ImageOutputFormat;

use crate::error::Result;

/// Decodes an image in any supported format and re-encodes it as PNG.
pub fn reencode_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}
