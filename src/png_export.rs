use std::{fs::File, path::Path};

use crate::drawable_buffer::DrawableBuffer;

/// Writes the content of the buffer into an 8 bit RGBA png file
pub fn save_png(buffer: &DrawableBuffer, png_output_path: &Path) -> anyhow::Result<()> {
    let file = File::create(png_output_path)?;
    let mut png_encoder = png::Encoder::new(file, buffer.width(), buffer.height());
    png_encoder.set_depth(png::BitDepth::Eight);
    png_encoder.set_color(png::ColorType::Rgba);

    let mut png_writer = png_encoder.write_header()?;
    png_writer.write_image_data(buffer.as_raw())?;
    png_writer.finish()?;

    log::info!(
        "Saved {}x{} buffer to {:?}",
        buffer.width(),
        buffer.height(),
        png_output_path
    );
    Ok(())
}
