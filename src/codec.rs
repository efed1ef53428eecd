//! Upload decoding and overlay encoding.
//!
//! Every decoded image is converted to 8-bit RGB here, so the rest of the
//! crate only ever sees `RgbImage`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage};

use crate::error::PipelineError;

/// Decodes PNG/JPEG/BMP/GIF bytes into RGB.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    let img = image::load_from_memory(bytes).map_err(PipelineError::Decode)?;
    Ok(img.to_rgb8())
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .map_err(PipelineError::Encode)?;
    Ok(buf)
}

/// `data:image/png;base64,...` for already-encoded PNG bytes.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

pub fn overlay_data_uri(image: &RgbImage) -> Result<String, PipelineError> {
    Ok(png_data_uri(&encode_png(image)?))
}
