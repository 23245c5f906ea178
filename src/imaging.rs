use crate::error::FetchError;
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use sha2::{Digest, Sha256};
use std::io::Cursor;

/// Validate downloaded bytes as an image and bound the longest edge.
///
/// JPEGs already within bounds are returned untouched; everything else is
/// re-encoded as JPEG so every stored candidate has the same format.
pub fn normalize(bytes: &[u8], max_dimension: u32) -> Result<Vec<u8>, FetchError> {
    let format = image::guess_format(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    let (width, height) = img.dimensions();
    let oversized = width.max(height) > max_dimension;
    if !oversized && format == ImageFormat::Jpeg {
        return Ok(bytes.to_vec());
    }

    let img = if oversized {
        img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg)
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Short content digest used to spot duplicate downloads
pub fn digest(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    format!("{:x}", hash)[..12].to_string()
}

#[cfg(test)]
pub(crate) fn sample_image(width: u32, height: u32, color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(color));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}
