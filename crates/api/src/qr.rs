//! QR code rendering for care lookup links.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::error::AppError;

/// Smallest edge of the rendered code, in pixels.
const MIN_QR_SIZE: u32 = 200;

/// Render `data` as a black-on-white PNG QR code.
pub fn render_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::InternalError(format!("QR encoding failed: {e}")))?;
    let pixels = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_QR_SIZE, MIN_QR_SIZE)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(pixels)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::InternalError(format!("QR PNG encoding failed: {e}")))?;
    Ok(png)
}
