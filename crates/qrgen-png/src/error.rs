use image::ImageError;
use qrgen::QrError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("image error: {0}")]
    Image(#[from] ImageError),

    #[error("qr error: {0}")]
    Qr(#[from] QrError),
}
