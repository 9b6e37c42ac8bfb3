//! Rasterizes a [`qrgen::Symbol`] into a monochrome image.
//!
//! The module grid is scaled so the finished raster lands close to the
//! requested resolution, with a floor of 10 pixels per module, and is
//! framed by a light quiet zone measured in modules. Dark modules become
//! black pixels, everything else white.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma};
use qrgen::Symbol;

mod error;
pub use error::*;

/// Quiet-zone width in modules when the caller has no preference.
pub const DEFAULT_BORDER: u32 = 2;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

// Pixels per module: aim at `resolution` pixels across, never dropping
// under 10 pixels per module.
fn scale_for(symbol: &Symbol, resolution: u32) -> u32 {
    std::cmp::max(resolution / (symbol.size() as u32 + 4), 10)
}

/// Draws the symbol as a grayscale image with `border` modules of quiet
/// zone on every side.
pub fn render(symbol: &Symbol, resolution: u32, border: u32) -> GrayImage {
    let scale = scale_for(symbol, resolution);
    let side = (symbol.size() as u32 + 2 * border) * scale;
    ImageBuffer::from_fn(side, side, |px, py| {
        let x = (px / scale) as i32 - border as i32;
        let y = (py / scale) as i32 - border as i32;
        // Out-of-range coordinates read light, which paints the border.
        if symbol.module(x, y) {
            DARK
        } else {
            LIGHT
        }
    })
}

/// Encodes the rendered symbol as PNG bytes in memory.
pub fn png_bytes(symbol: &Symbol, resolution: u32, border: u32) -> Result<Vec<u8>, RenderError> {
    let img = render(symbol, resolution, border);
    let mut w = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img).write_to(&mut w, ImageFormat::Png)?;
    Ok(w.into_inner())
}

/// Renders the symbol and writes it to `path`; the image format follows
/// the file extension.
pub fn save<P: AsRef<Path>>(
    symbol: &Symbol,
    path: P,
    resolution: u32,
    border: u32,
) -> Result<(), RenderError> {
    render(symbol, resolution, border).save(path)?;
    Ok(())
}

#[cfg(test)]
mod should {
    use super::*;
    use qrgen::Ecl;

    fn sample() -> Symbol {
        Symbol::encode(b"HELLO WORLD", Ecl::Medium).unwrap()
    }

    #[test]
    fn scale_down_to_the_ten_pixel_floor() {
        let qr = sample(); // version 1, 21 modules across
        assert_eq!(scale_for(&qr, 100), 10);
        assert_eq!(scale_for(&qr, 0), 10);
    }

    #[test]
    fn scale_to_the_requested_resolution() {
        let qr = sample();
        assert_eq!(scale_for(&qr, 300), 12);
    }

    #[test]
    fn size_the_raster_from_modules_border_and_scale() {
        let qr = sample();
        let img = render(&qr, 300, DEFAULT_BORDER);
        // (21 + 2·2) modules at 12 pixels each.
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 300);
    }

    #[test]
    fn paint_the_quiet_zone_light() {
        let qr = sample();
        let img = render(&qr, 300, DEFAULT_BORDER);
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(img.width() - 1, img.height() - 1).0, [255]);
    }

    #[test]
    fn paint_the_finder_corner_dark() {
        let qr = sample();
        let scale = scale_for(&qr, 300);
        let img = render(&qr, 300, DEFAULT_BORDER);
        // Module (0, 0) is the finder's outer ring.
        let px = DEFAULT_BORDER * scale;
        assert_eq!(img.get_pixel(px, px).0, [0]);
    }

    #[test]
    fn emit_the_png_signature() {
        let qr = sample();
        let bytes = png_bytes(&qr, 300, DEFAULT_BORDER).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
