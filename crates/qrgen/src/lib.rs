//! Byte-mode QR Code symbol encoder.
//!
//! Turns an arbitrary byte payload into a standards-conformant QR Code
//! module grid, as laid out by ISO/IEC 18004 (Model 2). The encoder picks
//! the smallest symbol version inside a caller-supplied range, raises the
//! error correction level as far as the spare capacity at that version
//! allows, and selects the mask pattern with the lowest penalty score.
//!
//! The result is a [`Symbol`]: an immutable square grid of dark and light
//! modules, queried one cell at a time. Rasterization, file output and the
//! command-line surface live in the sibling crates.
//!
//! # Examples
//!
//! ```
//! use qrgen::{Ecl, Symbol};
//!
//! let qr = Symbol::encode(b"https://example.com/", Ecl::Medium)?;
//! for y in 0..qr.size() {
//!     for x in 0..qr.size() {
//!         let _dark = qr.module(x, y);
//!     }
//! }
//! # Ok::<(), qrgen::QrError>(())
//! ```
//!
//! Constraining the version range:
//!
//! ```
//! use qrgen::{Ecl, Symbol, Version};
//!
//! let v5 = Version::new(5)?;
//! let qr = Symbol::encode_in_range(b"pinned", v5, v5, Ecl::Quartile)?;
//! assert_eq!(qr.size(), 37);
//! # Ok::<(), qrgen::QrError>(())
//! ```

mod bit_buffer;
mod ecl;
mod error;
mod finder_penalty;
mod mask;
mod reed_solomon;
mod symbol;
mod version;

pub use bit_buffer::*;
pub use ecl::*;
pub use error::*;
pub use mask::*;
pub use reed_solomon::*;
pub use symbol::*;
pub use version::*;

/*---- Constants and tables ----*/

// Weights of the four mask penalty rules.
pub const PENALTY_N1: i32 = 3;
pub const PENALTY_N2: i32 = 3;
pub const PENALTY_N3: i32 = 40;
pub const PENALTY_N4: i32 = 10;

pub static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // Version: (note that index 0 is for padding, and is set to an illegal value)
    //0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40    Error correction level
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

pub static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    // Version: (note that index 0 is for padding, and is set to an illegal value)
    //0, 1, 2, 3, 4, 5, 6, 7, 8, 9,10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40    Error correction level
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];
