//! # ESC/POS Raster Graphics Commands
//!
//! Raster images are sent in two steps: the bitmap is stored in the print
//! buffer (function 112) and then printed (function 50).
//!
//! ## Store Commands
//!
//! | Size | Command | Length field |
//! |------|---------|--------------|
//! | < 64 KiB | GS ( L | 2 bytes (pL pH) |
//! | ≥ 64 KiB | GS 8 L | 4 bytes (p1 p2 p3 p4) |
//!
//! ## Bit Packing
//!
//! Each row is `(width + 7) / 8` bytes, MSB = leftmost dot, 1 = black.
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```

use super::commands::GS;

/// Function number for "store raster graphics".
pub const FN_STORE_RASTER: u8 = 112;

/// Bytes between the length field and the raster data:
/// `m fn a bx by c xL xH yL yH`.
pub const STORE_HEADER_LEN: usize = 10;

// ============================================================================
// STORE (GS ( L / GS 8 L, fn 112)
// ============================================================================

/// # Store Raster Graphics (GS ( L / GS 8 L ... 48 112 48 1 1 49 xL xH yL yH d...)
///
/// ## Protocol Details
///
/// | Field | Value |
/// |-------|-------|
/// | m | '0' |
/// | fn | 112 |
/// | a | '0' (monochrome) |
/// | bx, by | 1, 1 (no scaling) |
/// | c | '1' (first color) |
/// | xL xH | width in dots |
/// | yL yH | height in dots |
///
/// The length field counts everything after itself: `data.len() + 10`.
/// The short form is used while that fits in 16 bits.
pub fn store_raster(width: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let size = data.len() + STORE_HEADER_LEN;
    let mut cmd = Vec::with_capacity(size + 7);
    if size < 0x1_0000 {
        cmd.extend([GS, b'(', b'L', size as u8, (size >> 8) as u8]);
    } else {
        cmd.extend([
            GS,
            b'8',
            b'L',
            size as u8,
            (size >> 8) as u8,
            (size >> 16) as u8,
            (size >> 24) as u8,
        ]);
    }
    let [xl, xh] = width.to_le_bytes();
    let [yl, yh] = height.to_le_bytes();
    cmd.extend([b'0', FN_STORE_RASTER, b'0', 1, 1, b'1', xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// PRINT (GS ( L fn 50)
// ============================================================================

/// # Print Stored Graphics (GS ( L 2 0 48 50)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 28 4C 02 00 30 32 |
#[inline]
pub fn print_stored() -> Vec<u8> {
    vec![GS, b'(', b'L', 2, 0, b'0', b'2']
}
