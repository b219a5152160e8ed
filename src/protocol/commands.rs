//! # ESC/POS Control Commands
//!
//! Control bytes and the printer-level commands (initialize, cut, feed,
//! code page) used by receipt templates.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `FF`, `HT`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `GS V m`, `GS k m n data...`
//!
//! ## Byte Order
//!
//! Multi-byte lengths use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// HT (Horizontal Tab)
pub const HT: u8 = 0x09;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Ends a label
pub const FF: u8 = 0x0C;

/// CR (Carriage Return) - Ignored by receipt printers in line mode
pub const CR: u8 = 0x0D;

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// FS (File Separator) - Kanji command prefix
pub const FS: u8 = 0x1C;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics, barcodes, cutter and reverse printing.
pub const GS: u8 = 0x1D;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets text styles, alignment and barcode/QR settings to their power-on
/// defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use recibo::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Select Character Code Table (ESC t n)
///
/// | n | Table |
/// |---|-------|
/// | 0 | PC437 |
/// | 16 | Windows-1252 |
#[inline]
pub fn codepage(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

/// Windows-1252 code table number for [`codepage`].
pub const CODEPAGE_WINDOWS_1252: u8 = 16;

// ============================================================================
// CUTTER AND PAPER
// ============================================================================

/// # Full Cut (GS V 0)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS V '0' |
/// | Hex     | 1D 56 30 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', b'0']
}

/// # Partial Cut (GS V 1)
///
/// Leaves a small hinge connecting the receipt to the roll.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS V '1' |
/// | Hex     | 1D 56 31 |
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', b'1']
}

/// Form feed, ends the current label.
#[inline]
pub fn form_feed() -> Vec<u8> {
    vec![FF]
}

/// # Print and Feed n Lines (ESC d n)
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}
