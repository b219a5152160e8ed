//! # ESC/POS Text Styling Commands
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Print mode | ESC ! n | small, bold, double height/width, underline |
//! | Italic | ESC 4 n | *Italic* text |
//! | Upside down | ESC { n | 180° rotation |
//! | Reverse | GS B n | White on black |
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text |
//!
//! The on/off parameter is sent as the ASCII digit `'0'`/`'1'`; printers
//! only look at the lowest bit so `0`/`1` are equivalent.
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```
//!
//! Alignment only takes effect at the start of a line.

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// Decode the `ESC a` parameter (binary or ASCII digit).
    pub fn from_param(n: u8) -> Option<Self> {
        match n {
            0 | b'0' => Some(Alignment::Left),
            1 | b'1' => Some(Alignment::Center),
            2 | b'2' => Some(Alignment::Right),
            _ => None,
        }
    }

    /// CSS class name used by the HTML preview.
    pub fn css_class(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// # Set Text Alignment (ESC a n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// `n` is `'0'` (left), `'1'` (center) or `'2'` (right).
#[inline]
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', b'0' + alignment as u8]
}

// ============================================================================
// PRINT MODE (ESC !)
// ============================================================================

/// `ESC !` bit: font B (small)
pub const MODE_SMALL: u8 = 0x01;
/// `ESC !` bit: emphasized
pub const MODE_BOLD: u8 = 0x08;
/// `ESC !` bit: double height
pub const MODE_DOUBLE_HEIGHT: u8 = 0x10;
/// `ESC !` bit: double width
pub const MODE_DOUBLE_WIDTH: u8 = 0x20;
/// `ESC !` bit: underline
pub const MODE_UNDERLINE: u8 = 0x80;

/// # Select Print Mode (ESC ! n)
///
/// Sets font size, weight and underline in one byte.
///
/// | Bit | Hex | Meaning |
/// |-----|-----|---------|
/// | 0 | 0x01 | Small font |
/// | 3 | 0x08 | Bold |
/// | 4 | 0x10 | Double height |
/// | 5 | 0x20 | Double width |
/// | 7 | 0x80 | Underline |
#[inline]
pub fn print_mode(flags: u8) -> Vec<u8> {
    vec![ESC, b'!', flags]
}

// ============================================================================
// SWITCHES
// ============================================================================

fn switch(on: bool) -> u8 {
    if on { b'1' } else { b'0' }
}

/// # Italic (ESC 4 n)
#[inline]
pub fn italic(on: bool) -> Vec<u8> {
    vec![ESC, b'4', switch(on)]
}

/// # Upside-Down Printing (ESC { n)
///
/// Best used at the start of a line.
#[inline]
pub fn upside_down(on: bool) -> Vec<u8> {
    vec![ESC, b'{', switch(on)]
}

/// # Reverse White/Black (GS B n)
#[inline]
pub fn reverse(on: bool) -> Vec<u8> {
    vec![GS, b'B', switch(on)]
}

/// # Emphasized (ESC E n)
#[inline]
pub fn bold(on: bool) -> Vec<u8> {
    vec![ESC, b'E', switch(on)]
}

/// # Underline (ESC - n)
#[inline]
pub fn underline(on: bool) -> Vec<u8> {
    vec![ESC, b'-', switch(on)]
}
