//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) produced by the
//! template tokenizer and consumed by the code generator.
//!
//! ## Design Philosophy
//!
//! ```text
//! expanded text → parse → Program (inspectable) → codegen → ESC/POS bytes
//! ```
//!
//! Every directive becomes exactly one opcode. Directive arguments are
//! validated while parsing, so a [`Program`] only ever holds ops the
//! printer accepts; style tags carry the full target [`StyleState`] and the
//! code generator works out which escape sequences actually change it.

use crate::barcode::{HriPosition, Symbology};
use crate::error::ReciboError;
use crate::printer::PrinterConfig;
use crate::protocol::barcode::qr::QrErrorLevel;
use crate::protocol::text::{
    Alignment, MODE_BOLD, MODE_DOUBLE_HEIGHT, MODE_DOUBLE_WIDTH, MODE_SMALL, MODE_UNDERLINE,
};
use crate::render::RasterImage;

/// Text style selected by a `{flags}` tag.
///
/// | Letter | Field |
/// |--------|-------|
/// | `w` | double width |
/// | `h` | double height |
/// | `s` | small |
/// | `b` | bold |
/// | `u` | underline |
/// | `i` | italic |
/// | `o` | reverse |
/// | `x` | upside down |
/// | `l` `c` `r` | alignment |
///
/// Letters not named in a tag are off, so `{}` restores the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleState {
    pub alignment: Alignment,
    pub bold: bool,
    pub underline: bool,
    pub italic: bool,
    pub small: bool,
    pub double_width: bool,
    pub double_height: bool,
    pub reverse: bool,
    pub upside_down: bool,
}

impl StyleState {
    /// Build a style from the letters of a style tag.
    pub fn from_flags(flags: &str) -> Result<Self, ReciboError> {
        let mut style = StyleState::default();
        for letter in flags.chars() {
            match letter {
                'w' => style.double_width = true,
                'h' => style.double_height = true,
                's' => style.small = true,
                'b' => style.bold = true,
                'u' => style.underline = true,
                'i' => style.italic = true,
                'o' => style.reverse = true,
                'x' => style.upside_down = true,
                'l' => style.alignment = Alignment::Left,
                'c' => style.alignment = Alignment::Center,
                'r' => style.alignment = Alignment::Right,
                other => {
                    return Err(ReciboError::MalformedDirective(format!(
                        "unknown style flag {:?}",
                        other
                    )));
                }
            }
        }
        Ok(style)
    }

    /// The `ESC !` byte for the font size/weight/underline bundle.
    pub fn print_mode(&self) -> u8 {
        let mut flags = 0;
        if self.small {
            flags |= MODE_SMALL;
        }
        if self.bold {
            flags |= MODE_BOLD;
        }
        if self.double_height {
            flags |= MODE_DOUBLE_HEIGHT;
        }
        if self.double_width {
            flags |= MODE_DOUBLE_WIDTH;
        }
        if self.underline {
            flags |= MODE_UNDERLINE;
        }
        flags
    }
}

/// IR opcodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ===== Printer Control =====
    /// Initialize printer (ESC @). Resets styles and barcode settings.
    Init,

    /// Select character code table (ESC t n).
    Codepage(u8),

    /// Cut paper. `partial: true` leaves a small hinge.
    Cut { partial: bool },

    /// Form feed, ends the current label.
    FormFeed,

    /// Requested paper width in mm. Emits no bytes.
    PaperWidth(u32),

    // ===== Text =====
    /// Switch to a new text style.
    SetStyle(StyleState),

    /// Literal text, newlines included. Encoded as Windows-1252.
    Text(String),

    // ===== 1D Barcodes =====
    /// Bar height in dots (GS h).
    SetBarcodeHeight(u8),

    /// Module width (GS w).
    SetBarcodeModule(u8),

    /// HRI position (GS H).
    SetBarcodeHri(HriPosition),

    /// Print a barcode (GS k). `payload` is already in the printer's form
    /// for the symbology (escaped Code128, wrapped Codabar, ...).
    Barcode {
        symbology: Symbology,
        payload: Vec<u8>,
    },

    // ===== QR Codes =====
    /// QR module size in dots.
    SetQrModule(u8),

    /// QR error correction level.
    SetQrErrorLevel(QrErrorLevel),

    /// Store and print a QR code.
    QrCode(Vec<u8>),

    // ===== Graphics =====
    /// Store and print a raster image.
    Raster(RasterImage),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Add multiple ops to the program.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Paper width in mm: the largest `{paper-width N}` seen, or 80.
    pub fn paper_width(&self) -> u32 {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::PaperWidth(mm) => Some(*mm),
                _ => None,
            })
            .max()
            .filter(|&mm| mm > 0)
            .unwrap_or(PrinterConfig::ESCPOS_80MM.paper_width_mm)
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
