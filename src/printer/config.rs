//! # Printer Configuration
//!
//! Paper geometry and power-on defaults for ESC/POS receipt printers.
//!
//! ## Supported Paper
//!
//! | Config | Paper | Print width | Resolution |
//! |--------|-------|-------------|------------|
//! | `ESCPOS_80MM` | 80mm | 576 dots (72mm) | 203 DPI |
//! | `ESCPOS_58MM` | 58mm | 384 dots (48mm) | 203 DPI |
//!
//! ## Usage
//!
//! ```
//! use recibo::printer::PrinterConfig;
//!
//! let config = PrinterConfig::for_paper_width(58);
//! assert_eq!(config.width_dots, 384);
//! assert_eq!(config.barcode_height, 162);
//! ```

use crate::barcode::HriPosition;
use crate::protocol::barcode::barcode1d;
use crate::protocol::barcode::qr::{self, QrErrorLevel};

/// # Printer Configuration
///
/// ## Power-On Defaults
///
/// `ESC @` returns the printer to these values. The HTML preview starts
/// from them and resets to them on every `ESC @` in the stream.
///
/// | Setting | Value |
/// |---------|-------|
/// | Barcode height | 162 dots |
/// | Barcode module | 3 |
/// | HRI | not printed |
/// | QR module | 3 dots |
/// | QR error correction | L |
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
///
/// For 80mm paper:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   print width = 576 / 8 = 72mm
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterConfig {
    /// Configuration name
    pub name: &'static str,

    /// Paper roll width in millimeters
    pub paper_width_mm: u32,

    /// Maximum print width in dots
    pub width_dots: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Default bar height in dots (GS h)
    pub barcode_height: u8,

    /// Default module width (GS w)
    pub barcode_module: u8,

    /// Default HRI position (GS H)
    pub barcode_hri: HriPosition,

    /// Default QR module size in dots
    pub qr_module: u8,

    /// Default QR error correction level
    pub qr_error_level: QrErrorLevel,
}

impl PrinterConfig {
    /// # 80mm Receipt Printer
    ///
    /// The default when a template does not say `{paper-width N}`.
    pub const ESCPOS_80MM: Self = Self {
        name: "ESC/POS 80mm",
        paper_width_mm: 80,
        width_dots: 576,
        dpi: 203,
        barcode_height: barcode1d::DEFAULT_HEIGHT,
        barcode_module: barcode1d::DEFAULT_MODULE,
        barcode_hri: HriPosition::None,
        qr_module: qr::DEFAULT_MODULE,
        qr_error_level: QrErrorLevel::L,
    };

    /// # 58mm Receipt Printer
    pub const ESCPOS_58MM: Self = Self {
        name: "ESC/POS 58mm",
        paper_width_mm: 58,
        width_dots: 384,
        ..Self::ESCPOS_80MM
    };

    /// Pick the configuration for a paper width, falling back to 80mm.
    pub fn for_paper_width(mm: u32) -> Self {
        match mm {
            58 => Self::ESCPOS_58MM,
            _ => Self::ESCPOS_80MM,
        }
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::ESCPOS_80MM
    }
}
