//! # Barcode Encoding Engine
//!
//! Pure encoders for the twelve 1D symbologies understood by ESC/POS
//! printers (`GS k`). Each encoder turns text into a [`BarPattern`] (the
//! widths, in modules, of alternating bars and spaces) plus the human
//! readable interpretation printed next to the bars.
//!
//! ## Symbologies
//!
//! | Symbology | Alphabet | Check | Guards |
//! |-----------|----------|-------|--------|
//! | Code39 | `0-9 A-Z space - . $ / + %` | none | `*` |
//! | Code93 | Code39 set + 4 shifts | C and K (mod 47) | `*` + terminator |
//! | ITF | digits, even length | none | `1111` / `211` |
//! | Code128 (Auto/A/B/C) | per subset | weighted mod 103 | start + stop |
//! | EAN-13 / EAN-8 | digits | mod 10 | `111` / `11111` / `111` |
//! | UPC-A / UPC-E | digits | mod 10 | `111` / `11111` / `111` |
//! | Codabar | `0-9 - $ : / . +` | none | `a`-`d` |
//!
//! ## Example
//!
//! ```
//! use recibo::barcode::{self, Code128Subset, Symbology};
//!
//! let encoded = barcode::encode("123456", Symbology::Code128(Code128Subset::C))?;
//! assert_eq!(encoded.pattern.to_string(), "2112321122321311233311211321312331112");
//! assert_eq!(encoded.hri, "123456");
//! # Ok::<(), barcode::EncodingError>(())
//! ```

mod codabar;
pub mod code128;
mod code39;
mod code93;
mod ean;
mod itf;
pub mod svg;
pub mod upc;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::ReciboError;

/// Errors raised while validating or encoding barcode data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("empty code")]
    EmptyInput,

    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("invalid length {0}")]
    InvalidLength(usize),

    #[error("invalid check digit {found}, expected {expected}")]
    InvalidChecksum { expected: u8, found: u8 },

    #[error("invalid escape sequence {0}")]
    MalformedEscape(String),

    /// A UPC-A number with no UPC-E zero-suppressed form.
    #[error("{0} has no UPC-E form")]
    NotCompressible(String),
}

/// Code128 character subset selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code128Subset {
    /// Switch between B and C as the data requires.
    Auto,
    /// Control characters, digits, upper case and symbols.
    A,
    /// Printable ASCII.
    B,
    /// Digit pairs.
    C,
}

/// The supported 1D symbologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Code39,
    Code93,
    Itf,
    Code128(Code128Subset),
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Codabar,
}

impl Symbology {
    /// All symbologies, in directive-name order.
    pub const ALL: [Symbology; 12] = [
        Symbology::Code128(Code128Subset::Auto),
        Symbology::Code128(Code128Subset::A),
        Symbology::Code128(Code128Subset::B),
        Symbology::Code128(Code128Subset::C),
        Symbology::Itf,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Codabar,
    ];

    /// Directive name used in templates (`{code128 ...}`, `{ean-13 ...}`).
    pub fn name(&self) -> &'static str {
        match self {
            Symbology::Code128(Code128Subset::Auto) => "code128",
            Symbology::Code128(Code128Subset::A) => "code128a",
            Symbology::Code128(Code128Subset::B) => "code128b",
            Symbology::Code128(Code128Subset::C) => "code128c",
            Symbology::Itf => "itf",
            Symbology::UpcA => "upc-a",
            Symbology::UpcE => "upc-e",
            Symbology::Ean13 => "ean-13",
            Symbology::Ean8 => "ean-8",
            Symbology::Code39 => "code39",
            Symbology::Code93 => "code93",
            Symbology::Codabar => "codabar",
        }
    }

    /// `GS k` function B type byte.
    ///
    /// All Code128 subsets share type 73; the subset travels inside the
    /// payload as a `{A`/`{B`/`{C` prefix.
    pub fn type_byte(&self) -> u8 {
        match self {
            Symbology::UpcA => 65,
            Symbology::UpcE => 66,
            Symbology::Ean13 => 67,
            Symbology::Ean8 => 68,
            Symbology::Code39 => 69,
            Symbology::Itf => 70,
            Symbology::Codabar => 71,
            Symbology::Code93 => 72,
            Symbology::Code128(_) => 73,
        }
    }

    /// Map a `GS k` type byte back to a symbology.
    ///
    /// Function A bytes 0-6 alias 65-71. Type 73 carries an escaped
    /// payload with its own subset selection (see
    /// [`code128::encode_escaped`]), so it has no single symbology and
    /// returns `None` like any unknown type.
    pub fn from_type_byte(byte: u8) -> Option<Self> {
        match byte {
            0 | 65 => Some(Symbology::UpcA),
            1 | 66 => Some(Symbology::UpcE),
            2 | 67 => Some(Symbology::Ean13),
            3 | 68 => Some(Symbology::Ean8),
            4 | 69 => Some(Symbology::Code39),
            5 | 70 => Some(Symbology::Itf),
            6 | 71 => Some(Symbology::Codabar),
            72 => Some(Symbology::Code93),
            _ => None,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = ReciboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbology::ALL
            .into_iter()
            .find(|sym| sym.name() == s)
            .ok_or_else(|| ReciboError::UnsupportedSymbology(s.to_string()))
    }
}

/// Bar/space widths in modules, starting with a bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BarPattern(Vec<u8>);

impl BarPattern {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a pattern written as width digits (`"211412"`).
    pub(crate) fn push_str(&mut self, widths: &str) {
        self.0.extend(widths.bytes().map(|b| b - b'0'));
    }

    pub fn widths(&self) -> &[u8] {
        &self.0
    }

    /// Total width in modules.
    pub fn modules(&self) -> u32 {
        self.0.iter().map(|&w| u32::from(w)).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BarPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in &self.0 {
            write!(f, "{}", w)?;
        }
        Ok(())
    }
}

/// Result of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub pattern: BarPattern,
    /// Human readable interpretation.
    pub hri: String,
}

/// Where the human readable text goes relative to the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HriPosition {
    #[default]
    None,
    Above,
    Below,
    Both,
}

impl HriPosition {
    pub fn shows_above(self) -> bool {
        matches!(self, HriPosition::Above | HriPosition::Both)
    }

    pub fn shows_below(self) -> bool {
        matches!(self, HriPosition::Below | HriPosition::Both)
    }
}

impl FromStr for HriPosition {
    type Err = ReciboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(HriPosition::None),
            "above" => Ok(HriPosition::Above),
            "below" => Ok(HriPosition::Below),
            "both" => Ok(HriPosition::Both),
            other => Err(ReciboError::MalformedDirective(format!(
                "unknown HRI position {:?}",
                other
            ))),
        }
    }
}

/// Encode `text` with the given symbology.
pub fn encode(text: &str, symbology: Symbology) -> Result<Encoded, EncodingError> {
    match symbology {
        Symbology::Code39 => code39::encode(text),
        Symbology::Code93 => code93::encode(text),
        Symbology::Itf => itf::encode(text),
        Symbology::Code128(Code128Subset::Auto) => code128::encode_auto(text),
        Symbology::Code128(subset) => code128::encode_subset(text, subset),
        Symbology::Ean13 => ean::encode_ean13(text),
        Symbology::Ean8 => ean::encode_ean8(text),
        Symbology::UpcA => upc::encode_upca(text),
        Symbology::UpcE => upc::encode_upce(text),
        Symbology::Codabar => codabar::encode(text),
    }
}

/// Parse an all-digit string into digit values.
pub(crate) fn digits(text: &str) -> Result<Vec<u8>, EncodingError> {
    text.chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or(EncodingError::InvalidCharacter(c))
        })
        .collect()
}

/// Modulo-10 check digit with the given weights for even/odd positions.
///
/// `weights[0]` applies to index 0, 2, 4... and `weights[1]` to 1, 3, 5...
pub(crate) fn mod10_check(digits: &[u8], weights: [u32; 2]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * weights[i % 2])
        .sum();
    ((10 - sum % 10) % 10) as u8
}
