//! # Intermediate Representation (IR)
//!
//! The IR sits between expanded template text and raw ESC/POS bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────┐
//! │  Expanded   │ ──► │     IR      │ ──► │ Codegen  │
//! │  template   │     │  (Vec<Op>)  │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └──────────┘
//!       parse()                            to_bytes()
//! ```
//!
//! The tokenizer makes one pass over the text and classifies every `{...}`
//! tag, so the order in which directives take effect is simply their order
//! in the template.
//!
//! ## Example
//!
//! ```
//! use recibo::ir;
//!
//! let (bytes, width) = ir::generate("{c}TICKET\n{code128c 123456}\n{paper-width 58}");
//! assert_eq!(width, 58);
//! assert!(bytes.windows(5).any(|w| w == [0x1D, b'k', 73, 5, b'{']));
//! ```

mod codegen;
mod ops;
mod parse;

pub use ops::*;
pub use parse::{MAX_BARCODE_DATA, barcode_payload, parse};

/// Generate ESC/POS bytes from expanded template text.
///
/// Returns the command bytes and the paper width in mm.
pub fn generate(text: &str) -> (Vec<u8>, u32) {
    let program = parse(text);
    let width = program.paper_width();
    log::debug!("paper width {}mm", width);
    (program.to_bytes(), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_simple() {
        let (bytes, width) = generate("  {b}Hi{}\r\n");
        assert_eq!(width, 80);
        assert_eq!(
            bytes,
            vec![0x1B, b't', 16, 0x1B, b'!', 0x08, b'H', b'i', 0x1B, b'!', 0x00]
        );
    }

    #[test]
    fn test_repeated_style_tag_is_silent() {
        let (once, _) = generate("{bu}A");
        let (twice, _) = generate("{bu}{bu}A");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_paper_width_max() {
        let (bytes, width) = generate("{paper-width 58}x{paper-width 72}");
        assert_eq!(width, 72);
        assert_eq!(bytes, vec![0x1B, b't', 16, b'x']);
    }
}
