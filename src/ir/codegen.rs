//! # Code Generation
//!
//! Converts IR programs to ESC/POS bytes.
//!
//! Style tags are compiled against the running [`StyleState`]: only the
//! commands whose state actually changes are emitted, in this order:
//!
//! | Order | Command | When |
//! |-------|---------|------|
//! | 1 | ESC a | alignment changed (must lead the line) |
//! | 2 | ESC ! | any of small/bold/double/underline changed |
//! | 3 | ESC 4 | italic changed |
//! | 4 | ESC { | upside-down changed |
//! | 5 | GS B | reverse changed |

use super::ops::{Op, Program, StyleState};
use crate::protocol::{barcode, commands, cp1252, graphics, text};

impl Program {
    /// Compile the IR program to ESC/POS bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut style = StyleState::default();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => {
                    out.extend(commands::init());
                    style = StyleState::default();
                }
                Op::Codepage(page) => {
                    out.extend(commands::codepage(*page));
                }
                Op::Cut { partial } => {
                    if *partial {
                        out.extend(commands::cut_partial());
                    } else {
                        out.extend(commands::cut_full());
                    }
                }
                Op::FormFeed => {
                    out.extend(commands::form_feed());
                }
                Op::PaperWidth(_) => {}

                // ===== Text =====
                Op::SetStyle(next) => {
                    emit_style_change(&mut out, &style, next);
                    style = *next;
                }
                Op::Text(s) => {
                    out.extend(cp1252::encode(s));
                }

                // ===== 1D Barcodes =====
                Op::SetBarcodeHeight(n) => {
                    out.extend(barcode::barcode1d::set_height(*n));
                }
                Op::SetBarcodeModule(n) => {
                    out.extend(barcode::barcode1d::set_module_width(*n));
                }
                Op::SetBarcodeHri(position) => {
                    out.extend(barcode::barcode1d::set_hri(*position));
                }
                Op::Barcode { symbology, payload } => {
                    out.extend(barcode::barcode1d::print(symbology.type_byte(), payload));
                }

                // ===== QR Codes =====
                Op::SetQrModule(n) => {
                    out.extend(barcode::qr::set_module_size(*n));
                }
                Op::SetQrErrorLevel(level) => {
                    out.extend(barcode::qr::set_error_correction(*level));
                }
                Op::QrCode(data) => {
                    out.extend(barcode::qr::store_data(data));
                    out.extend(barcode::qr::print());
                }

                // ===== Graphics =====
                Op::Raster(image) => {
                    out.extend(graphics::store_raster(
                        image.width as u16,
                        image.height as u16,
                        &image.data,
                    ));
                    out.extend(graphics::print_stored());
                }
            }
        }

        out
    }
}

fn emit_style_change(out: &mut Vec<u8>, from: &StyleState, to: &StyleState) {
    if from.alignment != to.alignment {
        out.extend(text::align(to.alignment));
    }
    if from.print_mode() != to.print_mode() {
        out.extend(text::print_mode(to.print_mode()));
    }
    if from.italic != to.italic {
        out.extend(text::italic(to.italic));
    }
    if from.upside_down != to.upside_down {
        out.extend(text::upside_down(to.upside_down));
    }
    if from.reverse != to.reverse {
        out.extend(text::reverse(to.reverse));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::{Code128Subset, HriPosition, Symbology};
    use crate::protocol::barcode::qr::QrErrorLevel;
    use crate::protocol::text::Alignment;
    use crate::render::RasterImage;
    use pretty_assertions::assert_eq;

    fn style(flags: &str) -> Op {
        Op::SetStyle(StyleState::from_flags(flags).unwrap())
    }

    #[test]
    fn test_empty_program() {
        assert!(Program::new().to_bytes().is_empty());
    }

    #[test]
    fn test_text_is_cp1252() {
        let program: Program = vec![Op::Codepage(16), Op::Text("Año 5€\n".into())]
            .into_iter()
            .collect();
        assert_eq!(
            program.to_bytes(),
            vec![0x1B, b't', 16, b'A', 0xF1, b'o', b' ', b'5', 0x80, b'\n']
        );
    }

    #[test]
    fn test_style_emits_only_changes() {
        let program: Program = vec![style("cb"), style("cb"), style("cbi")].into_iter().collect();
        assert_eq!(
            program.to_bytes(),
            vec![
                0x1B, b'a', b'1', // center
                0x1B, b'!', 0x08, // bold
                0x1B, b'4', b'1', // italic
            ]
        );
    }

    #[test]
    fn test_style_order_and_reset() {
        let program: Program = vec![style("rwhoxi"), style("")].into_iter().collect();
        assert_eq!(
            program.to_bytes(),
            vec![
                0x1B, b'a', b'2', 0x1B, b'!', 0x30, 0x1B, b'4', b'1', 0x1B, b'{', b'1', 0x1D,
                b'B', b'1', // on
                0x1B, b'a', b'0', 0x1B, b'!', 0x00, 0x1B, b'4', b'0', 0x1B, b'{', b'0', 0x1D,
                b'B', b'0', // off
            ]
        );
    }

    #[test]
    fn test_init_resets_tracked_style() {
        let program: Program = vec![style("b"), Op::Init, style("b")].into_iter().collect();
        assert_eq!(
            program.to_bytes(),
            vec![0x1B, b'!', 0x08, 0x1B, b'@', 0x1B, b'!', 0x08]
        );
    }

    #[test]
    fn test_controls() {
        let program: Program = vec![
            Op::Cut { partial: false },
            Op::Cut { partial: true },
            Op::FormFeed,
            Op::PaperWidth(58),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            program.to_bytes(),
            vec![0x1D, b'V', b'0', 0x1D, b'V', b'1', 0x0C]
        );
    }

    #[test]
    fn test_barcode() {
        let program: Program = vec![
            Op::SetBarcodeHeight(80),
            Op::SetBarcodeModule(2),
            Op::SetBarcodeHri(HriPosition::Below),
            Op::Barcode {
                symbology: Symbology::Code128(Code128Subset::C),
                payload: vec![b'{', b'C', 12, 34, 56],
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(
            program.to_bytes(),
            vec![
                0x1D, b'h', 80, 0x1D, b'w', 2, 0x1D, b'H', b'2', 0x1D, b'k', 73, 5, b'{', b'C', 12,
                34, 56
            ]
        );
    }

    #[test]
    fn test_qr_code() {
        let program: Program = vec![
            Op::SetQrModule(4),
            Op::SetQrErrorLevel(QrErrorLevel::M),
            Op::QrCode(b"AB".to_vec()),
        ]
        .into_iter()
        .collect();
        let bytes = program.to_bytes();
        assert_eq!(&bytes[..8], &[0x1D, b'(', b'k', 3, 0, b'1', 67, 4]);
        assert_eq!(&bytes[8..16], &[0x1D, b'(', b'k', 3, 0, b'1', 69, b'1']);
        assert_eq!(
            &bytes[16..],
            &[
                0x1D, b'(', b'k', 5, 0, b'1', 80, b'0', b'A', b'B', 0x1D, b'(', b'k', 3, 0, b'1',
                81, b'0'
            ]
        );
    }

    #[test]
    fn test_raster() {
        let program: Program = vec![
            Op::SetStyle(StyleState {
                alignment: Alignment::Center,
                ..StyleState::default()
            }),
            Op::Raster(RasterImage {
                width: 8,
                height: 1,
                data: vec![0xAA],
            }),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            program.to_bytes(),
            vec![
                0x1B, b'a', b'1', 0x1D, b'(', b'L', 11, 0, b'0', 112, b'0', 1, 1, b'1', 8, 0, 1,
                0, 0xAA, 0x1D, b'(', b'L', 2, 0, b'0', b'2'
            ]
        );
    }
}
