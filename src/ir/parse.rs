//! # Template Tokenizer
//!
//! Turns expanded template text into a [`Program`].
//!
//! ## Directive Grammar
//!
//! A directive is a `{...}` span with no braces inside. Anything else is
//! literal text.
//!
//! | Directive | Op |
//! |-----------|----|
//! | `{[whsbuioxlrc]*}` | [`Op::SetStyle`] |
//! | `{reset}` | [`Op::Init`] |
//! | `{full-cut}` / `{partial-cut}` | [`Op::Cut`] |
//! | `{form-feed}` | [`Op::FormFeed`] |
//! | `{paper-width N}` | [`Op::PaperWidth`] |
//! | `{bc-height N}` (1-255) | [`Op::SetBarcodeHeight`] |
//! | `{bc-modulo N}` (2-6) | [`Op::SetBarcodeModule`] |
//! | `{bc-hri none\|above\|below\|both}` | [`Op::SetBarcodeHri`] |
//! | `{SYMBOLOGY DATA}` | [`Op::Barcode`] |
//! | `{qr-modulo N}` (1-16) | [`Op::SetQrModule`] |
//! | `{qr-ecc L\|M\|Q\|H}` | [`Op::SetQrErrorLevel`] |
//! | `{qr DATA}` | [`Op::QrCode`] |
//! | `{img PATH}` | [`Op::Raster`] |
//!
//! A recognised directive whose argument is invalid (a barcode the
//! symbology rejects, an unreadable image, a number out of range) stays in
//! the output as literal text and a warning is logged. One bad field never
//! stops the rest of the receipt from printing.

use std::str::FromStr;

use super::ops::{Op, Program, StyleState};
use crate::barcode::{self, Code128Subset, HriPosition, Symbology, code128};
use crate::protocol::barcode::qr::{self, QrErrorLevel};
use crate::protocol::commands::CODEPAGE_WINDOWS_1252;
use crate::protocol::cp1252;
use crate::render::RasterImage;

/// Barcode data must be shorter than this many bytes.
pub const MAX_BARCODE_DATA: usize = 30;

/// Outcome of classifying one `{...}` body.
enum Directive {
    Op(Op),
    Malformed(String),
    NotDirective,
}

/// Parse expanded template text.
///
/// The text is trimmed and carriage returns are dropped before
/// tokenizing. The program always starts by selecting Windows-1252.
pub fn parse(text: &str) -> Program {
    let text: String = text
        .trim_matches(|c| matches!(c, '\t' | '\n' | '\x0B' | '\x0C' | '\r' | ' '))
        .chars()
        .filter(|&c| c != '\r')
        .collect();

    let mut program = Program::new();
    program.push(Op::Codepage(CODEPAGE_WINDOWS_1252));

    let mut literal = String::new();
    let mut rest = text.as_str();
    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let close = match after.find(['{', '}']) {
            Some(pos) if after.as_bytes()[pos] == b'}' => pos,
            _ => {
                literal.push('{');
                rest = after;
                continue;
            }
        };

        let tag = &rest[open..open + close + 2];
        match directive(&after[..close]) {
            Directive::Op(op) => {
                flush(&mut program, &mut literal);
                program.push(op);
            }
            Directive::Malformed(reason) => {
                log::warn!("leaving {} as text: {}", tag, reason);
                literal.push_str(tag);
            }
            Directive::NotDirective => literal.push_str(tag),
        }
        rest = &after[close + 1..];
    }
    literal.push_str(rest);
    flush(&mut program, &mut literal);

    log::debug!("parsed {} ops", program.len());
    program
}

fn flush(program: &mut Program, literal: &mut String) {
    if !literal.is_empty() {
        program.push(Op::Text(std::mem::take(literal)));
    }
}

fn directive(body: &str) -> Directive {
    if let Ok(style) = StyleState::from_flags(body) {
        return Directive::Op(Op::SetStyle(style));
    }

    match body {
        "reset" => return Directive::Op(Op::Init),
        "full-cut" => return Directive::Op(Op::Cut { partial: false }),
        "partial-cut" => return Directive::Op(Op::Cut { partial: true }),
        "form-feed" => return Directive::Op(Op::FormFeed),
        _ => {}
    }

    let Some((name, arg)) = body.split_once(' ') else {
        return Directive::NotDirective;
    };
    if arg.is_empty() {
        return Directive::NotDirective;
    }

    let result = match name {
        "paper-width" => number(arg, 0, u32::MAX).map(Op::PaperWidth),
        "bc-height" => number(arg, 1, 255).map(|n| Op::SetBarcodeHeight(n as u8)),
        "bc-modulo" => number(arg, 2, 6).map(|n| Op::SetBarcodeModule(n as u8)),
        "bc-hri" => HriPosition::from_str(arg)
            .map(Op::SetBarcodeHri)
            .map_err(|e| e.to_string()),
        "qr-modulo" => number(arg, 1, 16).map(|n| Op::SetQrModule(n as u8)),
        "qr-ecc" => QrErrorLevel::from_letter(arg)
            .map(Op::SetQrErrorLevel)
            .ok_or_else(|| format!("unknown error correction level {:?}", arg)),
        "qr" => qr_payload(arg).map(Op::QrCode),
        "img" => raster(arg).map(Op::Raster),
        _ => match Symbology::from_str(name) {
            Ok(symbology) => barcode_payload(symbology, arg)
                .map(|payload| Op::Barcode { symbology, payload }),
            Err(_) => return Directive::NotDirective,
        },
    };

    match result {
        Ok(op) => Directive::Op(op),
        Err(reason) => Directive::Malformed(reason),
    }
}

fn number(arg: &str, min: u32, max: u32) -> Result<u32, String> {
    if !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{:?} is not a number", arg));
    }
    match arg.parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(format!("{} is outside {}..={}", arg, min, max)),
    }
}

fn qr_payload(data: &str) -> Result<Vec<u8>, String> {
    let bytes = cp1252::encode(data);
    if bytes.len() > qr::MAX_DATA {
        return Err(format!("{} bytes exceeds the QR limit", bytes.len()));
    }
    Ok(bytes)
}

fn raster(path: &str) -> Result<RasterImage, String> {
    let image = RasterImage::open(path).map_err(|e| e.to_string())?;
    if image.width > u32::from(u16::MAX) || image.height > u32::from(u16::MAX) {
        return Err(format!("{}x{} image is too large", image.width, image.height));
    }
    Ok(image)
}

fn is_codabar_control(b: u8) -> bool {
    matches!(b, b'A'..=b'D' | b'a'..=b'd')
}

/// Validate barcode data and build the `GS k` payload.
///
/// Data must satisfy both the encoder (so the preview can draw it) and the
/// printer's own per-type length and byte-range rules.
pub fn barcode_payload(symbology: Symbology, data: &str) -> Result<Vec<u8>, String> {
    if data.is_empty() {
        return Err(barcode::EncodingError::EmptyInput.to_string());
    }
    if data.len() >= MAX_BARCODE_DATA {
        return Err(format!("{} bytes is too long for a barcode", data.len()));
    }
    if !data.is_ascii() {
        return Err("barcode data must be ASCII".to_string());
    }
    let bytes = data.as_bytes();
    let all = |ok: fn(&u8) -> bool| bytes.iter().all(ok);
    let digits = all(u8::is_ascii_digit);
    let len = bytes.len();

    let payload = match symbology {
        Symbology::Code128(Code128Subset::Auto) => Some(code128::auto_escape(bytes)),
        Symbology::Code128(Code128Subset::A) => {
            all(|&b| b <= 95).then(|| [b"{A".as_slice(), bytes].concat())
        }
        Symbology::Code128(Code128Subset::B) => all(|&b| matches!(b, 32..=122 | 124 | 126))
            .then(|| [b"{B".as_slice(), bytes].concat()),
        Symbology::Code128(Code128Subset::C) => (digits && len % 2 == 0).then(|| {
            let mut payload = b"{C".to_vec();
            payload.extend(bytes.chunks(2).map(|p| (p[0] - b'0') * 10 + (p[1] - b'0')));
            payload
        }),
        Symbology::Itf => (digits && len % 2 == 0).then(|| bytes.to_vec()),
        Symbology::UpcA => (digits && matches!(len, 11 | 12)).then(|| bytes.to_vec()),
        Symbology::UpcE => {
            (digits && matches!(len, 7 | 11) && bytes[0] == b'0').then(|| bytes.to_vec())
        }
        Symbology::Ean13 => (digits && len == 12).then(|| bytes.to_vec()),
        Symbology::Ean8 => (digits && len == 7).then(|| bytes.to_vec()),
        Symbology::Code39 | Symbology::Code93 => Some(bytes.to_vec()),
        Symbology::Codabar => {
            if all(|b| b.is_ascii_digit() || b"$+-./:".contains(b)) {
                Some([b"a".as_slice(), bytes, b"a"].concat())
            } else {
                (is_codabar_control(bytes[0]) && is_codabar_control(bytes[len - 1]))
                    .then(|| bytes.to_vec())
            }
        }
    };

    let payload =
        payload.ok_or_else(|| format!("{:?} is not valid printer data for {}", data, symbology))?;
    barcode::encode(data, symbology).map_err(|e| e.to_string())?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::Alignment;
    use pretty_assertions::assert_eq;

    fn ops(text: &str) -> Vec<Op> {
        parse(text).ops.into_iter().skip(1).collect()
    }

    #[test]
    fn test_codepage_first() {
        assert_eq!(parse("").ops, vec![Op::Codepage(16)]);
    }

    #[test]
    fn test_trim_and_strip_cr() {
        assert_eq!(ops("  \r\nA\r\nB \n"), vec![Op::Text("A\nB".into())]);
    }

    #[test]
    fn test_style_tags() {
        let bold_center = StyleState {
            bold: true,
            alignment: Alignment::Center,
            ..StyleState::default()
        };
        assert_eq!(
            ops("{bc}Total{}x"),
            vec![
                Op::SetStyle(bold_center),
                Op::Text("Total".into()),
                Op::SetStyle(StyleState::default()),
                Op::Text("x".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_tags_are_text() {
        let bold = StyleState {
            bold: true,
            ..StyleState::default()
        };
        assert_eq!(
            ops("a {total} {bz} {{b} }"),
            vec![
                Op::Text("a {total} {bz} {".into()),
                Op::SetStyle(bold),
                Op::Text(" }".into()),
            ]
        );
    }

    #[test]
    fn test_controls() {
        assert_eq!(
            ops("{reset}{full-cut}{partial-cut}{form-feed}{paper-width 58}"),
            vec![
                Op::Init,
                Op::Cut { partial: false },
                Op::Cut { partial: true },
                Op::FormFeed,
                Op::PaperWidth(58),
            ]
        );
    }

    #[test]
    fn test_barcode_settings() {
        assert_eq!(
            ops("{bc-height 80}{bc-modulo 2}{bc-hri both}{qr-modulo 8}{qr-ecc Q}"),
            vec![
                Op::SetBarcodeHeight(80),
                Op::SetBarcodeModule(2),
                Op::SetBarcodeHri(HriPosition::Both),
                Op::SetQrModule(8),
                Op::SetQrErrorLevel(QrErrorLevel::Q),
            ]
        );
    }

    #[test]
    fn test_out_of_range_settings_stay_literal() {
        assert_eq!(
            ops("{bc-height 0}{bc-modulo 7}{qr-modulo 17}{qr-ecc X}{bc-hri up}"),
            vec![Op::Text(
                "{bc-height 0}{bc-modulo 7}{qr-modulo 17}{qr-ecc X}{bc-hri up}".into()
            )]
        );
    }

    #[test]
    fn test_code128c_payload() {
        assert_eq!(
            ops("{code128c 123456}"),
            vec![Op::Barcode {
                symbology: Symbology::Code128(Code128Subset::C),
                payload: vec![b'{', b'C', 12, 34, 56],
            }]
        );
    }

    #[test]
    fn test_code128_auto_payload() {
        assert_eq!(
            barcode_payload(Symbology::Code128(Code128Subset::Auto), "AB123456").unwrap(),
            b"{BAB{C\x0c\x22\x38".to_vec()
        );
    }

    #[test]
    fn test_code128_subset_payloads() {
        assert_eq!(
            barcode_payload(Symbology::Code128(Code128Subset::A), "ABC").unwrap(),
            b"{AABC".to_vec()
        );
        assert_eq!(
            barcode_payload(Symbology::Code128(Code128Subset::B), "abc").unwrap(),
            b"{Babc".to_vec()
        );
        assert!(barcode_payload(Symbology::Code128(Code128Subset::A), "abc").is_err());
        assert!(barcode_payload(Symbology::Code128(Code128Subset::C), "12345").is_err());
    }

    #[test]
    fn test_numeric_payloads() {
        assert_eq!(barcode_payload(Symbology::Ean13, "400638133393").unwrap(), b"400638133393");
        assert!(barcode_payload(Symbology::Ean13, "4006381333931").is_err());
        assert_eq!(barcode_payload(Symbology::Ean8, "1234567").unwrap(), b"1234567");
        assert_eq!(barcode_payload(Symbology::UpcA, "03600029145").unwrap(), b"03600029145");
        assert_eq!(barcode_payload(Symbology::UpcE, "0123456").unwrap(), b"0123456");
        assert!(barcode_payload(Symbology::UpcE, "1123456").is_err());
        assert_eq!(barcode_payload(Symbology::Itf, "1234").unwrap(), b"1234");
        assert!(barcode_payload(Symbology::Itf, "123").is_err());
    }

    #[test]
    fn test_codabar_payloads() {
        assert_eq!(barcode_payload(Symbology::Codabar, "123456").unwrap(), b"a123456a");
        assert_eq!(barcode_payload(Symbology::Codabar, "A123B").unwrap(), b"A123B");
        assert!(barcode_payload(Symbology::Codabar, "A12B3").is_err());
        assert!(barcode_payload(Symbology::Codabar, "A123").is_err());
    }

    #[test]
    fn test_code39_and_code93() {
        assert_eq!(barcode_payload(Symbology::Code39, "AB-12").unwrap(), b"AB-12");
        assert!(barcode_payload(Symbology::Code39, "ab").is_err());
        assert_eq!(barcode_payload(Symbology::Code93, "TEST93").unwrap(), b"TEST93");
        assert!(barcode_payload(Symbology::Code93, "A*B").is_err());
    }

    #[test]
    fn test_barcode_too_long() {
        let data = "1".repeat(30);
        assert!(barcode_payload(Symbology::Code39, &data).is_err());
        assert!(barcode_payload(Symbology::Code39, &data[..29]).is_ok());
    }

    #[test]
    fn test_invalid_barcode_stays_literal() {
        assert_eq!(
            ops("Ref: {ean-8 12A4567}\n"),
            vec![Op::Text("Ref: {ean-8 12A4567}".into())]
        );
    }

    #[test]
    fn test_qr() {
        assert_eq!(
            ops("{qr https://x.test/ñ}"),
            vec![Op::QrCode(b"https://x.test/\xF1".to_vec())]
        );
        let huge = format!("{{qr {}}}", "x".repeat(qr::MAX_DATA + 1));
        assert_eq!(ops(&huge), vec![Op::Text(huge.clone())]);
    }

    #[test]
    fn test_missing_image_stays_literal() {
        assert_eq!(
            ops("{img /nonexistent/logo.png}"),
            vec![Op::Text("{img /nonexistent/logo.png}".into())]
        );
    }

    #[test]
    fn test_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::GrayImage::from_fn(3, 2, |x, _| image::Luma([if x == 0 { 0 } else { 255 }]))
            .save(&path)
            .unwrap();

        let program = ops(&format!("{{img {}}}", path.display()));
        assert_eq!(
            program,
            vec![Op::Raster(RasterImage {
                width: 3,
                height: 2,
                data: vec![0x80, 0x80],
            })]
        );
    }
}
