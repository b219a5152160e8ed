//! QR code preview as inline SVG.
//!
//! The symbol is drawn one unit per module with a three-module quiet zone
//! and scaled by the `width`/`height` attributes to
//! `symbol size × module × 7/10` pixels, which roughly matches the printed
//! size on an 80mm receipt rendered at 12px monospace.

use qrcode::{EcLevel, QrCode};

use crate::barcode::svg::num;
use crate::error::ReciboError;
use crate::protocol::barcode::qr::QrErrorLevel;

/// Quiet zone on each side, in modules.
const BORDER: usize = 3;

fn ec_level(level: QrErrorLevel) -> EcLevel {
    match level {
        QrErrorLevel::L => EcLevel::L,
        QrErrorLevel::M => EcLevel::M,
        QrErrorLevel::Q => EcLevel::Q,
        QrErrorLevel::H => EcLevel::H,
    }
}

/// Render `data` as an SVG element without XML headers.
pub fn render_svg(data: &[u8], module: u8, level: QrErrorLevel) -> Result<String, ReciboError> {
    let code = QrCode::with_error_correction_level(data, ec_level(level))
        .map_err(|e| ReciboError::MalformedDirective(format!("QR code generation failed: {}", e)))?;

    let size = code.width();
    let side = size + 2 * BORDER;
    let px = (size * usize::from(module) * 7 / 10) as f64;

    // one horizontal run of dark modules per path segment
    let mut path = String::new();
    for y in 0..size {
        let mut x = 0;
        while x < size {
            if code[(x, y)] != qrcode::Color::Dark {
                x += 1;
                continue;
            }
            let start = x;
            while x < size && code[(x, y)] == qrcode::Color::Dark {
                x += 1;
            }
            path.push_str(&format!(
                "M{},{}h{}v1h-{}z",
                start + BORDER,
                y + BORDER,
                x - start,
                x - start
            ));
        }
    }

    Ok(format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {side} {side}\" width=\"{w}\" height=\"{w}\" stroke=\"none\">\n\
         \x20 <rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n\
         \x20 <path d=\"{path}\" fill=\"#000000\"/>\n\
         </svg>\n",
        side = side,
        w = num(px),
        path = path
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_svg_size() {
        // "hello" fits version 1 (21 modules)
        let svg = render_svg(b"hello", 3, QrErrorLevel::L).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox=\"0 0 27 27\""));
        // 21 * 3 * 7 / 10 = 44
        assert!(svg.contains("width=\"44\" height=\"44\""));
        assert!(!svg.contains("<?xml"));
    }

    #[test]
    fn test_finder_pattern_starts_at_border() {
        let svg = render_svg(b"hello", 3, QrErrorLevel::H).unwrap();
        // top-left finder pattern: 7 dark modules on the first row
        assert!(svg.contains("d=\"M3,3h7v1h-7z"));
    }

    #[test]
    fn test_module_scales_size() {
        let small = render_svg(b"hello", 1, QrErrorLevel::L).unwrap();
        let large = render_svg(b"hello", 10, QrErrorLevel::L).unwrap();
        assert!(small.contains("width=\"14\""));
        assert!(large.contains("width=\"147\""));
    }
}
