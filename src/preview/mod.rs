//! # ESC/POS to HTML Preview
//!
//! Rebuilds a styled HTML view of a receipt from the command bytes that
//! would be sent to the printer.
//!
//! ## Architecture
//!
//! ```text
//! ESC/POS bytes → HtmlDecoder → <escpos> labels → page() → HTML document
//!                     ↓
//!               One forward pass:
//!               - Track style state (align, bold, double, reverse...)
//!               - Group text runs into <span class="...">
//!               - Barcodes → inline SVG (barcode engine)
//!               - QR codes → inline SVG (qrcode)
//!               - Raster images → base64 PNG <img>
//! ```
//!
//! Each form feed or cut closes the current `<escpos>` label; the next
//! output opens a new one. Unknown or truncated commands are skipped and
//! never abort the preview.
//!
//! ## Example
//!
//! ```
//! use recibo::{ir, preview};
//!
//! let (bytes, width) = ir::generate("{cb}RECIBO\n");
//! let html = preview::escpos_to_html(&bytes);
//! assert_eq!(html, "<escpos><span class=\"center bold\">RECIBO</span></escpos>\n");
//! let page = preview::html_page(&bytes, width);
//! assert!(page.contains("width: 80mm;"));
//! ```

mod html;
mod qr;

pub use html::{page, stylesheet};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::barcode::svg::{self, SvgStyle, escape_xml};
use crate::barcode::{self, Code128Subset, HriPosition, Symbology, code128};
use crate::ir::StyleState;
use crate::printer::PrinterConfig;
use crate::protocol::barcode::barcode1d;
use crate::protocol::barcode::qr::QrErrorLevel;
use crate::protocol::commands::{CR, ESC, FF, FS, GS, HT, LF};
use crate::protocol::cp1252;
use crate::protocol::graphics::FN_STORE_RASTER;
use crate::protocol::text::{
    Alignment, MODE_BOLD, MODE_DOUBLE_HEIGHT, MODE_DOUBLE_WIDTH, MODE_SMALL, MODE_UNDERLINE,
};
use crate::render::RasterImage;

/// Decode command bytes into `<escpos>` label blocks (80mm defaults).
pub fn escpos_to_html(bytes: &[u8]) -> String {
    HtmlDecoder::new(PrinterConfig::ESCPOS_80MM).decode(bytes)
}

/// Decode command bytes into a complete HTML document.
pub fn html_page(bytes: &[u8], paper_width_mm: u32) -> String {
    let labels = HtmlDecoder::new(PrinterConfig::for_paper_width(paper_width_mm)).decode(bytes);
    page(&labels, paper_width_mm)
}

/// CSS classes for a text run.
///
/// ```text
/// align [bold] [underline] [italics] [doubleX|doubleY|double] [small] [reverse] [upsidedown]
/// ```
pub fn text_class(style: &StyleState) -> String {
    let mut class = vec![style.alignment.css_class()];
    if style.bold {
        class.push("bold");
    }
    if style.underline {
        class.push("underline");
    }
    if style.italic {
        class.push("italics");
    }
    match (style.double_width, style.double_height) {
        (true, false) => class.push("doubleX"),
        (false, true) => class.push("doubleY"),
        (true, true) => class.push("double"),
        (false, false) => {}
    }
    if style.small {
        class.push("small");
    }
    if style.reverse {
        class.push("reverse");
    }
    if style.upside_down {
        class.push("upsidedown");
    }
    class.join(" ")
}

/// Printer state that `ESC @` returns to power-on values.
#[derive(Debug, Clone)]
struct PrinterState {
    style: StyleState,
    barcode_height: u8,
    barcode_module: u8,
    hri: HriPosition,
    qr_module: u8,
    qr_level: QrErrorLevel,
    qr_data: Vec<u8>,
    image: Option<RasterImage>,
}

impl PrinterState {
    fn power_on(config: &PrinterConfig) -> Self {
        Self {
            style: StyleState::default(),
            barcode_height: config.barcode_height,
            barcode_module: config.barcode_module,
            hri: config.barcode_hri,
            qr_module: config.qr_module,
            qr_level: config.qr_error_level,
            qr_data: Vec::new(),
            image: None,
        }
    }
}

/// Byte at `k`, or 0 past the end of a truncated command.
fn arg(cmd: &[u8], k: usize) -> u8 {
    cmd.get(k).copied().unwrap_or(0)
}

/// Single-pass ESC/POS decoder.
pub struct HtmlDecoder {
    config: PrinterConfig,
    state: PrinterState,
    out: String,
    /// Pending text run, still Windows-1252
    text: Vec<u8>,
    class: String,
    col: usize,
    in_label: bool,
}

impl HtmlDecoder {
    pub fn new(config: PrinterConfig) -> Self {
        let state = PrinterState::power_on(&config);
        Self {
            config,
            class: text_class(&state.style),
            state,
            out: String::new(),
            text: Vec::new(),
            col: 0,
            in_label: false,
        }
    }

    /// Decode the whole stream and return the label HTML.
    pub fn decode(mut self, bytes: &[u8]) -> String {
        let mut i = 0;
        while i < bytes.len() {
            let cmd = &bytes[i..];
            i += match cmd[0] {
                LF => {
                    self.flush();
                    self.write("\n");
                    self.col = 0;
                    1
                }
                CR => 1,
                FF => {
                    self.close_label();
                    1
                }
                HT => {
                    self.tab();
                    1
                }
                ESC => self.esc(cmd),
                GS => self.gs(cmd),
                FS => {
                    if arg(cmd, 1) == b'.' {
                        2
                    } else {
                        1
                    }
                }
                byte => {
                    self.text_byte(byte);
                    1
                }
            };
        }
        self.close_label();
        self.out
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if !self.in_label {
            self.in_label = true;
            self.out.push_str("<escpos>");
        }
        self.out.push_str(s);
    }

    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let span = format!(
            "<span class=\"{}\">{}</span>",
            self.class,
            escape_xml(&cp1252::decode(&self.text))
        );
        self.text.clear();
        self.write(&span);
    }

    fn close_label(&mut self) {
        self.flush();
        if self.in_label {
            self.in_label = false;
            self.out.push_str("</escpos>\n");
        }
    }

    fn text_byte(&mut self, byte: u8) {
        let class = text_class(&self.state.style);
        if class != self.class {
            self.flush();
            self.class = class;
        }
        self.text.push(byte);
        self.col += 1;
    }

    fn tab(&mut self) {
        loop {
            self.text_byte(b' ');
            if self.col % 8 == 0 {
                break;
            }
        }
    }

    // ========================================================================
    // ESC COMMANDS
    // ========================================================================

    /// Handle an `ESC` command; returns the bytes consumed.
    fn esc(&mut self, cmd: &[u8]) -> usize {
        let Some(&op) = cmd.get(1) else {
            return 1;
        };
        let n = arg(cmd, 2);
        let style = &mut self.state.style;
        match op {
            b'@' => {
                self.flush();
                self.state = PrinterState::power_on(&self.config);
                self.class = text_class(&self.state.style);
                self.col = 0;
                2
            }
            b'!' => {
                style.small = n & MODE_SMALL != 0;
                style.bold = n & MODE_BOLD != 0;
                style.double_height = n & MODE_DOUBLE_HEIGHT != 0;
                style.double_width = n & MODE_DOUBLE_WIDTH != 0;
                style.underline = n & MODE_UNDERLINE != 0;
                3
            }
            b'-' => {
                style.underline = matches!(n, 1 | 2 | b'1' | b'2');
                3
            }
            b'{' => {
                style.upside_down = n % 2 == 1;
                3
            }
            b'4' => {
                style.italic = n % 2 == 1;
                3
            }
            b'E' => {
                style.bold = n % 2 == 1;
                3
            }
            b'a' => {
                if let Some(alignment) = Alignment::from_param(n) {
                    style.alignment = alignment;
                }
                3
            }
            b'd' => {
                self.flush();
                for _ in 0..n {
                    self.write("\n");
                }
                self.col = 0;
                3
            }
            b'i' | b'm' => {
                self.close_label();
                2
            }
            // pulse: ESC p m t1 t2
            b'p' => 5,
            b't' => 3,
            other => {
                log::debug!("skipping unknown ESC {:#04x}", other);
                2
            }
        }
    }

    // ========================================================================
    // GS COMMANDS
    // ========================================================================

    /// Handle a `GS` command; returns the bytes consumed.
    fn gs(&mut self, cmd: &[u8]) -> usize {
        let Some(&op) = cmd.get(1) else {
            return 1;
        };
        let n = arg(cmd, 2);
        match op {
            b'B' => {
                self.state.style.reverse = n % 2 == 1;
                3
            }
            b'V' => {
                self.close_label();
                if matches!(n, 0 | 1 | b'0' | b'1') { 3 } else { 4 }
            }
            b'(' => self.gs_paren(cmd),
            b'8' if n == b'L' => self.gs_8l(cmd),
            b'h' => {
                self.state.barcode_height = n;
                3
            }
            b'w' => {
                self.state.barcode_module = n;
                3
            }
            b'H' => {
                self.state.hri = barcode1d::hri_from_param(n);
                3
            }
            b'k' => self.gs_k(cmd),
            other => {
                log::debug!("skipping unknown GS {:#04x}", other);
                2
            }
        }
    }

    /// `GS ( fn pL pH payload`
    fn gs_paren(&mut self, cmd: &[u8]) -> usize {
        if cmd.len() < 5 {
            log::warn!("truncated GS ( command");
            return cmd.len();
        }
        let z = usize::from(cmd[3]) + usize::from(cmd[4]) * 256;
        let Some(payload) = cmd.get(5..5 + z) else {
            log::warn!("truncated GS ( {} payload of {} bytes", cmd[2] as char, z);
            return cmd.len();
        };
        match cmd[2] {
            b'L' => self.graphics(payload),
            b'k' => self.symbol(payload),
            other => log::debug!("skipping GS ( {:#04x}", other),
        }
        5 + z
    }

    /// `GS 8 L p1 p2 p3 p4 payload`
    fn gs_8l(&mut self, cmd: &[u8]) -> usize {
        let Some(&[p1, p2, p3, p4]) = cmd.get(3..7) else {
            log::warn!("truncated GS 8 L command");
            return cmd.len();
        };
        let z = u32::from_le_bytes([p1, p2, p3, p4]) as usize;
        let Some(payload) = cmd.get(7..7 + z) else {
            log::warn!("truncated GS 8 L payload of {} bytes", z);
            return cmd.len();
        };
        self.graphics(payload);
        7 + z
    }

    fn graphics(&mut self, payload: &[u8]) {
        match payload {
            [b'0', FN_STORE_RASTER, _, _, _, _, xl, xh, yl, yh, data @ ..] => {
                let width = u32::from(u16::from_le_bytes([*xl, *xh]));
                let height = u32::from(u16::from_le_bytes([*yl, *yh]));
                self.state.image = Some(RasterImage::from_packed(width, height, data.to_vec()));
            }
            [b'0', 2 | b'2'] => {
                self.flush();
                self.print_image();
            }
            _ => log::debug!("skipping graphics function {:?}", payload.get(1)),
        }
    }

    fn print_image(&mut self) {
        let Some(image) = &self.state.image else {
            log::warn!("print requested with no stored image");
            return;
        };
        let tag = image.to_png().map(|png| {
            format!(
                "<img class=\"img-{}\" style=\"width: {}px; height: {}px;\" src=\"data:image/png;base64,{}\"/>",
                self.state.style.alignment.css_class(),
                image.width / 2,
                image.height / 2,
                STANDARD.encode(png)
            )
        });
        match tag {
            Ok(tag) => self.write(&tag),
            Err(e) => log::warn!("cannot encode stored image: {}", e),
        }
    }

    fn symbol(&mut self, payload: &[u8]) {
        match payload {
            [b'1', 67, n] => self.state.qr_module = *n,
            [b'1', 69, n] => {
                if let Some(level) = QrErrorLevel::from_param(*n) {
                    self.state.qr_level = level;
                }
            }
            [b'1', 80, b'0', data @ ..] if !data.is_empty() => {
                self.state.qr_data = data.to_vec();
            }
            [b'1', 81, b'0'] => {
                self.flush();
                match qr::render_svg(&self.state.qr_data, self.state.qr_module, self.state.qr_level)
                {
                    Ok(svg) => self.write(&svg),
                    Err(e) => log::warn!("{}", e),
                }
            }
            _ => log::debug!("skipping 2D symbol function {:?}", payload.get(1)),
        }
    }

    // ========================================================================
    // BARCODES
    // ========================================================================

    /// `GS k m d1...dk NUL` (m ≤ 6) or `GS k m n d1...dn` (65 ≤ m ≤ 79)
    fn gs_k(&mut self, cmd: &[u8]) -> usize {
        let m = arg(cmd, 2);
        let (data, consumed) = match m {
            0..=6 => {
                let body = cmd.get(3..).unwrap_or(&[]);
                match body.iter().position(|&b| b == 0) {
                    Some(end) => (&body[..end], 3 + end + 1),
                    None => {
                        log::warn!("unterminated GS k barcode");
                        (body, cmd.len())
                    }
                }
            }
            65..=79 => {
                let n = usize::from(arg(cmd, 3));
                match cmd.get(4..4 + n) {
                    Some(data) => (data, 4 + n),
                    None => {
                        log::warn!("truncated GS k barcode of {} bytes", n);
                        return cmd.len();
                    }
                }
            }
            other => {
                log::debug!("skipping GS k type {}", other);
                return 3;
            }
        };

        if !data.is_empty() {
            self.flush();
            self.barcode(m, data);
        }
        consumed
    }

    fn barcode(&mut self, type_byte: u8, data: &[u8]) {
        let encoded = match type_byte {
            73 => code128::encode_escaped(data),
            _ => {
                let symbology = Symbology::from_type_byte(type_byte)
                    .unwrap_or(Symbology::Code128(Code128Subset::Auto));
                barcode::encode(&cp1252::decode(data), symbology)
            }
        };
        match encoded {
            Ok(encoded) => {
                let style = SvgStyle {
                    module_width: f64::from(self.state.barcode_module) * 3.0 / 5.0,
                    bar_height: f64::from(self.state.barcode_height) / 2.0,
                    color: "#000".to_string(),
                    hri: self.state.hri,
                    standalone: false,
                };
                self.write(&svg::render(&encoded.pattern, &encoded.hri, &style));
            }
            Err(e) => log::warn!("cannot draw barcode type {}: {}", type_byte, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{self, Op, Program};
    use crate::protocol::graphics;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_runs_and_alignment() {
        let (bytes, _) = ir::generate("{c}Hola\n{b}Total");
        assert_eq!(
            escpos_to_html(&bytes),
            "<escpos><span class=\"center\">Hola</span>\n<span class=\"left bold\">Total</span></escpos>\n"
        );
    }

    #[test]
    fn test_text_is_decoded_and_escaped() {
        assert_eq!(
            escpos_to_html(b"a<b \xE9 \x80"),
            "<escpos><span class=\"left\">a&lt;b é €</span></escpos>\n"
        );
    }

    #[test]
    fn test_tab_stops() {
        assert_eq!(
            escpos_to_html(b"ab\tc"),
            "<escpos><span class=\"left\">ab      c</span></escpos>\n"
        );
        assert_eq!(
            escpos_to_html(b"\tx"),
            "<escpos><span class=\"left\">        x</span></escpos>\n"
        );
    }

    #[test]
    fn test_carriage_return_ignored() {
        assert_eq!(
            escpos_to_html(b"a\r\nb"),
            "<escpos><span class=\"left\">a</span>\n<span class=\"left\">b</span></escpos>\n"
        );
    }

    #[test]
    fn test_form_feed_and_cuts_split_labels() {
        let expected = "<escpos><span class=\"left\">one</span></escpos>\n\
                        <escpos><span class=\"left\">two</span></escpos>\n";
        assert_eq!(escpos_to_html(b"one\x0Ctwo"), expected);
        assert_eq!(escpos_to_html(b"one\x1DV1two"), expected);
        assert_eq!(escpos_to_html(b"one\x1DVA\x03two"), expected);
        assert_eq!(escpos_to_html(b"one\x1Bitwo"), expected);
    }

    #[test]
    fn test_all_style_classes() {
        let bytes = b"\x1B!\x31\x1B-1\x1B41\x1D\x42\x01\x1B{1\x1BE1\x1Ba2x";
        assert_eq!(
            escpos_to_html(bytes),
            "<escpos><span class=\"right bold underline italics double small reverse upsidedown\">x</span></escpos>\n"
        );
    }

    #[test]
    fn test_double_classes() {
        assert_eq!(
            escpos_to_html(b"\x1B!\x20w\x1B!\x10h"),
            "<escpos><span class=\"left doubleX\">w</span><span class=\"left doubleY\">h</span></escpos>\n"
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        assert_eq!(
            escpos_to_html(b"\x1BE1a\x1B@b"),
            "<escpos><span class=\"left bold\">a</span><span class=\"left\">b</span></escpos>\n"
        );
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(
            escpos_to_html(b"a\x1Bd\x02b"),
            "<escpos><span class=\"left\">a</span>\n\n<span class=\"left\">b</span></escpos>\n"
        );
    }

    #[test]
    fn test_skipped_commands() {
        assert_eq!(
            escpos_to_html(b"\x1Bt\x10\x1Bp\x00\x19\xFA\x1C.ok"),
            "<escpos><span class=\"left\">ok</span></escpos>\n"
        );
    }

    #[test]
    fn test_truncated_commands() {
        assert_eq!(escpos_to_html(b"\x1B"), "");
        assert_eq!(escpos_to_html(b"\x1D(L\x20\x00\x30"), "");
        assert_eq!(escpos_to_html(b"\x1D8L\x01"), "");
        assert_eq!(escpos_to_html(b"\x1Dk\x45\x09AB"), "");
    }

    #[test]
    fn test_code128c_barcode() {
        let (bytes, _) = ir::generate("{code128c 123456}");
        let html = escpos_to_html(&bytes);
        assert!(html.starts_with("<escpos><svg width=\"140.4\" height=\"81\""));
        assert!(!html.contains("<?xml"));
        assert!(!html.contains("<text"));
    }

    #[test]
    fn test_barcode_settings_apply() {
        let (bytes, _) = ir::generate("{bc-height 100}{bc-modulo 2}{bc-hri below}{code39 AB}");
        let html = escpos_to_html(&bytes);
        assert!(html.contains("height=\"64\""));
        assert!(html.contains("<rect x=\"6\" y=\"0\" width=\"1.2\" height=\"50\" />"));
        assert!(html.contains(">*AB*</text>"));
    }

    #[test]
    fn test_function_a_barcode() {
        let html = escpos_to_html(b"\x1DH\x02\x1Dk\x04AB\x00x");
        assert!(html.contains(">*AB*</text>"));
        assert!(html.ends_with("<span class=\"left\">x</span></escpos>\n"));
    }

    #[test]
    fn test_unknown_barcode_type_uses_code128() {
        let html = escpos_to_html(b"\x1DH\x02\x1DkO\x03abc");
        assert!(html.contains(">abc</text>"));
    }

    #[test]
    fn test_invalid_barcode_draws_nothing() {
        assert_eq!(escpos_to_html(b"\x1DkC\x0312A"), "");
    }

    #[test]
    fn test_qr_code() {
        let (bytes, _) = ir::generate("{qr-modulo 4}{qr hello}");
        let html = escpos_to_html(&bytes);
        assert!(html.starts_with("<escpos><svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(html.contains("viewBox=\"0 0 27 27\""));
        // 21 * 4 * 7 / 10
        assert!(html.contains("width=\"58\" height=\"58\""));
    }

    #[test]
    fn test_raster_image() {
        let program: Program = vec![
            Op::SetStyle(StyleState {
                alignment: Alignment::Center,
                ..StyleState::default()
            }),
            Op::Raster(RasterImage {
                width: 8,
                height: 2,
                data: vec![0xFF, 0x00],
            }),
        ]
        .into_iter()
        .collect();
        let html = escpos_to_html(&program.to_bytes());

        let prefix = "<escpos><img class=\"img-center\" style=\"width: 4px; height: 1px;\" src=\"data:image/png;base64,";
        assert!(html.starts_with(prefix));
        let b64 = html[prefix.len()..].split('"').next().unwrap();
        let png = image::load_from_memory(&STANDARD.decode(b64).unwrap())
            .unwrap()
            .to_luma8();
        assert_eq!(png.dimensions(), (8, 2));
        assert_eq!(png.get_pixel(0, 0).0, [0]);
        assert_eq!(png.get_pixel(0, 1).0, [255]);
    }

    #[test]
    fn test_large_raster_image() {
        let mut bytes = graphics::store_raster(800, 700, &[0x0F; 70_000]);
        bytes.extend(graphics::print_stored());
        let html = escpos_to_html(&bytes);
        assert!(html.starts_with(
            "<escpos><img class=\"img-left\" style=\"width: 400px; height: 350px;\""
        ));
    }

    #[test]
    fn test_print_without_image() {
        assert_eq!(escpos_to_html(&graphics::print_stored()), "");
    }

    #[test]
    fn test_html_page() {
        let (bytes, width) = ir::generate("{paper-width 58}Hola");
        let html = html_page(&bytes, width);
        assert!(html.contains("width: 58mm;"));
        assert!(html.contains("<body>\n<escpos><span class=\"left\">Hola</span></escpos>\n</body>"));
    }
}
