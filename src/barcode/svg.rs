//! # SVG Barcode Renderer
//!
//! Draws a [`BarPattern`] as a group of black rectangles with a five module
//! quiet zone on each side, plus optional HRI text bands.
//!
//! ```text
//!  ┌──────────────────────────────────────┐ ─┬─ 14px band (Above/Both)
//!  │           *1234ABCD*                 │  │
//!  │ 5m │█ ██ █ ███ █ ██ █ ... █ ██│ 5m   │ ─┼─ bar_height
//!  │           *1234ABCD*                 │  │
//!  └──────────────────────────────────────┘ ─┴─ 14px band (Below/Both)
//! ```

use super::{BarPattern, EncodingError, HriPosition, Symbology, encode};

/// Height of one HRI text band in pixels.
pub const TEXT_BAND: f64 = 14.0;

/// Quiet zone on each side, in modules.
pub const QUIET_ZONE: u32 = 5;

const XML_HEADER: &str = "<?xml version=\"1.0\" standalone=\"no\" ?>\n\
<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";

/// Geometry and presentation of a rendered barcode.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStyle {
    /// Width of one module in pixels.
    pub module_width: f64,
    /// Height of the bars in pixels, excluding text bands.
    pub bar_height: f64,
    /// Fill color for bars and text.
    pub color: String,
    pub hri: HriPosition,
    /// Emit the XML declaration and DOCTYPE.
    pub standalone: bool,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            module_width: 2.0,
            bar_height: 100.0,
            color: "#000".to_string(),
            hri: HriPosition::None,
            standalone: true,
        }
    }
}

/// Format a pixel value with at most two decimals.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Escape text for use inside an XML element.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a bar pattern and its HRI text.
pub fn render(pattern: &BarPattern, hri: &str, style: &SvgStyle) -> String {
    let w = style.module_width;
    let modules = pattern.modules() + 2 * QUIET_ZONE;
    let width = f64::from(modules) * w;

    let bar_top = if style.hri.shows_above() { TEXT_BAND } else { 0.0 };
    let height = match style.hri {
        HriPosition::None => style.bar_height,
        HriPosition::Above | HriPosition::Below => style.bar_height + TEXT_BAND,
        HriPosition::Both => style.bar_height + 2.0 * TEXT_BAND,
    };

    let mut svg = String::new();
    if style.standalone {
        svg.push_str(XML_HEADER);
    }
    svg.push_str(&format!(
        "<svg width=\"{}\" height=\"{}\" version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        num(width),
        num(height)
    ));
    svg.push_str(&format!("\t<g fill=\"{}\" stroke=\"none\">\n", style.color));

    let mut x = f64::from(QUIET_ZONE) * w;
    for (i, &modules) in pattern.widths().iter().enumerate() {
        let bw = f64::from(modules) * w;
        // even index = bar
        if i % 2 == 0 {
            svg.push_str(&format!(
                "\t\t<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" />\n",
                num(x),
                num(bar_top),
                num(bw),
                num(style.bar_height)
            ));
        }
        x += bw;
    }

    let text = escape_xml(hri);
    let mut text_at = |y: f64| {
        svg.push_str(&format!(
            "\t<text x=\"{}\" text-anchor=\"middle\" dominant-baseline=\"hanging\" y=\"{}\" fill=\"{}\" font-size=\"12px\">{}</text>\n",
            num(width / 2.0),
            num(y),
            style.color,
            text
        ));
    };
    if style.hri.shows_above() {
        text_at(2.0);
    }
    if style.hri.shows_below() {
        text_at(height - TEXT_BAND);
    }

    svg.push_str("\t</g>\n</svg>\n");
    svg
}

/// Encode `text` and render it in one step.
pub fn render_barcode(
    text: &str,
    symbology: Symbology,
    style: &SvgStyle,
) -> Result<String, EncodingError> {
    let encoded = encode(text, symbology)?;
    Ok(render(&encoded.pattern, &encoded.hri, style))
}
