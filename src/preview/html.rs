//! Receipt stylesheet and HTML page wrapper.

use std::fmt::Write;

/// Stylesheet for `<escpos>` labels `width_mm` wide.
pub fn stylesheet(width_mm: u32) -> String {
    let mut css = String::new();
    let _ = writeln!(
        css,
        "escpos {{ font-family: 'DejaVu Sans Mono', monospace; font-size: 12px; white-space: pre-wrap; display: inline-block; border: 1px solid black; padding: 1em; margin: 1em; word-break: break-all; vertical-align: top; width: {}mm; }}",
        width_mm
    );
    for rule in [
        "escpos .bold { font-weight: bold; }",
        "escpos .underline { text-decoration: underline; }",
        "escpos .italics { font-style: italic; }",
        "escpos .center { display: inline-block; width: 100%; text-align: center; }",
        "escpos .right { display: inline-block; width: 100%; text-align: right; }",
        "escpos .img-left { display: block; margin-right: auto; }",
        "escpos .img-center { display: block; margin-left: auto; margin-right: auto; }",
        "escpos .img-right { display: block; margin-left: auto; }",
        "escpos .doubleY { display: inline-block; scale: 1 2; transform-origin: bottom; margin-top: 1em; }",
        "escpos .doubleX { font-size: 2em; display: inline-block; transform-origin: bottom; scale: 1 0.5; margin-top: -1em; }",
        "escpos .double { font-size: 2em; }",
        "escpos .small { font-size: 0.75em; }",
        "escpos .small.doubleX { font-size: 1.5em; }",
        "escpos .small.double { font-size: 1.5em; }",
        "escpos .reverse { background-color: black; color: white; }",
        "escpos .upsidedown { display: inline-block; scale: -1 -1; }",
    ] {
        css.push_str(rule);
        css.push('\n');
    }
    css
}

/// Wrap decoded labels in a complete HTML document.
pub fn page(labels: &str, width_mm: u32) -> String {
    let mut html = String::with_capacity(labels.len() + 2048);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Recibo</title>\n");
    html.push_str("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" />\n");
    html.push_str("<style>\n");
    html.push_str(&stylesheet(width_mm));
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(labels);
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_width() {
        let css = stylesheet(58);
        assert!(css.starts_with("escpos { font-family: 'DejaVu Sans Mono'"));
        assert!(css.contains("width: 58mm; }\n"));
        assert!(css.contains("escpos .upsidedown {"));
        assert_eq!(css.lines().count(), 17);
    }

    #[test]
    fn test_page_structure() {
        let html = page("<escpos>x</escpos>\n", 80);
        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>\n"));
        assert!(html.contains("width: 80mm;"));
        assert!(html.ends_with("<body>\n<escpos>x</escpos>\n</body>\n</html>\n"));
    }
}
