//! # Recibo - ESC/POS Receipt Templates
//!
//! Recibo turns receipt templates into ESC/POS printer commands and turns
//! those commands back into something a person can look at. It provides:
//!
//! - **Barcode engine**: twelve 1-D symbologies encoded to bar patterns
//!   and rendered as SVG
//! - **Templates**: data merging with date and price formatting
//! - **Command generation**: `{directive}` markup compiled to ESC/POS bytes
//! - **Preview**: ESC/POS bytes decoded back into styled HTML, and PDF
//!   through an external renderer
//!
//! ## Pipeline
//!
//! ```text
//! template + data ──template::expand──→ markup ──ir::generate──→ ESC/POS bytes
//!                                                                     │
//!                                  PDF ←──pdf::render_pdf── HTML ←──preview::html_page
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use recibo::{ir, preview, template};
//! use recibo::template::{CurrencyFormat, DateFormat};
//! use serde_json::json;
//!
//! let markup = template::expand(
//!     "{cb}CAFE CENTRAL\n{}Total: {{ PRICE(total) }}\n{code128c 123456}",
//!     &json!({ "total": 3.5 }),
//!     "",
//!     DateFormat::Dma,
//!     CurrencyFormat::Eur,
//! )?;
//!
//! let (bytes, paper_width) = ir::generate(&markup);
//! assert_eq!(paper_width, 80);
//!
//! let html = preview::html_page(&bytes, paper_width);
//! assert!(html.contains("<span class=\"center bold\">CAFE CENTRAL</span>"));
//! # Ok::<(), recibo::ReciboError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`barcode`] | Symbology encoders and SVG renderer |
//! | [`template`] | Template expansion, date and price formats |
//! | [`ir`] | Directive parser and ESC/POS emission |
//! | [`protocol`] | ESC/POS command builders, Windows-1252 |
//! | [`render`] | 1-bit raster images |
//! | [`preview`] | ESC/POS to HTML decoder |
//! | [`pdf`] | External HTML to PDF renderer |
//! | [`printer`] | Paper and power-on configuration |
//! | [`error`] | Error types |

pub mod barcode;
pub mod error;
pub mod ir;
pub mod pdf;
pub mod preview;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod template;

// Re-exports for convenience
pub use error::ReciboError;
pub use printer::PrinterConfig;
