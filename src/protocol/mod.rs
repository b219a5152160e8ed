//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! used by Epson-compatible thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Control bytes and printer commands (init, cut, feed)
//! - [`text`]: Text styling (alignment, print mode, italic, reverse, ...)
//! - [`barcode`]: 1D barcodes and QR codes
//! - [`graphics`]: Raster image store and print
//! - [`cp1252`]: Windows-1252 text encoding
//!
//! ## Usage Example
//!
//! ```
//! use recibo::protocol::{commands, cp1252, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::codepage(commands::CODEPAGE_WINDOWS_1252));
//!
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::print_mode(text::MODE_BOLD));
//! data.extend(cp1252::encode("RECIBO\n"));
//! data.extend(text::print_mode(0));
//!
//! data.extend(commands::cut_partial());
//! ```
//!
//! All builders return owned `Vec<u8>` fragments; callers concatenate them.

pub mod barcode;
pub mod commands;
pub mod cp1252;
pub mod graphics;
pub mod text;
