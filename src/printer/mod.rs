//! # Printer Module
//!
//! This module provides printer-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Paper geometry and power-on defaults

pub mod config;

pub use config::PrinterConfig;
