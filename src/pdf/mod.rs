//! # PDF Output
//!
//! Materializes a receipt preview as PDF through an external HTML to PDF
//! renderer (`wkhtmltopdf` by default).
//!
//! ```text
//! HTML ──→ recibo-XXXX.html ──→ renderer ──→ recibo-XXXX.pdf ──→ bytes
//!                                  │
//!                           stdout + stderr ──→ ExternalRenderer error
//! ```
//!
//! The renderer is killed when it outlives the configured timeout. Temporary
//! files are removed when this function returns, whatever the outcome.
//! Failures are returned as is; retrying is up to the caller.

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::error::ReciboError;

/// External renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Program name or path
    pub program: String,
    /// Extra arguments inserted before the input and output files
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl RendererConfig {
    pub const DEFAULT_PROGRAM: &'static str = "wkhtmltopdf";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: Self::DEFAULT_PROGRAM.to_string(),
            args: Vec::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Render a complete HTML document to PDF on paper `width_mm` wide.
pub fn render_pdf(
    html: &str,
    width_mm: u32,
    config: &RendererConfig,
) -> Result<Vec<u8>, ReciboError> {
    let mut page = tempfile::Builder::new()
        .prefix("recibo-")
        .suffix(".html")
        .tempfile()?;
    page.write_all(html.as_bytes())?;
    page.flush()?;
    let pdf = tempfile::Builder::new()
        .prefix("recibo-")
        .suffix(".pdf")
        .tempfile()?;
    let mut log = tempfile::tempfile()?;

    let mut args = vec![
        "-q".to_string(),
        "--enable-local-file-access".to_string(),
        "--no-outline".to_string(),
        "--page-width".to_string(),
        format!("{}mm", width_mm),
    ];
    args.extend(config.args.iter().cloned());
    args.push(page.path().display().to_string());
    args.push(pdf.path().display().to_string());
    let command = format!("{} {}", config.program, args.join(" "));
    log::debug!("running {}", command);

    // Output goes to a file so a chatty renderer cannot block on a full pipe.
    let mut child = Command::new(&config.program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log.try_clone()?))
        .stderr(Stdio::from(log.try_clone()?))
        .spawn()
        .map_err(|e| ReciboError::ExternalRenderer {
            command: command.clone(),
            output: e.to_string(),
        })?;

    let Some(status) = child.wait_timeout(config.timeout)? else {
        log::warn!("{} timed out, killing it", config.program);
        let _ = child.kill();
        let _ = child.wait();
        return Err(ReciboError::Timeout(config.timeout.as_secs()));
    };

    if !status.success() {
        let mut captured = Vec::new();
        log.seek(SeekFrom::Start(0))?;
        log.read_to_end(&mut captured)?;
        let mut output = String::from_utf8_lossy(&captured).into_owned();
        if output.is_empty() {
            output = status.to_string();
        }
        return Err(ReciboError::ExternalRenderer { command, output });
    }

    Ok(fs::read(pdf.path())?)
}
