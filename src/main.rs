//! # Recibo CLI
//!
//! Command-line interface for receipt templates.
//!
//! ## Usage
//!
//! ```bash
//! # Render a barcode as SVG
//! recibo barcode code128 "RECIBO-0042" --hri below --output code.svg
//!
//! # Merge a template with JSON data
//! recibo expand ticket.escpos ticket.json --date-format dma --currency eur
//!
//! # Compile a template to printer commands
//! recibo generate ticket.escpos --data ticket.json --output ticket.prn
//!
//! # Preview printer commands as HTML or PDF
//! recibo html ticket.prn --output ticket.html
//! recibo pdf ticket.prn --paper-width 58 --output ticket.pdf
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `warn`).

use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use recibo::{
    ReciboError,
    barcode::{HriPosition, Symbology, svg},
    ir,
    pdf::{self, RendererConfig},
    preview,
    template::{self, CurrencyFormat, DateFormat},
};

/// Recibo - ESC/POS receipt template utility
#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that expand templates
#[derive(clap::Args, Debug)]
struct TemplateArgs {
    /// Directory relative image paths are resolved against
    #[arg(long, value_name = "DIR", default_value = "")]
    assets: PathBuf,

    /// Date format for DATETIME, DATE and TIME (iso, dma, mda, amd)
    #[arg(long, default_value = "dma")]
    date_format: DateFormat,

    /// Currency for PRICE (eur, usd, cop, plain)
    #[arg(long, default_value = "eur")]
    currency: CurrencyFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a barcode as SVG
    Barcode {
        /// Symbology (code128, code128a, code128b, code128c, itf, upc-a,
        /// upc-e, ean-13, ean-8, code39, code93, codabar)
        symbology: Symbology,

        /// Data to encode
        data: String,

        /// Module width in pixels
        #[arg(long, default_value = "2")]
        module: f64,

        /// Bar height in pixels
        #[arg(long, default_value = "100")]
        height: f64,

        /// Human readable text position (none, above, below, both)
        #[arg(long, default_value = "none")]
        hri: HriPosition,

        /// Bar and text color
        #[arg(long, default_value = "#000")]
        color: String,

        /// Write the SVG to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Merge a template with JSON data
    Expand {
        /// Template file
        template: PathBuf,

        /// JSON data file
        data: PathBuf,

        #[command(flatten)]
        options: TemplateArgs,

        /// Write the result to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compile a template to ESC/POS commands
    Generate {
        /// Template file
        template: PathBuf,

        /// JSON data to merge before compiling
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        #[command(flatten)]
        options: TemplateArgs,

        /// Output file for the printer commands
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Decode ESC/POS commands into an HTML preview
    Html {
        /// File with printer commands
        input: PathBuf,

        /// Paper width in millimeters
        #[arg(long, default_value = "80")]
        paper_width: u32,

        /// Write the HTML to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render ESC/POS commands to PDF with an external renderer
    Pdf {
        /// File with printer commands
        input: PathBuf,

        /// Paper width in millimeters
        #[arg(long, default_value = "80")]
        paper_width: u32,

        /// HTML to PDF renderer
        #[arg(long, default_value = RendererConfig::DEFAULT_PROGRAM)]
        renderer: String,

        /// Extra renderer argument (repeatable)
        #[arg(long = "renderer-arg", value_name = "ARG", allow_hyphen_values = true)]
        renderer_args: Vec<String>,

        /// Seconds to wait for the renderer
        #[arg(long, default_value = "60")]
        timeout: u64,

        /// Output PDF file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ReciboError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Barcode {
            symbology,
            data,
            module,
            height,
            hri,
            color,
            output,
        } => {
            let style = svg::SvgStyle {
                module_width: module,
                bar_height: height,
                color,
                hri,
                standalone: true,
            };
            let svg = svg::render_barcode(&data, symbology, &style)?;
            write_output(output.as_deref(), svg.as_bytes())?;
        }

        Commands::Expand {
            template,
            data,
            options,
            output,
        } => {
            let text = expand_file(&template, &data, &options)?;
            write_output(output.as_deref(), text.as_bytes())?;
        }

        Commands::Generate {
            template,
            data,
            options,
            output,
        } => {
            let text = match data {
                Some(data) => expand_file(&template, &data, &options)?,
                None => fs::read_to_string(&template)?,
            };
            let (bytes, paper_width) = ir::generate(&text);
            fs::write(&output, &bytes)?;
            println!(
                "Wrote {} bytes to {} (paper width {}mm)",
                bytes.len(),
                output.display(),
                paper_width
            );
        }

        Commands::Html {
            input,
            paper_width,
            output,
        } => {
            let bytes = fs::read(&input)?;
            let html = preview::html_page(&bytes, paper_width);
            write_output(output.as_deref(), html.as_bytes())?;
        }

        Commands::Pdf {
            input,
            paper_width,
            renderer,
            renderer_args,
            timeout,
            output,
        } => {
            let bytes = fs::read(&input)?;
            let html = preview::html_page(&bytes, paper_width);
            let config = RendererConfig {
                program: renderer,
                args: renderer_args,
                timeout: Duration::from_secs(timeout),
            };
            let pdf = pdf::render_pdf(&html, paper_width, &config)?;
            fs::write(&output, pdf)?;
            println!("Saved to {}", output.display());
        }
    }

    Ok(())
}

/// Expand a template file with a JSON data file
fn expand_file(template: &Path, data: &Path, options: &TemplateArgs) -> Result<String, ReciboError> {
    let source = fs::read_to_string(template)?;
    let data: serde_json::Value = serde_json::from_str(&fs::read_to_string(data)?)?;
    template::expand(
        &source,
        &data,
        &options.assets,
        options.date_format,
        options.currency,
    )
}

/// Write to a file, or to stdout when no file is given
fn write_output(path: Option<&Path>, data: &[u8]) -> Result<(), ReciboError> {
    match path {
        Some(path) => fs::write(path, data)?,
        None => std::io::stdout().write_all(data)?,
    }
    Ok(())
}
