//! # Template Expansion
//!
//! Merges a receipt template with a data object before it is handed to the
//! command generator.
//!
//! ```text
//! template + data ──minijinja──→ text with {directives} ──ir::generate──→ bytes
//! ```
//!
//! Templates use Jinja syntax (`{{ field }}`, `{% for %}`); the receipt
//! directives use single braces (`{c}`, `{code128 ...}`) and pass through
//! untouched. Output is never HTML-escaped.
//!
//! ## Functions
//!
//! | Name | Argument | Output |
//! |------|----------|--------|
//! | `DATETIME` | date string or Unix seconds | date and time in the date format |
//! | `DATE` | date string or Unix seconds | date in the date format |
//! | `TIME` | date string or Unix seconds | `HH:MM` |
//! | `PRICE` | number | price in the currency, right-aligned to 10 columns |
//!
//! Each is also available as a filter: `{{ total | PRICE }}`.
//!
//! ## Missing Fields
//!
//! Structs implementing [`TemplateData`] are strict: a field the template
//! uses but the struct lacks fails with [`ReciboError::TemplateBinding`].
//! Maps and JSON objects are lenient and render missing keys as empty.

pub mod format;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveDateTime;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, UndefinedBehavior, Value};
use serde::Serialize;

use crate::error::ReciboError;

pub use format::{CurrencyFormat, DateFormat};

/// Data that can be merged into a template.
///
/// Implement it for your own structs with an empty body:
///
/// ```
/// use recibo::template::{self, CurrencyFormat, DateFormat, TemplateData};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Ticket {
///     number: u32,
/// }
///
/// impl TemplateData for Ticket {}
///
/// let text = template::expand(
///     "Ticket {{ number }}",
///     &Ticket { number: 7 },
///     "",
///     DateFormat::Dma,
///     CurrencyFormat::Eur,
/// )
/// .unwrap();
/// assert_eq!(text, "Ticket 7");
/// ```
pub trait TemplateData: Serialize {
    /// Whether a missing field is an error rather than empty output.
    fn is_strict(&self) -> bool {
        true
    }
}

impl TemplateData for serde_json::Value {
    fn is_strict(&self) -> bool {
        false
    }
}

impl TemplateData for serde_json::Map<String, serde_json::Value> {
    fn is_strict(&self) -> bool {
        false
    }
}

impl<V: Serialize> TemplateData for HashMap<String, V> {
    fn is_strict(&self) -> bool {
        false
    }
}

impl<V: Serialize> TemplateData for BTreeMap<String, V> {
    fn is_strict(&self) -> bool {
        false
    }
}

/// Expand `template` with `data`.
///
/// Relative `{img PATH}` directives in the result are resolved against
/// `asset_path` so the generator can find the files later.
pub fn expand<T: TemplateData + ?Sized>(
    template: &str,
    data: &T,
    asset_path: impl AsRef<Path>,
    date_format: DateFormat,
    currency: CurrencyFormat,
) -> Result<String, ReciboError> {
    let env = environment(date_format, currency, data.is_strict());
    let text = env
        .template_from_str(template)
        .and_then(|tmpl| tmpl.render(data))
        .map_err(template_error)?;
    Ok(resolve_images(&text, asset_path.as_ref()))
}

fn environment<'s>(
    date_format: DateFormat,
    currency: CurrencyFormat,
    strict: bool,
) -> Environment<'s> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(if strict {
        UndefinedBehavior::Strict
    } else {
        UndefinedBehavior::Chainable
    });

    let datetime = move |value: Value| -> Result<String, Error> {
        timestamp(&value, date_format).map(|t| format::print_datetime(&t, date_format))
    };
    let date = move |value: Value| -> Result<String, Error> {
        timestamp(&value, date_format).map(|t| format::print_date(&t, date_format))
    };
    let time = move |value: Value| -> Result<String, Error> {
        timestamp(&value, date_format).map(|t| format::print_time(&t))
    };
    let price = move |value: f64| format!("{:>10}", format::print_price(value, currency));

    env.add_function("DATETIME", datetime);
    env.add_filter("DATETIME", datetime);
    env.add_function("DATE", date);
    env.add_filter("DATE", date);
    env.add_function("TIME", time);
    env.add_filter("TIME", time);
    env.add_function("PRICE", price);
    env.add_filter("PRICE", price);
    env
}

fn timestamp(value: &Value, date_format: DateFormat) -> Result<NaiveDateTime, Error> {
    if value.is_undefined() {
        return Err(Error::new(
            ErrorKind::UndefinedError,
            "date argument is undefined",
        ));
    }
    let parsed = match value.as_str() {
        Some(s) => format::parse_datetime(s, date_format),
        None => i64::try_from(value.clone())
            .ok()
            .and_then(format::from_unix),
    };
    parsed.ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("date {:?} not supported", value),
        )
    })
}

fn template_error(err: Error) -> ReciboError {
    match err.kind() {
        ErrorKind::UndefinedError => ReciboError::TemplateBinding(err.to_string()),
        _ => ReciboError::Template(err.to_string()),
    }
}

/// Rewrite relative `{img PATH}` directives to live under `assets`.
fn resolve_images(text: &str, assets: &Path) -> String {
    if assets.as_os_str().is_empty() {
        return text.to_string();
    }

    const TAG: &str = "{img ";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(TAG) {
        out.push_str(&rest[..start]);
        let body = &rest[start + TAG.len()..];
        match body.find(['{', '}']) {
            Some(end) if end > 0 && body[end..].starts_with('}') => {
                let path = &body[..end];
                if Path::new(path).is_relative() {
                    out.push_str(&format!("{}{}}}", TAG, assets.join(path).display()));
                } else {
                    out.push_str(&format!("{}{}}}", TAG, path));
                }
                rest = &body[end + 1..];
            }
            _ => {
                out.push_str(TAG);
                rest = body;
            }
        }
    }
    out.push_str(rest);
    out
}
