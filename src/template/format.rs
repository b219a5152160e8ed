//! Date and price formatting for the template functions.
//!
//! | Format | DATETIME | DATE |
//! |--------|----------|------|
//! | `Dma` | `31/12/2024 18:30` | `31/12/2024` |
//! | `Mda` | `12/31/2024 18:30` | `12/31/2024` |
//! | `Amd` | `2024-12-31 18:30` | `2024-12-31` |
//! | `Iso` | `2024-12-31T18:30:00` | `2024-12-31` |
//!
//! | Currency | 12345.678 |
//! |----------|-----------|
//! | `Eur` | `12.345,68€` |
//! | `Usd` | `$12,345.68` |
//! | `Cop` | `$12.346` |
//! | `Plain` | `12345.678000` |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ReciboError;

/// Date ordering used to parse and print timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// RFC 3339
    #[default]
    Iso,
    /// Day/month/year
    Dma,
    /// Month/day/year
    Mda,
    /// Year-month-day
    Amd,
}

impl FromStr for DateFormat {
    type Err = ReciboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iso" => Ok(DateFormat::Iso),
            "dma" => Ok(DateFormat::Dma),
            "mda" => Ok(DateFormat::Mda),
            "amd" => Ok(DateFormat::Amd),
            _ => Err(ReciboError::Template(format!("unknown date format {:?}", s))),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateFormat::Iso => "iso",
            DateFormat::Dma => "dma",
            DateFormat::Mda => "mda",
            DateFormat::Amd => "amd",
        })
    }
}

/// Currency used by `PRICE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyFormat {
    #[default]
    Eur,
    Usd,
    /// Colombian peso, no decimals
    Cop,
    /// Six decimals, no grouping
    Plain,
}

impl FromStr for CurrencyFormat {
    type Err = ReciboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eur" => Ok(CurrencyFormat::Eur),
            "usd" => Ok(CurrencyFormat::Usd),
            "cop" => Ok(CurrencyFormat::Cop),
            "plain" => Ok(CurrencyFormat::Plain),
            _ => Err(ReciboError::Template(format!("unknown currency {:?}", s))),
        }
    }
}

impl fmt::Display for CurrencyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CurrencyFormat::Eur => "eur",
            CurrencyFormat::Usd => "usd",
            CurrencyFormat::Cop => "cop",
            CurrencyFormat::Plain => "plain",
        })
    }
}

// ============================================================================
// DATES
// ============================================================================

/// Replace `-` and `.` date separators with `/` and zero-pad single digit
/// components, leaving the time part alone.
fn normalize_date(s: &str) -> String {
    let (date, time) = match s.split_once(' ') {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };
    let date = date
        .split(['/', '-', '.'])
        .map(|part| {
            if part.len() == 1 {
                format!("0{}", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/");
    match time {
        Some(time) => format!("{} {}", date, time),
        None => date,
    }
}

fn parse_ordered(s: &str, date_pattern: &str) -> Option<NaiveDateTime> {
    let t = normalize_date(s);
    for time_pattern in [" %H:%M:%S", " %H:%M"] {
        let pattern = format!("{}{}", date_pattern, time_pattern);
        if let Ok(dt) = NaiveDateTime::parse_from_str(&t, &pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(&t, date_pattern)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_rfc3339(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

/// Parse a timestamp written in `format`'s ordering, falling back to
/// RFC 3339 and `YYYY-MM-DD[ HH:MM[:SS]]`.
///
/// Offsets are kept as wall-clock time: `2024-01-02T10:00:00+05:00` parses
/// to 10:00.
pub fn parse_datetime(s: &str, format: DateFormat) -> Option<NaiveDateTime> {
    let s = s.trim();
    let ordered = match format {
        DateFormat::Dma => parse_ordered(s, "%d/%m/%Y"),
        DateFormat::Mda => parse_ordered(s, "%m/%d/%Y"),
        DateFormat::Amd => parse_ordered(s, "%Y/%m/%d"),
        DateFormat::Iso => None,
    };
    ordered
        .or_else(|| parse_rfc3339(s))
        .or_else(|| parse_rfc3339(&format!("{}Z", s)))
        .or_else(|| parse_rfc3339(&format!("{}T00:00:00Z", s)))
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok())
}

/// Unix seconds as UTC wall-clock time.
pub fn from_unix(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

pub fn print_datetime(dt: &NaiveDateTime, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Dma => "%d/%m/%Y %H:%M",
        DateFormat::Mda => "%m/%d/%Y %H:%M",
        DateFormat::Amd => "%Y-%m-%d %H:%M",
        DateFormat::Iso => "%Y-%m-%dT%H:%M:%S",
    };
    dt.format(pattern).to_string()
}

pub fn print_date(dt: &NaiveDateTime, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Dma => "%d/%m/%Y",
        DateFormat::Mda => "%m/%d/%Y",
        DateFormat::Amd | DateFormat::Iso => "%Y-%m-%d",
    };
    dt.format(pattern).to_string()
}

pub fn print_time(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

// ============================================================================
// PRICES
// ============================================================================

/// Fixed-point number with thousands grouping.
pub fn print_number(v: f64, decimals: usize, decimal_sep: &str, thousands_sep: &str) -> String {
    let s = format!("{:.*}", decimals, v);
    let (int_part, frac) = match s.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (s.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };

    let mut out = String::from(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(thousands_sep);
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push_str(decimal_sep);
        out.push_str(frac);
    }
    out
}

pub fn print_price(v: f64, currency: CurrencyFormat) -> String {
    match currency {
        CurrencyFormat::Eur => format!("{}€", print_number(v, 2, ",", ".")),
        CurrencyFormat::Usd => format!("${}", print_number(v, 2, ".", ",")),
        CurrencyFormat::Cop => format!("${}", print_number(v, 0, ",", ".")),
        CurrencyFormat::Plain => format!("{:.6}", v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_dma() {
        let expected = dt(2024, 3, 5, 18, 30, 0);
        assert_eq!(parse_datetime("05/03/2024 18:30", DateFormat::Dma), Some(expected));
        assert_eq!(parse_datetime("5-3-2024 18:30", DateFormat::Dma), Some(expected));
        assert_eq!(parse_datetime("5.3.2024 18:30:00", DateFormat::Dma), Some(expected));
        assert_eq!(
            parse_datetime("5/3/2024", DateFormat::Dma),
            Some(dt(2024, 3, 5, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_mda_and_amd() {
        let expected = dt(2024, 3, 5, 9, 15, 0);
        assert_eq!(parse_datetime("3/5/2024 09:15", DateFormat::Mda), Some(expected));
        assert_eq!(parse_datetime("2024-3-5 09:15", DateFormat::Amd), Some(expected));
        assert_eq!(parse_datetime("2024.03.05 09:15:00", DateFormat::Amd), Some(expected));
    }

    #[test]
    fn test_parse_rfc3339_fallbacks() {
        let expected = dt(2024, 3, 5, 9, 15, 0);
        for format in [DateFormat::Iso, DateFormat::Dma, DateFormat::Mda, DateFormat::Amd] {
            assert_eq!(parse_datetime("2024-03-05T09:15:00Z", format), Some(expected));
            assert_eq!(parse_datetime("2024-03-05T09:15:00", format), Some(expected));
            assert_eq!(parse_datetime("2024-03-05T09:15:00+02:00", format), Some(expected));
        }
        assert_eq!(
            parse_datetime("2024-03-05", DateFormat::Iso),
            Some(dt(2024, 3, 5, 0, 0, 0))
        );
        assert_eq!(parse_datetime("2024-03-05 09:15", DateFormat::Iso), Some(expected));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_datetime("yesterday", DateFormat::Dma), None);
        assert_eq!(parse_datetime("31/02/2024", DateFormat::Dma), None);
    }

    #[test]
    fn test_from_unix() {
        assert_eq!(from_unix(0), Some(dt(1970, 1, 1, 0, 0, 0)));
        assert_eq!(from_unix(1_700_000_000), Some(dt(2023, 11, 14, 22, 13, 20)));
    }

    #[test]
    fn test_print_dates() {
        let t = dt(2024, 12, 31, 18, 30, 5);
        assert_eq!(print_datetime(&t, DateFormat::Dma), "31/12/2024 18:30");
        assert_eq!(print_datetime(&t, DateFormat::Mda), "12/31/2024 18:30");
        assert_eq!(print_datetime(&t, DateFormat::Amd), "2024-12-31 18:30");
        assert_eq!(print_datetime(&t, DateFormat::Iso), "2024-12-31T18:30:05");
        assert_eq!(print_date(&t, DateFormat::Dma), "31/12/2024");
        assert_eq!(print_date(&t, DateFormat::Mda), "12/31/2024");
        assert_eq!(print_date(&t, DateFormat::Iso), "2024-12-31");
        assert_eq!(print_time(&t), "18:30");
    }

    #[test]
    fn test_print_number_grouping() {
        assert_eq!(print_number(0.0, 2, ",", "."), "0,00");
        assert_eq!(print_number(999.0, 0, ",", "."), "999");
        assert_eq!(print_number(1234567.891, 2, ".", ","), "1,234,567.89");
        assert_eq!(print_number(-1234.5, 2, ",", "."), "-1.234,50");
        assert_eq!(print_number(-123.0, 0, ",", "."), "-123");
    }

    #[test]
    fn test_print_price() {
        assert_eq!(print_price(12345.678, CurrencyFormat::Eur), "12.345,68€");
        assert_eq!(print_price(12345.678, CurrencyFormat::Usd), "$12,345.68");
        assert_eq!(print_price(12345.678, CurrencyFormat::Cop), "$12.346");
        assert_eq!(print_price(12345.678, CurrencyFormat::Plain), "12345.678000");
        assert_eq!(print_price(-5.0, CurrencyFormat::Usd), "$-5.00");
    }

    #[test]
    fn test_format_names() {
        assert_eq!("DMA".parse::<DateFormat>().unwrap(), DateFormat::Dma);
        assert_eq!("usd".parse::<CurrencyFormat>().unwrap(), CurrencyFormat::Usd);
        assert!("xyz".parse::<DateFormat>().is_err());
        assert_eq!(DateFormat::Amd.to_string(), "amd");
        assert_eq!(CurrencyFormat::Plain.to_string(), "plain");
    }
}
