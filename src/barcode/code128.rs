//! # Code 128
//!
//! 103 data values plus three start codes and a stop code. Three subsets
//! share the value space:
//!
//! | Subset | Values 0-63 | Values 64-95 | Values 0-99 |
//! |--------|-------------|--------------|-------------|
//! | A | ASCII 32-95 | control 0-31 | |
//! | B | ASCII 32-95 | ASCII 96-127 | |
//! | C | | | digit pairs `00`-`99` |
//!
//! ## Escaped payloads
//!
//! ESC/POS printers receive Code128 data with the subset chosen explicitly
//! by two-byte escapes. The same syntax drives the manual subsets here:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `{A` `{B` | select subset A / B |
//! | `{C` | select subset C, raw values 0-99 follow |
//! | `{N` | select subset C, ASCII digit pairs follow |
//! | `{S` | next character from the other of A/B |
//! | `{1` | FNC1 |
//! | `{2` `{3` `{4` | FNC2 / FNC3 / FNC4 (A and B only) |
//! | `{{` | literal `{` (B only) |
//!
//! ## Automatic subset selection
//!
//! Subset C is used for runs of six or more digits, or four or more at the
//! very start or end of the data; everything else goes through subset B,
//! shifting to A for control characters.

use super::{BarPattern, Code128Subset, Encoded, EncodingError};

const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", // 0-9
    "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221", "223211",
    "221132", // 10-19
    "221231", "213212", "223112", "312131", "311222", "321122", "321221", "312212", "322112",
    "322211", // 20-29
    "212123", "212321", "232121", "111323", "131123", "131321", "112313", "132113", "132311",
    "211313", // 30-39
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121", "313121",
    "211331", // 40-49
    "231131", "213113", "213311", "213131", "311123", "311321", "331121", "312113", "312311",
    "332111", // 50-59
    "314111", "221411", "431111", "111224", "111422", "121124", "121421", "141122", "141221",
    "112214", // 60-69
    "112412", "122114", "122411", "142112", "142211", "241211", "221114", "413111", "241112",
    "134111", // 70-79
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211",
    "212141", // 80-89
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", // 90-99
    "114131", "311141", "411131", "211412", "211214", "211232", "2331112", // 100-106
];

const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;
const CODE_A: u8 = 101;
const CODE_B: u8 = 100;
const CODE_C: u8 = 99;
const STOP: u8 = 106;
const FNC1: u8 = 102;
const FNC2: u8 = 97;
const FNC3: u8 = 96;
const FNC4_A: u8 = 101;
const FNC4_B: u8 = 100;
const SHIFT: u8 = 98;
/// Value of `{` in subset B.
const BRACE: u8 = 91;

/// Subset state while walking an escaped payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    A,
    B,
    /// Raw values 0-99.
    C,
    /// Subset C fed from ASCII digit pairs.
    Numeric,
}

impl Mode {
    fn shifted(self) -> Self {
        match self {
            Mode::A => Mode::B,
            Mode::B => Mode::A,
            other => other,
        }
    }
}

/// Symbol values and decoded text of an escaped payload.
struct Walk {
    values: Vec<u8>,
    text: String,
}

fn malformed(escape: u8) -> EncodingError {
    EncodingError::MalformedEscape(format!("{{{}", escape as char))
}

fn walk_escaped(data: &[u8]) -> Result<Walk, EncodingError> {
    let mut values = Vec::with_capacity(data.len() + 3);
    let mut text = String::new();
    let mut mode: Option<Mode> = None;
    let mut shift = false;
    let mut i = 0;

    while i < data.len() {
        let b = data[i];
        if b == b'{' {
            let Some(&escape) = data.get(i + 1) else {
                return Err(EncodingError::MalformedEscape("{".to_string()));
            };
            let in_ab = matches!(mode, Some(Mode::A | Mode::B));
            match escape {
                b'A' | b'B' | b'C' | b'N' => {
                    let (start, switch, next) = match escape {
                        b'A' => (START_A, CODE_A, Mode::A),
                        b'B' => (START_B, CODE_B, Mode::B),
                        b'C' => (START_C, CODE_C, Mode::C),
                        _ => (START_C, CODE_C, Mode::Numeric),
                    };
                    values.push(if mode.is_none() { start } else { switch });
                    mode = Some(next);
                }
                b'S' if in_ab => {
                    shift = true;
                    values.push(SHIFT);
                }
                b'1' => values.push(FNC1),
                b'2' if in_ab => values.push(FNC2),
                b'3' if in_ab => values.push(FNC3),
                b'4' if mode == Some(Mode::A) => values.push(FNC4_A),
                b'4' if mode == Some(Mode::B) => values.push(FNC4_B),
                b'{' if mode == Some(Mode::B) => {
                    values.push(BRACE);
                    text.push('{');
                }
                other => return Err(malformed(other)),
            }
            i += 2;
            continue;
        }

        let Some(current) = mode else {
            return Err(EncodingError::MalformedEscape(
                "missing start sequence".to_string(),
            ));
        };
        let effective = if shift { current.shifted() } else { current };
        shift = false;
        match effective {
            Mode::A => match b {
                32..=95 => {
                    values.push(b - 32);
                    text.push(b as char);
                }
                0..=31 => {
                    values.push(b + 64);
                    text.push(b as char);
                }
                _ => return Err(EncodingError::InvalidCharacter(b as char)),
            },
            Mode::B => match b {
                32..=127 => {
                    values.push(b - 32);
                    text.push(b as char);
                }
                _ => return Err(EncodingError::InvalidCharacter(b as char)),
            },
            Mode::C => {
                if b > 99 {
                    return Err(EncodingError::InvalidCharacter(b as char));
                }
                values.push(b);
                text.push_str(&format!("{:02}", b));
            }
            Mode::Numeric => {
                if !b.is_ascii_digit() {
                    return Err(EncodingError::InvalidCharacter(b as char));
                }
                let Some(&next) = data.get(i + 1) else {
                    return Err(EncodingError::InvalidLength(data.len()));
                };
                if !next.is_ascii_digit() {
                    return Err(EncodingError::InvalidCharacter(next as char));
                }
                let v = (b - b'0') * 10 + (next - b'0');
                values.push(v);
                text.push_str(&format!("{:02}", v));
                i += 1;
            }
        }
        i += 1;
    }

    Ok(Walk { values, text })
}

/// Append check symbol and stop code, then expand to bar widths.
fn finish(mut values: Vec<u8>) -> BarPattern {
    let sum: u32 = values
        .iter()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * (i as u32).max(1))
        .sum();
    values.push((sum % 103) as u8);
    values.push(STOP);

    let mut pattern = BarPattern::new();
    for v in values {
        pattern.push_str(PATTERNS[v as usize]);
    }
    pattern
}

/// Human readable form: control characters print as spaces.
fn hri_of(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_control() && c != '\u{7f}' { ' ' } else { c })
        .collect()
}

/// Encode an escaped payload (the `GS k 73` data format).
pub fn encode_escaped(data: &[u8]) -> Result<Encoded, EncodingError> {
    if data.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    let walk = walk_escaped(data)?;
    Ok(Encoded {
        pattern: finish(walk.values),
        hri: hri_of(&walk.text),
    })
}

/// Recover the data text from an escaped payload. Function codes carry no
/// text and are dropped.
pub fn decode_escaped(data: &[u8]) -> Result<String, EncodingError> {
    Ok(walk_escaped(data)?.text)
}

/// Encode text in a fixed subset: the text is prefixed with `{A`, `{B`
/// or `{N` and may contain further escapes.
pub fn encode_subset(text: &str, subset: Code128Subset) -> Result<Encoded, EncodingError> {
    if text.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
        return Err(EncodingError::InvalidCharacter(c));
    }
    if subset == Code128Subset::C && !text.contains('{') {
        if let Some(c) = text.chars().find(|c| !c.is_ascii_digit()) {
            return Err(EncodingError::InvalidCharacter(c));
        }
        if text.len() % 2 != 0 {
            return Err(EncodingError::InvalidLength(text.len()));
        }
    }
    let prefix: &[u8] = match subset {
        Code128Subset::A => b"{A",
        Code128Subset::B => b"{B",
        Code128Subset::C => b"{N",
        Code128Subset::Auto => return encode_auto(text),
    };
    let mut data = prefix.to_vec();
    data.extend(text.as_bytes());
    encode_escaped(&data)
}

/// Length of the digit run at the start of `data`.
fn digit_run<T: Copy>(data: &[T], is_digit: impl Fn(T) -> bool) -> usize {
    data.iter().take_while(|&&c| is_digit(c)).count()
}

/// Whether a digit run of length `n` at `i` (of `len`) goes to subset C.
fn prefers_c(n: usize, i: usize, len: usize) -> bool {
    n >= 6 || (n >= 4 && i == 0) || (n >= 4 && i + n == len)
}

/// Encode text switching between subsets B and C automatically.
///
/// Text may carry `{1`..`{4` function codes and `{{` for a literal brace.
pub fn encode_auto(text: &str) -> Result<Encoded, EncodingError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Err(EncodingError::EmptyInput);
    }

    let mut values = Vec::with_capacity(chars.len() + 3);
    let mut hri = String::new();
    let mut mode: Option<Mode> = None;
    let mut i = 0;

    while i < chars.len() {
        let mut n = digit_run(&chars[i..], |c| c.is_ascii_digit());
        if prefers_c(n, i, chars.len()) {
            match mode {
                Some(Mode::C) => {}
                Some(_) => values.push(CODE_C),
                None => values.push(START_C),
            }
            mode = Some(Mode::C);
            while n > 1 {
                let v = (chars[i] as u8 - b'0') * 10 + (chars[i + 1] as u8 - b'0');
                values.push(v);
                hri.push_str(&format!("{:02}", v));
                n -= 2;
                i += 2;
            }
            continue;
        }

        match mode {
            Some(Mode::B) => {}
            Some(_) => values.push(CODE_B),
            None => values.push(START_B),
        }
        mode = Some(Mode::B);
        for &c in &chars[i..i + n] {
            values.push(c as u8 - 32);
            hri.push(c);
        }
        i += n;

        let mut escape = false;
        while i < chars.len() && (escape || !chars[i].is_ascii_digit()) {
            let c = chars[i];
            if escape {
                match c {
                    '1' => values.push(FNC1),
                    '2' => values.push(FNC2),
                    '3' => values.push(FNC3),
                    '4' => values.push(FNC4_B),
                    '{' => {
                        values.push(BRACE);
                        hri.push('{');
                    }
                    other => return Err(EncodingError::MalformedEscape(format!("{{{}", other))),
                }
                escape = false;
            } else if c == '{' {
                escape = true;
            } else if (c as u32) < 32 {
                values.push(SHIFT);
                values.push(c as u8 + 64);
                hri.push(' ');
            } else if (c as u32) < 128 {
                values.push(c as u8 - 32);
                hri.push(c);
            } else {
                return Err(EncodingError::InvalidCharacter(c));
            }
            i += 1;
        }
        if escape {
            return Err(EncodingError::MalformedEscape("{".to_string()));
        }
    }

    Ok(Encoded {
        pattern: finish(values),
        hri,
    })
}

/// Rewrite raw bytes into an escaped payload using the automatic subset
/// rules. Braces are doubled, control bytes are shifted to subset A and
/// bytes above 127 become `?`.
pub fn auto_escape(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 4);
    let mut mode: Option<Mode> = None;
    let mut i = 0;

    while i < data.len() {
        let mut n = digit_run(&data[i..], |b| b.is_ascii_digit());
        if prefers_c(n, i, data.len()) {
            if mode != Some(Mode::C) {
                out.extend(b"{C");
                mode = Some(Mode::C);
            }
            while n > 1 {
                out.push((data[i] - b'0') * 10 + (data[i + 1] - b'0'));
                n -= 2;
                i += 2;
            }
            continue;
        }

        if mode != Some(Mode::B) {
            out.extend(b"{B");
            mode = Some(Mode::B);
        }
        out.extend(&data[i..i + n]);
        i += n;
        while i < data.len() && !data[i].is_ascii_digit() {
            match data[i] {
                b'{' => out.extend(b"{{"),
                b @ 0..=31 => out.extend([b'{', b'S', b]),
                b @ 32..=127 => out.push(b),
                _ => out.push(b'?'),
            }
            i += 1;
        }
    }
    out
}
