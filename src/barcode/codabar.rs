//! Codabar (NW-7).
//!
//! Start and stop characters are one of `a b c d`. Upper case control
//! letters at either end are folded to lower case; a missing start gets
//! `a` and a missing stop gets `d`.

use super::{BarPattern, Encoded, EncodingError};

fn pattern(c: char) -> Option<&'static str> {
    let p = match c {
        '0' => "1111133",
        '1' => "1111331",
        '2' => "1113113",
        '3' => "3311111",
        '4' => "1131131",
        '5' => "3111131",
        '6' => "1311113",
        '7' => "1311311",
        '8' => "1331111",
        '9' => "3113111",
        '-' => "1113311",
        '$' => "1133111",
        ':' => "3111313",
        '/' => "3131113",
        '.' => "3131311",
        '+' => "1131313",
        'a' => "1133131",
        'b' => "1313113",
        'c' => "1113133",
        'd' => "1113331",
        _ => return None,
    };
    Some(p)
}

fn is_control(c: char) -> bool {
    matches!(c, 'a'..='d')
}

fn fold_guard(c: char) -> char {
    if matches!(c, 'A'..='D') {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

pub fn encode(text: &str) -> Result<Encoded, EncodingError> {
    let mut chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    let end = chars.len() - 1;
    chars[0] = fold_guard(chars[0]);
    chars[end] = fold_guard(chars[end]);
    if !is_control(chars[0]) {
        chars.insert(0, 'a');
    }
    if !chars.last().is_some_and(|&c| is_control(c)) {
        chars.push('d');
    }

    let mut out = BarPattern::new();
    let end = chars.len() - 1;
    for (k, &c) in chars.iter().enumerate() {
        let p = pattern(c).ok_or(EncodingError::InvalidCharacter(c))?;
        if is_control(c) && k > 0 && k < end {
            return Err(EncodingError::InvalidCharacter(c));
        }
        if k > 0 {
            out.push_str("1");
        }
        out.push_str(p);
    }

    Ok(Encoded {
        pattern: out,
        hri: chars.into_iter().collect(),
    })
}
