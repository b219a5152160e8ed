//! Code 39: nine elements per character, three of them wide.

use super::{BarPattern, Encoded, EncodingError};

/// Start/stop character pattern.
const GUARD: &str = "131131311";

fn pattern(c: char) -> Option<&'static str> {
    let p = match c {
        '0' => "111331311",
        '1' => "311311113",
        '2' => "113311113",
        '3' => "313311111",
        '4' => "111331113",
        '5' => "311331111",
        '6' => "113331111",
        '7' => "111311313",
        '8' => "311311311",
        '9' => "113311311",
        'A' => "311113113",
        'B' => "113113113",
        'C' => "313113111",
        'D' => "111133113",
        'E' => "311133111",
        'F' => "113133111",
        'G' => "111113313",
        'H' => "311113311",
        'I' => "113113311",
        'J' => "111133311",
        'K' => "311111133",
        'L' => "113111133",
        'M' => "313111131",
        'N' => "111131133",
        'O' => "311131131",
        'P' => "113131131",
        'Q' => "111111333",
        'R' => "311111331",
        'S' => "113111331",
        'T' => "111131331",
        'U' => "331111113",
        'V' => "133111113",
        'W' => "333111111",
        'X' => "131131113",
        'Y' => "331131111",
        'Z' => "133131111",
        '-' => "131111313",
        '.' => "331111311",
        ' ' => "133111311",
        '$' => "131313111",
        '/' => "131311131",
        '+' => "131113131",
        '%' => "111313131",
        _ => return None,
    };
    Some(p)
}

/// Encode Code 39. Surrounding `*` guards are optional in the input and
/// always present in the output.
pub fn encode(text: &str) -> Result<Encoded, EncodingError> {
    let code = text.strip_prefix('*').unwrap_or(text);
    let code = code.strip_suffix('*').unwrap_or(code);
    if code.is_empty() {
        return Err(EncodingError::EmptyInput);
    }

    let mut pattern_out = BarPattern::new();
    pattern_out.push_str(GUARD);
    for c in code.chars() {
        let p = pattern(c).ok_or(EncodingError::InvalidCharacter(c))?;
        pattern_out.push_str("1");
        pattern_out.push_str(p);
    }
    pattern_out.push_str("1");
    pattern_out.push_str(GUARD);

    Ok(Encoded {
        pattern: pattern_out,
        hri: format!("*{}*", code),
    })
}
