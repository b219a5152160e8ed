//! Code 93 with its two modulo-47 check characters.
//!
//! The four shift characters `($) (%) (/) (+)` have no printable form and
//! are written as U+0080..=U+0083.

use super::{BarPattern, Encoded, EncodingError};

/// Symbol table in check-value order (value = index).
const SYMBOLS: [(char, &str); 47] = [
    ('0', "131112"),
    ('1', "111213"),
    ('2', "111312"),
    ('3', "111411"),
    ('4', "121113"),
    ('5', "121212"),
    ('6', "121311"),
    ('7', "111114"),
    ('8', "131211"),
    ('9', "141111"),
    ('A', "211113"),
    ('B', "211212"),
    ('C', "211311"),
    ('D', "221112"),
    ('E', "221211"),
    ('F', "231111"),
    ('G', "112113"),
    ('H', "112212"),
    ('I', "112311"),
    ('J', "122112"),
    ('K', "132111"),
    ('L', "111123"),
    ('M', "111222"),
    ('N', "111321"),
    ('O', "121122"),
    ('P', "131121"),
    ('Q', "212112"),
    ('R', "212211"),
    ('S', "211122"),
    ('T', "211221"),
    ('U', "221121"),
    ('V', "222111"),
    ('W', "112122"),
    ('X', "112221"),
    ('Y', "122121"),
    ('Z', "123111"),
    ('-', "121131"),
    ('.', "311112"),
    (' ', "311211"),
    ('$', "321111"),
    ('/', "112131"),
    ('+', "113121"),
    ('%', "211131"),
    ('\u{80}', "121221"),
    ('\u{81}', "311121"),
    ('\u{82}', "122211"),
    ('\u{83}', "312111"),
];

const START_STOP: &str = "111141";

fn value_of(c: char) -> Option<usize> {
    SYMBOLS.iter().position(|&(s, _)| s == c)
}

/// Reversed weighted sum modulo 47, weights cycling 1..=max_weight.
fn check_value(values: &[usize], max_weight: usize) -> usize {
    values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, v)| v * (i % max_weight + 1))
        .sum::<usize>()
        % 47
}

pub fn encode(text: &str) -> Result<Encoded, EncodingError> {
    let code = text.strip_prefix('*').unwrap_or(text);
    let code = code.strip_suffix('*').unwrap_or(code);
    if code.is_empty() {
        return Err(EncodingError::EmptyInput);
    }

    let mut values = code
        .chars()
        .map(|c| value_of(c).ok_or(EncodingError::InvalidCharacter(c)))
        .collect::<Result<Vec<_>, _>>()?;
    let c = check_value(&values, 20);
    values.push(c);
    let k = check_value(&values, 15);
    values.push(k);

    let mut pattern = BarPattern::new();
    pattern.push_str(START_STOP);
    for v in values {
        pattern.push_str(SYMBOLS[v].1);
    }
    pattern.push_str(START_STOP);
    // termination bar
    pattern.push_str("1");

    Ok(Encoded {
        pattern,
        hri: code.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code93() {
        let encoded = encode("1234ABCD").unwrap();
        assert_eq!(
            encoded.pattern.to_string(),
            "1111411112131113121114111211132111132112122113112211122112211321111111411"
        );
        assert_eq!(encoded.hri, "1234ABCD");
    }

    #[test]
    fn test_code93_strips_guards() {
        let encoded = encode("123ABC*").unwrap();
        assert_eq!(encoded.hri, "123ABC");
        assert_eq!(encoded, encode("*123ABC*").unwrap());
    }

    #[test]
    fn test_code93_check_characters() {
        // "TEST93" → C = '+', K = '6'
        let values: Vec<usize> = "TEST93".chars().filter_map(value_of).collect();
        let c = check_value(&values, 20);
        assert_eq!(SYMBOLS[c].0, '+');
        let mut with_c = values.clone();
        with_c.push(c);
        assert_eq!(SYMBOLS[check_value(&with_c, 15)].0, '6');
    }

    #[test]
    fn test_code93_rejects_invalid() {
        assert_eq!(encode("1234:ABCD"), Err(EncodingError::InvalidCharacter(':')));
        assert_eq!(encode("123abc"), Err(EncodingError::InvalidCharacter('a')));
        assert_eq!(encode("12*3"), Err(EncodingError::InvalidCharacter('*')));
        assert_eq!(encode("**"), Err(EncodingError::EmptyInput));
    }

    #[test]
    fn test_code93_shift_characters() {
        assert!(encode("A\u{80}B").is_ok());
    }
}
