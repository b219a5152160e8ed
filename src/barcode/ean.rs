//! EAN-13 and EAN-8.
//!
//! ```text
//! EAN-13:  111 | 6 digits (parity by leading digit) | 11111 | 6 digits | 111
//! EAN-8:   111 | 4 digits                             | 11111 | 4 digits | 111
//! ```
//!
//! The leading EAN-13 digit is not drawn; it selects which of the left
//! six digits use the even-parity table.

use super::{BarPattern, Encoded, EncodingError, digits, mod10_check};

pub(crate) const GUARD: &str = "111";
pub(crate) const MIDDLE: &str = "11111";

/// Odd parity (and right-hand) digit patterns.
pub(crate) const ODD: [&str; 10] = [
    "3211", "2221", "2122", "1411", "1132", "1231", "1114", "1312", "1213", "3112",
];

/// Even parity digit patterns.
pub(crate) const EVEN: [&str; 10] = [
    "1123", "1222", "2212", "1141", "2311", "1321", "4111", "2131", "3121", "2113",
];

/// Left-half parity per leading digit (`true` = even).
const EAN13_PARITY: [[bool; 6]; 10] = {
    const O: bool = false;
    const E: bool = true;
    [
        [O, O, O, O, O, O],
        [O, O, E, O, E, E],
        [O, O, E, E, O, E],
        [O, O, E, E, E, O],
        [O, E, O, O, E, E],
        [O, E, E, O, O, E],
        [O, E, E, E, O, O],
        [O, E, O, E, O, E],
        [O, E, O, E, E, O],
        [O, E, E, O, E, O],
    ]
};

/// Append the check digit to `payload_len` digits, or validate it when
/// one more digit was supplied.
pub(crate) fn with_check_digit(
    text: &str,
    payload_len: usize,
    weights: [u32; 2],
) -> Result<Vec<u8>, EncodingError> {
    if text.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    let mut values = digits(text)?;
    if values.len() == payload_len {
        values.push(mod10_check(&values, weights));
    } else if values.len() == payload_len + 1 {
        let expected = mod10_check(&values[..payload_len], weights);
        let found = values[payload_len];
        if expected != found {
            return Err(EncodingError::InvalidChecksum { expected, found });
        }
    } else {
        return Err(EncodingError::InvalidLength(values.len()));
    }
    Ok(values)
}

fn digit_string(values: &[u8]) -> String {
    values.iter().map(|d| (b'0' + d) as char).collect()
}

pub fn encode_ean13(text: &str) -> Result<Encoded, EncodingError> {
    let code = with_check_digit(text, 12, [1, 3])?;
    let parity = &EAN13_PARITY[code[0] as usize];

    let mut pattern = BarPattern::new();
    pattern.push_str(GUARD);
    for (i, &d) in code[1..7].iter().enumerate() {
        let table = if parity[i] { &EVEN } else { &ODD };
        pattern.push_str(table[d as usize]);
    }
    pattern.push_str(MIDDLE);
    for &d in &code[7..13] {
        pattern.push_str(ODD[d as usize]);
    }
    pattern.push_str(GUARD);

    let mut hri = String::new();
    if code[0] != 0 {
        hri.push((b'0' + code[0]) as char);
        hri.push(' ');
    }
    hri.push_str(&digit_string(&code[1..7]));
    hri.push(' ');
    hri.push_str(&digit_string(&code[7..13]));

    Ok(Encoded { pattern, hri })
}

pub fn encode_ean8(text: &str) -> Result<Encoded, EncodingError> {
    let code = with_check_digit(text, 7, [3, 1])?;

    let mut pattern = BarPattern::new();
    pattern.push_str(GUARD);
    for &d in &code[..4] {
        pattern.push_str(ODD[d as usize]);
    }
    pattern.push_str(MIDDLE);
    for &d in &code[4..] {
        pattern.push_str(ODD[d as usize]);
    }
    pattern.push_str(GUARD);

    Ok(Encoded {
        pattern,
        hri: format!("{} {}", digit_string(&code[..4]), digit_string(&code[4..])),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EAN13_BARS: &str = "11121221411231112314111213111111121331123211222121221213111";

    #[test]
    fn test_ean13_with_and_without_check_digit() {
        let full = encode_ean13("1234567890128").unwrap();
        let computed = encode_ean13("123456789012").unwrap();
        assert_eq!(full.pattern.to_string(), EAN13_BARS);
        assert_eq!(full, computed);
        assert_eq!(full.hri, "1 234567 890128");
    }

    #[test]
    fn test_ean13_leading_zero_hidden_in_hri() {
        let encoded = encode_ean13("0012345678905").unwrap();
        assert_eq!(encoded.hri, "012345 678905");
    }

    #[test]
    fn test_ean13_rejects_invalid() {
        assert_eq!(
            encode_ean13("1234567890125"),
            Err(EncodingError::InvalidChecksum {
                expected: 8,
                found: 5
            })
        );
        assert_eq!(encode_ean13("123456789012A"), Err(EncodingError::InvalidCharacter('A')));
        assert_eq!(encode_ean13("12345"), Err(EncodingError::InvalidLength(5)));
    }

    #[test]
    fn test_ean8() {
        let full = encode_ean8("12345670").unwrap();
        assert_eq!(
            full.pattern.to_string(),
            "1112221212214111132111111231111413123211111"
        );
        assert_eq!(full.hri, "1234 5670");
        let computed = encode_ean8("1234568").unwrap();
        assert_eq!(
            computed.pattern.to_string(),
            "1112221212214111132111111231111412131312111"
        );
    }

    #[test]
    fn test_ean8_rejects_invalid() {
        assert!(matches!(
            encode_ean8("12345671"),
            Err(EncodingError::InvalidChecksum { found: 1, .. })
        ));
        assert_eq!(encode_ean8("A1234567"), Err(EncodingError::InvalidCharacter('A')));
    }

    #[test]
    fn test_ean_check_digit_round_trip() {
        for payload in ["400638133393", "590123412345", "000000000000"] {
            let encoded = encode_ean13(payload).unwrap();
            let check = mod10_check(&digits(payload).unwrap(), [1, 3]);
            let full = format!("{}{}", payload, check);
            assert_eq!(encode_ean13(&full).unwrap(), encoded);
            let wrong = format!("{}{}", payload, (check + 1) % 10);
            assert!(matches!(
                encode_ean13(&wrong),
                Err(EncodingError::InvalidChecksum { .. })
            ));
        }
    }
}
