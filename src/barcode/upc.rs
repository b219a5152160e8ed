//! UPC-A and UPC-E.
//!
//! UPC-E is the zero-suppressed form of a UPC-A number. Six body digits
//! are drawn; the number system digit (0 or 1) and the check digit are
//! carried by the parity of those six digits.
//!
//! ## Zero suppression
//!
//! The last UPC-E body digit selects how the UPC-A manufacturer and
//! product codes were compressed:
//!
//! | Last digit | UPC-E `N ABCDE d C` | UPC-A |
//! |------------|---------------------|-------|
//! | 0, 1, 2 | `N AB CDE d C` | `N ABd 0000 CDE C` |
//! | 3 | `N ABC DE 3 C` | `N ABC 00000 DE C` |
//! | 4 | `N ABCD E 4 C` | `N ABCD 00000 E C` |
//! | 5-9 | `N ABCDE d C` | `N ABCDE 0000 d C` |

use super::ean::{EVEN, GUARD, MIDDLE, ODD, with_check_digit};
use super::{BarPattern, Encoded, EncodingError, digits, mod10_check};

const UPCA_WEIGHTS: [u32; 2] = [3, 1];

const UPCE_END: &str = "111111";

/// UPC-E body parity by number system and check digit (`true` = even).
const UPCE_PARITY: [[&str; 10]; 2] = [
    [
        "EEEOOO", "EEOEOO", "EEOOEO", "EEOOOE", "EOEEOO", "EOOEEO", "EOOOEE", "EOEOEO", "EOEOOE",
        "EOOEOE",
    ],
    [
        "OOOEEE", "OOEOEE", "OOEEOE", "OOEEEO", "OEOOEE", "OEEOOE", "OEEEOO", "OEOEOE", "OEOEEO",
        "OEEOEO",
    ],
];

fn digit_string(values: &[u8]) -> String {
    values.iter().map(|d| (b'0' + d) as char).collect()
}

pub fn encode_upca(text: &str) -> Result<Encoded, EncodingError> {
    let code = with_check_digit(text, 11, UPCA_WEIGHTS)?;

    let mut pattern = BarPattern::new();
    pattern.push_str(GUARD);
    for &d in &code[..6] {
        pattern.push_str(ODD[d as usize]);
    }
    pattern.push_str(MIDDLE);
    for &d in &code[6..] {
        pattern.push_str(ODD[d as usize]);
    }
    pattern.push_str(GUARD);

    Ok(Encoded {
        pattern,
        hri: digit_string(&code),
    })
}

/// Expand an 8-digit UPC-E number to its 12-digit UPC-A form.
fn expand_digits(code: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12);
    match code[6] {
        0..=2 => {
            out.extend(&code[..3]);
            out.push(code[6]);
            out.extend([0; 4]);
            out.extend(&code[3..6]);
            out.push(code[7]);
        }
        3 => {
            out.extend(&code[..4]);
            out.extend([0; 5]);
            out.extend(&code[4..6]);
            out.push(code[7]);
        }
        4 => {
            out.extend(&code[..5]);
            out.extend([0; 5]);
            out.push(code[5]);
            out.push(code[7]);
        }
        _ => {
            out.extend(&code[..6]);
            out.extend([0; 4]);
            out.extend(&code[6..8]);
        }
    }
    out
}

/// Compress a 12-digit UPC-A number to its 8-digit UPC-E form.
fn compress_digits(code: &[u8]) -> Option<Vec<u8>> {
    let zeros = |range: std::ops::Range<usize>| code[range].iter().all(|&d| d == 0);
    let mut out = Vec::with_capacity(8);
    if zeros(4..8) && code[3] <= 2 {
        out.extend(&code[..3]);
        out.extend(&code[8..11]);
        out.push(code[3]);
    } else if zeros(4..9) {
        out.extend(&code[..4]);
        out.extend(&code[9..11]);
        out.push(3);
    } else if zeros(5..10) {
        out.extend(&code[..5]);
        out.push(code[10]);
        out.push(4);
    } else if zeros(6..10) && code[10] >= 5 {
        out.extend(&code[..6]);
        out.push(code[10]);
    } else {
        return None;
    }
    out.push(code[11]);
    Some(out)
}

/// Expand an 8-digit UPC-E number to UPC-A.
pub fn expand(upce: &str) -> Result<String, EncodingError> {
    let code = digits(upce)?;
    if code.len() != 8 {
        return Err(EncodingError::InvalidLength(code.len()));
    }
    Ok(digit_string(&expand_digits(&code)))
}

/// Compress a 12-digit UPC-A number to UPC-E.
pub fn compress(upca: &str) -> Result<String, EncodingError> {
    let code = digits(upca)?;
    if code.len() != 12 {
        return Err(EncodingError::InvalidLength(code.len()));
    }
    compress_digits(&code)
        .map(|c| digit_string(&c))
        .ok_or_else(|| EncodingError::NotCompressible(upca.to_string()))
}

/// Accepts 6 (number system 0 implied), 7 or 8 digit UPC-E, or 11/12
/// digit UPC-A that can be zero-suppressed.
pub fn encode_upce(text: &str) -> Result<Encoded, EncodingError> {
    if text.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    let values = digits(text)?;
    let code = match values.len() {
        6 | 7 => {
            let mut code = Vec::with_capacity(8);
            if values.len() == 6 {
                code.push(0);
            }
            code.extend(&values);
            code.push(0);
            let upca = expand_digits(&code);
            code[7] = mod10_check(&upca[..11], UPCA_WEIGHTS);
            code
        }
        8 => {
            let upca = expand_digits(&values);
            let expected = mod10_check(&upca[..11], UPCA_WEIGHTS);
            if expected != values[7] {
                return Err(EncodingError::InvalidChecksum {
                    expected,
                    found: values[7],
                });
            }
            values
        }
        11 | 12 => {
            let upca = with_check_digit(text, 11, UPCA_WEIGHTS)?;
            compress_digits(&upca)
                .ok_or_else(|| EncodingError::NotCompressible(text.to_string()))?
        }
        n => return Err(EncodingError::InvalidLength(n)),
    };

    let nsc = code[0];
    if nsc > 1 {
        return Err(EncodingError::InvalidCharacter((b'0' + nsc) as char));
    }
    let parity = UPCE_PARITY[nsc as usize][code[7] as usize].as_bytes();

    let mut pattern = BarPattern::new();
    pattern.push_str(GUARD);
    for (i, &d) in code[1..7].iter().enumerate() {
        let table = if parity[i] == b'E' { &EVEN } else { &ODD };
        pattern.push_str(table[d as usize]);
    }
    pattern.push_str(UPCE_END);

    Ok(Encoded {
        pattern,
        hri: digit_string(&code),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UPCA_BARS: &str = "11132111132212222213211321111111321132111231212211141132111";
    const UPCE_BARS: &str = "111231121221321221211142221111111";

    #[test]
    fn test_upca() {
        let computed = encode_upca("04210000526").unwrap();
        let full = encode_upca("042100005264").unwrap();
        assert_eq!(computed.pattern.to_string(), UPCA_BARS);
        assert_eq!(computed, full);
        assert_eq!(full.hri, "042100005264");
    }

    #[test]
    fn test_upca_rejects_invalid() {
        assert_eq!(encode_upca("0421000264"), Err(EncodingError::InvalidLength(10)));
        assert_eq!(encode_upca("042100X05264"), Err(EncodingError::InvalidCharacter('X')));
        assert_eq!(
            encode_upca("042100005260"),
            Err(EncodingError::InvalidChecksum {
                expected: 4,
                found: 0
            })
        );
    }

    #[test]
    fn test_upce_all_input_forms() {
        for input in ["425261", "0425261", "04252614", "04210000526", "042100005264"] {
            let encoded = encode_upce(input).unwrap();
            assert_eq!(encoded.pattern.to_string(), UPCE_BARS, "{}", input);
            assert_eq!(encoded.hri, "04252614");
        }
    }

    #[test]
    fn test_upce_rejects_invalid() {
        assert_eq!(encode_upce("0421000264"), Err(EncodingError::InvalidLength(10)));
        assert_eq!(encode_upce("042100X05264"), Err(EncodingError::InvalidCharacter('X')));
        assert!(matches!(
            encode_upce("042100005260"),
            Err(EncodingError::InvalidChecksum { .. })
        ));
        assert!(matches!(
            encode_upce("04252611"),
            Err(EncodingError::InvalidChecksum { found: 1, .. })
        ));
        assert_eq!(encode_upce("24210000526"), Err(EncodingError::InvalidCharacter('2')));
        assert!(matches!(
            encode_upce("01234567890"),
            Err(EncodingError::NotCompressible(_))
        ));
    }

    #[test]
    fn test_compress_expand_round_trip() {
        // One code per zero-suppression category.
        for upce in ["01234505", "01234136", "01234144", "01234557", "11234586"] {
            let upca = expand(upce).unwrap();
            assert_eq!(compress(&upca).unwrap(), upce, "via {}", upca);
        }
    }

    #[test]
    fn test_expand_categories() {
        assert_eq!(expand("04252614").unwrap(), "042100005264");
        assert_eq!(expand("01234536").unwrap(), "012300000456");
        assert_eq!(expand("01234546").unwrap(), "012340000056");
        assert_eq!(expand("01234576").unwrap(), "012345000076");
    }
}
