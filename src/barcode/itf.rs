//! Interleaved 2 of 5.
//!
//! Digits are taken in pairs: the first digit's 2-of-5 pattern drives the
//! bars, the second drives the spaces between them.

use super::{BarPattern, Encoded, EncodingError, digits};

const PATTERNS: [&[u8; 5]; 10] = [
    b"11221", b"21112", b"12112", b"22111", b"11212", b"21211", b"12211", b"11122", b"21121",
    b"12121",
];

const START: &str = "1111";
const STOP: &str = "211";

pub fn encode(text: &str) -> Result<Encoded, EncodingError> {
    if text.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    let values = digits(text)?;
    if values.len() % 2 != 0 {
        return Err(EncodingError::InvalidLength(values.len()));
    }

    let mut pattern = BarPattern::new();
    pattern.push_str(START);
    for pair in values.chunks(2) {
        let bars = PATTERNS[pair[0] as usize];
        let spaces = PATTERNS[pair[1] as usize];
        let mut interleaved = String::with_capacity(10);
        for (b, s) in bars.iter().zip(spaces.iter()) {
            interleaved.push(*b as char);
            interleaved.push(*s as char);
        }
        pattern.push_str(&interleaved);
    }
    pattern.push_str(STOP);

    Ok(Encoded {
        pattern,
        hri: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_itf() {
        let encoded = encode("123456").unwrap();
        assert_eq!(
            encoded.pattern.to_string(),
            "1111211211112221211211122112221111211"
        );
        assert_eq!(encoded.hri, "123456");
    }

    #[test]
    fn test_itf_rejects_invalid() {
        assert_eq!(encode("12345"), Err(EncodingError::InvalidLength(5)));
        assert_eq!(encode("12345A"), Err(EncodingError::InvalidCharacter('A')));
        assert_eq!(encode(""), Err(EncodingError::EmptyInput));
    }
}
