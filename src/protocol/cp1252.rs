//! # Windows-1252 Encoding
//!
//! Converts between Unicode strings and the Windows-1252 single-byte code
//! page selected by `ESC t 16`.
//!
//! - 0x00–0x7F: ASCII
//! - 0x80–0x9F: typographic punctuation, €, Š, Ž, Œ, ...
//! - 0xA0–0xFF: identical to ISO-8859-1 (U+00A0–U+00FF)
//!
//! The five unassigned bytes (0x81, 0x8D, 0x8F, 0x90, 0x9D) decode to the
//! C1 control with the same value.

/// Encode a Unicode string as Windows-1252 bytes.
///
/// Characters outside the code page are replaced with `?` and logged.
pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        if let Some(byte) = unicode_to_cp1252(ch) {
            out.push(byte);
        } else {
            log::warn!(
                "cp1252: unmapped character '{}' (U+{:04X}), replacing with '?'",
                ch,
                ch as u32
            );
            out.push(b'?');
        }
    }
    out
}

/// Decode Windows-1252 bytes to a Unicode string. Never fails.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| cp1252_to_unicode(b)).collect()
}

fn unicode_to_cp1252(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if cp < 0x80 || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    let byte = match ch {
        '€' => 0x80,
        '\u{81}' => 0x81,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        '\u{8D}' => 0x8D,
        'Ž' => 0x8E,
        '\u{8F}' => 0x8F,
        '\u{90}' => 0x90,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        '\u{9D}' => 0x9D,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn cp1252_to_unicode(byte: u8) -> char {
    match byte {
        0x80 => '€',
        0x82 => '‚',
        0x83 => 'ƒ',
        0x84 => '„',
        0x85 => '…',
        0x86 => '†',
        0x87 => '‡',
        0x88 => 'ˆ',
        0x89 => '‰',
        0x8A => 'Š',
        0x8B => '‹',
        0x8C => 'Œ',
        0x8E => 'Ž',
        0x91 => '‘',
        0x92 => '’',
        0x93 => '“',
        0x94 => '”',
        0x95 => '•',
        0x96 => '–',
        0x97 => '—',
        0x98 => '˜',
        0x99 => '™',
        0x9A => 'š',
        0x9B => '›',
        0x9C => 'œ',
        0x9E => 'ž',
        0x9F => 'Ÿ',
        // ASCII, Latin-1 and the unassigned C1 slots
        b => char::from(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Hello, World!"), b"Hello, World!".to_vec());
    }

    #[test]
    fn test_latin1_range() {
        assert_eq!(encode("Año ñ ü"), vec![b'A', 0xF1, b'o', b' ', 0xF1, b' ', 0xFC]);
    }

    #[test]
    fn test_euro_and_punctuation() {
        assert_eq!(encode("12,50€"), vec![b'1', b'2', b',', b'5', b'0', 0x80]);
        assert_eq!(encode("“x”"), vec![0x93, b'x', 0x94]);
    }

    #[test]
    fn test_unmapped_char_becomes_question_mark() {
        assert_eq!(encode("a→b"), vec![b'a', b'?', b'b']);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(&[b'T', 0xE9, 0x80, 0x99]), "Té€™");
        assert_eq!(decode(&[0x81]), "\u{81}");
    }

    #[test]
    fn test_roundtrip_every_byte() {
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(encode(&decode(&all)), all);
    }
}
