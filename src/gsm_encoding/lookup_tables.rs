//! The GSM 03.38 character tables.
//!
//! Forward tables are indexed (or listed) by GSM code; the reverse maps used when encoding are
//! built from them once, on first use.
use std::collections::HashMap;
use once_cell::sync::Lazy;

/// Code that introduces a character from the extension table.
pub const ESCAPE: u8 = 0x1B;
/// Code emitted for unrepresentable characters under the `replace` policy.
pub const QUESTION_MARK: u8 = 0x3F;
/// Character produced when decoding an escape that doesn't introduce a known extension
/// character (or any other byte that has no mapping).
pub const FALLBACK_CHAR: char = '\u{00A0}';

/// The basic table, indexed by GSM code.
///
/// Slot 0x1B is the escape code and never decodes to itself; it holds the fallback character.
pub static GSM_BASIC_CHARSET: [char; 128] = [
    '@', '\u{00A3}', '$', '\u{00A5}', 'è', 'é', 'ù', 'ì',
    'ò', '\u{00C7}', '\n', '\u{00D8}', '\u{00F8}', '\r', '\u{00C5}', '\u{00E5}',
    '\u{0394}', '_', '\u{03A6}', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ',
    'Σ', 'Θ', 'Ξ', FALLBACK_CHAR, 'Æ', 'æ', 'ß', 'É',
    ' ', '!', '"', '#', '¤', '%', '&', '\'',
    '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7',
    '8', '9', ':', ';', '<', '=', '>', '?',
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
    'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
    'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
    'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
    'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];
/// The extension table: second byte of an escape pair, and the character it stands for.
pub static GSM_EXTENDED_CHARSET: [(u8, char); 10] = [
    (0x0A, '\u{000C}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '\u{20AC}'),
];
/// Lossy substitutes used by the `replace` policy: look-alike characters mapped onto a basic
/// table code.
pub static GSM_REPLACE_CHARSET: [(char, u8); 15] = [
    ('\u{00E7}', 0x09),
    ('\u{0391}', 0x41),
    ('\u{0392}', 0x42),
    ('\u{0395}', 0x45),
    ('\u{0397}', 0x48),
    ('\u{0399}', 0x49),
    ('\u{039A}', 0x4B),
    ('\u{039C}', 0x4D),
    ('\u{039D}', 0x4E),
    ('\u{039F}', 0x4F),
    ('\u{03A1}', 0x50),
    ('\u{03A4}', 0x54),
    ('\u{03A7}', 0x58),
    ('\u{03A5}', 0x59),
    ('\u{0396}', 0x5A),
];

pub(crate) static ENCODING_MAP: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    GSM_BASIC_CHARSET.iter()
        .enumerate()
        .filter(|&(code, _)| code as u8 != ESCAPE)
        .map(|(code, &ch)| (ch, code as u8))
        .collect()
});
pub(crate) static EXT_ENCODING_MAP: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    GSM_EXTENDED_CHARSET.iter()
        .map(|&(code, ch)| (ch, code))
        .collect()
});
pub(crate) static EXT_DECODING_MAP: Lazy<HashMap<u8, char>> = Lazy::new(|| {
    GSM_EXTENDED_CHARSET.iter().cloned().collect()
});
pub(crate) static REPLACE_ENCODING_MAP: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    GSM_REPLACE_CHARSET.iter().cloned().collect()
});

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn reverse_maps_cover_tables() {
        assert_eq!(ENCODING_MAP.len(), 127);
        assert_eq!(EXT_ENCODING_MAP.len(), GSM_EXTENDED_CHARSET.len());
        assert_eq!(ENCODING_MAP.get(&FALLBACK_CHAR), None);
        for (code, &ch) in GSM_BASIC_CHARSET.iter().enumerate() {
            if code as u8 != ESCAPE {
                assert_eq!(ENCODING_MAP[&ch], code as u8);
            }
        }
    }
    #[test]
    fn tables_are_disjoint() {
        for &(_, ch) in GSM_EXTENDED_CHARSET.iter() {
            assert!(!ENCODING_MAP.contains_key(&ch), "{:?} in both tables", ch);
        }
        for &(ch, code) in GSM_REPLACE_CHARSET.iter() {
            assert!(!ENCODING_MAP.contains_key(&ch));
            assert!(code < 0x80);
        }
    }
}
