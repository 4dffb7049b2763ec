//! The standard PDF fonts and their single-byte text encoding.
//!
//! The PDF sink never embeds fonts: every family maps onto one of the
//! standard 14 Type 1 fonts that every viewer ships, set in WinAnsiEncoding.

use crate::measure::{Font, FontFamily, FontWeight};
use pdf_writer::Name;

/// Resource names the page content streams refer to.
pub const REGULAR: Name<'static> = Name(b"R");
pub const BOLD: Name<'static> = Name(b"B");

/// The PostScript name of the standard font for `font`.
pub fn base_font(font: Font) -> &'static [u8] {
    match (font.family, font.weight) {
        (FontFamily::Helvetica, FontWeight::Regular) => b"Helvetica",
        (FontFamily::Helvetica, FontWeight::Bold) => b"Helvetica-Bold",
        (FontFamily::Times, FontWeight::Regular) => b"Times-Roman",
        (FontFamily::Times, FontWeight::Bold) => b"Times-Bold",
        (FontFamily::Courier, FontWeight::Regular) => b"Courier",
        (FontFamily::Courier, FontWeight::Bold) => b"Courier-Bold",
    }
}

pub fn resource_name(font: Font) -> Name<'static> {
    match font.weight {
        FontWeight::Regular => REGULAR,
        FontWeight::Bold => BOLD,
    }
}

/// WinAnsiEncoding positions 0x80..=0x9f that differ from Latin-1.
const WIN_ANSI_HIGH: &[(char, u8)] = &[
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8a),
    ('‹', 0x8b),
    ('Œ', 0x8c),
    ('Ž', 0x8e),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9a),
    ('›', 0x9b),
    ('œ', 0x9c),
    ('ž', 0x9e),
    ('Ÿ', 0x9f),
];

/// Encode text for a standard font. Characters outside WinAnsiEncoding
/// become `?`, except arrows which are spelled out.
pub fn encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => bytes.push(c as u8),
            '\u{a0}'..='\u{ff}' => bytes.push(c as u32 as u8),
            '→' => bytes.extend_from_slice(b"->"),
            '←' => bytes.extend_from_slice(b"<-"),
            '\t' => bytes.push(b' '),
            c => match WIN_ANSI_HIGH.iter().find(|(k, _)| *k == c) {
                Some((_, b)) => bytes.push(*b),
                None => bytes.push(b'?'),
            },
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_encode_win_ansi() {
        assert_eq!(encode("Page 1"), b"Page 1".to_vec());
        assert_eq!(encode("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode("Chapter 1 • Page 2"), b"Chapter 1 \x95 Page 2".to_vec());
        assert_eq!(encode("a → b"), b"a -> b".to_vec());
        assert_eq!(encode("雪"), b"?".to_vec());
    }

    #[test]
    fn every_face_has_a_standard_font() {
        for family in FontFamily::all() {
            assert!(!base_font(Font::regular(*family)).is_empty());
            assert_ne!(base_font(Font::regular(*family)), base_font(Font::bold(*family)));
        }
    }
}
