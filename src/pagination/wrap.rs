//! Greedy word wrapping.
//!
//! Words are never broken. A line grows one word at a time for as long as the
//! oracle says the whole line still fits; a word wider than the line on its
//! own is given a line to itself and reported as an overflow.

use crate::measure::{Font, MeasurementOracle};

/// Tolerance for floating point comparisons against line and page limits.
pub const EPSILON: f32 = 1e-3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wrapped {
    pub lines: Vec<String>,
    /// How far the widest over-long line reaches past the limit, if any.
    pub overflow: Option<f32>,
}

pub fn wrap<O: MeasurementOracle + ?Sized>(
    oracle: &O,
    text: &str,
    font: Font,
    size: f32,
    width: f32,
) -> Wrapped {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if oracle.measure(&candidate, font, size).width <= width + EPSILON {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let overflow = lines
        .iter()
        .map(|line| oracle.measure(line, font, size).width - width)
        .filter(|excess| *excess > EPSILON)
        .reduce(f32::max);

    Wrapped { lines, overflow }
}

/// Like [`wrap`], but always yields at least one (possibly empty) line so the
/// block keeps a line of height.
pub fn wrap_or_blank<O: MeasurementOracle + ?Sized>(
    oracle: &O,
    text: &str,
    font: Font,
    size: f32,
    width: f32,
) -> Wrapped {
    let mut wrapped = wrap(oracle, text, font, size, width);
    if wrapped.lines.is_empty() {
        wrapped.lines.push(String::new());
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{FontFamily, TypewriterOracle};

    fn font() -> Font {
        Font::regular(FontFamily::Helvetica)
    }

    #[test]
    fn can_wrap_three_ten_unit_words() {
        let oracle = TypewriterOracle::fixed(1.0, 10.0);
        let text = "aaaaaaaaaa bbbbbbbbbb cccccccccc";
        let wrapped = wrap(&oracle, text, font(), 12.0, 25.0);
        assert_eq!(
            wrapped.lines,
            vec!["aaaaaaaaaa bbbbbbbbbb".to_string(), "cccccccccc".to_string()]
        );
        assert_eq!(wrapped.overflow, None);
    }

    #[test]
    fn overlong_words_get_their_own_line() {
        let oracle = TypewriterOracle::fixed(1.0, 10.0);
        let wrapped = wrap(&oracle, "a supercalifragilistic b", font(), 12.0, 10.0);
        assert_eq!(
            wrapped.lines,
            vec![
                "a".to_string(),
                "supercalifragilistic".to_string(),
                "b".to_string()
            ]
        );
        assert_eq!(wrapped.overflow, Some(10.0));
    }

    #[test]
    fn rejoined_lines_reproduce_the_text() {
        let oracle = TypewriterOracle::fixed(1.0, 10.0);
        let text = "It was the best of times, it was the worst of times, it was the age of wisdom";
        let wrapped = wrap(&oracle, text, font(), 12.0, 17.0);
        assert!(wrapped.lines.len() > 1);
        assert_eq!(wrapped.lines.join(" "), text);
    }

    #[test]
    fn blank_text_keeps_one_line() {
        let oracle = TypewriterOracle::fixed(1.0, 10.0);
        assert!(wrap(&oracle, "   ", font(), 12.0, 10.0).lines.is_empty());
        assert_eq!(
            wrap_or_blank(&oracle, "", font(), 12.0, 10.0).lines,
            vec![String::new()]
        );
    }
}
