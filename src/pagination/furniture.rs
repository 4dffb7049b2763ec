//! Running headers and footers.
//!
//! Templates support placeholders:
//! - `{title}` - document title
//! - `{page}` - page ordinal (formatted per the number style)
//! - `{pages}` - total page count
//! - `{label}` - running label of the section the page starts in
//!
//! Pages that start inside a labelled section use the `labelled_footer`
//! template when one is supplied, e.g. `Chapter {label} • Page {page}`.

use super::Page;
use crate::document::{Furniture, PageNumberStyle};

/// Convert a number to Roman numerals.
fn to_roman(mut n: usize) -> String {
    if n == 0 {
        return n.to_string();
    }

    let numerals = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut result = String::new();
    for (value, numeral) in numerals {
        while n >= value {
            result.push_str(numeral);
            n -= value;
        }
    }
    result
}

/// Format a page number according to the specified style.
pub fn format_page_number(n: usize, style: PageNumberStyle) -> String {
    match style {
        PageNumberStyle::Arabic => n.to_string(),
        PageNumberStyle::RomanLower => to_roman(n),
        PageNumberStyle::RomanUpper => to_roman(n).to_uppercase(),
    }
}

fn expand_template(
    template: &str,
    title: &str,
    ordinal: usize,
    total: usize,
    label: Option<&str>,
    style: PageNumberStyle,
) -> String {
    template
        .replace("{title}", title)
        .replace("{page}", &format_page_number(ordinal, style))
        .replace("{pages}", &format_page_number(total, style))
        .replace("{label}", label.unwrap_or(""))
        .trim()
        .to_string()
}

/// Fill in the header and footer text of every page.
///
/// Must run after layout, when the total page count is known.
pub fn apply(pages: &mut [Page], title: &str, furniture: &Furniture) {
    let total = pages.len();
    for page in pages.iter_mut() {
        let label = page.label.as_deref();
        let footer = match (&furniture.labelled_footer, label) {
            (Some(template), Some(_)) => template,
            _ => &furniture.footer,
        };
        page.header_text = expand_template(
            &furniture.header,
            title,
            page.ordinal,
            total,
            label,
            furniture.number_style,
        );
        page.footer_text = expand_template(
            footer,
            title,
            page.ordinal,
            total,
            label,
            furniture.number_style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_convert_to_roman_numerals() {
        assert_eq!(to_roman(1), "i");
        assert_eq!(to_roman(4), "iv");
        assert_eq!(to_roman(9), "ix");
        assert_eq!(to_roman(14), "xiv");
        assert_eq!(to_roman(42), "xlii");
        assert_eq!(to_roman(99), "xcix");
        assert_eq!(to_roman(1984), "mcmlxxxiv");
    }

    #[test]
    fn can_format_page_numbers() {
        assert_eq!(format_page_number(42, PageNumberStyle::Arabic), "42");
        assert_eq!(format_page_number(42, PageNumberStyle::RomanLower), "xlii");
        assert_eq!(format_page_number(42, PageNumberStyle::RomanUpper), "XLII");
    }

    #[test]
    fn can_expand_template() {
        let result = expand_template(
            "{title} - Page {page} of {pages}",
            "The Salt Road",
            5,
            100,
            None,
            PageNumberStyle::Arabic,
        );
        assert_eq!(result, "The Salt Road - Page 5 of 100");
    }

    #[test]
    fn labelled_pages_use_the_labelled_footer() {
        let furniture = Furniture {
            labelled_footer: Some("Chapter {label} • Page {page}".to_string()),
            ..Furniture::default()
        };
        let mut pages = vec![Page::new(1, None), Page::new(2, Some("1".to_string()))];
        apply(&mut pages, "The Salt Road", &furniture);

        assert_eq!(pages[0].header_text, "The Salt Road");
        assert_eq!(pages[0].footer_text, "Page 1");
        assert_eq!(pages[1].footer_text, "Chapter 1 • Page 2");
    }
}
