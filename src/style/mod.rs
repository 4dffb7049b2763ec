//! Style resolution.
//!
//! Turns the option ids chosen in the export dialog (template, colour scheme,
//! font, sizes, spacing, margins) into a concrete [`StyleSheet`] and
//! [`PageGeometry`]. Unknown cosmetic ids fall back to their defaults with a
//! warning; only unresolvable page geometry is an error.

pub mod tables;

use crate::error::StyleResolutionError;
use crate::measure::FontFamily;
use serde::{Deserialize, Serialize};
use tables::Template;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Blend towards white; `amount` 0 keeps the colour, 1 gives white.
    pub fn tint(self, amount: f32) -> Rgb {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round() as u8;
        Rgb::new(mix(self.r), mix(self.g), mix(self.b))
    }

    pub fn to_f32(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// Page margins in points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(size: f32) -> Margins {
        Margins {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }
}

/// Concrete typographic values for one export.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSheet {
    pub template: &'static str,
    pub font_family: FontFamily,
    pub body_size: f32,
    pub heading_size: f32,
    pub title_size: f32,
    /// Multiplier applied to the measured line height.
    pub line_spacing: f32,
    /// Vertical gap before every block that is not first on its page.
    pub paragraph_spacing: f32,
    pub card_padding: f32,
    /// Share of the content width given to field labels.
    pub field_label_ratio: f32,
    pub primary_color: Rgb,
    pub text_color: Rgb,
    pub muted_color: Rgb,
    pub background_color: Rgb,
    pub card_fill: Option<Rgb>,
    pub heading_rule: bool,
    pub margins: Margins,
}

impl StyleSheet {
    fn from_template(
        template: &'static Template,
        font_family: FontFamily,
        body_size: f32,
        line_spacing: f32,
        primary_color: Rgb,
        margins: Margins,
    ) -> StyleSheet {
        StyleSheet {
            template: template.id,
            font_family,
            body_size,
            heading_size: (body_size * template.heading_scale).round(),
            title_size: (body_size * template.title_scale).round(),
            line_spacing,
            paragraph_spacing: (body_size * 0.6).round(),
            card_padding: (body_size * 0.5).round(),
            field_label_ratio: 0.3,
            primary_color,
            text_color: Rgb::new(33, 33, 33),
            muted_color: Rgb::new(107, 114, 128),
            background_color: template.background,
            card_fill: template.card_tint.map(|t| primary_color.tint(t)),
            heading_rule: template.heading_rule,
            margins,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        resolve(&StyleOptions::default())
            .map(|(style, _)| style)
            .expect("default style options resolve")
    }
}

/// Physical page size and margins, in points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32, margins: Margins) -> PageGeometry {
        PageGeometry {
            width,
            height,
            margin_top: margins.top,
            margin_bottom: margins.bottom,
            margin_left: margins.left,
            margin_right: margins.right,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// The lowest offset from the top edge that content may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

/// The style choices made in the export dialog, by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleOptions {
    #[serde(default = "default_template")]
    pub template: String,
    /// Empty means "the template's scheme".
    #[serde(default)]
    pub color_scheme: String,
    /// Empty means "the template's font".
    #[serde(default)]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: String,
    #[serde(default = "default_page_size")]
    pub page_size: String,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: String,
    #[serde(default = "default_margin_size")]
    pub margin_size: String,
    /// Page width in points, for the `custom` page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_width: Option<f32>,
    /// Page height in points, for the `custom` page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f32>,
}

fn default_template() -> String {
    tables::DEFAULT_TEMPLATE.to_string()
}
fn default_font_size() -> String {
    tables::DEFAULT_FONT_SIZE.to_string()
}
fn default_page_size() -> String {
    tables::DEFAULT_PAGE_SIZE.to_string()
}
fn default_line_spacing() -> String {
    tables::DEFAULT_LINE_SPACING.to_string()
}
fn default_margin_size() -> String {
    tables::DEFAULT_MARGIN_SIZE.to_string()
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions {
            template: default_template(),
            color_scheme: String::new(),
            font_family: String::new(),
            font_size: default_font_size(),
            page_size: default_page_size(),
            line_spacing: default_line_spacing(),
            margin_size: default_margin_size(),
            page_width: None,
            page_height: None,
        }
    }
}

/// Look up `id`, falling back to `default` (which must be in the table).
fn lookup_or_default<T: Copy>(
    table: &[(&'static str, T)],
    option: &str,
    id: &str,
    default: &str,
) -> T {
    if id.trim().is_empty() {
        return tables::lookup(table, default).unwrap_or(table[0].1);
    }
    tables::lookup(table, id).unwrap_or_else(|| {
        log::warn!("unknown {option} `{id}`, using `{default}`");
        tables::lookup(table, default).unwrap_or(table[0].1)
    })
}

/// Resolve style options into a style sheet and page geometry.
pub fn resolve(
    options: &StyleOptions,
) -> Result<(StyleSheet, PageGeometry), StyleResolutionError> {
    let template = tables::template(&options.template).unwrap_or_else(|| {
        log::warn!(
            "unknown template `{}`, using `{}`",
            options.template,
            tables::DEFAULT_TEMPLATE
        );
        &tables::TEMPLATES[0]
    });

    let primary_color = lookup_or_default(
        tables::COLOR_SCHEMES,
        "colour scheme",
        &options.color_scheme,
        template.color_scheme,
    );
    let font_family = lookup_or_default(
        tables::FONT_FAMILIES,
        "font family",
        &options.font_family,
        template.font_family.id(),
    );
    let body_size = lookup_or_default(
        tables::FONT_SIZES,
        "font size",
        &options.font_size,
        tables::DEFAULT_FONT_SIZE,
    );
    let line_spacing = lookup_or_default(
        tables::LINE_SPACINGS,
        "line spacing",
        &options.line_spacing,
        tables::DEFAULT_LINE_SPACING,
    );
    let margin = lookup_or_default(
        tables::MARGIN_SIZES,
        "margin size",
        &options.margin_size,
        tables::DEFAULT_MARGIN_SIZE,
    );

    let (width, height) = if options
        .page_size
        .trim()
        .eq_ignore_ascii_case(tables::CUSTOM_PAGE_SIZE)
    {
        match (options.page_width, options.page_height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => (w, h),
            _ => return Err(StyleResolutionError::MissingCustomDimensions),
        }
    } else {
        lookup_or_default(
            tables::PAGE_SIZES,
            "page size",
            &options.page_size,
            tables::DEFAULT_PAGE_SIZE,
        )
    };

    let margins = Margins::all(margin);
    let geometry = PageGeometry::new(width, height, margins);
    if geometry.content_width() <= 0.0 || geometry.content_height() <= 0.0 {
        return Err(StyleResolutionError::NoContentArea { width, height });
    }

    let style = StyleSheet::from_template(
        template,
        font_family,
        body_size,
        line_spacing,
        primary_color,
        margins,
    );
    log::debug!(
        "resolved style: {} {} {}pt on {}x{}pt",
        style.template,
        style.font_family,
        style.body_size,
        width,
        height
    );
    Ok((style, geometry))
}
