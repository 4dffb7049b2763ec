//! Fixed lookup tables behind the style options.
//!
//! Every option id maps to concrete values here. Templates only change data
//! (fonts, scales, colours); none of them change how pages are laid out.

use super::Rgb;
use crate::measure::FontFamily;

/// Per-template defaults and typographic scales.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Template {
    pub id: &'static str,
    pub font_family: FontFamily,
    pub color_scheme: &'static str,
    pub heading_scale: f32,
    pub title_scale: f32,
    pub background: Rgb,
    /// How far card fills are lightened towards white, 0..=1. `None` draws
    /// outlined cards with no fill.
    pub card_tint: Option<f32>,
    pub heading_rule: bool,
}

pub const DEFAULT_TEMPLATE: &str = "professional";

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "professional",
        font_family: FontFamily::Helvetica,
        color_scheme: "blue",
        heading_scale: 1.35,
        title_scale: 2.0,
        background: Rgb::WHITE,
        card_tint: Some(0.92),
        heading_rule: true,
    },
    Template {
        id: "creative",
        font_family: FontFamily::Times,
        color_scheme: "purple",
        heading_scale: 1.6,
        title_scale: 2.4,
        background: Rgb::new(253, 250, 243),
        card_tint: Some(0.85),
        heading_rule: false,
    },
    Template {
        id: "minimal",
        font_family: FontFamily::Helvetica,
        color_scheme: "slate",
        heading_scale: 1.2,
        title_scale: 1.75,
        background: Rgb::WHITE,
        card_tint: None,
        heading_rule: false,
    },
];

/// Primary colour per scheme.
pub const COLOR_SCHEMES: &[(&str, Rgb)] = &[
    ("blue", Rgb::new(30, 64, 175)),
    ("green", Rgb::new(21, 128, 61)),
    ("purple", Rgb::new(109, 40, 217)),
    ("red", Rgb::new(185, 28, 28)),
    ("teal", Rgb::new(15, 118, 110)),
    ("slate", Rgb::new(51, 65, 85)),
];

pub const FONT_FAMILIES: &[(&str, FontFamily)] = &[
    ("helvetica", FontFamily::Helvetica),
    ("sans", FontFamily::Helvetica),
    ("times", FontFamily::Times),
    ("serif", FontFamily::Times),
    ("courier", FontFamily::Courier),
    ("mono", FontFamily::Courier),
];

/// Body text size in points.
pub const DEFAULT_FONT_SIZE: &str = "medium";
pub const FONT_SIZES: &[(&str, f32)] = &[
    ("small", 10.0),
    ("medium", 12.0),
    ("large", 14.0),
    ("x-large", 16.0),
];

/// Page width and height in points.
pub const DEFAULT_PAGE_SIZE: &str = "a4";
pub const CUSTOM_PAGE_SIZE: &str = "custom";
pub const PAGE_SIZES: &[(&str, (f32, f32))] = &[
    ("a4", (595.28, 841.89)),
    ("a5", (419.53, 595.28)),
    ("letter", (612.0, 792.0)),
    ("legal", (612.0, 1008.0)),
];

pub const DEFAULT_LINE_SPACING: &str = "normal";
pub const LINE_SPACINGS: &[(&str, f32)] = &[
    ("compact", 1.0),
    ("normal", 1.2),
    ("relaxed", 1.5),
    ("double", 2.0),
];

/// Margin on every edge, in points.
pub const DEFAULT_MARGIN_SIZE: &str = "normal";
pub const MARGIN_SIZES: &[(&str, f32)] = &[("narrow", 36.0), ("normal", 54.0), ("wide", 90.0)];

/// Case-insensitive lookup of `id` in a table.
pub fn lookup<T: Copy>(table: &[(&'static str, T)], id: &str) -> Option<T> {
    let id = id.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(id))
        .map(|(_, value)| *value)
}

pub fn template(id: &str) -> Option<&'static Template> {
    let id = id.trim();
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

/// The ids of a table, for prompts and help text.
pub fn ids<T>(table: &[(&'static str, T)]) -> Vec<&'static str> {
    table.iter().map(|(key, _)| *key).collect()
}
