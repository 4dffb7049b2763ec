//! Interactive configuration wizard for creating `story-press.toml`.
//!
//! Walks through the style choices of the export dialog (template, colours,
//! fonts, page size, spacing) and the output options, then writes the file to
//! the current directory.

use crate::config::{Configuration, Output, CONFIG_FILE};
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use std::path::PathBuf;
use story_press::document::PageNumberStyle;
use story_press::measure::FontFamily;
use story_press::sinks::Format;
use story_press::style::{tables, StyleOptions};

const TEMPLATE_DEFAULT: &str = "(template default)";

/// Pick one id from `ids`, starting on `default`.
fn select(theme: &ColorfulTheme, prompt: &str, ids: &[&str], default: &str) -> Result<String> {
    let default_idx = ids.iter().position(|id| *id == default).unwrap_or(0);
    let selection = FuzzySelect::with_theme(theme)
        .with_prompt(prompt)
        .items(ids)
        .default(default_idx)
        .interact()
        .with_context(|| format!("Failed to obtain {}", prompt.to_lowercase()))?;
    Ok(ids[selection].to_string())
}

/// Like [`select`], with a leading entry that defers to the template.
fn select_or_template(theme: &ColorfulTheme, prompt: &str, ids: &[&str]) -> Result<String> {
    let mut items = vec![TEMPLATE_DEFAULT];
    items.extend_from_slice(ids);
    let choice = select(theme, prompt, &items, TEMPLATE_DEFAULT)?;
    Ok(if choice == TEMPLATE_DEFAULT {
        String::new()
    } else {
        choice
    })
}

/// Run the interactive configuration wizard.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };

    let template_ids: Vec<&str> = tables::TEMPLATES.iter().map(|t| t.id).collect();
    let template = select(&theme, "Template", &template_ids, tables::DEFAULT_TEMPLATE)?;
    let color_scheme =
        select_or_template(&theme, "Colour scheme", &tables::ids(tables::COLOR_SCHEMES))?;
    let font_ids: Vec<&str> = FontFamily::all().iter().map(FontFamily::id).collect();
    let font_family = select_or_template(&theme, "Font family", &font_ids)?;
    let font_size = select(
        &theme,
        "Font size",
        &tables::ids(tables::FONT_SIZES),
        tables::DEFAULT_FONT_SIZE,
    )?;

    let mut page_sizes = tables::ids(tables::PAGE_SIZES);
    page_sizes.push(tables::CUSTOM_PAGE_SIZE);
    let page_size = select(&theme, "Page size", &page_sizes, tables::DEFAULT_PAGE_SIZE)?;
    let (page_width, page_height) = if page_size == tables::CUSTOM_PAGE_SIZE {
        let positive = |input: &f32| {
            if *input > 0.0 {
                Ok(())
            } else {
                Err("Must be greater than zero")
            }
        };
        let width: f32 = Input::with_theme(&theme)
            .with_prompt("Page width in points")
            .default(595.28)
            .validate_with(positive)
            .interact()?;
        let height: f32 = Input::with_theme(&theme)
            .with_prompt("Page height in points")
            .default(841.89)
            .validate_with(positive)
            .interact()?;
        (Some(width), Some(height))
    } else {
        (None, None)
    };

    let line_spacing = select(
        &theme,
        "Line spacing",
        &tables::ids(tables::LINE_SPACINGS),
        tables::DEFAULT_LINE_SPACING,
    )?;
    let margin_size = select(
        &theme,
        "Margins",
        &tables::ids(tables::MARGIN_SIZES),
        tables::DEFAULT_MARGIN_SIZE,
    )?;

    let style = StyleOptions {
        template,
        color_scheme,
        font_family,
        font_size,
        page_size,
        line_spacing,
        margin_size,
        page_width,
        page_height,
    };
    // catch impossible geometry now rather than on first render
    story_press::style::resolve(&style).with_context(|| "Invalid page settings")?;

    let format = FuzzySelect::with_theme(&theme)
        .with_prompt("Output format")
        .items(&["pdf", "text"])
        .default(0)
        .interact()?;
    let format = [Format::Pdf, Format::Text][format];

    let directory: String = Input::with_theme(&theme)
        .with_prompt("Output directory")
        .default("exports".to_string())
        .interact()
        .with_context(|| "Failed to obtain output directory")?;

    let number_style = FuzzySelect::with_theme(&theme)
        .with_prompt("Page numbers")
        .items(&["1, 2, 3", "i, ii, iii", "I, II, III"])
        .default(0)
        .interact()?;
    let number_style = [
        PageNumberStyle::Arabic,
        PageNumberStyle::RomanLower,
        PageNumberStyle::RomanUpper,
    ][number_style];

    let config = Configuration {
        style,
        output: Output {
            format,
            directory: PathBuf::from(directory),
            number_style,
            ..Output::default()
        },
    };
    let config = config.to_toml()?;

    let config_path = PathBuf::from(CONFIG_FILE);
    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{CONFIG_FILE} already exists, do you want to override it?"
            ))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", config);
    } else {
        std::fs::write(&config_path, config)
            .with_context(|| "Failed to write configuration file")?;
        println!("{CONFIG_FILE} written!");
    }

    Ok(())
}
