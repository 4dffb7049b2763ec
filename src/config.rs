//! The `story-press.toml` configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use story_press::document::PageNumberStyle;
use story_press::measure::{Font, FontFamily, FontMetricsOracle, FontWeight};
use story_press::sinks::Format;
use story_press::style::StyleOptions;

pub const CONFIG_FILE: &str = "story-press.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub style: StyleOptions,
    #[serde(default)]
    pub output: Output,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub format: Format,
    /// Where artifacts are written.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default)]
    pub number_style: PageNumberStyle,
    /// TrueType faces to measure text with. Faces that aren't listed are
    /// approximated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricsFont>,
}

fn default_directory() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for Output {
    fn default() -> Self {
        Output {
            format: Format::default(),
            directory: default_directory(),
            number_style: PageNumberStyle::default(),
            metrics: Vec::new(),
        }
    }
}

/// A metrics font for one family and weight, e.g. a Helvetica-compatible
/// face used to measure text set in Helvetica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsFont {
    pub family: FontFamily,
    #[serde(default)]
    pub weight: FontWeight,
    pub path: PathBuf,
}

impl Configuration {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `path` if it exists, otherwise use the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let path = path.as_ref();
        if path.exists() {
            Configuration::load(path)
        } else {
            log::info!("{} not found, using default configuration", path.display());
            Ok(Configuration::default())
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Failed to convert configuration to TOML")
    }

    /// Build the measurement oracle, loading every configured metrics font.
    pub fn oracle(&self) -> Result<FontMetricsOracle> {
        let mut oracle = FontMetricsOracle::default();
        for metrics in self.output.metrics.iter() {
            let font = Font {
                family: metrics.family,
                weight: metrics.weight,
            };
            oracle
                .load_file(font, &metrics.path)
                .with_context(|| format!("Failed to load metrics font for {}", metrics.family))?;
        }
        Ok(oracle)
    }
}
