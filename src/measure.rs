//! Text measurement.
//!
//! The pagination engine never looks at glyphs itself; it asks a
//! [`MeasurementOracle`] how wide a run of text is and how tall a line of it
//! will be. Oracles must be deterministic and free of interior mutation so the
//! same document always paginates the same way, from any thread.
//!
//! Two implementations are provided:
//!
//! - [`TypewriterOracle`]: every character has the same advance. With fixed
//!   units this makes wrapping outcomes independent of real fonts (handy for
//!   tests); with em-relative units it is a passable approximation of the
//!   standard PDF fonts (and exact for Courier, whose advance is 0.6em).
//! - [`FontMetricsOracle`]: real advances from TrueType faces, e.g. a
//!   metric-compatible Helvetica clone, with a typewriter fallback for any
//!   family/weight without a loaded face.

use crate::error::FontLoadError;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times",
            FontFamily::Courier => "Courier",
        }
    }

    /// Option id used in style options and configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "helvetica",
            FontFamily::Times => "times",
            FontFamily::Courier => "courier",
        }
    }

    pub fn all() -> &'static [FontFamily] {
        &[FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier]
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A concrete face: family plus weight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Font {
    pub family: FontFamily,
    pub weight: FontWeight,
}

impl Font {
    pub fn regular(family: FontFamily) -> Font {
        Font {
            family,
            weight: FontWeight::Regular,
        }
    }

    pub fn bold(family: FontFamily) -> Font {
        Font {
            family,
            weight: FontWeight::Bold,
        }
    }
}

/// The size of a single run of text with no wrapping, in points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

pub trait MeasurementOracle {
    /// Measure `text` set in `font` at `size` points as one unbroken run.
    fn measure(&self, text: &str, font: Font, size: f32) -> Extent;
}

impl<T: MeasurementOracle + ?Sized> MeasurementOracle for &T {
    fn measure(&self, text: &str, font: Font, size: f32) -> Extent {
        (**self).measure(text, font, size)
    }
}

impl<T: MeasurementOracle + ?Sized> MeasurementOracle for Box<T> {
    fn measure(&self, text: &str, font: Font, size: f32) -> Extent {
        (**self).measure(text, font, size)
    }
}

/// Fixed-advance measurement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TypewriterOracle {
    advance: f32,
    line_height: f32,
    scale_with_size: bool,
}

impl TypewriterOracle {
    /// Every character is `advance` units wide and every run `line_height`
    /// units tall, whatever the font size.
    pub fn fixed(advance: f32, line_height: f32) -> TypewriterOracle {
        TypewriterOracle {
            advance,
            line_height,
            scale_with_size: false,
        }
    }

    /// Advance and line height are fractions of the font size.
    pub fn proportional(advance_em: f32, line_height_em: f32) -> TypewriterOracle {
        TypewriterOracle {
            advance: advance_em,
            line_height: line_height_em,
            scale_with_size: true,
        }
    }

    /// The approximation used for the standard PDF fonts when no metrics font
    /// is configured.
    pub fn standard_fonts() -> TypewriterOracle {
        TypewriterOracle::proportional(0.5, 1.2)
    }
}

impl MeasurementOracle for TypewriterOracle {
    fn measure(&self, text: &str, font: Font, size: f32) -> Extent {
        let scale = if self.scale_with_size { size } else { 1.0 };
        // courier really is a typewriter, so use its true advance
        let advance = if self.scale_with_size && font.family == FontFamily::Courier {
            0.6
        } else {
            self.advance
        };
        Extent {
            width: text.chars().count() as f32 * advance * scale,
            height: self.line_height * scale,
        }
    }
}

/// Measurement from TrueType glyph metrics.
pub struct FontMetricsOracle {
    faces: BTreeMap<Font, OwnedFace>,
    fallback: TypewriterOracle,
}

impl fmt::Debug for FontMetricsOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMetricsOracle")
            .field("faces", &self.faces.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Default for FontMetricsOracle {
    fn default() -> Self {
        FontMetricsOracle::new(TypewriterOracle::standard_fonts())
    }
}

impl FontMetricsOracle {
    pub fn new(fallback: TypewriterOracle) -> FontMetricsOracle {
        FontMetricsOracle {
            faces: BTreeMap::new(),
            fallback,
        }
    }

    /// Use the TrueType face in `data` to measure `font`.
    pub fn load(&mut self, font: Font, data: Vec<u8>) -> Result<&mut Self, FontLoadError> {
        let face =
            OwnedFace::from_vec(data, 0).map_err(|e| FontLoadError::Parse(e.to_string()))?;
        log::debug!("loaded metrics for {:?} {:?}", font.family, font.weight);
        self.faces.insert(font, face);
        Ok(self)
    }

    pub fn load_file<P: AsRef<Path>>(
        &mut self,
        font: Font,
        path: P,
    ) -> Result<&mut Self, FontLoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(font, data)
    }

    pub fn has_face(&self, font: Font) -> bool {
        self.faces.contains_key(&font)
    }
}

impl MeasurementOracle for FontMetricsOracle {
    fn measure(&self, text: &str, font: Font, size: f32) -> Extent {
        let Some(face) = self.faces.get(&font) else {
            return self.fallback.measure(text, font, size);
        };
        let face = face.as_face_ref();
        let units_per_em = face.units_per_em() as f32;
        let scaling = size / units_per_em;

        // glyphs missing from the face get half an em, roughly a lowercase letter
        let width: f32 = text
            .chars()
            .map(|c| {
                face.glyph_index(c)
                    .and_then(|g| face.glyph_hor_advance(g))
                    .map(f32::from)
                    .unwrap_or(units_per_em / 2.0)
            })
            .sum();
        let height = face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32;

        Extent {
            width: width * scaling,
            height: height * scaling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_measure_with_fixed_typewriter() {
        let oracle = TypewriterOracle::fixed(1.0, 10.0);
        let extent = oracle.measure("hello", Font::regular(FontFamily::Times), 72.0);
        assert_eq!(extent.width, 5.0);
        assert_eq!(extent.height, 10.0);
    }

    #[test]
    fn proportional_typewriter_scales_with_size() {
        let oracle = TypewriterOracle::proportional(0.5, 1.2);
        let extent = oracle.measure("abcd", Font::regular(FontFamily::Helvetica), 10.0);
        assert!((extent.width - 20.0).abs() < 1e-4);
        assert!((extent.height - 12.0).abs() < 1e-4);

        let extent = oracle.measure("abcd", Font::bold(FontFamily::Courier), 10.0);
        assert!((extent.width - 24.0).abs() < 1e-4);
    }

    #[test]
    fn metrics_oracle_falls_back_without_faces() {
        let oracle = FontMetricsOracle::new(TypewriterOracle::fixed(2.0, 7.0));
        let font = Font::regular(FontFamily::Helvetica);
        assert!(!oracle.has_face(font));
        assert_eq!(
            oracle.measure("abc", font, 12.0),
            Extent {
                width: 6.0,
                height: 7.0
            }
        );
    }

    #[test]
    fn metrics_oracle_rejects_garbage() {
        let mut oracle = FontMetricsOracle::default();
        let result = oracle.load(Font::regular(FontFamily::Times), vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(FontLoadError::Parse(_))));
    }
}
