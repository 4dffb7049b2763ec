//! The export pipeline.
//!
//! Every export runs the same four stages: build the content model, resolve
//! the style, paginate, render. The first stage to fail aborts the export and
//! no artifact is produced.

use crate::content;
use crate::document::{Document, PageNumberStyle};
use crate::domain::{Character, Relationship, Story};
use crate::error::{ExportError, PaginationOverflowWarning};
use crate::measure::MeasurementOracle;
use crate::pagination::paginate;
use crate::sinks::{Render, Sink};
use crate::style::{self, StyleOptions};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExportKind {
    CharacterProfile,
    CharacterRoster,
    StoryManuscript,
    RelationshipNetwork,
}

impl ExportKind {
    pub fn all() -> &'static [ExportKind] {
        &[
            ExportKind::CharacterProfile,
            ExportKind::CharacterRoster,
            ExportKind::StoryManuscript,
            ExportKind::RelationshipNetwork,
        ]
    }

    /// Appended to the sanitised display name to form the file name.
    pub fn suffix(&self) -> &'static str {
        match self {
            ExportKind::CharacterProfile => "_profile",
            ExportKind::CharacterRoster => "_roster",
            ExportKind::StoryManuscript => "_manuscript",
            ExportKind::RelationshipNetwork => "_network",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportKind::CharacterProfile => "character profile",
            ExportKind::CharacterRoster => "character roster",
            ExportKind::StoryManuscript => "story manuscript",
            ExportKind::RelationshipNetwork => "relationship network",
        };
        write!(f, "{name}")
    }
}

/// The domain data one export needs, borrowed from the caller's snapshot.
#[derive(Copy, Clone, Debug)]
pub enum ExportRequest<'a> {
    CharacterProfile {
        character: Option<&'a Character>,
        relationships: &'a [Relationship],
        cast: &'a [Character],
    },
    CharacterRoster {
        characters: &'a [Character],
    },
    StoryManuscript {
        story: Option<&'a Story>,
        cast: &'a [Character],
    },
    RelationshipNetwork {
        characters: &'a [Character],
        relationships: &'a [Relationship],
    },
}

impl ExportRequest<'_> {
    pub fn kind(&self) -> ExportKind {
        match self {
            ExportRequest::CharacterProfile { .. } => ExportKind::CharacterProfile,
            ExportRequest::CharacterRoster { .. } => ExportKind::CharacterRoster,
            ExportRequest::StoryManuscript { .. } => ExportKind::StoryManuscript,
            ExportRequest::RelationshipNetwork { .. } => ExportKind::RelationshipNetwork,
        }
    }
}

/// A finished export, ready to be handed to the artifact sink.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub page_count: usize,
    pub warnings: Vec<PaginationOverflowWarning>,
}

/// Turn a display name into a file name stem: runs of anything but letters
/// and digits become a single `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let out = out.trim_matches('_');
    if out.is_empty() {
        "untitled".to_string()
    } else {
        out.to_string()
    }
}

/// Runs exports with one measurement oracle and one output format.
///
/// Holds no mutable state, so a single exporter can serve concurrent exports.
#[derive(Debug)]
pub struct Exporter<O> {
    oracle: O,
    sink: Sink,
    number_style: PageNumberStyle,
}

impl<O: MeasurementOracle> Exporter<O> {
    pub fn new(oracle: O, sink: Sink) -> Exporter<O> {
        Exporter {
            oracle,
            sink,
            number_style: PageNumberStyle::default(),
        }
    }

    pub fn with_number_style(mut self, number_style: PageNumberStyle) -> Exporter<O> {
        self.number_style = number_style;
        self
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn character_profile(
        &self,
        character: Option<&Character>,
        relationships: &[Relationship],
        cast: &[Character],
        options: &StyleOptions,
    ) -> Result<Artifact, ExportError> {
        let kind = ExportKind::CharacterProfile;
        let doc = content::character_profile(character, relationships, cast)
            .map_err(|e| ExportError::new(kind, e))?;
        let name = doc.title.clone();
        self.finish(kind, doc, &name, options)
    }

    pub fn character_roster(
        &self,
        characters: &[Character],
        options: &StyleOptions,
    ) -> Result<Artifact, ExportError> {
        let kind = ExportKind::CharacterRoster;
        let doc = content::character_roster(characters).map_err(|e| ExportError::new(kind, e))?;
        let name = doc.title.clone();
        self.finish(kind, doc, &name, options)
    }

    pub fn story_manuscript(
        &self,
        story: Option<&Story>,
        cast: &[Character],
        options: &StyleOptions,
    ) -> Result<Artifact, ExportError> {
        let kind = ExportKind::StoryManuscript;
        let doc = content::story_manuscript(story, cast).map_err(|e| ExportError::new(kind, e))?;
        let name = doc.title.clone();
        self.finish(kind, doc, &name, options)
    }

    pub fn relationship_network(
        &self,
        characters: &[Character],
        relationships: &[Relationship],
        options: &StyleOptions,
    ) -> Result<Artifact, ExportError> {
        let kind = ExportKind::RelationshipNetwork;
        let doc = content::relationship_network(characters, relationships);
        let name = doc.title.clone();
        self.finish(kind, doc, &name, options)
    }

    pub fn export(
        &self,
        request: ExportRequest<'_>,
        options: &StyleOptions,
    ) -> Result<Artifact, ExportError> {
        match request {
            ExportRequest::CharacterProfile {
                character,
                relationships,
                cast,
            } => self.character_profile(character, relationships, cast, options),
            ExportRequest::CharacterRoster { characters } => {
                self.character_roster(characters, options)
            }
            ExportRequest::StoryManuscript { story, cast } => {
                self.story_manuscript(story, cast, options)
            }
            ExportRequest::RelationshipNetwork {
                characters,
                relationships,
            } => self.relationship_network(characters, relationships, options),
        }
    }

    fn finish(
        &self,
        kind: ExportKind,
        mut doc: Document,
        display_name: &str,
        options: &StyleOptions,
    ) -> Result<Artifact, ExportError> {
        doc.furniture.number_style = self.number_style;

        let (style, geometry) = style::resolve(options).map_err(|e| ExportError::new(kind, e))?;
        let pagination = paginate(&doc, &style, &geometry, &self.oracle);
        let bytes = self
            .sink
            .render(&doc.title, &pagination.pages, &style, &geometry)
            .map_err(|e| ExportError::new(kind, e))?;

        let file_name = format!(
            "{}{}.{}",
            sanitize_file_name(display_name),
            kind.suffix(),
            self.sink.extension()
        );
        log::info!(
            "exported {kind} `{file_name}`: {} pages, {} warnings",
            pagination.pages.len(),
            pagination.warnings.len()
        );
        Ok(Artifact {
            bytes,
            file_name,
            page_count: pagination.pages.len(),
            warnings: pagination.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CharacterBuilder, ChapterBuilder, RelationshipBuilder, StoryBuilder};
    use crate::error::{ExportCause, StyleResolutionError};
    use crate::measure::TypewriterOracle;
    use crate::sinks::Format;

    fn exporter(format: Format) -> Exporter<TypewriterOracle> {
        Exporter::new(TypewriterOracle::standard_fonts(), Sink::from(format))
    }

    fn mara() -> Character {
        CharacterBuilder::default()
            .id("c1")
            .name("Mara Vell")
            .background("Raised on the salt flats.")
            .build()
            .expect("can build character")
    }

    #[test]
    fn can_sanitize_file_names() {
        assert_eq!(sanitize_file_name("Mara Vell"), "Mara_Vell");
        assert_eq!(sanitize_file_name("  The Salt-Road!! "), "The_Salt_Road");
        assert_eq!(sanitize_file_name("Zoë"), "Zoë");
        assert_eq!(sanitize_file_name("???"), "untitled");
    }

    #[test]
    fn can_export_profile() {
        let mara = mara();
        let artifact = exporter(Format::Pdf)
            .character_profile(Some(&mara), &[], &[], &StyleOptions::default())
            .expect("can export profile");
        assert_eq!(artifact.file_name, "Mara_Vell_profile.pdf");
        assert_eq!(artifact.page_count, 1);
        assert!(artifact.bytes.starts_with(b"%PDF-"));
        assert!(artifact.warnings.is_empty());
    }

    #[test]
    fn can_export_every_kind_as_text() {
        let cast = vec![mara()];
        let relationships = vec![RelationshipBuilder::default()
            .from("c1")
            .to("c2")
            .kind("rival")
            .build()
            .expect("can build relationship")];
        let story = StoryBuilder::default()
            .id("s1")
            .title("The Salt Road")
            .chapter(
                ChapterBuilder::default()
                    .title("Tides")
                    .content("The road shifted.")
                    .build()
                    .expect("can build chapter"),
            )
            .build()
            .expect("can build story");

        let exporter = exporter(Format::Text);
        let options = StyleOptions::default();
        let requests = [
            ExportRequest::CharacterProfile {
                character: cast.first(),
                relationships: &relationships,
                cast: &cast,
            },
            ExportRequest::CharacterRoster { characters: &cast },
            ExportRequest::StoryManuscript {
                story: Some(&story),
                cast: &cast,
            },
            ExportRequest::RelationshipNetwork {
                characters: &cast,
                relationships: &relationships,
            },
        ];
        let names: Vec<String> = requests
            .iter()
            .map(|r| {
                exporter
                    .export(*r, &options)
                    .expect("can export")
                    .file_name
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "Mara_Vell_profile.txt",
                "Character_Profiles_roster.txt",
                "The_Salt_Road_manuscript.txt",
                "Relationship_Network_network.txt",
            ]
        );
    }

    #[test]
    fn missing_story_fails_the_export() {
        let err = exporter(Format::Pdf)
            .story_manuscript(None, &[], &StyleOptions::default())
            .expect_err("export fails");
        assert_eq!(err.kind, ExportKind::StoryManuscript);
        assert!(matches!(err.cause, ExportCause::MissingRequiredData(_)));
    }

    #[test]
    fn bad_geometry_fails_the_export() {
        let options = StyleOptions {
            page_size: "custom".to_string(),
            ..StyleOptions::default()
        };
        let err = exporter(Format::Pdf)
            .relationship_network(&[], &[], &options)
            .expect_err("export fails");
        assert_eq!(err.kind, ExportKind::RelationshipNetwork);
        assert!(matches!(
            err.cause,
            ExportCause::StyleResolution(StyleResolutionError::MissingCustomDimensions)
        ));
    }

    #[test]
    fn roman_page_numbers_reach_the_footer() {
        let exporter = exporter(Format::Text).with_number_style(PageNumberStyle::RomanUpper);
        let artifact = exporter
            .relationship_network(&[], &[], &StyleOptions::default())
            .expect("can export");
        let text = String::from_utf8(artifact.bytes).expect("text is utf-8");
        assert!(text.ends_with("Page I\n"));
    }

    #[test]
    fn can_export_concurrently() {
        let exporter = exporter(Format::Pdf);
        let options = StyleOptions::default();
        let cast: Vec<Character> = (0..8)
            .map(|i| {
                CharacterBuilder::default()
                    .id(format!("c{i}"))
                    .name(format!("Character {i}"))
                    .build()
                    .expect("can build character")
            })
            .collect();

        let sequential = exporter
            .character_roster(&cast, &options)
            .expect("can export");
        let concurrent: Vec<Artifact> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| exporter.character_roster(&cast, &options)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("thread completes").expect("can export"))
                .collect()
        });
        for artifact in concurrent {
            assert_eq!(artifact.bytes, sequential.bytes);
            assert_eq!(artifact.page_count, 8);
        }
    }
}
