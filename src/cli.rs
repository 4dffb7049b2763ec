use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use story_press::sinks::Format;
use story_press::ExportKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a story-press.toml config file
    Config,
    /// Renders documents from a JSON snapshot of the story workspace
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// What to render
    #[clap(value_enum)]
    pub kind: Kind,

    /// JSON snapshot holding characters, stories and relationships
    #[clap(short, long, env = "STORY_PRESS_DATA")]
    pub data: PathBuf,

    /// Character id (for `profile`) or story id (for `manuscript`); defaults to
    /// the first one in the snapshot
    #[clap(short, long)]
    pub id: Option<String>,

    /// Configuration file
    #[clap(short, long, default_value = crate::config::CONFIG_FILE)]
    pub config: PathBuf,

    /// Output directory, overriding the configuration
    #[clap(short, long)]
    pub out: Option<PathBuf>,

    /// Output format, overriding the configuration
    #[clap(short, long, value_enum)]
    pub format: Option<Format>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    /// A single character's profile
    Profile,
    /// Every character's profile in one document
    Roster,
    /// A story with all of its chapters
    Manuscript,
    /// All characters and the relationships between them
    Network,
    /// Every character profile, every story, the roster and the network
    All,
}

impl Kind {
    pub fn export_kind(&self) -> Option<ExportKind> {
        match self {
            Kind::Profile => Some(ExportKind::CharacterProfile),
            Kind::Roster => Some(ExportKind::CharacterRoster),
            Kind::Manuscript => Some(ExportKind::StoryManuscript),
            Kind::Network => Some(ExportKind::RelationshipNetwork),
            Kind::All => None,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
