use anyhow::{Context, Result};
use cli::{Cli, RenderArgs};
use config::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::ExitCode;
use story_press::domain::{CharacterId, Library};
use story_press::measure::FontMetricsOracle;
use story_press::sinks::Sink;
use story_press::style::StyleOptions;
use story_press::{Artifact, ExportKind, ExportRequest, Exporter};

mod cli;
mod config;
mod config_wizard;

fn main() -> ExitCode {
    env_logger::init();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(),
        cli::Commands::Render(args) => render(args),
    }
}

fn load_library(path: &Path) -> Result<Library> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load {} contents", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The request for one export kind. `id` picks the character or story; the
/// first one in the snapshot is used without it.
fn request<'a>(library: &'a Library, kind: ExportKind, id: Option<&str>) -> ExportRequest<'a> {
    match kind {
        ExportKind::CharacterProfile => ExportRequest::CharacterProfile {
            character: match id {
                Some(id) => library.character(&CharacterId::from(id)),
                None => library.characters.first(),
            },
            relationships: &library.relationships,
            cast: &library.characters,
        },
        ExportKind::CharacterRoster => ExportRequest::CharacterRoster {
            characters: &library.characters,
        },
        ExportKind::StoryManuscript => ExportRequest::StoryManuscript {
            story: match id {
                Some(id) => library.story(id),
                None => library.stories.first(),
            },
            cast: &library.characters,
        },
        ExportKind::RelationshipNetwork => ExportRequest::RelationshipNetwork {
            characters: &library.characters,
            relationships: &library.relationships,
        },
    }
}

/// Every export the snapshot supports.
fn all_requests(library: &Library) -> Vec<ExportRequest<'_>> {
    let mut requests: Vec<ExportRequest<'_>> = library
        .characters
        .iter()
        .map(|c| request(library, ExportKind::CharacterProfile, Some(&c.id.0)))
        .collect();
    if !library.characters.is_empty() {
        requests.push(request(library, ExportKind::CharacterRoster, None));
    }
    requests.extend(
        library
            .stories
            .iter()
            .map(|s| request(library, ExportKind::StoryManuscript, Some(&s.id))),
    );
    requests.push(request(library, ExportKind::RelationshipNetwork, None));
    requests
}

fn write_artifact(directory: &Path, artifact: &Artifact) -> Result<()> {
    let path = directory.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let size = byte_unit::Byte::from_u128(artifact.bytes.len() as u128)
        .expect("can create byte unit from artifact size")
        .get_appropriate_unit(byte_unit::UnitType::Binary)
        .to_string();
    println!(
        "  {} ({} pages, {size})",
        path.display(),
        artifact.page_count
    );
    for warning in artifact.warnings.iter() {
        println!("    {}: {warning}", console::style("Warning").yellow());
    }
    Ok(())
}

fn render(args: &RenderArgs) -> Result<()> {
    println!("Loading configuration...");
    let config = Configuration::load_or_default(&args.config)?;
    let library = load_library(&args.data)?;

    let format = args.format.unwrap_or(config.output.format);
    let directory = args
        .out
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create {}", directory.display()))?;

    let oracle = config.oracle()?;
    let exporter = Exporter::new(oracle, Sink::from(format))
        .with_number_style(config.output.number_style);

    match args.kind.export_kind() {
        Some(kind) => {
            let artifact = exporter
                .export(request(&library, kind, args.id.as_deref()), &config.style)
                .with_context(|| format!("Failed to render {kind}"))?;
            println!();
            write_artifact(&directory, &artifact)?;
        }
        None => render_all(&exporter, &library, &config.style, &directory)?,
    }
    Ok(())
}

fn render_all(
    exporter: &Exporter<FontMetricsOracle>,
    library: &Library,
    style: &StyleOptions,
    directory: &Path,
) -> Result<()> {
    let requests = all_requests(library);
    let progress = ProgressBar::new(requests.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );

    let mut artifacts: Vec<Artifact> = Vec::with_capacity(requests.len());
    for request in requests {
        let kind = request.kind();
        progress.set_message(format!("Rendering {kind}..."));
        let artifact = exporter
            .export(request, style)
            .with_context(|| format!("Failed to render {kind}"))?;
        artifacts.push(artifact);
        progress.inc(1);
    }
    progress.finish_with_message("Done");

    println!();
    for artifact in artifacts.iter() {
        write_artifact(directory, artifact)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn library() -> Library {
        serde_json::from_str(
            r#"{
                "characters": [
                    { "id": "c1", "name": "Mara Vell" },
                    { "id": "c2", "name": "Tobin" }
                ],
                "stories": [{ "id": "s1", "title": "The Salt Road" }],
                "relationships": [{ "from": "c1", "to": "c2", "kind": "sibling" }]
            }"#,
        )
        .expect("can parse library")
    }

    #[test]
    fn can_pick_requests_by_id() {
        let library = library();
        match request(&library, ExportKind::CharacterProfile, Some("c2")) {
            ExportRequest::CharacterProfile { character, .. } => {
                assert_eq!(character.map(|c| c.name.as_str()), Some("Tobin"));
            }
            other => panic!("unexpected request {other:?}"),
        }
        match request(&library, ExportKind::StoryManuscript, Some("nope")) {
            ExportRequest::StoryManuscript { story, .. } => assert!(story.is_none()),
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn can_render_everything_in_a_snapshot() {
        let library = library();
        let kinds: Vec<ExportKind> = all_requests(&library).iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ExportKind::CharacterProfile,
                ExportKind::CharacterProfile,
                ExportKind::CharacterRoster,
                ExportKind::StoryManuscript,
                ExportKind::RelationshipNetwork,
            ]
        );

        let dir = tempfile::tempdir().expect("can create temp dir");
        let exporter = Exporter::new(
            FontMetricsOracle::default(),
            Sink::from(story_press::sinks::Format::Text),
        );
        render_all(&exporter, &library, &StyleOptions::default(), dir.path())
            .expect("can render all");
        assert!(dir.path().join("Mara_Vell_profile.txt").exists());
        assert!(dir.path().join("The_Salt_Road_manuscript.txt").exists());
    }
}
