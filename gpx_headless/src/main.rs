use clap::{Parser, Subcommand};
use common::track::TrackSummary;
use dirs::data_local_dir;
use futures::future::join_all;
use module_core::{EventBus, FileStore, FitOptions, LineStyle};
use registry::{RegistryConfig, TrackRegistry};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use storage::{FilesSystemStore, HttpFileStore};
use surface::{HeadlessSurface, Viewport};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder the GPX files are stored in. Ignored with --server.
    #[arg(short, long)]
    uploads_dir: Option<PathBuf>,
    /// Url of a remote uploads server, e.g. http://localhost:8000
    #[arg(short, long)]
    server: Option<String>,
    /// Seed of the track color picker.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = LineStyle::DEFAULT_WIDTH)]
    line_width: f32,
    #[arg(long, default_value_t = FitOptions::default().padding)]
    fit_padding: u32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available GPX files.
    List,
    /// Load tracks and print their state.
    Show {
        ids: Vec<String>,
        /// Fit the viewport to the last given track.
        #[arg(short, long)]
        focus: bool,
        /// Color applied to every loaded track.
        #[arg(short, long)]
        color: Option<String>,
        /// Category assigned to every loaded track.
        #[arg(long)]
        category: Option<String>,
    },
    /// Upload a GPX file.
    Upload { path: PathBuf },
    /// Delete a GPX file.
    Delete { id: String },
}

#[derive(Serialize)]
struct ShowOutput {
    tracks: Vec<TrackSummary>,
    viewport: Option<Viewport>,
}

fn get_uploads_dir() -> Result<PathBuf, ()> {
    let mut uploads_dir = data_local_dir().ok_or_else(|| {
        error!("Could not determine local data directory");
    })?;
    uploads_dir.push("gpx");
    Ok(uploads_dir)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        error!("Failed to serialize output. Error: {e}");
    })?;
    println!("{json}");
    Ok(())
}

async fn show<S: FileStore + 'static>(
    registry: &TrackRegistry<HeadlessSurface, S>,
    ids: &[String],
    focus: bool,
    color: Option<&str>,
    category: Option<&str>,
) -> Result<(), ()> {
    let results = join_all(ids.iter().map(|id| registry.load(id))).await;
    let mut failed = false;
    for (id, result) in ids.iter().zip(results) {
        if let Err(e) = result {
            error!("Failed to show {id}. Error: {e}");
            failed = true;
            continue;
        }
        if let Some(color) = color {
            registry.recolor(id, color).map_err(|e| error!("{e}"))?;
        }
        if let Some(category) = category {
            registry.categorize(id, category).map_err(|e| error!("{e}"))?;
        }
    }
    if focus && let Some(id) = ids.last() {
        registry.focus(id);
    }

    print_json(&ShowOutput {
        tracks: registry.snapshot(),
        viewport: registry.with_renderer(|surface| surface.viewport()),
    })?;
    if failed { Err(()) } else { Ok(()) }
}

async fn run<S: FileStore + 'static>(cli: Cli, store: Arc<S>) -> Result<(), ()> {
    let config = RegistryConfig {
        line_width: cli.line_width,
        fit: FitOptions {
            padding: cli.fit_padding,
            ..FitOptions::default()
        },
        seed: cli.seed,
        ..RegistryConfig::default()
    };
    let registry =
        TrackRegistry::new_with_config(HeadlessSurface::new(), store, EventBus::default(), config);

    match cli.command {
        Command::List => {
            let files = registry.refresh_files().await.map_err(|e| error!("{e}"))?;
            print_json(&files)
        }
        Command::Show {
            ids,
            focus,
            color,
            category,
        } => show(&registry, &ids, focus, color.as_deref(), category.as_deref()).await,
        Command::Upload { path } => {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .ok_or_else(|| error!("{} is not a file", path.to_string_lossy()))?;
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                error!("Failed to read {}. Error: {e}", path.to_string_lossy());
            })?;
            let id = registry
                .upload(&bytes, &filename)
                .await
                .map_err(|e| error!("{e}"))?;
            print_json(&id)
        }
        Command::Delete { id } => {
            registry
                .delete_remote(&id)
                .await
                .map_err(|e| error!("{e}"))?;
            info!("Deleted {id}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Some(server) = &cli.server {
        let store = HttpFileStore::new(server).map_err(|e| error!("{e}"))?;
        return run(cli, Arc::new(store)).await;
    }
    let uploads_dir = match &cli.uploads_dir {
        Some(dir) => dir.clone(),
        None => get_uploads_dir()?,
    };
    run(cli, Arc::new(FilesSystemStore::new(&uploads_dir))).await
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_show_with_options() {
        let cli = Cli::try_parse_from([
            "gpx_headless",
            "--seed",
            "3",
            "show",
            "ride.gpx",
            "walk.gpx",
            "--focus",
            "--color",
            "#abc",
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.line_width, 4.0);
        assert_eq!(cli.fit_padding, 50);
        match cli.command {
            Command::Show {
                ids,
                focus,
                color,
                category,
            } => {
                assert_eq!(ids, vec!["ride.gpx", "walk.gpx"]);
                assert!(focus);
                assert_eq!(color.as_deref(), Some("#abc"));
                assert!(category.is_none());
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["gpx_headless"]).is_err());
    }
}
