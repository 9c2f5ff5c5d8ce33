/// Beamie - personal media catalog
use beamie::{commands, config::BeamieConfig};
use beamie_storage::albums::AlbumFilter;
use beamie_storage::artists::ArtistFilter;
use beamie_storage::tracks::TrackFilter;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "beamie")]
#[command(about = "Beamie personal media catalog", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "BEAMIE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the catalog database
    InitDb,
    /// Reconcile the media folders with the catalog
    Scan {
        /// Media folder to scan (repeatable, replaces library.media_paths)
        #[arg(short, long = "path")]
        paths: Vec<PathBuf>,
        /// Filename suffix to accept (repeatable, replaces library.allowed_extensions)
        #[arg(short, long = "ext")]
        extensions: Vec<String>,
    },
    /// List artists
    Artists {
        /// Exact artist id
        #[arg(long)]
        id: Option<i64>,
        /// Substring of the artist name
        #[arg(long)]
        name: Option<String>,
    },
    /// List albums
    Albums {
        /// Exact album id
        #[arg(long)]
        id: Option<i64>,
        /// Substring of the album name
        #[arg(long)]
        name: Option<String>,
        /// Substring of the artist name
        #[arg(long)]
        artist: Option<String>,
    },
    /// List tracks, ordered by track number
    Tracks {
        /// Exact track id
        #[arg(long)]
        id: Option<i64>,
        /// Substring of the artist name
        #[arg(long)]
        artist: Option<String>,
        /// Substring of the album name
        #[arg(long)]
        album: Option<String>,
        /// Substring of the track name
        #[arg(long)]
        name: Option<String>,
        /// Exact track number
        #[arg(long)]
        number: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = BeamieConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::InitDb => {
            commands::init_db(&config).await?;
        }
        Commands::Scan { paths, extensions } => {
            let report = commands::scan(&config, paths, extensions).await?;
            print_json(&report)?;
        }
        Commands::Artists { id, name } => {
            let filter = ArtistFilter { id, name };
            print_json(&commands::artists(&config, &filter).await?)?;
        }
        Commands::Albums { id, name, artist } => {
            let filter = AlbumFilter { id, name, artist };
            print_json(&commands::albums(&config, &filter).await?)?;
        }
        Commands::Tracks {
            id,
            artist,
            album,
            name,
            number,
        } => {
            let filter = TrackFilter {
                id,
                artist,
                album,
                name,
                number,
                ..Default::default()
            };
            print_json(&commands::tracks(&config, &filter).await?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
