/// Harmonic - terminal music player
use anyhow::bail;
use clap::{Parser, Subcommand};
use harmonic_audio_desktop::RodioDevice;
use harmonic_cli::{
    commands,
    config::{HarmonicConfig, LoggingSettings},
    Player,
};
use harmonic_playback::{device_event_channel, NullDevice, PlayStatus};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "harmonic")]
#[command(about = "Terminal music player with a local library", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./harmonic.toml)
    #[arg(short, long, global = true, env = "HARMONIC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add audio files or directories to the library
    Import {
        /// Files and directories, imported in the order given
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List the library
    List,
    /// Remove a track from the library
    Remove {
        /// Track id as shown by `list`
        id: String,
    },
    /// Remove every track from the library
    Clear,
    /// Start the interactive player
    Play {
        /// Track number to start with (1-based, as shown by `list`)
        #[arg(short, long)]
        index: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = HarmonicConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let interactive = matches!(cli.command, Commands::Play { .. });
    init_tracing(&config.logging, interactive)?;

    match cli.command {
        Commands::Import { paths } => import(&config, paths).await?,
        Commands::List => list(&config).await?,
        Commands::Remove { id } => remove(&config, &id).await?,
        Commands::Clear => clear(&config).await?,
        Commands::Play { index } => play(&config, index).await?,
    }

    Ok(())
}

/// Install the global subscriber
///
/// The player owns the terminal, so without a log file nothing is written
/// while it runs.
fn init_tracing(logging: &LoggingSettings, interactive: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let file_layer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    let stderr_layer =
        (file_layer.is_none() && !interactive).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

async fn import(config: &HarmonicConfig, paths: Vec<PathBuf>) -> anyhow::Result<()> {
    let mut controller = commands::open_library(config, Box::new(NullDevice::default())).await?;
    let importer = commands::default_importer();

    let summary = commands::import(&mut controller, &importer, paths).await?;

    println!(
        "Imported {} tracks ({} skipped, {} failed)",
        summary.imported, summary.skipped, summary.failed
    );
    for (path, reason) in &summary.errors {
        eprintln!("  {}: {}", path.display(), reason);
    }

    Ok(())
}

async fn list(config: &HarmonicConfig) -> anyhow::Result<()> {
    let controller = commands::open_library(config, Box::new(NullDevice::default())).await?;
    commands::list(&controller, &mut std::io::stdout().lock())?;
    Ok(())
}

async fn remove(config: &HarmonicConfig, id: &str) -> anyhow::Result<()> {
    let mut controller = commands::open_library(config, Box::new(NullDevice::default())).await?;
    let track = commands::remove(&mut controller, id).await?;
    println!("Removed {} - {}", track.title, track.artist);
    Ok(())
}

async fn clear(config: &HarmonicConfig) -> anyhow::Result<()> {
    let mut controller = commands::open_library(config, Box::new(NullDevice::default())).await?;
    let count = commands::clear(&mut controller).await?;
    println!("Removed {} tracks", count);
    Ok(())
}

async fn play(config: &HarmonicConfig, index: Option<usize>) -> anyhow::Result<()> {
    let (events_tx, events_rx) = device_event_channel();
    let device = RodioDevice::open(events_tx)?;
    let mut controller = commands::open_library(config, Box::new(device)).await?;

    if controller.queue().is_empty() {
        println!("Library is empty. Add music with `harmonic import <paths>`.");
        return Ok(());
    }

    if let Some(number) = index {
        let status = match number.checked_sub(1) {
            Some(position) => controller.play_at_index(position),
            None => PlayStatus::Ignored,
        };
        if status == PlayStatus::Ignored {
            bail!(
                "No track {} (library has {})",
                number,
                controller.queue().len()
            );
        }
    }

    println!(
        "{} tracks. space: play/pause, arrows: next/previous, m l s + -, ':' commands, q: quit",
        controller.queue().len()
    );
    Player::new(controller).run(events_rx).await?;
    Ok(())
}
