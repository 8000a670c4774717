//! Loopsmith command line.
//!
//! - `detect <file>` labels a sequence document
//! - `generate` writes a circular sequence built from a label
//! - `label <component>...` prints the canonical label of a component set

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use loopsmith::designation;
use loopsmith::grid::GridMode;
use loopsmith::{Component, DetectionResult, Detector, DetectorConfig, Interval, SequenceDocument, SequenceGenerator};

#[derive(Parser)]
#[command(name = "loopsmith")]
#[command(about = "Detect and label the transformation behind a circular beat sequence")]
#[command(version)]
struct Cli {
    /// Detector config (defaults to ~/.loopsmith/detector.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the detector on a YAML sequence document
    Detect {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },

    /// Generate a circular sequence realizing a label
    Generate {
        #[arg(short, long)]
        word: String,

        /// Number of beats
        #[arg(short, long)]
        beats: usize,

        /// Table label (e.g. STRICT_SWAPPED) or components joined by `_`
        #[arg(short, long)]
        cap: String,

        /// Interval divisor: 2 = halved, 4 = quartered
        #[arg(short, long, default_value_t = 2)]
        interval: usize,

        #[arg(long, value_enum)]
        grid: Option<Grid>,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Print the canonical label of a component set
    Label {
        #[arg(required = true)]
        components: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Grid {
    Diamond,
    Box,
}

impl From<Grid> for GridMode {
    fn from(grid: Grid) -> Self {
        match grid {
            Grid::Diamond => GridMode::Diamond,
            Grid::Box => GridMode::Box,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DetectorConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DetectorConfig::load().unwrap_or_default(),
    };

    match cli.command {
        Commands::Detect { file, format } => {
            let document = SequenceDocument::load(&file)
                .with_context(|| format!("loading sequence {}", file.display()))?;
            let sequence = document.to_sequence_on(config.default_grid);
            let result = Detector::new(config).detect(&sequence);
            info!(
                word = result.word(),
                classification = %result.classification().label(),
                "detected"
            );
            print!("{}", render(&result, format)?);
        }
        Commands::Generate {
            word,
            beats,
            cap,
            interval,
            grid,
            seed,
        } => {
            let Some(interval) = Interval::from_divisor(interval) else {
                bail!("interval divisor must be at least 2, got {interval}");
            };
            let grid = grid.map(GridMode::from).unwrap_or(config.default_grid);
            let sequence = SequenceGenerator::new(grid, seed)
                .from_label(&word, beats, &cap, interval)
                .with_context(|| format!("generating {word} as {cap}"))?;
            print!("{}", SequenceDocument::from_sequence(&sequence).to_yaml()?);
        }
        Commands::Label { components } => {
            let parsed = components
                .iter()
                .map(|c| c.parse::<Component>())
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", designation::canonical_label(&parsed));
        }
    }
    Ok(())
}

fn render(result: &DetectionResult, format: Format) -> Result<String> {
    match format {
        Format::Yaml => Ok(serde_yaml::to_string(result)?),
        #[cfg(feature = "json")]
        Format::Json => Ok(serde_json::to_string_pretty(result)? + "\n"),
        #[cfg(not(feature = "json"))]
        Format::Json => bail!("JSON output needs the `json` feature"),
    }
}
