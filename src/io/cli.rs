//! Command-line interface for rendering batches of numbered compositions

use crate::algorithm::executor::{Composer, ComposerConfig};
use crate::algorithm::modes::ModeKind;
use crate::io::configuration::{DEFAULT_COMPOSITIONS, DEFAULT_SEED, load_config};
use crate::io::error::Result;
use crate::io::image::{Exporter, output_name};
use crate::io::palette::extract_palettes;
use crate::io::progress::{EFFECTS_STAGE, ProgressManager, SAVING_STAGE};
use crate::io::source::DirectorySource;
use clap::{ArgAction, Parser};
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "glyphcompose")]
#[command(
    author,
    version,
    about = "Render procedural poster compositions from grayscale glyph modules"
)]
/// Command-line arguments for the composition tool
pub struct Cli {
    /// Directory receiving `composition_NNN.png` files
    #[arg(short, long, value_name = "DIR", default_value = "compositions")]
    pub output: PathBuf,

    /// Module tree laid out as `<DIR>/<category>/*.png`
    #[arg(short, long, value_name = "DIR", default_value = "modules")]
    pub modules: PathBuf,

    /// Number of compositions to render
    #[arg(short = 'n', long, default_value_t = DEFAULT_COMPOSITIONS)]
    pub count: usize,

    /// Base seed; composition `i` of the batch uses `seed + i`
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Always use this placement algorithm instead of drawing one per composition
    #[arg(long, value_enum)]
    pub mode: Option<ModeKind>,

    /// JSON configuration file overriding the built-in defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Canvas width in centimeters
    #[arg(long)]
    pub width_cm: Option<f64>,

    /// Canvas height in centimeters
    #[arg(long)]
    pub height_cm: Option<f64>,

    /// Print resolution in dots per inch
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Configuration file contents with command-line overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn composer_config(&self) -> Result<ComposerConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ComposerConfig::default(),
        };
        if let Some(kind) = self.mode {
            config.mode.fix_kind(kind, &config.modes);
        }
        if let Some(width_cm) = self.width_cm {
            config.canvas.width_cm = width_cm;
        }
        if let Some(height_cm) = self.height_cm {
            config.canvas.height_cm = height_cm;
        }
        if let Some(dpi) = self.dpi {
            config.canvas.dpi = dpi;
        }
        Ok(config)
    }
}

/// Renders and saves a batch of compositions with progress tracking
pub struct BatchRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl BatchRunner {
    /// Create a new batch runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Render every composition of the batch
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is unreadable or invalid
    /// - The module directory cannot be listed
    /// - A composition cannot be written
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        let config = self.cli.composer_config()?;
        config.validate()?;

        let mut source = DirectorySource::open(&self.cli.modules)?;
        if source.is_empty() {
            warn!(
                modules = %self.cli.modules.display(),
                "no module images found, every placement uses a blank tile"
            );
        }
        let palettes = extract_palettes(&self.cli.modules, &mut StdRng::seed_from_u64(self.cli.seed))?;
        let mut exporter = Exporter::new(&self.cli.output, config.canvas.dpi)?;
        let first = exporter.next_index();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        let mut written = Vec::with_capacity(self.cli.count);
        for index in 0..self.cli.count {
            let start_time = Instant::now();
            if let Some(ref mut pm) = self.progress_manager {
                pm.start(index, &output_name(exporter.next_index()));
            }

            let seed = self.cli.seed.wrapping_add(index as u64);
            let mut composer = Composer::new(config.clone(), seed)?;
            let placed = composer.place(&mut source, &palettes)?;
            if let Some(ref mut pm) = self.progress_manager {
                pm.advance(index, EFFECTS_STAGE);
            }
            let composition = composer.apply_effects(placed);
            if let Some(ref mut pm) = self.progress_manager {
                pm.advance(index, SAVING_STAGE);
            }

            let path = exporter.export(composition.canvas.image())?;
            if let Some(ref mut pm) = self.progress_manager {
                let summary = format!("{} · {} modules", composition.mode, composition.report.modules_pasted);
                pm.complete(index, &summary, start_time.elapsed());
            }
            written.push(path);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        info!(
            first,
            last = exporter.next_index().saturating_sub(1),
            output = %self.cli.output.display(),
            "batch finished"
        );
        Ok(written)
    }
}
