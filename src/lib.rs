#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate (for the analyze binary)
pub use config::{ArenaConfig, EngineSettings};
pub use domain::{Arena, TrackingSample};
pub use engine::{SessionReport, ZoneEngine};
pub use error::{ConfigurationError, InputError, ZoneError};
pub use report::{CsvReport, ReportSink, TableReport};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arena document (.yaml/.yml, otherwise JSON)
    #[arg(long)]
    pub arena: PathBuf,

    /// Tracking samples as JSON: a list of samples, or a map of subject id to list
    #[arg(long)]
    pub samples: PathBuf,

    #[arg(long, default_value_t = config::ANALYSIS.default_fps)]
    pub fps: f64,

    /// Visits and transition runs shorter than this (seconds) are discarded
    #[arg(long, default_value_t = config::ANALYSIS.min_visit_duration_secs)]
    pub min_duration: f64,

    /// Treat samples below this likelihood as missing
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Restrict visits and transitions to one body part
    #[arg(long)]
    pub body_part: Option<String>,

    /// Print CSV tables instead of formatted ones
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Print the full session reports as JSON
    #[arg(long, default_value_t = false, conflicts_with = "csv")]
    pub json: bool,
}

impl Cli {
    pub fn engine_settings(&self) -> Result<EngineSettings, InputError> {
        let mut settings = EngineSettings::new(self.fps, self.min_duration)?;
        if let Some(c) = self.min_confidence {
            settings = settings.with_min_confidence(c)?;
        }
        if let Some(bp) = &self.body_part {
            settings = settings.with_body_part(bp.as_str());
        }
        Ok(settings)
    }
}
