//! Configuration module for the zone occupancy engine.

// Can all be private now because we have a public re-export.
mod analysis;
mod arena;
mod debug;
mod types;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, EngineSettings};
pub use arena::ArenaConfig;
pub use debug::{DF, LogFlags};
pub use types::{DurationSecs, Fps, Units};
