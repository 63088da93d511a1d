pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{run_batch, run_batch_reported, PlateAnalyzer};
pub use types::{BatchReport, PlateAnalysis, PlateNote, ProgressReporter, SkippedPlate};
