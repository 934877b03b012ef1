// The batch analysis pipeline.

pub mod run;

pub use run::{run, RunSummary};
