//! # scout-pipeline
//!
//! The Scout-and-Mine research pipeline.
//!
//! A scout turns a user query into a filtered list of relevant candidates:
//!
//! 1. [`SourceAdapter`] fans out to the academic and grey sources
//!    concurrently; one source failing leaves the other's results intact.
//! 2. [`RelevanceFilter`] asks the model for a structured verdict per
//!    candidate with bounded concurrency, keeping input order.
//! 3. [`Autopilot`] engages when too few relevant results come back and runs
//!    at most one refinement round.
//!
//! Nothing found by a scout is archived until the caller saves it.
//! [`SnowballMiner`] is the one path that writes on its own: it archives one
//! hop of a seed paper's references, skipping titles the project holds.
//!
//! [`Scout`] wires the stages to a store and a model and is the entry point
//! for callers.

mod adapter;
mod autopilot;
mod engine;
mod error;
mod filter;
pub mod guard;
mod library;
mod miner;
pub mod prompts;
mod session;
mod settings;
mod warning;

pub use adapter::{FetchOutcome, SourceAdapter};
pub use autopilot::Autopilot;
pub use engine::{OutcomeKind, Scout, ScoutOptions, ScoutOutcome};
pub use error::PipelineError;
pub use filter::{FilterOutcome, RelevanceFilter};
pub use miner::{MineReport, SnowballMiner};
pub use session::ScoutSession;
pub use settings::PipelineSettings;
pub use tokio_util::sync::CancellationToken;
pub use warning::ScoutWarning;
