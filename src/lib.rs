//! Liftlog - Deterministic analytics engine for resistance-training set logs
//!
//! Liftlog turns a flat log of sets (exercise, reps, weight, date) into derived
//! training metrics through a pipeline of pure stages: normalization → load
//! metrics → personal records, categories and set numbers → weekly rollups,
//! acute:chronic workload ratio, and estimated 1RM trend.
//!
//! ## Modules
//!
//! - **Per-set stages**: `normalizer`, `metrics`, `records`, `classifier`, `sequencer`
//! - **Rollups**: `weekly`, `load_ratio`, `trend`
//! - **Edges**: `adapter` (CSV/JSON ingestion), `export` (CSV/JSON encoding), `config`

pub mod adapter;
pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod load_ratio;
pub mod metrics;
pub mod normalizer;
pub mod pipeline;
pub mod records;
pub mod sequencer;
pub mod trend;
pub mod types;
pub mod weekly;

pub use adapter::RawSetAdapter;
pub use config::{AcwrConfig, AnalyzerConfig};
pub use error::ComputeError;
pub use export::SetExporter;
pub use pipeline::{enrich, enrich_csv, LiftAnalyzer, TrainingLog};
pub use types::{
    AcwrOutcome, AcwrZone, Category, EnrichedSetRecord, RawField, RawSetRecord, TrendReport,
    ViewSummary, WeeklySummary,
};

/// Liftlog version
pub const LIFTLOG_VERSION: &str = env!("CARGO_PKG_VERSION");
