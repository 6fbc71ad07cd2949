//! Foreign direct investment analytics library
//!
//! Decision-support analytics for an investment promotion agency:
//! - Linear-trend forecasting, trend decomposition and multiple regression
//! - Monte Carlo pricing of an investment under named economic scenarios
//! - Input-output multipliers for output, jobs and tax revenue
//! - Sector risk/return metrics and mean-variance portfolio allocation
//! - Weighted investor/opportunity match scoring and ranking
//! - Rule-based classification of free-text investor inquiries
//!
//! Every component borrows an immutable [`Calibration`]; the built-in
//! default is the Zimbabwe dataset.
//!
//! ```ignore
//! use fdi_core::{Calibration, MultiplierEngine};
//!
//! let calibration = Calibration::default();
//! let engine = MultiplierEngine::new(&calibration);
//! let jobs = engine.calculate_job_creation(25_000_000.0, "mining")?;
//! assert_eq!(jobs.total_jobs, jobs.direct_jobs + jobs.indirect_jobs + jobs.induced_jobs);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod forecast;
pub mod inquiry;
pub mod matching;
pub mod multiplier;
pub mod portfolio;
pub mod report;
pub mod simulation;

mod linalg;
mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::Calibration;
pub use error::{AnalyticsError, ConfigError, Result};
pub use forecast::TimeSeriesForecaster;
pub use inquiry::InquiryClassifier;
pub use matching::MatchRecommender;
pub use multiplier::MultiplierEngine;
pub use portfolio::PortfolioOptimizer;
pub use report::{
    ImpactReporter, MatchCoordinator, PatternDetector, SectorAllocator, TrendReporter,
};
pub use simulation::ScenarioSimulator;
