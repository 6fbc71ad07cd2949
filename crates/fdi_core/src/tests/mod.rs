//! Integration tests for the analytics components
//!
//! Tests are organized by topic:
//! - `forecast` - Trend fitting, prediction bands, decomposition, regression
//! - `simulation` - Monte Carlo path counts, statistics, name fallbacks
//! - `multiplier` - Impact cascade, job sums, tax breakdown
//! - `portfolio` - Sector metrics, correlation, allocation, frontier
//! - `matching` - Sub-scores, explanations, ranking
//! - `inquiry` - Sector, size, tier, sentiment and entity extraction
//! - `reports` - Coordinators built on several components

mod forecast;
mod inquiry;
mod matching;
mod multiplier;
