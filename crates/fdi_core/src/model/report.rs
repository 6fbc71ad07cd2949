//! Composite report records built by the coordinators

use serde::{Deserialize, Serialize};

use super::forecast::{ForecastResult, TimeSeriesPoint};
use super::impact::{JobsBreakdown, SezIncentives, TaxBreakdown};
use super::matching::RankedMatch;
use super::portfolio::PortfolioAllocation;
use super::simulation::SimulationStats;

/// Job creation for a located investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCreationReport {
    pub province: String,
    /// SEZ uplift applied to every job component
    pub sez_uplift: bool,
    pub jobs: JobsBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GdpYear {
    pub year: u32,
    pub gdp: f64,
    pub cumulative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpContribution {
    pub sector: String,
    pub direct_gdp: f64,
    pub multiplier_effect: f64,
    pub total_gdp: f64,
    pub tax_revenue: TaxBreakdown,
    pub forex_generation: f64,
    pub year_by_year: Vec<GdpYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SezIncentiveImpact {
    pub sez_name: String,
    pub incentives: SezIncentives,
    pub with_incentive: TaxBreakdown,
    pub without_incentive: TaxBreakdown,
    pub annual_tax_savings: f64,
    pub total_savings_over_period: f64,
    /// Years the savings were counted over
    pub holiday_years: u32,
}

/// Overrides for the sector's revenue profile
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueAssumptions {
    pub growth_rate: Option<f64>,
    pub op_cost_ratio: Option<f64>,
    pub discount_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpvAtRate {
    pub rate: f64,
    pub npv: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiYear {
    pub year: u32,
    pub capex: f64,
    pub revenue: f64,
    pub opex: f64,
    pub cash_flow: f64,
    pub cumulative_cash_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiTimeline {
    pub sector: String,
    /// Year 0 carries the capex
    pub years: Vec<RoiYear>,
    pub npv: Vec<NpvAtRate>,
    /// NPV at the requested discount rate
    pub discounted_npv: f64,
    /// Percent, rounded to 2 dp
    pub irr: f64,
    /// First year with positive cumulative cash flow
    pub breakeven_year: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactRequest {
    pub amount: f64,
    /// Sector code or name
    pub sector: String,
    pub province: String,
    pub is_sez: bool,
    pub sez_incentives: Option<SezIncentives>,
    pub revenue: RevenueAssumptions,
    /// Macro indicator to forecast alongside the impact figures
    pub macro_series: Vec<TimeSeriesPoint>,
    pub forecast_horizon: usize,
    /// Fixed seed for the Monte Carlo section
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    pub job_creation: JobCreationReport,
    pub gdp_contribution: GdpContribution,
    pub monte_carlo: SimulationStats,
    pub roi_timeline: RoiTimeline,
    pub sez_impact: Option<SezIncentiveImpact>,
    pub forecast: Option<ForecastResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub sector_name: String,
    pub sector_code: String,
    pub weight: f64,
    pub amount: f64,
    /// Weight in percent
    pub percentage: f64,
    /// Sector return in percent
    pub expected_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub budget: f64,
    /// Sorted by percentage, largest first
    pub lines: Vec<AllocationLine>,
    pub portfolio: PortfolioAllocation,
}

/// Best opportunity for one investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProactiveRecommendation {
    pub investor_id: String,
    pub investor_name: String,
    pub best_match: RankedMatch,
}

/// One recorded investment, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRecord {
    /// Sector code (`MIN`); records without one are grouped as `UNK`
    #[serde(default)]
    pub sector_code: Option<String>,
    #[serde(default)]
    pub sector_name: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub investor_country: Option<String>,
}

/// Investments sharing a sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentCluster {
    /// Position in first-seen order
    pub cluster_id: usize,
    pub sector_code: String,
    pub sector_name: String,
    pub pattern_name: String,
    pub description: String,
    pub investment_count: usize,
    pub avg_amount: f64,
    /// Distinct investor countries in first-seen order
    pub top_origins: Vec<String>,
}
