//! Monte Carlo scenario types

use serde::{Deserialize, Serialize};

/// Distribution parameters for one named economic scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub return_mean: f64,
    pub return_std: f64,
    /// Standard deviation of the annual FX shock
    pub fx_vol: f64,
    /// Standard deviation of the annual demand shock
    pub demand_var: f64,
}

/// Sector-specific shift applied on top of the scenario parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectorAdjustment {
    pub return_adj: f64,
    pub vol_adj: f64,
}

impl SectorAdjustment {
    pub const ZERO: SectorAdjustment = SectorAdjustment {
        return_adj: 0.0,
        vol_adj: 0.0,
    };
}

/// Summary statistics of simulated outcomes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub p5: f64,
    pub p25: f64,
    pub p75: f64,
    pub p95: f64,
    /// 5th percentile of outcomes
    pub var_95: f64,
    /// Mean of the outcomes at or below `var_95`
    pub expected_shortfall: f64,
    pub min: f64,
    pub max: f64,
}

/// Result of a single `run_simulation` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Normalized sector key the run was priced with
    pub sector: String,
    /// Scenario actually used (after defaulting)
    pub scenario: String,
    pub sector_recognized: bool,
    pub scenario_recognized: bool,
    pub outcomes: Vec<f64>,
    pub statistics: SimulationStats,
}
