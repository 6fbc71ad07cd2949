//! Monte Carlo scenario simulator
//!
//! Prices an investment under a named economic scenario. Each path compounds
//! an annual return drawn from the scenario (shifted by the sector
//! adjustment) minus penalties for FX and demand shocks.
//!
//! Name lookups never fail here: an unknown scenario falls back to the
//! default scenario, an unknown sector to a zero adjustment. The multiplier
//! engine validates sectors strictly instead.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::Calibration;
use crate::error::{AnalyticsError, Result};
use crate::model::{
    normalize_sector_key, ScenarioParams, SectorAdjustment, SimulationRun, SimulationStats,
};
use crate::stats::{mean, percentile_sorted, population_std};

/// Paths drawn from one RNG stream
const MAX_BATCH_SIZE: usize = 500;

/// Decorrelates per-batch seeds derived from one base seed
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Distributions for one (scenario, sector) pair
struct PathModel {
    returns: Normal<f64>,
    fx_shock: Normal<f64>,
    demand_shock: Normal<f64>,
    fx_penalty: f64,
    demand_penalty: f64,
}

impl PathModel {
    fn new(
        params: ScenarioParams,
        adjustment: SectorAdjustment,
        fx_penalty: f64,
        demand_penalty: f64,
    ) -> Result<Self> {
        let mean = params.return_mean + adjustment.return_adj;
        let std_dev = params.return_std + adjustment.vol_adj;
        Ok(Self {
            returns: normal("annual return", mean, std_dev)?,
            fx_shock: normal("fx shock", 0.0, params.fx_vol)?,
            demand_shock: normal("demand shock", 0.0, params.demand_var)?,
            fx_penalty,
            demand_penalty,
        })
    }

    /// Final value of `amount` after `years` of compounding
    fn sample_outcome<R: Rng + ?Sized>(&self, amount: f64, years: u32, rng: &mut R) -> f64 {
        let mut growth = 1.0;
        for _ in 0..years {
            let annual = self.returns.sample(rng);
            let fx = self.fx_shock.sample(rng);
            let demand = self.demand_shock.sample(rng);
            let effective =
                annual - self.fx_penalty * fx.abs() - self.demand_penalty * demand.abs();
            growth *= 1.0 + effective;
        }
        amount * growth
    }

    fn sample_batch(&self, amount: f64, years: u32, size: usize, seed: u64) -> Vec<f64> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..size)
            .map(|_| self.sample_outcome(amount, years, &mut rng))
            .collect()
    }
}

fn normal(profile_type: &'static str, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|_| AnalyticsError::InvalidDistribution {
        profile_type,
        mean,
        std_dev,
    })
}

pub struct ScenarioSimulator<'a> {
    calibration: &'a Calibration,
}

impl<'a> ScenarioSimulator<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self { calibration }
    }

    /// Simulate `num_simulations` paths with a fresh random seed.
    pub fn run_simulation(
        &self,
        amount: f64,
        sector: &str,
        num_simulations: usize,
        scenario: &str,
        years: u32,
    ) -> Result<SimulationRun> {
        let seed = rand::rng().random::<u64>();
        self.run_simulation_seeded(amount, sector, num_simulations, scenario, years, seed)
    }

    /// Same as [`run_simulation`](Self::run_simulation) but reproducible for a given seed.
    pub fn run_simulation_seeded(
        &self,
        amount: f64,
        sector: &str,
        num_simulations: usize,
        scenario: &str,
        years: u32,
        seed: u64,
    ) -> Result<SimulationRun> {
        let table = &self.calibration.scenarios;
        let (scenario_name, params, scenario_recognized) = table.resolve(scenario);
        if !scenario_recognized {
            debug!(requested = scenario, using = scenario_name, "unknown scenario, using default");
        }

        let sector_key = normalize_sector_key(sector);
        let adjustment = self
            .calibration
            .sectors
            .get(&sector_key)
            .map(|s| s.adjustment);
        let sector_recognized = adjustment.is_some();
        if !sector_recognized {
            debug!(sector = %sector_key, "unknown sector, using zero adjustment");
        }

        let model = PathModel::new(
            params,
            adjustment.unwrap_or(SectorAdjustment::ZERO),
            table.fx_penalty,
            table.demand_penalty,
        )?;

        trace!(num_simulations, years, seed, "running scenario simulation");
        let outcomes = simulate_paths(&model, amount, years, num_simulations, seed);
        let statistics = summarize(&outcomes);

        Ok(SimulationRun {
            sector: sector_key,
            scenario: scenario_name.to_string(),
            sector_recognized,
            scenario_recognized,
            outcomes,
            statistics,
        })
    }
}

fn simulate_paths(model: &PathModel, amount: f64, years: u32, n: usize, seed: u64) -> Vec<f64> {
    let num_batches = n.div_ceil(MAX_BATCH_SIZE);
    let batch = |i: usize| {
        let size = if i == num_batches - 1 {
            n - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };
        let batch_seed = seed ^ (i as u64).wrapping_add(1).wrapping_mul(SEED_STRIDE);
        model.sample_batch(amount, years, size, batch_seed)
    };

    #[cfg(feature = "parallel")]
    let outcomes = (0..num_batches).into_par_iter().flat_map_iter(batch).collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes = (0..num_batches).flat_map(batch).collect();

    outcomes
}

/// Summary statistics with linearly interpolated percentiles
pub fn summarize(outcomes: &[f64]) -> SimulationStats {
    if outcomes.is_empty() {
        return SimulationStats::default();
    }

    let mut sorted = outcomes.to_vec();
    sorted.sort_by(f64::total_cmp);

    let var_95 = percentile_sorted(&sorted, 5.0);
    let tail: Vec<f64> = sorted.iter().copied().take_while(|v| *v <= var_95).collect();
    let expected_shortfall = if tail.is_empty() { var_95 } else { mean(&tail) };

    SimulationStats {
        mean: mean(outcomes),
        median: percentile_sorted(&sorted, 50.0),
        std: population_std(outcomes),
        p5: var_95,
        p25: percentile_sorted(&sorted, 25.0),
        p75: percentile_sorted(&sorted, 75.0),
        p95: percentile_sorted(&sorted, 95.0),
        var_95,
        expected_shortfall,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}
