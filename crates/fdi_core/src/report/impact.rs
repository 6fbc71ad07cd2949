use tracing::debug;

use crate::config::Calibration;
use crate::error::Result;
use crate::forecast::TimeSeriesForecaster;
use crate::model::{
    ComprehensiveReport, GdpContribution, GdpYear, ImpactRequest, JobCreationReport,
    RevenueAssumptions, RoiTimeline, SezIncentiveImpact, SezIncentives,
};
use crate::multiplier::MultiplierEngine;
use crate::simulation::ScenarioSimulator;
use crate::stats::round_dp;

use super::roi::{build_timeline, ramp_factor};

/// Scenario used for the Monte Carlo section of a report
const REPORT_SCENARIO: &str = "base";

/// Confidence of the optional macro forecast
const REPORT_CONFIDENCE: f64 = 0.95;

/// Investment impact figures for a single project
pub struct ImpactReporter<'a> {
    calibration: &'a Calibration,
    engine: MultiplierEngine<'a>,
}

impl<'a> ImpactReporter<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            calibration,
            engine: MultiplierEngine::new(calibration),
        }
    }

    /// Jobs created by the investment, with the SEZ uplift applied to every
    /// component when the project sits in a zone.
    pub fn job_creation(
        &self,
        amount: f64,
        sector: &str,
        province: &str,
        is_sez: bool,
    ) -> Result<JobCreationReport> {
        let sector = self.calibration.resolve_sector(sector);
        let mut jobs = self.engine.calculate_job_creation(amount, &sector)?;

        if is_sez {
            let calibration = self.calibration;
            let uplift = |jobs: u64| (jobs as f64 * calibration.reports.sez_job_uplift) as u64;
            jobs.direct_jobs = uplift(jobs.direct_jobs);
            jobs.indirect_jobs = uplift(jobs.indirect_jobs);
            jobs.induced_jobs = uplift(jobs.induced_jobs);
            jobs.total_jobs = jobs.direct_jobs + jobs.indirect_jobs + jobs.induced_jobs;
            jobs.construction_phase =
                (jobs.total_jobs as f64 * calibration.impact.construction_share) as u64;
            jobs.operational_phase =
                (jobs.total_jobs as f64 * calibration.impact.operational_share) as u64;
        }

        Ok(JobCreationReport {
            province: province.to_string(),
            sez_uplift: is_sez,
            jobs,
        })
    }

    /// GDP value added over `years`, ramping up with the sector's revenue profile.
    pub fn gdp_contribution(&self, amount: f64, sector: &str, years: u32) -> Result<GdpContribution> {
        let sector = self.calibration.resolve_sector(sector);
        let (key, sector_calibration) = self.calibration.sector(&sector)?;
        let policy = &self.calibration.reports;

        let impact = self.engine.calculate_total_impact(amount, key)?;
        let tax_revenue = self.engine.calculate_tax_revenue(amount, key, false, None)?;
        let profile = sector_calibration.revenue;

        let annual_gdp = impact.total_output * policy.gdp_share;
        let mut cumulative = 0.0;
        let year_by_year = (1..=years)
            .map(|year| {
                let gdp = annual_gdp
                    * ramp_factor(year, profile.ramp_years)
                    * (1.0 + profile.growth).powi(year as i32);
                cumulative += gdp;
                GdpYear {
                    year,
                    gdp: round_dp(gdp, 2),
                    cumulative: round_dp(cumulative, 2),
                }
            })
            .collect();

        let direct_gdp = impact.direct.direct_output * policy.gdp_share;
        Ok(GdpContribution {
            sector: key.to_string(),
            direct_gdp: round_dp(direct_gdp, 2),
            multiplier_effect: round_dp(annual_gdp - direct_gdp, 2),
            total_gdp: round_dp(annual_gdp, 2),
            tax_revenue,
            forex_generation: round_dp(amount * policy.forex_share, 2),
            year_by_year,
        })
    }

    /// Tax take with and without the zone's incentive package.
    ///
    /// Savings are counted over the package's holiday years (calibrated
    /// default when the package names none), capped at `years`.
    pub fn sez_incentive_impact(
        &self,
        amount: f64,
        sector: &str,
        incentives: Option<&SezIncentives>,
        years: u32,
    ) -> Result<SezIncentiveImpact> {
        let sector = self.calibration.resolve_sector(sector);
        let with_incentive = self
            .engine
            .calculate_tax_revenue(amount, &sector, true, incentives)?;
        let without_incentive = self
            .engine
            .calculate_tax_revenue(amount, &sector, false, None)?;

        let savings = without_incentive.total_tax - with_incentive.total_tax;
        let holiday_years = incentives
            .and_then(|i| i.tax_holiday_years)
            .unwrap_or(self.calibration.reports.default_holiday_years)
            .min(years);

        Ok(SezIncentiveImpact {
            sez_name: incentives
                .and_then(|i| i.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            incentives: incentives.cloned().unwrap_or_default(),
            with_incentive,
            without_incentive,
            annual_tax_savings: round_dp(savings, 2),
            total_savings_over_period: round_dp(savings * holiday_years as f64, 2),
            holiday_years,
        })
    }

    pub fn roi_timeline(
        &self,
        amount: f64,
        sector: &str,
        assumptions: &RevenueAssumptions,
    ) -> Result<RoiTimeline> {
        let sector = self.calibration.resolve_sector(sector);
        let (key, sector_calibration) = self.calibration.sector(&sector)?;
        Ok(build_timeline(
            key.to_string(),
            amount,
            sector_calibration.revenue,
            assumptions,
            &self.calibration.reports,
        ))
    }

    /// Jobs, GDP, Monte Carlo risk and ROI for one project, plus the SEZ
    /// comparison and a macro forecast when the request supplies them.
    pub fn comprehensive_report(&self, request: &ImpactRequest) -> Result<ComprehensiveReport> {
        let policy = &self.calibration.reports;
        let sector = self.calibration.resolve_sector(&request.sector);

        let job_creation =
            self.job_creation(request.amount, &sector, &request.province, request.is_sez)?;
        let gdp_contribution = self.gdp_contribution(request.amount, &sector, policy.gdp_years)?;

        let simulator = ScenarioSimulator::new(self.calibration);
        let run = match request.seed {
            Some(seed) => simulator.run_simulation_seeded(
                request.amount,
                &sector,
                policy.simulation_paths,
                REPORT_SCENARIO,
                policy.simulation_years,
                seed,
            )?,
            None => simulator.run_simulation(
                request.amount,
                &sector,
                policy.simulation_paths,
                REPORT_SCENARIO,
                policy.simulation_years,
            )?,
        };

        let roi_timeline = self.roi_timeline(request.amount, &sector, &request.revenue)?;

        let sez_impact = if request.is_sez {
            Some(self.sez_incentive_impact(
                request.amount,
                &sector,
                request.sez_incentives.as_ref(),
                policy.roi_years,
            )?)
        } else {
            None
        };

        let forecast = if request.macro_series.is_empty() {
            None
        } else {
            let mut forecaster = TimeSeriesForecaster::new(self.calibration);
            forecaster.fit(&request.macro_series);
            Some(forecaster.predict(request.forecast_horizon, REPORT_CONFIDENCE)?)
        };

        debug!(
            sector = %sector,
            total_jobs = job_creation.jobs.total_jobs,
            sez = request.is_sez,
            "built comprehensive impact report"
        );

        Ok(ComprehensiveReport {
            job_creation,
            gdp_contribution,
            monte_carlo: run.statistics,
            roi_timeline,
            sez_impact,
            forecast,
        })
    }
}
