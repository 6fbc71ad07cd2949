//! Input-output multiplier engine
//!
//! Decomposes an investment into direct, indirect (supply chain) and induced
//! (household spending) effects. Sector names are validated strictly: an
//! unknown sector is an error, unlike in the scenario simulator.

use crate::config::{Calibration, SectorCalibration};
use crate::error::Result;
use crate::model::{
    DirectImpact, GenderSplit, IndirectImpact, InducedImpact, JobsBreakdown, SezIncentives,
    TaxBreakdown, TotalImpact,
};
use crate::stats::round_dp;

const DOLLARS_PER_MILLION: f64 = 1_000_000.0;

/// Round half to even and clamp at zero
fn whole_jobs(value: f64) -> u64 {
    value.round_ties_even().max(0.0) as u64
}

/// Job counts of the three impact tiers
#[derive(Debug, Clone, Copy, PartialEq)]
struct JobCascade {
    direct: u64,
    indirect: u64,
    induced: u64,
}

pub struct MultiplierEngine<'a> {
    calibration: &'a Calibration,
}

impl<'a> MultiplierEngine<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self { calibration }
    }

    pub fn calculate_direct_impact(&self, amount: f64, sector: &str) -> Result<DirectImpact> {
        let (key, calibration) = self.calibration.sector(sector)?;
        if amount <= 0.0 {
            return Ok(DirectImpact {
                sector: key.to_string(),
                direct_output: 0.0,
                direct_jobs: 0,
                investment_amount: amount,
            });
        }

        Ok(DirectImpact {
            sector: key.to_string(),
            direct_output: amount,
            direct_jobs: self.cascade(amount, calibration).direct,
            investment_amount: amount,
        })
    }

    pub fn calculate_indirect_impact(&self, amount: f64, sector: &str) -> Result<IndirectImpact> {
        let (_, calibration) = self.calibration.sector(sector)?;
        let supply_chain_factor = self.supply_chain_factor(calibration);

        Ok(IndirectImpact {
            indirect_output: amount.max(0.0) * supply_chain_factor,
            indirect_jobs: self.cascade(amount, calibration).indirect,
            supply_chain_factor,
        })
    }

    pub fn calculate_induced_impact(&self, amount: f64, sector: &str) -> Result<InducedImpact> {
        let (_, calibration) = self.calibration.sector(sector)?;
        let induced_factor = self.induced_factor(calibration);

        Ok(InducedImpact {
            induced_output: amount.max(0.0) * induced_factor,
            induced_jobs: self.cascade(amount, calibration).induced,
            induced_factor,
        })
    }

    pub fn calculate_total_impact(&self, amount: f64, sector: &str) -> Result<TotalImpact> {
        let direct = self.calculate_direct_impact(amount, sector)?;
        let indirect = self.calculate_indirect_impact(amount, sector)?;
        let induced = self.calculate_induced_impact(amount, sector)?;

        let total_output = direct.direct_output + indirect.indirect_output + induced.induced_output;
        let output_multiplier = if amount > 0.0 {
            total_output / amount
        } else {
            0.0
        };

        Ok(TotalImpact {
            direct,
            indirect,
            induced,
            total_output,
            output_multiplier,
        })
    }

    pub fn calculate_job_creation(&self, amount: f64, sector: &str) -> Result<JobsBreakdown> {
        let (key, calibration) = self.calibration.sector(sector)?;
        let policy = &self.calibration.impact;
        let jobs = self.cascade(amount, calibration);
        let total_jobs = jobs.direct + jobs.indirect + jobs.induced;

        let female = calibration.female_share;
        let gender_split = GenderSplit {
            male: round_dp((1.0 - female) * 100.0, 1),
            female: round_dp(female * 100.0, 1),
        };

        Ok(JobsBreakdown {
            sector: key.to_string(),
            direct_jobs: jobs.direct,
            indirect_jobs: jobs.indirect,
            induced_jobs: jobs.induced,
            total_jobs,
            skills_distribution: self.calibration.skills_for(calibration),
            gender_split,
            construction_phase: (total_jobs as f64 * policy.construction_share) as u64,
            operational_phase: (total_jobs as f64 * policy.operational_share) as u64,
        })
    }

    /// Annual tax take of the investment.
    ///
    /// Inside an SEZ the corporate rate is the incentive package's rate when
    /// it names one, otherwise the calibrated holiday rate.
    pub fn calculate_tax_revenue(
        &self,
        amount: f64,
        sector: &str,
        is_sez: bool,
        incentives: Option<&SezIncentives>,
    ) -> Result<TaxBreakdown> {
        let (_, calibration) = self.calibration.sector(sector)?;
        let tax = &self.calibration.tax;

        let revenue = amount.max(0.0) * calibration.multipliers.output * tax.revenue_factor;
        let corporate_rate = if is_sez {
            incentives
                .and_then(|i| i.corporate_tax_rate)
                .unwrap_or(tax.sez_holiday_rate)
        } else {
            tax.standard_corporate_rate
        };

        let direct_jobs = self.cascade(amount, calibration).direct as f64;
        let corporate_tax = round_dp(revenue * tax.profit_margin * corporate_rate, 2);
        let vat = round_dp(revenue * tax.vat_rate, 2);
        let paye = round_dp(direct_jobs * tax.average_salary * tax.paye_rate, 2);
        let withholding = round_dp(revenue * tax.withholding_rate, 2);

        Ok(TaxBreakdown {
            corporate_tax,
            vat,
            paye,
            withholding,
            total_tax: round_dp(corporate_tax + vat + paye + withholding, 2),
            effective_rate: round_dp(calibration.multipliers.tax_rate, 4),
        })
    }

    fn supply_chain_factor(&self, sector: &SectorCalibration) -> f64 {
        (sector.multipliers.output - 1.0) * self.calibration.impact.supply_chain_share
    }

    fn induced_factor(&self, sector: &SectorCalibration) -> f64 {
        (sector.multipliers.income - 1.0) * self.calibration.impact.induced_income_share
    }

    fn cascade(&self, amount: f64, sector: &SectorCalibration) -> JobCascade {
        if amount <= 0.0 {
            return JobCascade {
                direct: 0,
                indirect: 0,
                induced: 0,
            };
        }
        let policy = &self.calibration.impact;

        let direct = whole_jobs(amount / DOLLARS_PER_MILLION * sector.jobs_per_million);
        let indirect = whole_jobs(
            direct as f64 * (sector.multipliers.employment - 1.0) * policy.indirect_employment_share,
        );
        let induced = whole_jobs(
            (direct + indirect) as f64 * self.induced_factor(sector) * policy.induced_employment_share,
        );

        JobCascade {
            direct,
            indirect,
            induced,
        }
    }
}
