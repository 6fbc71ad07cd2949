//! Economic impact cascade results

use serde::{Deserialize, Serialize};

/// Share of created jobs per skill tier, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillsDistribution {
    pub unskilled: f64,
    pub semi_skilled: f64,
    pub skilled: f64,
    pub professional: f64,
}

impl SkillsDistribution {
    pub const fn new(unskilled: f64, semi_skilled: f64, skilled: f64, professional: f64) -> Self {
        Self {
            unskilled,
            semi_skilled,
            skilled,
            professional,
        }
    }

    pub fn total(&self) -> f64 {
        self.unskilled + self.semi_skilled + self.skilled + self.professional
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectImpact {
    pub sector: String,
    pub direct_output: f64,
    pub direct_jobs: u64,
    pub investment_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndirectImpact {
    pub indirect_output: f64,
    pub indirect_jobs: u64,
    pub supply_chain_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InducedImpact {
    pub induced_output: f64,
    pub induced_jobs: u64,
    pub induced_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalImpact {
    pub direct: DirectImpact,
    pub indirect: IndirectImpact,
    pub induced: InducedImpact,
    pub total_output: f64,
    /// `total_output / amount`, 0 for non-positive amounts
    pub output_multiplier: f64,
}

/// Male/female shares of created jobs, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderSplit {
    pub male: f64,
    pub female: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobsBreakdown {
    pub sector: String,
    pub direct_jobs: u64,
    pub indirect_jobs: u64,
    pub induced_jobs: u64,
    /// Always `direct_jobs + indirect_jobs + induced_jobs`
    pub total_jobs: u64,
    pub skills_distribution: SkillsDistribution,
    pub gender_split: GenderSplit,
    pub construction_phase: u64,
    pub operational_phase: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub corporate_tax: f64,
    pub vat: f64,
    pub paye: f64,
    pub withholding: f64,
    pub total_tax: f64,
    pub effective_rate: f64,
}

/// Incentive package of a special economic zone
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SezIncentives {
    #[serde(default)]
    pub name: Option<String>,
    /// Overrides the calibrated SEZ holiday rate
    #[serde(default)]
    pub corporate_tax_rate: Option<f64>,
    #[serde(default)]
    pub tax_holiday_years: Option<u32>,
}
