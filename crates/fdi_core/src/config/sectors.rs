//! Per-sector calibration constants
//!
//! Sources: ZIMSTAT National Accounts, World Bank Development Indicators,
//! RBZ reports.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{SectorAdjustment, SkillsDistribution};

/// Input-output multipliers and effective tax rate of a sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorMultiplierProfile {
    pub output: f64,
    pub employment: f64,
    pub income: f64,
    pub tax_rate: f64,
}

/// Revenue ramp assumptions used by the ROI and GDP projections
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueProfile {
    pub growth: f64,
    pub op_ratio: f64,
    pub ramp_years: u32,
}

impl Default for RevenueProfile {
    fn default() -> Self {
        Self {
            growth: 0.08,
            op_ratio: 0.60,
            ramp_years: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCalibration {
    pub multipliers: SectorMultiplierProfile,
    pub jobs_per_million: f64,
    /// Falls back to the configured fallback sector when absent
    #[serde(default)]
    pub skills: Option<SkillsDistribution>,
    #[serde(default)]
    pub adjustment: SectorAdjustment,
    /// Female share of created jobs (0-1)
    pub female_share: f64,
    #[serde(default)]
    pub revenue: RevenueProfile,
    #[serde(default)]
    pub department: Option<String>,
}

struct Row {
    key: &'static str,
    code: &'static str,
    multipliers: SectorMultiplierProfile,
    jobs_per_million: f64,
    skills: SkillsDistribution,
    adjustment: SectorAdjustment,
    female_share: f64,
    revenue: RevenueProfile,
    department: &'static str,
}

const fn multipliers(output: f64, employment: f64, income: f64, tax_rate: f64) -> SectorMultiplierProfile {
    SectorMultiplierProfile {
        output,
        employment,
        income,
        tax_rate,
    }
}

const fn adjustment(return_adj: f64, vol_adj: f64) -> SectorAdjustment {
    SectorAdjustment {
        return_adj,
        vol_adj,
    }
}

const fn revenue(growth: f64, op_ratio: f64, ramp_years: u32) -> RevenueProfile {
    RevenueProfile {
        growth,
        op_ratio,
        ramp_years,
    }
}

const ROWS: [Row; 9] = [
    Row {
        key: "mining",
        code: "MIN",
        multipliers: multipliers(2.1, 1.8, 1.6, 0.12),
        jobs_per_million: 4.2,
        skills: SkillsDistribution::new(30.0, 35.0, 25.0, 10.0),
        adjustment: adjustment(0.03, 0.05),
        female_share: 0.30,
        revenue: revenue(0.08, 0.65, 3),
        department: "Mining & Natural Resources Division",
    },
    Row {
        key: "agriculture",
        code: "AGR",
        multipliers: multipliers(2.4, 3.2, 1.9, 0.08),
        jobs_per_million: 8.5,
        skills: SkillsDistribution::new(45.0, 30.0, 18.0, 7.0),
        adjustment: adjustment(-0.02, 0.08),
        female_share: 0.40,
        revenue: revenue(0.06, 0.60, 2),
        department: "Agriculture & Agro-processing Division",
    },
    Row {
        key: "manufacturing",
        code: "MAN",
        multipliers: multipliers(2.3, 2.5, 2.0, 0.15),
        jobs_per_million: 5.8,
        skills: SkillsDistribution::new(25.0, 40.0, 25.0, 10.0),
        adjustment: adjustment(0.0, 0.03),
        female_share: 0.30,
        revenue: revenue(0.07, 0.65, 3),
        department: "Manufacturing & Industrial Division",
    },
    Row {
        key: "tourism",
        code: "TOU",
        multipliers: multipliers(2.0, 2.8, 1.7, 0.10),
        jobs_per_million: 7.2,
        skills: SkillsDistribution::new(35.0, 35.0, 20.0, 10.0),
        adjustment: adjustment(0.01, 0.06),
        female_share: 0.40,
        revenue: revenue(0.10, 0.55, 2),
        department: "Tourism & Hospitality Division",
    },
    Row {
        key: "ict",
        code: "ICT",
        multipliers: multipliers(1.8, 1.5, 2.2, 0.18),
        jobs_per_million: 3.5,
        skills: SkillsDistribution::new(5.0, 15.0, 45.0, 35.0),
        adjustment: adjustment(0.05, 0.04),
        female_share: 0.30,
        revenue: revenue(0.15, 0.50, 1),
        department: "ICT & Innovation Division",
    },
    Row {
        key: "energy",
        code: "ENR",
        multipliers: multipliers(2.5, 1.4, 1.5, 0.14),
        jobs_per_million: 2.8,
        skills: SkillsDistribution::new(20.0, 30.0, 35.0, 15.0),
        adjustment: adjustment(-0.01, 0.02),
        female_share: 0.30,
        revenue: revenue(0.05, 0.70, 4),
        department: "Energy & Infrastructure Division",
    },
    Row {
        key: "infrastructure",
        code: "INF",
        multipliers: multipliers(2.7, 3.0, 2.1, 0.11),
        jobs_per_million: 6.5,
        skills: SkillsDistribution::new(40.0, 30.0, 20.0, 10.0),
        adjustment: adjustment(-0.02, 0.02),
        female_share: 0.30,
        revenue: revenue(0.06, 0.60, 3),
        department: "Energy & Infrastructure Division",
    },
    Row {
        key: "financial_services",
        code: "FIN",
        multipliers: multipliers(1.9, 1.3, 2.3, 0.20),
        jobs_per_million: 2.2,
        skills: SkillsDistribution::new(5.0, 20.0, 40.0, 35.0),
        adjustment: adjustment(0.04, 0.05),
        female_share: 0.30,
        revenue: revenue(0.10, 0.45, 1),
        department: "Financial Services Division",
    },
    Row {
        key: "health",
        code: "HLT",
        multipliers: multipliers(2.2, 2.0, 1.8, 0.09),
        jobs_per_million: 4.0,
        skills: SkillsDistribution::new(15.0, 25.0, 35.0, 25.0),
        adjustment: adjustment(0.02, 0.03),
        female_share: 0.40,
        revenue: revenue(0.08, 0.55, 2),
        department: "Health & Pharmaceuticals Division",
    },
];

pub(crate) fn default_sectors() -> FxHashMap<String, SectorCalibration> {
    ROWS.iter()
        .map(|row| {
            (
                row.key.to_string(),
                SectorCalibration {
                    multipliers: row.multipliers,
                    jobs_per_million: row.jobs_per_million,
                    skills: Some(row.skills),
                    adjustment: row.adjustment,
                    female_share: row.female_share,
                    revenue: row.revenue,
                    department: Some(row.department.to_string()),
                },
            )
        })
        .collect()
}

/// Upper-case sector codes (`MIN`) to calibration keys (`mining`)
pub(crate) fn default_sector_codes() -> FxHashMap<String, String> {
    ROWS.iter()
        .map(|row| (row.code.to_string(), row.key.to_string()))
        .collect()
}
