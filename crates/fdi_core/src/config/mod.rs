//! Calibration tables
//!
//! Every component borrows a `Calibration` at construction instead of
//! reading module-level constants, so tests and deployments can swap in a
//! different dataset. `Calibration::default()` is the built-in Zimbabwe
//! dataset. All structs use `#[serde(default)]`, so a YAML file only needs
//! to name the values it overrides.
//!
//! Maps are replaced rather than merged. Naming `sectors` swaps out the whole
//! sector table, and each entry must then give `multipliers`,
//! `jobs_per_million` and `female_share`. The same holds for `sector_codes`
//! and the scenario table.
//!
//! ```ignore
//! let calibration = Calibration::default();
//! calibration.validate()?;
//! let engine = MultiplierEngine::new(&calibration);
//! let jobs = engine.calculate_job_creation(25_000_000.0, "mining")?;
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, ConfigError, Result};
use crate::model::{normalize_sector_key, SkillsDistribution};

mod lexicon;
mod matching;
mod policy;
mod scenarios;
mod sectors;

pub use lexicon::{InquiryLexicon, KeywordGroup, ResponseTemplates, TierSignals};
pub use matching::{FactorWeights, MatchingCalibration};
pub use policy::{ForecastPolicy, ImpactPolicy, PortfolioPolicy, ReportPolicy, TaxPolicy};
pub use scenarios::ScenarioTable;
pub use sectors::{RevenueProfile, SectorCalibration, SectorMultiplierProfile};

/// Tolerance on the 100% skills total
const SKILLS_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    // === Simulation ===
    pub scenarios: ScenarioTable,

    // === Sectors ===
    /// Keyed by normalized sector key (`financial_services`)
    pub sectors: FxHashMap<String, SectorCalibration>,
    /// Upper-case sector codes (`MIN`) to sector keys
    pub sector_codes: FxHashMap<String, String>,
    /// Sector whose skills distribution is used when a sector has none
    pub skills_fallback_sector: String,

    // === Component policies ===
    pub tax: TaxPolicy,
    pub impact: ImpactPolicy,
    pub portfolio: PortfolioPolicy,
    pub forecast: ForecastPolicy,
    pub matching: MatchingCalibration,
    pub inquiry: InquiryLexicon,
    pub reports: ReportPolicy,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scenarios: ScenarioTable::default(),
            sectors: sectors::default_sectors(),
            sector_codes: sectors::default_sector_codes(),
            skills_fallback_sector: "manufacturing".to_string(),
            tax: TaxPolicy::default(),
            impact: ImpactPolicy::default(),
            portfolio: PortfolioPolicy::default(),
            forecast: ForecastPolicy::default(),
            matching: MatchingCalibration::default(),
            inquiry: InquiryLexicon::default(),
            reports: ReportPolicy::default(),
        }
    }
}

impl Calibration {
    /// Check the structural invariants the components rely on.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self
            .scenarios
            .scenarios
            .contains_key(&self.scenarios.default_scenario)
        {
            return Err(ConfigError::MissingDefaultScenario(
                self.scenarios.default_scenario.clone(),
            ));
        }

        for key in self.sector_keys() {
            let sector = &self.sectors[key];
            let multipliers = &sector.multipliers;
            let fields = [
                ("output multiplier", multipliers.output),
                ("employment multiplier", multipliers.employment),
                ("income multiplier", multipliers.income),
                ("tax rate", multipliers.tax_rate),
                ("jobs per million", sector.jobs_per_million),
                ("female share", sector.female_share),
            ];
            if let Some((field, _)) = fields.iter().find(|(_, value)| *value < 0.0) {
                return Err(ConfigError::NegativeCalibration {
                    sector: key.to_string(),
                    field: *field,
                });
            }

            if let Some(skills) = &sector.skills {
                let total = skills.total();
                if (total - 100.0).abs() > SKILLS_TOLERANCE {
                    return Err(ConfigError::SkillsNotNormalized {
                        sector: key.to_string(),
                        total,
                    });
                }
            }
        }

        if self.fallback_skills().is_none() {
            return Err(ConfigError::MissingFallbackSkills(
                self.skills_fallback_sector.clone(),
            ));
        }

        let (lower, upper) = (self.portfolio.min_weight, self.portfolio.max_weight);
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) || lower > upper {
            return Err(ConfigError::InvalidWeightBounds { lower, upper });
        }

        Ok(())
    }

    /// Sorted sector keys
    pub fn sector_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.sectors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Strict lookup of a sector by free-form name.
    ///
    /// Returns the normalized key alongside its calibration.
    pub fn sector(&self, name: &str) -> Result<(&str, &SectorCalibration)> {
        let key = normalize_sector_key(name);
        self.sectors
            .get_key_value(key.as_str())
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| AnalyticsError::UnknownSector {
                sector: key,
                known: self.sector_keys().join(", "),
            })
    }

    /// Map a sector code (`MIN`, `ict`) or a name to a sector key.
    ///
    /// Unknown codes pass through normalized, so the strict lookup later
    /// reports them.
    pub fn resolve_sector(&self, code_or_name: &str) -> String {
        let code = code_or_name.trim().to_uppercase();
        match self.sector_codes.get(&code) {
            Some(key) => key.clone(),
            None => normalize_sector_key(code_or_name),
        }
    }

    /// Skills distribution of a sector, falling back to the configured sector
    pub fn skills_for(&self, sector: &SectorCalibration) -> SkillsDistribution {
        sector
            .skills
            .or_else(|| self.fallback_skills())
            .unwrap_or_default()
    }

    fn fallback_skills(&self) -> Option<SkillsDistribution> {
        self.sectors
            .get(&self.skills_fallback_sector)
            .and_then(|s| s.skills)
    }
}
