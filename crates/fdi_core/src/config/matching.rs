use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::MatchFactor;

/// Nominal weight of each factor, shown in match explanations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub sector_alignment: f64,
    pub size_fit: f64,
    pub risk_compatibility: f64,
    pub geographic_match: f64,
    pub sez_alignment: f64,
    pub historical_similarity: f64,
    pub semantic_match: f64,
}

impl FactorWeights {
    pub fn weight(&self, factor: MatchFactor) -> f64 {
        match factor {
            MatchFactor::SectorAlignment => self.sector_alignment,
            MatchFactor::SizeFit => self.size_fit,
            MatchFactor::RiskCompatibility => self.risk_compatibility,
            MatchFactor::GeographicMatch => self.geographic_match,
            MatchFactor::SezAlignment => self.sez_alignment,
            MatchFactor::HistoricalSimilarity => self.historical_similarity,
            MatchFactor::SemanticMatch => self.semantic_match,
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            sector_alignment: 25.0,
            size_fit: 20.0,
            risk_compatibility: 15.0,
            geographic_match: 10.0,
            sez_alignment: 10.0,
            historical_similarity: 10.0,
            semantic_match: 10.0,
        }
    }
}

/// Scores awarded by the investor/opportunity matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingCalibration {
    pub weights: FactorWeights,
    /// Lower-case sector code to the codes considered adjacent to it
    pub adjacency: FxHashMap<String, Vec<String>>,

    pub sector_exact: f64,
    pub sector_adjacent: f64,

    pub size_max: f64,
    /// Investor range width used when the investor has no maximum, as a
    /// multiple of the minimum
    pub unbounded_width_factor: f64,

    /// Indexed by ordinal risk distance; larger distances score 0
    pub risk_by_distance: Vec<f64>,

    pub geo_no_preference: f64,
    pub geo_match: f64,
    pub geo_miss: f64,

    pub sez_both: f64,
    pub sez_neither: f64,
    pub sez_mismatch: f64,

    pub historical_base: f64,
    pub historical_prior_bonus: f64,

    /// Flat placeholder, not derived from text
    pub semantic_constant: f64,
}

impl MatchingCalibration {
    pub fn is_adjacent(&self, opportunity_sector: &str, interests: &[String]) -> bool {
        self.adjacency
            .get(opportunity_sector)
            .is_some_and(|adjacent| adjacent.iter().any(|s| interests.contains(s)))
    }

    pub fn risk_score(&self, distance: u8) -> f64 {
        self.risk_by_distance
            .get(usize::from(distance))
            .copied()
            .unwrap_or(0.0)
    }
}

fn default_adjacency() -> FxHashMap<String, Vec<String>> {
    [
        ("min", ["enr", "inf"]),
        ("agr", ["man", "hlt"]),
        ("tou", ["inf", "ict"]),
        ("man", ["agr", "min"]),
        ("ict", ["fin", "man"]),
        ("enr", ["min", "inf"]),
        ("inf", ["enr", "man"]),
        ("fin", ["ict", "man"]),
        ("hlt", ["agr", "man"]),
    ]
    .into_iter()
    .map(|(code, adjacent)| {
        (
            code.to_string(),
            adjacent.iter().map(|s| s.to_string()).collect(),
        )
    })
    .collect()
}

impl Default for MatchingCalibration {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            adjacency: default_adjacency(),
            sector_exact: 25.0,
            sector_adjacent: 15.0,
            size_max: 20.0,
            unbounded_width_factor: 10.0,
            risk_by_distance: vec![15.0, 8.0, 2.0],
            geo_no_preference: 5.0,
            geo_match: 10.0,
            geo_miss: 2.0,
            sez_both: 10.0,
            sez_neither: 5.0,
            sez_mismatch: 2.0,
            historical_base: 5.0,
            historical_prior_bonus: 3.0,
            semantic_constant: 5.0,
        }
    }
}
