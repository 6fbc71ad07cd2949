//! Investor and opportunity profiles and their match scores

use serde::{Deserialize, Serialize};

/// Ordinal risk level shared by investors and opportunities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    pub fn distance(self, other: RiskLevel) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestorProfile {
    pub id: String,
    pub company_name: String,
    pub country_of_origin: Option<String>,
    /// Sector codes, compared case-insensitively
    pub sectors_of_interest: Vec<String>,
    pub investment_range_min: Option<f64>,
    /// `None` means no upper limit
    pub investment_range_max: Option<f64>,
    pub risk_appetite: Option<RiskLevel>,
    pub geographic_preferences: Vec<String>,
    pub sez_interest: bool,
    pub jv_preference: bool,
    /// Investor has prior activity in the target market
    pub previous_investments: bool,
    pub inquiry_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpportunityProfile {
    pub id: String,
    pub title: String,
    pub sector_code: String,
    pub province: String,
    pub minimum_investment: Option<f64>,
    pub maximum_investment: Option<f64>,
    pub expected_return_rate: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    /// Located inside a special economic zone
    pub in_sez: bool,
    pub jv_available: bool,
    pub tags: Vec<String>,
}

/// The seven independently weighted scoring factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    SectorAlignment,
    SizeFit,
    RiskCompatibility,
    GeographicMatch,
    SezAlignment,
    HistoricalSimilarity,
    SemanticMatch,
}

impl MatchFactor {
    pub const ALL: [MatchFactor; 7] = [
        MatchFactor::SectorAlignment,
        MatchFactor::SizeFit,
        MatchFactor::RiskCompatibility,
        MatchFactor::GeographicMatch,
        MatchFactor::SezAlignment,
        MatchFactor::HistoricalSimilarity,
        MatchFactor::SemanticMatch,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SectorAlignment => "Sector Alignment",
            Self::SizeFit => "Size Fit",
            Self::RiskCompatibility => "Risk Compatibility",
            Self::GeographicMatch => "Geographic Match",
            Self::SezAlignment => "Sez Alignment",
            Self::HistoricalSimilarity => "Historical Similarity",
            Self::SemanticMatch => "Semantic Match",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sector_alignment: f64,
    pub size_fit: f64,
    pub risk_compatibility: f64,
    pub geographic_match: f64,
    pub sez_alignment: f64,
    pub historical_similarity: f64,
    pub semantic_match: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, factor: MatchFactor) -> f64 {
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

    /// Factors paired with their raw scores, in declaration order
    pub fn factors(&self) -> [(MatchFactor, f64); 7] {
        MatchFactor::ALL.map(|f| (f, self.get(f)))
    }

    pub fn total(&self) -> f64 {
        self.factors().iter().map(|(_, s)| s).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub breakdown: ScoreBreakdown,
    /// Sum of the sub-scores, rounded to one decimal; may exceed 100
    pub overall_score: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub candidate_id: String,
    pub candidate_name: String,
    /// 1-based position after sorting
    pub rank: usize,
    pub score: MatchScore,
}
