//! Free-text inquiry analysis results

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvestmentSize {
    /// A single amount, e.g. "$50 million"
    Amount { amount: f64, display: String },
    /// An explicit "between X and Y" range
    Range { min: f64, max: f64, display: String },
}

impl InvestmentSize {
    pub fn display(&self) -> &str {
        match self {
            InvestmentSize::Amount { display, .. } | InvestmentSize::Range { display, .. } => {
                display
            }
        }
    }
}

/// Commitment tier, checked in this priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryType {
    ReadyToInvest,
    Serious,
    Exploratory,
}

impl InquiryType {
    pub const PRIORITY: [InquiryType; 3] = [
        InquiryType::ReadyToInvest,
        InquiryType::Serious,
        InquiryType::Exploratory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::ReadyToInvest => "ready_to_invest",
            InquiryType::Serious => "serious",
            InquiryType::Exploratory => "exploratory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: Sentiment,
    /// Positive share of lexicon hits, 0.5 when there are none
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InquiryEntities {
    pub countries: Vec<String>,
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryAnalysis {
    /// Never empty; `["general"]` when nothing matched
    pub sectors: Vec<String>,
    pub investment_size: Option<InvestmentSize>,
    pub inquiry_type: InquiryType,
    pub sentiment: SentimentScore,
    pub concerns: Vec<String>,
    pub entities: InquiryEntities,
    pub department: String,
    pub suggested_response: String,
}
