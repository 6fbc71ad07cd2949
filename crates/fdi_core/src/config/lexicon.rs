//! Keyword tables for the rule-based inquiry classifier
//!
//! All phrases are lower-case and matched as substrings of the lower-cased
//! inquiry text. Group order is significant: it decides the order of
//! extracted sectors and concerns.

use serde::{Deserialize, Serialize};

use crate::model::InquiryType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|k| text_lower.contains(k.as_str()))
    }
}

/// Phrases signalling one commitment tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSignals {
    pub tier: InquiryType,
    pub phrases: Vec<String>,
}

/// Reply templates; `{sectors}` and `{jurisdiction}` are substituted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTemplates {
    pub ready_to_invest: String,
    pub serious: String,
    pub exploratory: String,
}

impl ResponseTemplates {
    pub fn for_tier(&self, tier: InquiryType) -> &str {
        match tier {
            InquiryType::ReadyToInvest => &self.ready_to_invest,
            InquiryType::Serious => &self.serious,
            InquiryType::Exploratory => &self.exploratory,
        }
    }
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self {
            ready_to_invest: "Thank you for your interest in investing in {jurisdiction}'s {sectors} sector(s). \
                We would be delighted to arrange a meeting with our Senior Investment Promotion Officer \
                to discuss your investment plans in detail. Please let us know your preferred schedule."
                .to_string(),
            serious: "Thank you for considering {jurisdiction} as an investment destination. \
                The {sectors} sector(s) offer significant opportunities. \
                We will prepare a detailed investment brief and connect you with relevant stakeholders."
                .to_string(),
            exploratory: "Thank you for your inquiry about investment opportunities in {jurisdiction}. \
                We have prepared general information on the {sectors} sector(s) for your review. \
                Please do not hesitate to contact us for more detailed information."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiryLexicon {
    pub sectors: Vec<KeywordGroup>,
    /// Label returned when no sector keyword matches
    pub general_sector: String,
    /// Checked in order; the first tier with a matching phrase wins
    pub signals: Vec<TierSignals>,
    pub concerns: Vec<KeywordGroup>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub countries: Vec<String>,
    pub default_department: String,
    pub jurisdiction: String,
    pub templates: ResponseTemplates,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for InquiryLexicon {
    fn default() -> Self {
        let sectors = vec![
            KeywordGroup::new(
                "mining",
                &["mining", "mineral", "gold", "platinum", "lithium", "chrome", "diamond", "quarry", "ore"],
            ),
            KeywordGroup::new(
                "agriculture",
                &[
                    "agriculture", "farming", "agro", "tobacco", "horticulture", "livestock", "crop", "dairy",
                    "maize",
                ],
            ),
            KeywordGroup::new(
                "tourism",
                &[
                    "tourism", "hotel", "safari", "victoria falls", "hospitality", "lodge", "travel",
                    "eco-tourism",
                ],
            ),
            KeywordGroup::new(
                "manufacturing",
                &[
                    "manufacturing", "factory", "textile", "chemical", "food processing", "steel", "cement",
                    "industrial",
                ],
            ),
            KeywordGroup::new(
                "ict",
                &[
                    "ict", "technology", "software", "fintech", "digital", "telecom", "data center", "app",
                    "internet",
                ],
            ),
            KeywordGroup::new(
                "energy",
                &[
                    "energy", "solar", "hydro", "power", "electricity", "renewable", "wind", "biomass", "thermal",
                ],
            ),
            KeywordGroup::new(
                "infrastructure",
                &[
                    "infrastructure", "construction", "road", "bridge", "housing", "water", "sanitation",
                    "building",
                ],
            ),
            KeywordGroup::new(
                "financial_services",
                &[
                    "bank", "insurance", "microfinance", "fintech", "capital market", "fund",
                    "investment banking",
                ],
            ),
            KeywordGroup::new(
                "health",
                &[
                    "health", "pharmaceutical", "hospital", "medicine", "medical", "clinic", "drug", "biotech",
                ],
            ),
        ];

        let signals = vec![
            TierSignals {
                tier: InquiryType::ReadyToInvest,
                phrases: words(&[
                    "ready to invest", "committed", "finalizing", "approved budget", "looking to deploy",
                    "seeking to invest", "prepared to", "wish to commit", "allocat",
                ]),
            },
            TierSignals {
                tier: InquiryType::Serious,
                phrases: words(&[
                    "interested in investing", "exploring opportunities", "considering", "evaluating",
                    "looking for", "seeking", "potential investment", "would like to",
                ]),
            },
            TierSignals {
                tier: InquiryType::Exploratory,
                phrases: words(&[
                    "curious", "learning about", "information", "general inquiry", "wondering",
                    "what opportunities", "tell me about", "overview",
                ]),
            },
        ];

        let concerns = vec![
            KeywordGroup::new(
                "political_risk",
                &["political", "stability", "governance", "policy change", "regulation"],
            ),
            KeywordGroup::new(
                "currency_risk",
                &["currency", "exchange rate", "devaluation", "forex", "repatriation"],
            ),
            KeywordGroup::new(
                "infrastructure",
                &["infrastructure", "power supply", "electricity", "road", "logistics"],
            ),
            KeywordGroup::new(
                "legal",
                &["legal", "property rights", "land", "ownership", "contract enforcement"],
            ),
            KeywordGroup::new("corruption", &["corruption", "transparency", "bribery"]),
        ];

        Self {
            sectors,
            general_sector: "general".to_string(),
            signals,
            concerns,
            positive_words: words(&[
                "opportunity", "growth", "potential", "promising", "attractive", "favorable", "exciting",
                "confident", "optimistic",
            ]),
            negative_words: words(&[
                "concern", "risk", "worried", "uncertain", "challenge", "difficult", "problem", "fear",
                "skeptical",
            ]),
            countries: words(&[
                "south africa", "china", "india", "uk", "united kingdom", "australia", "uae", "dubai", "usa",
                "united states", "germany", "france", "japan", "kenya", "netherlands", "brazil", "russia",
                "cyprus", "mauritius", "singapore",
            ]),
            default_department: "Investment Promotion Division".to_string(),
            jurisdiction: "Zimbabwe".to_string(),
            templates: ResponseTemplates::default(),
        }
    }
}
