//! Rule-based classification of free-text investor inquiries
//!
//! Everything here is keyword and pattern matching over the lower-cased
//! text; there is no statistical model.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::{Calibration, InquiryLexicon};
use crate::model::{
    InquiryAnalysis, InquiryEntities, InquiryType, InvestmentSize, Sentiment, SentimentScore,
};
use crate::stats::round_dp;

const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

static DOLLAR_BILLIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d+(?:\.\d+)?)\s*(?:billion|bn|b)\b").unwrap());
static DOLLAR_MILLIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d+(?:\.\d+)?)\s*(?:million|mn|m)\b").unwrap());
static MILLIONS_USD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:million|mn|m)\s*(?:usd|dollars?|\$)").unwrap()
});
static BILLIONS_USD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:billion|bn|b)\s*(?:usd|dollars?|\$)").unwrap()
});
static BETWEEN_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"between\s*\$?\s*(\d+)\s*(?:and|to|-)\s*\$?\s*(\d+)\s*(million|billion|m|b)")
        .unwrap()
});

/// Single-amount patterns in priority order, with their multiplier
fn amount_patterns() -> [(&'static Regex, f64); 4] {
    [
        (&*DOLLAR_BILLIONS, BILLION),
        (&*DOLLAR_MILLIONS, MILLION),
        (&*MILLIONS_USD, MILLION),
        (&*BILLIONS_USD, BILLION),
    ]
}

/// Format like a float repr: `50.0`, `2.5`
fn display_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn unit_letter(multiplier: f64) -> char {
    if multiplier == BILLION { 'B' } else { 'M' }
}

fn capture_number(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

/// `financial_services` → `Financial Services`
fn title_case(label: &str) -> String {
    label
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub struct InquiryClassifier<'a> {
    calibration: &'a Calibration,
    lexicon: &'a InquiryLexicon,
}

impl<'a> InquiryClassifier<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            calibration,
            lexicon: &calibration.inquiry,
        }
    }

    /// Sectors whose keywords appear in the text, or `["general"]`.
    pub fn extract_sectors(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        let found: Vec<String> = self
            .lexicon
            .sectors
            .iter()
            .filter(|group| group.matches(&text))
            .map(|group| group.name.clone())
            .collect();

        if found.is_empty() {
            vec![self.lexicon.general_sector.clone()]
        } else {
            found
        }
    }

    /// First size pattern that matches: single amounts, then a range.
    pub fn extract_investment_size(&self, text: &str) -> Option<InvestmentSize> {
        let text = text.to_lowercase();

        for (pattern, multiplier) in amount_patterns() {
            if let Some(value) = pattern.captures(&text).and_then(|c| capture_number(&c, 1)) {
                return Some(InvestmentSize::Amount {
                    amount: value * multiplier,
                    display: format!("${}{}", display_number(value), unit_letter(multiplier)),
                });
            }
        }

        let caps = BETWEEN_RANGE.captures(&text)?;
        let low = capture_number(&caps, 1)?;
        let high = capture_number(&caps, 2)?;
        let multiplier = if caps.get(3)?.as_str().starts_with('b') {
            BILLION
        } else {
            MILLION
        };
        Some(InvestmentSize::Range {
            min: low * multiplier,
            max: high * multiplier,
            display: format!(
                "${}-${}{}",
                display_number(low),
                display_number(high),
                unit_letter(multiplier)
            ),
        })
    }

    /// Highest-priority tier whose phrases appear, defaulting to exploratory.
    ///
    /// Tiers are tried in [`InquiryType::PRIORITY`] order whatever order the
    /// lexicon lists them in.
    pub fn classify_inquiry_type(&self, text: &str) -> InquiryType {
        let text = text.to_lowercase();
        InquiryType::PRIORITY
            .into_iter()
            .find(|tier| {
                self.lexicon
                    .signals
                    .iter()
                    .filter(|signals| signals.tier == *tier)
                    .flat_map(|signals| &signals.phrases)
                    .any(|p| text.contains(p.as_str()))
            })
            .unwrap_or(InquiryType::Exploratory)
    }

    /// Share of positive lexicon words among all lexicon words present.
    pub fn analyze_sentiment(&self, text: &str) -> SentimentScore {
        let text = text.to_lowercase();
        let count = |words: &[String]| words.iter().filter(|w| text.contains(w.as_str())).count();
        let positive = count(&self.lexicon.positive_words);
        let negative = count(&self.lexicon.negative_words);

        let total = positive + negative;
        if total == 0 {
            return SentimentScore {
                label: Sentiment::Neutral,
                score: 0.5,
            };
        }

        let score = positive as f64 / total as f64;
        let label = if score > 0.6 {
            Sentiment::Positive
        } else if score < 0.4 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        SentimentScore {
            label,
            score: round_dp(score, 2),
        }
    }

    pub fn extract_concerns(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        self.lexicon
            .concerns
            .iter()
            .filter(|group| group.matches(&text))
            .map(|group| group.name.clone())
            .collect()
    }

    /// Country mentions (title-cased) and detected sectors.
    pub fn extract_key_entities(&self, text: &str) -> InquiryEntities {
        let lower = text.to_lowercase();
        let countries = self
            .lexicon
            .countries
            .iter()
            .filter(|c| lower.contains(c.as_str()))
            .map(|c| title_case(c))
            .collect();

        InquiryEntities {
            countries,
            sectors: self.extract_sectors(text),
        }
    }

    /// Handling department for the first detected sector.
    pub fn department(&self, sectors: &[String]) -> String {
        sectors
            .first()
            .and_then(|s| self.calibration.sectors.get(s))
            .and_then(|s| s.department.clone())
            .unwrap_or_else(|| self.lexicon.default_department.clone())
    }

    pub fn suggested_response(&self, inquiry_type: InquiryType, sectors: &[String]) -> String {
        let sector_text = sectors
            .iter()
            .map(|s| title_case(s))
            .collect::<Vec<_>>()
            .join(", ");

        self.lexicon
            .templates
            .for_tier(inquiry_type)
            .replace("{sectors}", &sector_text)
            .replace("{jurisdiction}", &self.lexicon.jurisdiction)
    }

    pub fn full_analysis(&self, text: &str) -> InquiryAnalysis {
        let sectors = self.extract_sectors(text);
        let inquiry_type = self.classify_inquiry_type(text);

        InquiryAnalysis {
            investment_size: self.extract_investment_size(text),
            sentiment: self.analyze_sentiment(text),
            concerns: self.extract_concerns(text),
            entities: self.extract_key_entities(text),
            department: self.department(&sectors),
            suggested_response: self.suggested_response(inquiry_type, &sectors),
            inquiry_type,
            sectors,
        }
    }
}
