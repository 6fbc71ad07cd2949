//! Tests for the inquiry classifier
//!
//! These tests verify that:
//! - Sector keywords, size patterns and commitment tiers are detected
//! - Tier priority holds however the lexicon orders its signals
//! - Sentiment is the positive share of lexicon hits
//! - Concerns and country mentions are extracted
//! - The full analysis routes to the right department and template

use crate::config::Calibration;
use crate::inquiry::InquiryClassifier;
use crate::model::{InquiryType, InvestmentSize, Sentiment};

#[test]
fn test_ready_to_invest_lithium_inquiry() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);
    let text = "We are ready to invest $50 million in lithium mining in Zimbabwe";

    let analysis = classifier.full_analysis(text);

    assert!(analysis.sectors.contains(&"mining".to_string()));
    assert_eq!(analysis.inquiry_type, InquiryType::ReadyToInvest);
    assert_eq!(
        analysis.investment_size,
        Some(InvestmentSize::Amount {
            amount: 50_000_000.0,
            display: "$50.0M".to_string(),
        })
    );
    assert_eq!(analysis.department, "Mining & Natural Resources Division");
    assert!(analysis.suggested_response.contains("Zimbabwe's Mining sector(s)"));
}

#[test]
fn test_general_sector_when_nothing_matches() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let analysis = classifier.full_analysis("Hello there");

    assert_eq!(analysis.sectors, vec!["general"]);
    assert_eq!(analysis.inquiry_type, InquiryType::Exploratory);
    assert_eq!(analysis.investment_size, None);
    assert_eq!(analysis.department, "Investment Promotion Division");
    assert_eq!(analysis.sentiment.label, Sentiment::Neutral);
    assert_eq!(analysis.sentiment.score, 0.5);
}

#[test]
fn test_multiple_sectors_in_lexicon_order() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let sectors = classifier.extract_sectors("A HOTEL and a Solar plant near the gold belt");
    assert_eq!(sectors, vec!["mining", "tourism", "energy"]);
}

#[test]
fn test_size_patterns() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let billions = classifier.extract_investment_size("a $2.5 billion program").unwrap();
    assert_eq!(billions.display(), "$2.5B");
    assert!(matches!(billions, InvestmentSize::Amount { amount, .. } if amount == 2.5e9));

    let suffix = classifier.extract_investment_size("roughly 15 million USD").unwrap();
    assert_eq!(suffix.display(), "$15.0M");

    let range = classifier
        .extract_investment_size("budget between 10 and 20 million")
        .unwrap();
    assert_eq!(
        range,
        InvestmentSize::Range {
            min: 10_000_000.0,
            max: 20_000_000.0,
            display: "$10.0-$20.0M".to_string(),
        }
    );

    let billion_range = classifier
        .extract_investment_size("between 1 to 3 billion")
        .unwrap();
    assert!(matches!(billion_range, InvestmentSize::Range { max, .. } if max == 3e9));

    assert_eq!(classifier.extract_investment_size("no figures yet"), None);
}

#[test]
fn test_inquiry_tiers() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    assert_eq!(
        classifier.classify_inquiry_type("We have an approved budget"),
        InquiryType::ReadyToInvest
    );
    assert_eq!(
        classifier.classify_inquiry_type("We are allocating capital for Q3"),
        InquiryType::ReadyToInvest
    );
    assert_eq!(
        classifier.classify_inquiry_type("Interested in investing soon"),
        InquiryType::Serious
    );
    assert_eq!(
        classifier.classify_inquiry_type("Please tell me about the country"),
        InquiryType::Exploratory
    );
    assert_eq!(classifier.classify_inquiry_type(""), InquiryType::Exploratory);
}

#[test]
fn test_sentiment() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let positive = classifier.analyze_sentiment("Exciting growth potential, we are confident");
    assert_eq!(positive.label, Sentiment::Positive);
    assert_eq!(positive.score, 1.0);

    let negative = classifier.analyze_sentiment("We are worried about the risk");
    assert_eq!(negative.label, Sentiment::Negative);
    assert_eq!(negative.score, 0.0);

    // One positive, one negative hit
    let mixed = classifier.analyze_sentiment("Great growth but real concern");
    assert_eq!(mixed.label, Sentiment::Neutral);
    assert_eq!(mixed.score, 0.5);

    // Repeated words count once
    let repeated = classifier.analyze_sentiment("growth growth growth, one risk");
    assert_eq!(repeated.score, 0.5);
}

#[test]
fn test_concerns() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let concerns =
        classifier.extract_concerns("What about currency repatriation and land ownership? Any corruption?");
    assert_eq!(concerns, vec!["currency_risk", "legal", "corruption"]);
    assert!(classifier.extract_concerns("All good").is_empty());
}

#[test]
fn test_country_entities_are_title_cased() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let entities = classifier.extract_key_entities("Investors from South Africa and the UK");

    assert_eq!(entities.countries, vec!["South Africa", "Uk"]);
    assert_eq!(entities.sectors, vec!["general"]);
}

#[test]
fn test_serious_inquiry_response() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let analysis = classifier
        .full_analysis("We are interested in investing in a solar farm and considering the currency risk");

    assert_eq!(analysis.sectors, vec!["energy"]);
    assert_eq!(analysis.inquiry_type, InquiryType::Serious);
    assert_eq!(analysis.concerns, vec!["currency_risk"]);
    assert_eq!(analysis.sentiment.label, Sentiment::Negative);
    assert_eq!(analysis.department, "Energy & Infrastructure Division");
    assert!(analysis.suggested_response.contains("Energy"));
    assert!(!analysis.suggested_response.contains('{'));
}

#[test]
fn test_response_joins_readable_sector_names() {
    let calibration = Calibration::default();
    let classifier = InquiryClassifier::new(&calibration);

    let response = classifier.suggested_response(
        InquiryType::Exploratory,
        &["financial_services".to_string(), "ict".to_string()],
    );
    assert!(response.contains("Financial Services, Ict"), "{response}");
}

#[test]
fn test_tier_priority_ignores_lexicon_order() {
    let mut calibration = Calibration::default();
    calibration.inquiry.signals.reverse();
    let classifier = InquiryClassifier::new(&calibration);

    let text = "We are ready to invest and would like information";
    assert_eq!(classifier.classify_inquiry_type(text), InquiryType::ReadyToInvest);
    assert_eq!(
        classifier.classify_inquiry_type("Considering a plant, please send information"),
        InquiryType::Serious
    );
}
