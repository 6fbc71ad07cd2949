//! Tests for investor/opportunity matching
//!
//! These tests verify that:
//! - Each sub-score follows its scoring table
//! - Explanations quote the strongest factors
//! - Ranking is descending, stable on ties and numbered from 1

use crate::config::Calibration;
use crate::matching::MatchRecommender;
use crate::model::{InvestorProfile, OpportunityProfile, RiskLevel, ScoreBreakdown};

fn investor(sectors: &[&str], min: Option<f64>, max: Option<f64>) -> InvestorProfile {
    InvestorProfile {
        id: "inv-1".into(),
        company_name: "Acme Resources".into(),
        sectors_of_interest: sectors.iter().map(|s| s.to_string()).collect(),
        investment_range_min: min,
        investment_range_max: max,
        ..Default::default()
    }
}

fn opportunity(id: &str, sector: &str, min: Option<f64>, max: Option<f64>) -> OpportunityProfile {
    OpportunityProfile {
        id: id.into(),
        title: format!("Project {id}"),
        sector_code: sector.into(),
        province: "Midlands".into(),
        minimum_investment: min,
        maximum_investment: max,
        ..Default::default()
    }
}

#[test]
fn test_matching_sector_and_range() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);

    let score = recommender.compute_match_score(
        &investor(&["mining"], Some(1e6), Some(1e8)),
        &opportunity("op-1", "mining", Some(1e6), Some(1e8)),
    );

    assert_eq!(score.breakdown.sector_alignment, 25.0);
    assert_eq!(score.breakdown.size_fit, 20.0);
}

#[test]
fn test_sector_alignment_tiers() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);
    let inv = investor(&["AGR"], None, None);

    let exact = recommender.score_breakdown(&inv, &opportunity("a", "agr", None, None));
    let adjacent = recommender.score_breakdown(&inv, &opportunity("b", "MAN", None, None));
    let unrelated = recommender.score_breakdown(&inv, &opportunity("c", "FIN", None, None));

    assert_eq!(exact.sector_alignment, 25.0);
    assert_eq!(adjacent.sector_alignment, 15.0);
    assert_eq!(unrelated.sector_alignment, 0.0);
}

#[test]
fn test_size_fit() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);

    let disjoint = recommender.score_breakdown(
        &investor(&[], Some(1e6), Some(5e6)),
        &opportunity("a", "ict", Some(1e7), Some(2e7)),
    );
    assert_eq!(disjoint.size_fit, 0.0);

    // Overlap 3M against a 10 x 2M width
    let unbounded = recommender.score_breakdown(
        &investor(&[], Some(2e6), None),
        &opportunity("b", "ict", Some(1e6), Some(5e6)),
    );
    assert!((unbounded.size_fit - 3.0).abs() < 1e-9);

    let half = recommender.score_breakdown(
        &investor(&[], Some(0.0), Some(1e7)),
        &opportunity("c", "ict", Some(5e6), None),
    );
    assert!((half.size_fit - 10.0).abs() < 1e-9);

    let open_ended = recommender.score_breakdown(
        &investor(&[], None, None),
        &opportunity("d", "ict", None, None),
    );
    assert_eq!(open_ended.size_fit, 20.0);
}

#[test]
fn test_risk_geo_sez_and_history() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);

    let mut inv = investor(&[], None, None);
    let mut opp = opportunity("a", "tou", None, None);
    let defaults = recommender.score_breakdown(&inv, &opp);
    assert_eq!(defaults.risk_compatibility, 15.0);
    assert_eq!(defaults.geographic_match, 5.0);
    assert_eq!(defaults.sez_alignment, 5.0);
    assert_eq!(defaults.historical_similarity, 5.0);
    assert_eq!(defaults.semantic_match, 5.0);

    inv.risk_appetite = Some(RiskLevel::Low);
    opp.risk_level = Some(RiskLevel::High);
    inv.geographic_preferences = vec!["midlands".into()];
    inv.sez_interest = true;
    inv.previous_investments = true;
    let adjusted = recommender.score_breakdown(&inv, &opp);
    assert_eq!(adjusted.risk_compatibility, 2.0);
    assert_eq!(adjusted.geographic_match, 10.0);
    assert_eq!(adjusted.sez_alignment, 2.0);
    assert_eq!(adjusted.historical_similarity, 8.0);

    opp.in_sez = true;
    opp.risk_level = Some(RiskLevel::Medium);
    inv.geographic_preferences = vec!["Harare".into()];
    let moved = recommender.score_breakdown(&inv, &opp);
    assert_eq!(moved.risk_compatibility, 8.0);
    assert_eq!(moved.geographic_match, 2.0);
    assert_eq!(moved.sez_alignment, 10.0);
}

#[test]
fn test_overall_score_is_rounded_sum() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);
    let inv = investor(&[], Some(2e6), None);
    let opp = opportunity("a", "ict", Some(1e6), Some(5e6));

    let score = recommender.compute_match_score(&inv, &opp);

    // 0 + 3 + 15 + 5 + 5 + 5 + 5
    assert_eq!(score.overall_score, 38.0);
    assert_eq!(score.overall_score, (score.breakdown.total() * 10.0).round() / 10.0);
}

#[test]
fn test_explanation_lists_top_factors() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);

    let score = recommender.compute_match_score(
        &investor(&["mining"], Some(1e6), Some(1e8)),
        &opportunity("op-1", "mining", Some(1e6), Some(1e8)),
    );

    assert_eq!(
        score.explanation,
        "Top matching factors: Sector Alignment (25/25), Size Fit (20/20), Risk Compatibility (15/15)"
    );
}

#[test]
fn test_explanation_without_positive_factors() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);

    assert_eq!(
        recommender.explain_match(&ScoreBreakdown::default()),
        "Low overall compatibility"
    );
}

#[test]
fn test_rank_opportunities() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);
    let inv = investor(&["mining"], Some(1e6), Some(1e8));
    let opportunities = vec![
        opportunity("unrelated", "hlt", Some(1e6), Some(1e8)),
        opportunity("exact", "mining", Some(1e6), Some(1e8)),
        opportunity("twin", "hlt", Some(1e6), Some(1e8)),
    ];

    let ranked = recommender.rank_opportunities(&inv, &opportunities);

    let ids: Vec<&str> = ranked.iter().map(|r| r.candidate_id.as_str()).collect();
    // Ties keep input order
    assert_eq!(ids, vec!["exact", "unrelated", "twin"]);
    assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(ranked[0].candidate_name, "Project exact");
    assert!(ranked[0].score.overall_score >= ranked[1].score.overall_score);
}

#[test]
fn test_rank_investors() {
    let calibration = Calibration::default();
    let recommender = MatchRecommender::new(&calibration);
    let opp = opportunity("op", "ict", Some(1e6), Some(1e7));
    let mut fintech = investor(&["fin"], Some(1e6), Some(1e7));
    fintech.id = "fintech".into();
    let mut software = investor(&["ict"], Some(1e6), Some(1e7));
    software.id = "software".into();

    let ranked = recommender.rank_investors(&opp, &[fintech, software]);

    assert_eq!(ranked[0].candidate_id, "software");
    assert_eq!(ranked[1].candidate_id, "fintech");
    assert_eq!(ranked[1].score.breakdown.sector_alignment, 15.0);
    assert!(recommender.rank_investors(&opp, &[]).is_empty());
}
