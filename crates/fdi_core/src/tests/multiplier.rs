//! Tests for the economic multiplier engine
//!
//! These tests verify that:
//! - Job totals always equal the sum of their components
//! - Skills distributions sum to 100 for every sector
//! - Zero and negative amounts produce zero impact
//! - Unknown sectors are rejected
//! - Tax parts are rounded and summed as rounded values

use crate::config::Calibration;
use crate::error::AnalyticsError;
use crate::model::SezIncentives;
use crate::multiplier::MultiplierEngine;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_mining_job_cascade() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    let jobs = engine.calculate_job_creation(25_000_000.0, "mining").unwrap();

    assert_eq!(jobs.direct_jobs, 105);
    assert_eq!(jobs.indirect_jobs, 46);
    assert_eq!(jobs.induced_jobs, 18);
    assert_eq!(jobs.total_jobs, 169);
    assert_eq!(jobs.construction_phase, 50);
    assert_eq!(jobs.operational_phase, 118);
    assert_eq!(jobs.gender_split.female, 30.0);
    assert_eq!(jobs.gender_split.male, 70.0);
}

#[test]
fn test_job_total_is_component_sum() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    for sector in calibration.sector_keys() {
        for amount in [0.0, 150_000.0, 1_000_000.0, 7_300_000.0, 250_000_000.0] {
            let jobs = engine.calculate_job_creation(amount, sector).unwrap();
            assert_eq!(
                jobs.total_jobs,
                jobs.direct_jobs + jobs.indirect_jobs + jobs.induced_jobs,
                "{sector} at {amount}"
            );
        }
    }
}

#[test]
fn test_skills_sum_to_one_hundred() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    for sector in calibration.sector_keys() {
        let jobs = engine.calculate_job_creation(1_000_000.0, sector).unwrap();
        let total = jobs.skills_distribution.total();
        assert!((total - 100.0).abs() <= 0.1, "{sector} skills sum to {total}");
    }
}

#[test]
fn test_zero_amount_has_no_direct_impact() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    for sector in calibration.sector_keys() {
        let direct = engine.calculate_direct_impact(0.0, sector).unwrap();
        assert_eq!(direct.direct_output, 0.0);
        assert_eq!(direct.direct_jobs, 0);
        assert_eq!(direct.sector, sector);
    }
}

#[test]
fn test_negative_amount_is_clamped_to_zero() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    let total = engine.calculate_total_impact(-5_000_000.0, "tourism").unwrap();

    assert_eq!(total.total_output, 0.0);
    assert_eq!(total.output_multiplier, 0.0);
    assert_eq!(total.indirect.indirect_jobs, 0);
    assert_eq!(total.induced.induced_jobs, 0);
}

#[test]
fn test_unknown_sector_is_rejected() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    let err = engine
        .calculate_direct_impact(1_000_000.0, "not_a_real_sector")
        .unwrap_err();
    match err {
        AnalyticsError::UnknownSector { sector, known } => {
            assert_eq!(sector, "not_a_real_sector");
            assert!(known.contains("mining"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(engine.calculate_job_creation(1.0, "space").is_err());
    assert!(
        engine
            .calculate_tax_revenue(1.0, "space", false, None)
            .is_err()
    );
}

#[test]
fn test_sector_names_are_normalized() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    let impact = engine
        .calculate_direct_impact(2_000_000.0, "Financial Services")
        .unwrap();
    assert_eq!(impact.sector, "financial_services");
}

#[test]
fn test_total_impact_output_multiplier() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    let total = engine.calculate_total_impact(25_000_000.0, "mining").unwrap();

    // 1 + (2.1 - 1) * 0.6 + (1.6 - 1) * 0.4
    assert_close(total.indirect.supply_chain_factor, 0.66);
    assert_close(total.induced.induced_factor, 0.24);
    assert_close(total.output_multiplier, 1.9);
    assert_close(total.total_output, 47_500_000.0);
}

#[test]
fn test_standard_tax_breakdown() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    let tax = engine
        .calculate_tax_revenue(25_000_000.0, "mining", false, None)
        .unwrap();

    assert_close(tax.corporate_tax, 608_343.75);
    assert_close(tax.vat, 1_181_250.0);
    assert_close(tax.paye, 210_000.0);
    assert_close(tax.withholding, 315_000.0);
    assert_close(tax.total_tax, 2_314_593.75);
    assert_close(tax.effective_rate, 0.12);
}

#[test]
fn test_sez_tax_uses_incentive_rate() {
    let calibration = Calibration::default();
    let engine = MultiplierEngine::new(&calibration);

    let holiday = engine
        .calculate_tax_revenue(25_000_000.0, "mining", true, None)
        .unwrap();
    assert_eq!(holiday.corporate_tax, 0.0);
    assert_close(holiday.total_tax, 1_706_250.0);

    let incentives = SezIncentives {
        name: Some("Sunway City".to_string()),
        corporate_tax_rate: Some(0.15),
        tax_holiday_years: None,
    };
    let reduced = engine
        .calculate_tax_revenue(25_000_000.0, "mining", true, Some(&incentives))
        .unwrap();
    // 15.75M revenue * 0.15 margin * 0.15 rate
    assert_close(reduced.corporate_tax, 354_375.0);
}
