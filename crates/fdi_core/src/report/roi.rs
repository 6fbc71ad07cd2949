//! Discounted cash flow helpers for the ROI timeline

use crate::config::{ReportPolicy, RevenueProfile};
use crate::model::{NpvAtRate, RevenueAssumptions, RoiTimeline, RoiYear};
use crate::stats::round_dp;

const IRR_ITERATIONS: usize = 100;
const IRR_INITIAL_GUESS: f64 = 0.1;
const IRR_MIN: f64 = -0.5;
const IRR_MAX: f64 = 1.0;

/// `Σ cfₜ / (1 + rate)ᵗ` with year 0 undiscounted
pub fn net_present_value(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Newton iteration on the NPV, clamped to `[-0.5, 1.0]`.
pub fn internal_rate_of_return(cash_flows: &[f64]) -> f64 {
    let mut rate = IRR_INITIAL_GUESS;
    for _ in 0..IRR_ITERATIONS {
        let npv = net_present_value(cash_flows, rate);
        let slope: f64 = cash_flows
            .iter()
            .enumerate()
            .map(|(t, cf)| -(t as f64) * cf / (1.0 + rate).powi(t as i32 + 1))
            .sum();
        if slope.abs() < 1e-10 {
            break;
        }

        let next = rate - npv / slope;
        // Diverged past the discount pole
        if !next.is_finite() || next <= -1.0 {
            rate = IRR_MIN;
            break;
        }
        rate = next;
    }
    rate.clamp(IRR_MIN, IRR_MAX)
}

/// Year-by-year cash flows from capex in year 0 and a ramping revenue line.
pub(crate) fn build_timeline(
    sector: String,
    amount: f64,
    profile: RevenueProfile,
    assumptions: &RevenueAssumptions,
    policy: &ReportPolicy,
) -> RoiTimeline {
    let growth = assumptions.growth_rate.unwrap_or(profile.growth);
    let op_ratio = assumptions.op_cost_ratio.unwrap_or(profile.op_ratio);
    let discount_rate = assumptions
        .discount_rate
        .unwrap_or(policy.default_discount_rate);
    let base_revenue = amount * policy.base_revenue_share;

    let mut cumulative = -amount;
    let mut years = vec![RoiYear {
        year: 0,
        capex: -amount,
        revenue: 0.0,
        opex: 0.0,
        cash_flow: -amount,
        cumulative_cash_flow: cumulative,
    }];

    for year in 1..=policy.roi_years {
        let revenue = base_revenue * ramp_factor(year, profile.ramp_years) * (1.0 + growth).powi(year as i32);
        let opex = revenue * op_ratio;
        let cash_flow = revenue - opex;
        cumulative += cash_flow;

        years.push(RoiYear {
            year,
            capex: 0.0,
            revenue: round_dp(revenue, 2),
            opex: round_dp(opex, 2),
            cash_flow: round_dp(cash_flow, 2),
            cumulative_cash_flow: round_dp(cumulative, 2),
        });
    }

    let breakeven_year = years
        .iter()
        .find(|y| y.cumulative_cash_flow > 0.0)
        .map_or(policy.roi_years, |y| y.year);

    let cash_flows: Vec<f64> = years.iter().map(|y| y.cash_flow).collect();
    let npv = policy
        .npv_rates
        .iter()
        .map(|&rate| NpvAtRate {
            rate,
            npv: round_dp(net_present_value(&cash_flows, rate), 2),
        })
        .collect();

    RoiTimeline {
        sector,
        npv,
        discounted_npv: round_dp(net_present_value(&cash_flows, discount_rate), 2),
        irr: round_dp(internal_rate_of_return(&cash_flows) * 100.0, 2),
        breakeven_year,
        years,
    }
}

/// Linear ramp to full capacity over `ramp_years`
pub(crate) fn ramp_factor(year: u32, ramp_years: u32) -> f64 {
    if ramp_years == 0 {
        1.0
    } else {
        (year as f64 / ramp_years as f64).min(1.0)
    }
}
