//! Investor/opportunity match scoring and ranking
//!
//! Seven independently weighted factors are summed into an overall score.
//! The sum is not capped: the nominal weights add up to 100, but historical
//! similarity can reach 8 and semantic match is a flat placeholder.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{Calibration, MatchingCalibration};
use crate::model::{
    InvestorProfile, MatchScore, OpportunityProfile, RankedMatch, RiskLevel, ScoreBreakdown,
};
use crate::stats::round_dp;

/// Factors quoted in a match explanation
const EXPLAINED_FACTORS: usize = 3;

pub struct MatchRecommender<'a> {
    calibration: &'a MatchingCalibration,
}

impl<'a> MatchRecommender<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            calibration: &calibration.matching,
        }
    }

    pub fn compute_match_score(
        &self,
        investor: &InvestorProfile,
        opportunity: &OpportunityProfile,
    ) -> MatchScore {
        let breakdown = self.score_breakdown(investor, opportunity);
        MatchScore {
            overall_score: round_dp(breakdown.total(), 1),
            explanation: self.explain_match(&breakdown),
            breakdown,
        }
    }

    pub fn score_breakdown(
        &self,
        investor: &InvestorProfile,
        opportunity: &OpportunityProfile,
    ) -> ScoreBreakdown {
        let c = self.calibration;
        ScoreBreakdown {
            sector_alignment: self.sector_score(investor, opportunity),
            size_fit: self.size_score(investor, opportunity),
            risk_compatibility: self.risk_score(investor, opportunity),
            geographic_match: self.geo_score(investor, opportunity),
            sez_alignment: self.sez_score(investor, opportunity),
            historical_similarity: c.historical_base
                + if investor.previous_investments {
                    c.historical_prior_bonus
                } else {
                    0.0
                },
            semantic_match: c.semantic_constant,
        }
    }

    /// Render the top three positive factors as `Label (score/weight)`.
    pub fn explain_match(&self, breakdown: &ScoreBreakdown) -> String {
        let mut factors = breakdown.factors();
        // Stable, so equal scores keep declaration order
        factors.sort_by(|a, b| b.1.total_cmp(&a.1));

        let parts: Vec<String> = factors
            .iter()
            .take(EXPLAINED_FACTORS)
            .filter(|(_, score)| *score > 0.0)
            .map(|(factor, score)| {
                format!(
                    "{} ({:.0}/{:.0})",
                    factor.label(),
                    score,
                    self.calibration.weights.weight(*factor)
                )
            })
            .collect();

        if parts.is_empty() {
            "Low overall compatibility".to_string()
        } else {
            format!("Top matching factors: {}", parts.join(", "))
        }
    }

    /// Rank opportunities for one investor, best first.
    pub fn rank_opportunities(
        &self,
        investor: &InvestorProfile,
        opportunities: &[OpportunityProfile],
    ) -> Vec<RankedMatch> {
        let scores = score_all(opportunities, |opportunity| {
            (
                opportunity.id.clone(),
                opportunity.title.clone(),
                self.compute_match_score(investor, opportunity),
            )
        });
        rank(scores)
    }

    /// Rank investors for one opportunity, best first.
    pub fn rank_investors(
        &self,
        opportunity: &OpportunityProfile,
        investors: &[InvestorProfile],
    ) -> Vec<RankedMatch> {
        let scores = score_all(investors, |investor| {
            (
                investor.id.clone(),
                investor.company_name.clone(),
                self.compute_match_score(investor, opportunity),
            )
        });
        rank(scores)
    }

    fn sector_score(&self, investor: &InvestorProfile, opportunity: &OpportunityProfile) -> f64 {
        let interests: Vec<String> = investor
            .sectors_of_interest
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        let sector = opportunity.sector_code.to_lowercase();

        if interests.contains(&sector) {
            self.calibration.sector_exact
        } else if self.calibration.is_adjacent(&sector, &interests) {
            self.calibration.sector_adjacent
        } else {
            0.0
        }
    }

    fn size_score(&self, investor: &InvestorProfile, opportunity: &OpportunityProfile) -> f64 {
        let c = self.calibration;
        let inv_min = investor.investment_range_min.unwrap_or(0.0);
        let inv_max = investor.investment_range_max.unwrap_or(f64::INFINITY);
        let opp_min = opportunity.minimum_investment.unwrap_or(0.0);
        let opp_max = opportunity.maximum_investment.unwrap_or(f64::INFINITY);

        let overlap_min = inv_min.max(opp_min);
        let overlap_max = inv_max.min(opp_max);
        if overlap_min > overlap_max {
            return 0.0;
        }

        let width = if inv_max.is_finite() {
            inv_max - inv_min
        } else {
            inv_min * c.unbounded_width_factor
        };
        let overlap = overlap_max - overlap_min;
        let ratio = if width > 0.0 { overlap / width } else { 1.0 };

        // Unbounded overlap against a finite width
        if ratio.is_finite() {
            (ratio * c.size_max).min(c.size_max)
        } else {
            c.size_max
        }
    }

    fn risk_score(&self, investor: &InvestorProfile, opportunity: &OpportunityProfile) -> f64 {
        let appetite = investor.risk_appetite.unwrap_or(RiskLevel::Medium);
        let level = opportunity.risk_level.unwrap_or(RiskLevel::Medium);
        self.calibration.risk_score(appetite.distance(level))
    }

    fn geo_score(&self, investor: &InvestorProfile, opportunity: &OpportunityProfile) -> f64 {
        let c = self.calibration;
        if investor.geographic_preferences.is_empty() {
            return c.geo_no_preference;
        }
        let province = opportunity.province.to_lowercase();
        if investor
            .geographic_preferences
            .iter()
            .any(|p| p.to_lowercase() == province)
        {
            c.geo_match
        } else {
            c.geo_miss
        }
    }

    fn sez_score(&self, investor: &InvestorProfile, opportunity: &OpportunityProfile) -> f64 {
        let c = self.calibration;
        match (investor.sez_interest, opportunity.in_sez) {
            (true, true) => c.sez_both,
            (false, false) => c.sez_neither,
            _ => c.sez_mismatch,
        }
    }
}

fn score_all<T, F>(candidates: &[T], score: F) -> Vec<(String, String, MatchScore)>
where
    T: Sync,
    F: Fn(&T) -> (String, String, MatchScore) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let scores = candidates.par_iter().map(score).collect();

    #[cfg(not(feature = "parallel"))]
    let scores = candidates.iter().map(score).collect();

    scores
}

/// Sort descending by overall score, keeping input order on ties
fn rank(mut scores: Vec<(String, String, MatchScore)>) -> Vec<RankedMatch> {
    scores.sort_by(|a, b| b.2.overall_score.total_cmp(&a.2.overall_score));
    scores
        .into_iter()
        .enumerate()
        .map(|(i, (candidate_id, candidate_name, score))| RankedMatch {
            candidate_id,
            candidate_name,
            rank: i + 1,
            score,
        })
        .collect()
}
