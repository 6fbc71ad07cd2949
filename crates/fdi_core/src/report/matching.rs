use crate::config::Calibration;
use crate::matching::MatchRecommender;
use crate::model::{InvestorProfile, OpportunityProfile, ProactiveRecommendation, RankedMatch};

/// Top-N views and outreach suggestions over the match recommender
pub struct MatchCoordinator<'a> {
    recommender: MatchRecommender<'a>,
    threshold: f64,
    limit: usize,
}

impl<'a> MatchCoordinator<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            recommender: MatchRecommender::new(calibration),
            threshold: calibration.reports.proactive_threshold,
            limit: calibration.reports.proactive_limit,
        }
    }

    pub fn top_opportunities(
        &self,
        investor: &InvestorProfile,
        opportunities: &[OpportunityProfile],
        top_n: usize,
    ) -> Vec<RankedMatch> {
        let mut ranked = self.recommender.rank_opportunities(investor, opportunities);
        ranked.truncate(top_n);
        ranked
    }

    pub fn top_investors(
        &self,
        opportunity: &OpportunityProfile,
        investors: &[InvestorProfile],
        top_n: usize,
    ) -> Vec<RankedMatch> {
        let mut ranked = self.recommender.rank_investors(opportunity, investors);
        ranked.truncate(top_n);
        ranked
    }

    /// Best opportunity per investor, kept when it clears the score
    /// threshold, strongest first.
    pub fn proactive_recommendations(
        &self,
        investors: &[InvestorProfile],
        opportunities: &[OpportunityProfile],
    ) -> Vec<ProactiveRecommendation> {
        let mut recommendations: Vec<ProactiveRecommendation> = investors
            .iter()
            .filter_map(|investor| {
                let best_match = self
                    .recommender
                    .rank_opportunities(investor, opportunities)
                    .into_iter()
                    .next()?;
                (best_match.score.overall_score > self.threshold).then(|| ProactiveRecommendation {
                    investor_id: investor.id.clone(),
                    investor_name: investor.company_name.clone(),
                    best_match,
                })
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.best_match
                .score
                .overall_score
                .total_cmp(&a.best_match.score.overall_score)
        });
        recommendations.truncate(self.limit);
        recommendations
    }
}
