mod forecast;
mod impact;
mod inquiry;
mod matching;
mod portfolio;
mod report;
mod sector;
mod simulation;

pub use forecast::{
    FeatureMatrix, ForecastPoint, ForecastResult, HistoryPoint, RegressionResult,
    TimeSeriesPoint, TrendDecomposition,
};
pub use impact::{
    DirectImpact, GenderSplit, IndirectImpact, InducedImpact, JobsBreakdown, SezIncentives,
    SkillsDistribution, TaxBreakdown, TotalImpact,
};
pub use inquiry::{
    InquiryAnalysis, InquiryEntities, InquiryType, InvestmentSize, Sentiment, SentimentScore,
};
pub use matching::{
    InvestorProfile, MatchFactor, MatchScore, OpportunityProfile, RankedMatch, RiskLevel,
    ScoreBreakdown,
};
pub use portfolio::{
    CorrelationMatrix, CovarianceMatrix, FrontierPoint, PortfolioAllocation, ReturnSeries,
    RiskReturnProfile, RiskTolerance, SectorRecord,
};
pub use report::{
    AllocationLine, AllocationPlan, ComprehensiveReport, GdpContribution, GdpYear, ImpactRequest,
    InvestmentCluster, InvestmentRecord, JobCreationReport, NpvAtRate, ProactiveRecommendation,
    RevenueAssumptions, RoiTimeline, RoiYear, SezIncentiveImpact,
};
pub use sector::normalize_sector_key;
pub use simulation::{ScenarioParams, SectorAdjustment, SimulationRun, SimulationStats};
