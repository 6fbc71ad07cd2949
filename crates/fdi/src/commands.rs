//! Subcommand handlers
//!
//! Each handler loads its inputs, calls the core and renders a plain-text
//! report. Rendering goes to a `String` so handlers can be tested without
//! capturing stdout.

use color_eyre::eyre::{bail, eyre};
use fdi_core::model::{
    ImpactRequest, InvestorProfile, OpportunityProfile, RankedMatch, RiskTolerance, SectorRecord,
    TimeSeriesPoint,
};
use fdi_core::{
    Calibration, ImpactReporter, InquiryClassifier, MatchCoordinator, PortfolioOptimizer,
    ScenarioSimulator, SectorAllocator, TimeSeriesForecaster, TrendReporter,
};
use std::fmt::Write;
use std::fs;

use crate::cli::{
    ClassifyArgs, Command, ForecastArgs, ImpactArgs, MatchArgs, PortfolioArgs, SimulateArgs,
};
use crate::format::{format_compact_currency, format_count, format_currency, format_percentage};
use crate::inputs::load_yaml;

pub fn run(calibration: &Calibration, command: &Command) -> color_eyre::Result<String> {
    match command {
        Command::Simulate(args) => simulate(calibration, args),
        Command::Impact(args) => impact(calibration, args),
        Command::Forecast(args) => forecast(calibration, args),
        Command::Portfolio(args) => portfolio(calibration, args),
        Command::Match(args) => match_profiles(calibration, args),
        Command::Classify(args) => classify(calibration, args),
    }
}

pub fn simulate(calibration: &Calibration, args: &SimulateArgs) -> color_eyre::Result<String> {
    let simulator = ScenarioSimulator::new(calibration);
    let run = match args.seed {
        Some(seed) => simulator.run_simulation_seeded(
            args.amount,
            &args.sector,
            args.paths,
            &args.scenario,
            args.years,
            seed,
        )?,
        None => {
            simulator.run_simulation(args.amount, &args.sector, args.paths, &args.scenario, args.years)?
        }
    };
    let stats = &run.statistics;

    let mut out = String::new();
    writeln!(
        out,
        "Monte Carlo: {} in {} under '{}' over {} years ({} paths)",
        format_compact_currency(args.amount),
        run.sector,
        run.scenario,
        args.years,
        format_count(run.outcomes.len() as u64)
    )?;
    if !run.sector_recognized {
        writeln!(out, "  note: sector not calibrated, no sector adjustment applied")?;
    }
    if !run.scenario_recognized {
        writeln!(out, "  note: scenario '{}' unknown, used '{}'", args.scenario, run.scenario)?;
    }
    if run.outcomes.is_empty() {
        writeln!(out, "  no paths simulated")?;
        return Ok(out);
    }
    writeln!(out, "  Mean:     {}", format_currency(stats.mean))?;
    writeln!(out, "  Median:   {}", format_currency(stats.median))?;
    writeln!(out, "  Std dev:  {}", format_currency(stats.std))?;
    writeln!(
        out,
        "  P5 / P25 / P75 / P95: {} / {} / {} / {}",
        format_currency(stats.p5),
        format_currency(stats.p25),
        format_currency(stats.p75),
        format_currency(stats.p95)
    )?;
    writeln!(out, "  VaR 95%:  {}", format_currency(stats.var_95))?;
    writeln!(out, "  Expected shortfall: {}", format_currency(stats.expected_shortfall))?;
    writeln!(
        out,
        "  Range:    {} .. {}",
        format_currency(stats.min),
        format_currency(stats.max)
    )?;
    Ok(out)
}

fn impact_request(args: &ImpactArgs) -> color_eyre::Result<ImpactRequest> {
    if let Some(path) = &args.request {
        return load_yaml(path);
    }
    let (Some(amount), Some(sector)) = (args.amount, args.sector.as_ref()) else {
        bail!("--amount and --sector are required unless --request is given");
    };
    Ok(ImpactRequest {
        amount,
        sector: sector.clone(),
        province: args.province.clone(),
        is_sez: args.sez,
        seed: args.seed,
        ..Default::default()
    })
}

pub fn impact(calibration: &Calibration, args: &ImpactArgs) -> color_eyre::Result<String> {
    let request = impact_request(args)?;
    let report = ImpactReporter::new(calibration).comprehensive_report(&request)?;

    let mut out = String::new();
    let jobs = &report.job_creation.jobs;
    writeln!(
        out,
        "Impact report: {} in {} ({})",
        format_compact_currency(request.amount),
        jobs.sector,
        report.job_creation.province
    )?;

    writeln!(out, "\nJobs{}", if report.job_creation.sez_uplift { " (SEZ uplift)" } else { "" })?;
    writeln!(
        out,
        "  Direct {} / Indirect {} / Induced {} / Total {}",
        format_count(jobs.direct_jobs),
        format_count(jobs.indirect_jobs),
        format_count(jobs.induced_jobs),
        format_count(jobs.total_jobs)
    )?;
    writeln!(
        out,
        "  Construction {} / Operational {}",
        format_count(jobs.construction_phase),
        format_count(jobs.operational_phase)
    )?;
    let skills = &jobs.skills_distribution;
    writeln!(
        out,
        "  Skills: unskilled {}%, semi-skilled {}%, skilled {}%, professional {}%",
        skills.unskilled, skills.semi_skilled, skills.skilled, skills.professional
    )?;
    writeln!(
        out,
        "  Gender: male {}%, female {}%",
        jobs.gender_split.male, jobs.gender_split.female
    )?;

    let gdp = &report.gdp_contribution;
    writeln!(out, "\nGDP contribution")?;
    writeln!(
        out,
        "  Direct {} / Multiplier {} / Total {}",
        format_currency(gdp.direct_gdp),
        format_currency(gdp.multiplier_effect),
        format_currency(gdp.total_gdp)
    )?;
    writeln!(
        out,
        "  Tax {} (effective {}%) / Forex {}",
        format_currency(gdp.tax_revenue.total_tax),
        gdp.tax_revenue.effective_rate,
        format_currency(gdp.forex_generation)
    )?;
    if let Some(last) = gdp.year_by_year.last() {
        writeln!(
            out,
            "  Cumulative after year {}: {}",
            last.year,
            format_currency(last.cumulative)
        )?;
    }

    let risk = &report.monte_carlo;
    writeln!(out, "\nRisk (base scenario)")?;
    writeln!(
        out,
        "  Mean {} / P5 {} / P95 {}",
        format_currency(risk.mean),
        format_currency(risk.p5),
        format_currency(risk.p95)
    )?;

    let roi = &report.roi_timeline;
    writeln!(out, "\nReturn on investment")?;
    for point in &roi.npv {
        writeln!(
            out,
            "  NPV @ {}: {}",
            format_percentage(point.rate),
            format_currency(point.npv)
        )?;
    }
    writeln!(out, "  IRR: {}%", roi.irr)?;
    writeln!(out, "  Breakeven year: {}", roi.breakeven_year)?;

    if let Some(sez) = &report.sez_impact {
        writeln!(out, "\nSEZ incentives ({})", sez.sez_name)?;
        writeln!(
            out,
            "  Annual savings {} / {} over {} years",
            format_currency(sez.annual_tax_savings),
            format_currency(sez.total_savings_over_period),
            sez.holiday_years
        )?;
    }

    if let Some(forecast) = &report.forecast {
        writeln!(out, "\nMacro forecast (accuracy {}%)", forecast.accuracy)?;
        for point in &forecast.predictions {
            writeln!(
                out,
                "  +{}: {:.2} [{:.2}, {:.2}]",
                point.step, point.value, point.lower, point.upper
            )?;
        }
    }

    Ok(out)
}

pub fn forecast(calibration: &Calibration, args: &ForecastArgs) -> color_eyre::Result<String> {
    let series: Vec<TimeSeriesPoint> = load_yaml(&args.series)?;
    if series.is_empty() {
        bail!("{} contains no observations", args.series.display());
    }

    let mut forecaster = TimeSeriesForecaster::new(calibration);
    let model = forecaster.fit(&series);
    let (slope, intercept) = (model.slope, model.intercept);
    let result = forecaster.predict(args.horizon, args.confidence)?;

    let mut out = String::new();
    writeln!(
        out,
        "Trend: {:.4} + {:.4} * t over {} observations (accuracy {}%)",
        intercept,
        slope,
        result.history.len(),
        result.accuracy
    )?;
    for point in &result.predictions {
        writeln!(
            out,
            "  +{:<3} {:>14.2}  [{:.2}, {:.2}]",
            point.step, point.value, point.lower, point.upper
        )?;
    }

    if args.decompose {
        let decomposition = TrendReporter::new(calibration).decomposition(&series);
        writeln!(out, "\nDecomposition (trend / seasonal / residual)")?;
        for ((trend, seasonal), residual) in decomposition
            .trend
            .iter()
            .zip(&decomposition.seasonal)
            .zip(&decomposition.residual)
        {
            writeln!(out, "  {trend:>12.2} {seasonal:>10.2} {residual:>10.2}")?;
        }
    }

    Ok(out)
}

pub fn portfolio(calibration: &Calibration, args: &PortfolioArgs) -> color_eyre::Result<String> {
    let records: Vec<SectorRecord> = load_yaml(&args.sectors)?;
    let tolerance = RiskTolerance::from_label(&args.risk_tolerance);
    let plan = SectorAllocator::new(calibration).allocate(&records, args.budget, tolerance)?;

    let mut out = String::new();
    writeln!(
        out,
        "Allocation of {} ({:?})",
        format_currency(plan.budget),
        tolerance
    )?;
    for line in &plan.lines {
        writeln!(
            out,
            "  {:<24} {:>8.2}%  {:>16}  return {}%",
            line.sector_name,
            line.percentage,
            format_currency(line.amount),
            line.expected_return
        )?;
    }
    let portfolio = &plan.portfolio;
    writeln!(
        out,
        "Expected return {} / Risk {} / Sharpe {:.3}",
        format_percentage(portfolio.expected_return),
        format_percentage(portfolio.risk),
        portfolio.sharpe_ratio
    )?;
    if portfolio.fallback_used {
        writeln!(
            out,
            "  note: optimizer did not converge ({:?}), equal weights used",
            portfolio.termination
        )?;
    }

    if let Some(points) = args.frontier {
        let optimizer = PortfolioOptimizer::new(calibration);
        let profiles = optimizer.calculate_sector_metrics(&records);
        let covariance = optimizer.covariance_from_profiles(&profiles);
        let returns: Vec<f64> = profiles.iter().map(|p| p.avg_return).collect();
        let frontier = optimizer.efficient_frontier(&returns, &covariance, points)?;

        writeln!(out, "\nEfficient frontier ({} points)", frontier.len())?;
        for point in &frontier {
            writeln!(
                out,
                "  risk {:>8}  return {:>8}",
                format_percentage(point.risk),
                format_percentage(point.expected_return)
            )?;
        }
    }

    Ok(out)
}

fn write_ranking(out: &mut String, ranked: &[RankedMatch]) -> std::fmt::Result {
    for entry in ranked {
        writeln!(
            out,
            "  {}. {} ({}) score {}",
            entry.rank, entry.candidate_name, entry.candidate_id, entry.score.overall_score
        )?;
        writeln!(out, "     {}", entry.score.explanation)?;
    }
    Ok(())
}

pub fn match_profiles(calibration: &Calibration, args: &MatchArgs) -> color_eyre::Result<String> {
    let investors: Vec<InvestorProfile> = load_yaml(&args.investors)?;
    let opportunities: Vec<OpportunityProfile> = load_yaml(&args.opportunities)?;
    let coordinator = MatchCoordinator::new(calibration);

    let mut out = String::new();
    if let Some(id) = &args.investor {
        let investor = investors
            .iter()
            .find(|i| &i.id == id)
            .ok_or_else(|| eyre!("no investor with id `{id}`"))?;
        writeln!(out, "Top opportunities for {}", investor.company_name)?;
        write_ranking(
            &mut out,
            &coordinator.top_opportunities(investor, &opportunities, args.top),
        )?;
    } else if let Some(id) = &args.opportunity {
        let opportunity = opportunities
            .iter()
            .find(|o| &o.id == id)
            .ok_or_else(|| eyre!("no opportunity with id `{id}`"))?;
        writeln!(out, "Top investors for {}", opportunity.title)?;
        write_ranking(
            &mut out,
            &coordinator.top_investors(opportunity, &investors, args.top),
        )?;
    } else {
        let recommendations = coordinator.proactive_recommendations(&investors, &opportunities);
        writeln!(out, "Proactive recommendations ({})", recommendations.len())?;
        for rec in &recommendations {
            writeln!(
                out,
                "  {} -> {} (score {})",
                rec.investor_name, rec.best_match.candidate_name, rec.best_match.score.overall_score
            )?;
        }
    }

    Ok(out)
}

pub fn classify(calibration: &Calibration, args: &ClassifyArgs) -> color_eyre::Result<String> {
    let text = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => args.text.join(" "),
    };
    if text.trim().is_empty() {
        bail!("no inquiry text given");
    }

    let analysis = InquiryClassifier::new(calibration).full_analysis(&text);

    let mut out = String::new();
    writeln!(out, "Type:       {}", analysis.inquiry_type.as_str())?;
    writeln!(out, "Sectors:    {}", analysis.sectors.join(", "))?;
    writeln!(
        out,
        "Size:       {}",
        analysis
            .investment_size
            .as_ref()
            .map_or("not stated", |size| size.display())
    )?;
    writeln!(
        out,
        "Sentiment:  {:?} ({})",
        analysis.sentiment.label, analysis.sentiment.score
    )?;
    if !analysis.concerns.is_empty() {
        writeln!(out, "Concerns:   {}", analysis.concerns.join(", "))?;
    }
    if !analysis.entities.countries.is_empty() {
        writeln!(out, "Countries:  {}", analysis.entities.countries.join(", "))?;
    }
    writeln!(out, "Department: {}", analysis.department)?;
    writeln!(out, "\n{}", analysis.suggested_response)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let calibration = Calibration::default();
        let args = SimulateArgs {
            amount: 10_000_000.0,
            sector: "mining".into(),
            scenario: "stress".into(),
            paths: 1000,
            years: 5,
            seed: Some(7),
        };

        let first = simulate(&calibration, &args).unwrap();
        let second = simulate(&calibration, &args).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("under 'base'"));
        assert!(first.contains("scenario 'stress' unknown"));
        assert!(first.contains("1,000 paths"));
    }

    #[test]
    fn test_impact_requires_amount_and_sector() {
        let calibration = Calibration::default();
        let args = ImpactArgs {
            request: None,
            amount: Some(1e6),
            sector: None,
            province: "Harare".into(),
            sez: false,
            seed: None,
        };

        let err = impact(&calibration, &args).unwrap_err();
        assert!(err.to_string().contains("--sector"));
    }

    #[test]
    fn test_impact_report_from_flags() {
        let calibration = Calibration::default();
        let args = ImpactArgs {
            request: None,
            amount: Some(25_000_000.0),
            sector: Some("MIN".into()),
            province: "Midlands".into(),
            sez: true,
            seed: Some(1),
        };

        let out = impact(&calibration, &args).unwrap();

        assert!(out.contains("in mining (Midlands)"));
        assert!(out.contains("Jobs (SEZ uplift)"));
        assert!(out.contains("SEZ incentives (N/A)"));
        assert!(!out.contains("Macro forecast"));
    }

    #[test]
    fn test_impact_request_file_with_macro_series() {
        let dir = tempdir().unwrap();
        let request = write_file(
            &dir,
            "request.yaml",
            "amount: 5000000.0\nsector: agriculture\nprovince: Masvingo\nforecast_horizon: 2\nseed: 3\nmacro_series:\n  - period: \"2024-01-01\"\n    value: 100.0\n  - period: \"2024-02-01\"\n    value: 110.0\n",
        );
        let args = ImpactArgs {
            request: Some(request),
            amount: None,
            sector: None,
            province: "Harare".into(),
            sez: false,
            seed: None,
        };

        let out = impact(&Calibration::default(), &args).unwrap();

        assert!(out.contains("(Masvingo)"));
        assert!(out.contains("Macro forecast"));
        assert!(out.contains("+2: 130.00"));
    }

    #[test]
    fn test_forecast_with_decomposition() {
        let dir = tempdir().unwrap();
        let series = write_file(
            &dir,
            "series.yaml",
            "- period: \"2024-03-01\"\n  value: 30.0\n- period: \"2024-01-01\"\n  value: 10.0\n- period: \"2024-02-01\"\n  value: 20.0\n",
        );
        let args = ForecastArgs {
            series,
            horizon: 2,
            confidence: 0.95,
            decompose: true,
        };

        let out = forecast(&Calibration::default(), &args).unwrap();

        assert!(out.starts_with("Trend: 10.0000 + 10.0000 * t over 3 observations"));
        assert!(out.contains("40.00"));
        assert!(out.contains("Decomposition"));
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let dir = tempdir().unwrap();
        let series = write_file(&dir, "series.yaml", "[]\n");
        let args = ForecastArgs {
            series,
            horizon: 2,
            confidence: 0.95,
            decompose: false,
        };

        assert!(forecast(&Calibration::default(), &args).is_err());
    }

    #[test]
    fn test_portfolio_allocation_output() {
        let dir = tempdir().unwrap();
        let sectors = write_file(
            &dir,
            "sectors.yaml",
            "- name: Mining\n  code: MIN\n  avg_return_rate: 0.15\n  risk_score: 70.0\n- name: Agriculture\n  code: AGR\n  avg_return_rate: 0.09\n  risk_score: 55.0\n- name: ICT\n  code: ICT\n  avg_return_rate: 0.12\n  risk_score: 50.0\n",
        );
        let args = PortfolioArgs {
            sectors,
            budget: 1_000_000.0,
            risk_tolerance: "conservative".into(),
            frontier: Some(5),
        };

        let out = portfolio(&Calibration::default(), &args).unwrap();

        assert!(out.starts_with("Allocation of $1,000,000 (Conservative)"));
        assert!(out.contains("Mining"));
        assert!(out.contains("Efficient frontier"));
    }

    #[test]
    fn test_match_modes() {
        let dir = tempdir().unwrap();
        let investors = write_file(
            &dir,
            "investors.yaml",
            "- id: inv01\n  company_name: Acme Mining\n  sectors_of_interest: [MIN]\n  investment_range_min: 1000000.0\n  investment_range_max: 100000000.0\n",
        );
        let opportunities = write_file(
            &dir,
            "opportunities.yaml",
            "- id: op01\n  title: Lithium Mine\n  sector_code: MIN\n  province: Midlands\n  minimum_investment: 1000000.0\n  maximum_investment: 100000000.0\n",
        );
        let mut args = MatchArgs {
            investors,
            opportunities,
            investor: Some("inv01".into()),
            opportunity: None,
            top: 3,
        };
        let calibration = Calibration::default();

        let out = match_profiles(&calibration, &args).unwrap();
        assert!(out.contains("1. Lithium Mine (op01)"));

        args.investor = None;
        let out = match_profiles(&calibration, &args).unwrap();
        assert!(out.contains("Acme Mining -> Lithium Mine"));

        args.opportunity = Some("missing".into());
        assert!(match_profiles(&calibration, &args).is_err());
    }

    #[test]
    fn test_classify_text_arguments() {
        let args = ClassifyArgs {
            file: None,
            text: vec!["We are ready to invest $50 million".into(), "in lithium mining".into()],
        };

        let out = classify(&Calibration::default(), &args).unwrap();

        assert!(out.starts_with("Type:       ready_to_invest"));
        assert!(out.contains("Size:       $50.0M"));
        assert!(out.contains("Mining & Natural Resources Division"));
    }

    #[test]
    fn test_classify_rejects_empty_text() {
        let args = ClassifyArgs {
            file: None,
            text: vec![],
        };
        assert!(classify(&Calibration::default(), &args).is_err());
    }
}
