use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::Calibration;
use crate::model::{InvestmentCluster, InvestmentRecord};

const UNKNOWN_CODE: &str = "UNK";
const UNKNOWN_NAME: &str = "Unknown";

/// Groups recorded investments into per-sector clusters
pub struct PatternDetector {
    origin_limit: usize,
}

struct Accumulator {
    code: String,
    name: String,
    count: usize,
    total: f64,
    countries: Vec<String>,
}

impl PatternDetector {
    pub fn new(calibration: &Calibration) -> Self {
        Self {
            origin_limit: calibration.reports.cluster_origin_limit,
        }
    }

    /// One cluster per sector code, in the order sectors first appear.
    ///
    /// Codes are compared case-insensitively. A record without a sector name
    /// takes its code as the name. Blank investor countries are ignored.
    pub fn detect_investment_patterns(
        &self,
        investments: &[InvestmentRecord],
    ) -> Vec<InvestmentCluster> {
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut groups: Vec<Accumulator> = Vec::new();

        for record in investments {
            let code = record
                .sector_code
                .as_deref()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_CODE.to_string());

            let slot = *index.entry(code.clone()).or_insert_with(|| {
                let name = record
                    .sector_name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| {
                        if code == UNKNOWN_CODE {
                            UNKNOWN_NAME.to_string()
                        } else {
                            code.clone()
                        }
                    });
                groups.push(Accumulator {
                    code: code.clone(),
                    name,
                    count: 0,
                    total: 0.0,
                    countries: Vec::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.count += 1;
            group.total += record.amount;
            let country = record
                .investor_country
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty());
            if let Some(country) = country {
                if !group.countries.iter().any(|c| c == country) {
                    group.countries.push(country.to_string());
                }
            }
        }

        debug!(
            investments = investments.len(),
            clusters = groups.len(),
            "grouped investments"
        );

        groups
            .into_iter()
            .enumerate()
            .map(|(cluster_id, mut group)| {
                let avg_amount = group.total / group.count as f64;
                group.countries.truncate(self.origin_limit);
                InvestmentCluster {
                    cluster_id,
                    pattern_name: format!("{} Investments", group.name),
                    description: format!(
                        "Cluster of {} investments in {} averaging ${:.1}M",
                        group.count,
                        group.name,
                        avg_amount / 1e6
                    ),
                    investment_count: group.count,
                    avg_amount,
                    top_origins: group.countries,
                    sector_code: group.code,
                    sector_name: group.name,
                }
            })
            .collect()
    }
}
