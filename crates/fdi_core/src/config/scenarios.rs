use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::ScenarioParams;

/// Named economic scenarios for the Monte Carlo simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioTable {
    /// Scenario used when a requested name is unknown
    pub default_scenario: String,
    pub scenarios: FxHashMap<String, ScenarioParams>,
    /// Return lost per unit of absolute FX shock
    pub fx_penalty: f64,
    /// Return lost per unit of absolute demand shock
    pub demand_penalty: f64,
}

impl ScenarioTable {
    pub const BASE: ScenarioParams = ScenarioParams {
        return_mean: 0.12,
        return_std: 0.05,
        fx_vol: 0.15,
        demand_var: 0.10,
    };

    pub const OPTIMISTIC: ScenarioParams = ScenarioParams {
        return_mean: 0.18,
        return_std: 0.04,
        fx_vol: 0.10,
        demand_var: 0.05,
    };

    pub const PESSIMISTIC: ScenarioParams = ScenarioParams {
        return_mean: 0.06,
        return_std: 0.08,
        fx_vol: 0.25,
        demand_var: 0.20,
    };

    /// Look up a scenario, falling back to the default one.
    ///
    /// Returns the resolved name, its parameters and whether the requested
    /// name was recognized.
    pub fn resolve<'a>(&'a self, name: &str) -> (&'a str, ScenarioParams, bool) {
        let key = name.trim().to_lowercase();
        if let Some((found, params)) = self.scenarios.get_key_value(key.as_str()) {
            return (found.as_str(), *params, true);
        }
        let params = self
            .scenarios
            .get(self.default_scenario.as_str())
            .copied()
            .unwrap_or(Self::BASE);
        (self.default_scenario.as_str(), params, false)
    }
}

impl Default for ScenarioTable {
    fn default() -> Self {
        let scenarios = FxHashMap::from_iter([
            ("base".to_string(), Self::BASE),
            ("optimistic".to_string(), Self::OPTIMISTIC),
            ("pessimistic".to_string(), Self::PESSIMISTIC),
        ]);
        Self {
            default_scenario: "base".to_string(),
            scenarios,
            fx_penalty: 0.3,
            demand_penalty: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let table = ScenarioTable::default();

        let (name, params, recognized) = table.resolve("Optimistic");
        assert_eq!(name, "optimistic");
        assert_eq!(params, ScenarioTable::OPTIMISTIC);
        assert!(recognized);

        let (name, params, recognized) = table.resolve("apocalyptic");
        assert_eq!(name, "base");
        assert_eq!(params, ScenarioTable::BASE);
        assert!(!recognized);
    }
}
