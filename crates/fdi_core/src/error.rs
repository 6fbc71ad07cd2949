use thiserror::Error;

/// Errors raised by the analytics components
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// Sector key has no calibration entry (multiplier engine only)
    #[error("unknown sector `{sector}`; valid sectors: {known}")]
    UnknownSector { sector: String, known: String },

    /// `predict` was called before `fit`
    #[error("model not fitted; call fit() first")]
    NotFitted,

    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("covariance matrix is not symmetric at ({row}, {col})")]
    AsymmetricCovariance { row: usize, col: usize },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Calibration produced parameters a distribution cannot be built from
    #[error("invalid {profile_type} parameters (mean={mean}, std_dev={std_dev})")]
    InvalidDistribution {
        profile_type: &'static str,
        mean: f64,
        std_dev: f64,
    },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Structural problems found by `Calibration::validate`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("scenario table has no `{0}` entry")]
    MissingDefaultScenario(String),

    #[error("skills distribution for `{sector}` sums to {total}, expected 100")]
    SkillsNotNormalized { sector: String, total: f64 },

    #[error("fallback skills sector `{0}` has no skills distribution")]
    MissingFallbackSkills(String),

    #[error("invalid weight bounds [{lower}, {upper}]")]
    InvalidWeightBounds { lower: f64, upper: f64 },

    #[error("negative {field} for sector `{sector}`")]
    NegativeCalibration { sector: String, field: &'static str },
}
