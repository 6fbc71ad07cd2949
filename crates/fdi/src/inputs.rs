//! YAML input loading

use color_eyre::eyre::{WrapErr, eyre};
use fdi_core::Calibration;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and deserialize a YAML document.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> color_eyre::Result<T> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_saphyr::from_str(&content).map_err(|e| eyre!("failed to parse {}: {e}", path.display()))
}

/// Built-in calibration, or one loaded from YAML and validated.
///
/// Fields missing from the file keep their built-in values. A named map such
/// as `sectors` replaces the built-in one entirely.
pub fn load_calibration(path: Option<&Path>) -> color_eyre::Result<Calibration> {
    let Some(path) = path else {
        return Ok(Calibration::default());
    };

    let calibration: Calibration = load_yaml(path)?;
    calibration
        .validate()
        .wrap_err_with(|| format!("invalid calibration in {}", path.display()))?;
    tracing::info!(path = %path.display(), sectors = calibration.sectors.len(), "loaded calibration");
    Ok(calibration)
}
