use crate::config::{
    Config,
    Severity,
    ValidationError,
};
use anyhow::{
    bail,
    Context,
};
use camino::Utf8Path;

/// A config that passed validation, with the warnings it raised.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ValidationError>,
}

/// Load and check the config at `path`.
///
/// This runs before logging is set up, so nothing is logged here.
/// Warnings are handed back for the caller to log once it can.
pub(crate) fn load_config(path: &Utf8Path) -> anyhow::Result<LoadedConfig> {
    let config = Config::load_from_path(path).with_context(|| format!("failed to load `{path}`"))?;
    let warnings = check_config(&config)?;

    Ok(LoadedConfig { config, warnings })
}

/// Fail with every error-level message, or return the warnings.
fn check_config(config: &Config) -> anyhow::Result<Vec<ValidationError>> {
    let (errors, warnings): (Vec<_>, Vec<_>) = config
        .validate()
        .into_iter()
        .partition(|message| message.severity() == Severity::Error);

    if !errors.is_empty() {
        let errors: Vec<String> = errors
            .iter()
            .map(|message| message.error().to_string())
            .collect();
        bail!(
            "config validation failed with {} error(s): {}",
            errors.len(),
            errors.join("; ")
        );
    }

    Ok(warnings
        .into_iter()
        .map(|message| message.into_error())
        .collect())
}
