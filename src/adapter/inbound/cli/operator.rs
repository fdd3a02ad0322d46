//! Inbound operator accessor for CLI handlers.

use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::port::inbound::operator::port::OperatorPort;

use super::paths;

static OPERATOR: OnceLock<Box<dyn OperatorPort>> = OnceLock::new();

/// Installs the operator implementation used by CLI handlers.
pub fn install(operator: Box<dyn OperatorPort>) -> std::result::Result<(), Box<dyn OperatorPort>> {
    OPERATOR.set(operator)
}

/// Returns the configured operator capability surface for CLI handlers.
pub fn operator() -> Result<&'static dyn OperatorPort> {
    OPERATOR.get().map(AsRef::as_ref).ok_or_else(|| {
        ConfigError::Other(
            "CLI operator not installed; call cli::operator::install from main".to_string(),
        )
        .into()
    })
}

/// Load config TOML from disk for operator-facing use-cases.
pub fn read_config_toml(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Like [`read_config_toml`], but a missing default config means defaults.
///
/// An explicitly named file must exist.
pub fn read_stage_config(path: &Path) -> Result<String> {
    if !path.exists() && path == paths::default_config() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(String::new());
    }
    read_config_toml(path)
}
