//! Path utilities for unimarket.
//!
//! User configuration lives under `~/.unimarket/`:
//! - `~/.unimarket/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the unimarket home directory (`~/.unimarket/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".unimarket")
}

/// Returns the default config file path (`~/.unimarket/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_under_unimarket_home() {
        let config = default_config();

        assert!(home_dir().to_string_lossy().contains(".unimarket"));
        assert!(config.starts_with(home_dir()));
        assert_eq!(config.file_name().unwrap(), "config.toml");
    }
}
