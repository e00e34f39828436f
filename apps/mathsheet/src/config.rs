use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::layout::{default_layout_config, LayoutConfig};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub grid_width: usize,
    pub grid_height: usize,
    /// JSON question bank to preload into the generator registry.
    pub question_bank_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = default_layout_config();
        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            grid_width: parse_env("GRID_WIDTH", defaults.grid_width)?,
            grid_height: parse_env("GRID_HEIGHT", defaults.grid_height)?,
            question_bank_path: std::env::var_os("QUESTION_BANK_PATH").map(PathBuf::from),
        })
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("MATHSHEET_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("MATHSHEET_TEST_BAD_WIDTH", "wide");
        let err = parse_env::<usize>("MATHSHEET_TEST_BAD_WIDTH", 4).unwrap_err();
        assert!(err.to_string().contains("MATHSHEET_TEST_BAD_WIDTH"));
    }

    #[test]
    fn test_layout_config_from_fields() {
        let config = Config {
            port: 8080,
            rust_log: "info".to_string(),
            grid_width: 3,
            grid_height: 12,
            question_bank_path: None,
        };
        assert_eq!(
            config.layout_config(),
            LayoutConfig {
                grid_width: 3,
                grid_height: 12
            }
        );
    }
}
