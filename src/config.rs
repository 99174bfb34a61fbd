use std::env;

use thiserror::Error;

const WINDOW_WIDTH_VAR: &str = "STOCKROOM_WINDOW_WIDTH";
const WINDOW_HEIGHT_VAR: &str = "STOCKROOM_WINDOW_HEIGHT";
const LOG_VAR: &str = "STOCKROOM_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Default tracing filter, used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number, got \"{value}\"")]
    InvalidSize { var: &'static str, value: String },
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            window_width: size(&lookup, WINDOW_WIDTH_VAR)?.unwrap_or(defaults.window_width),
            window_height: size(&lookup, WINDOW_HEIGHT_VAR)?.unwrap_or(defaults.window_height),
            log_filter: lookup(LOG_VAR)
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or(defaults.log_filter),
        })
    }
}

fn size(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<f32>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse::<f32>() {
        Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Ok(Some(parsed)),
        _ => Err(ConfigError::InvalidSize { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]), Ok(AppConfig::default()));
    }

    #[test]
    fn test_overrides() {
        assert_eq!(
            load(&[
                (WINDOW_WIDTH_VAR, "1024"),
                (WINDOW_HEIGHT_VAR, " 768 "),
                (LOG_VAR, "stockroom=debug"),
            ]),
            Ok(AppConfig {
                window_width: 1024.0,
                window_height: 768.0,
                log_filter: "stockroom=debug".to_string(),
            })
        );
    }

    #[rstest]
    #[case("wide")]
    #[case("-5")]
    #[case("0")]
    fn test_invalid_size(#[case] value: &str) {
        assert_eq!(
            load(&[(WINDOW_WIDTH_VAR, value)]),
            Err(ConfigError::InvalidSize {
                var: WINDOW_WIDTH_VAR,
                value: value.to_string(),
            })
        );
    }
}
