//! Build-time Configuration
//!
//! The bundle is static, so settings are baked in at compile time from the
//! environment of the `trunk build` invocation.

use std::sync::OnceLock;

const DEFAULT_API_BASE_URL: &str = "/api";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST API root, without trailing slash
    pub api_base_url: String,
    pub log_level: log::LevelFilter,
}

impl AppConfig {
    fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let log_level = log_level
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .parse()
            .unwrap_or(log::LevelFilter::Info);
        Self { api_base_url, log_level }
    }
}

/// Process-wide configuration, read once
pub fn app_config() -> &'static AppConfig {
    static CONFIG: OnceLock<AppConfig> = OnceLock::new();
    CONFIG.get_or_init(|| AppConfig::from_values(option_env!("API_BASE_URL"), option_env!("LOG_LEVEL")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::from_values(Some("https://api.example.com/v1/"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = AppConfig::from_values(Some("  "), Some("loud"));
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.log_level, log::LevelFilter::Info);
    }
}
