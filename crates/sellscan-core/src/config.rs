use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let webdriver_url = or_default("SELLSCAN_WEBDRIVER_URL", "http://localhost:9515");
    let log_level = or_default("SELLSCAN_LOG_LEVEL", "info");
    let marketplaces_path = PathBuf::from(or_default(
        "SELLSCAN_MARKETPLACES_PATH",
        "./config/marketplaces.yaml",
    ));
    let output_path = PathBuf::from(or_default("SELLSCAN_OUTPUT_PATH", "./sellers.jsonl"));

    let nav_timeout_secs = parse_u64("SELLSCAN_NAV_TIMEOUT_SECS", "30")?;
    let element_wait_secs = parse_u64("SELLSCAN_ELEMENT_WAIT_SECS", "5")?;
    let settle_delay_ms = parse_u64("SELLSCAN_SETTLE_DELAY_MS", "2000")?;
    let inter_request_delay_ms = parse_u64("SELLSCAN_INTER_REQUEST_DELAY_MS", "1500")?;

    Ok(AppConfig {
        webdriver_url,
        log_level,
        marketplaces_path,
        nav_timeout_secs,
        element_wait_secs,
        settle_delay_ms,
        inter_request_delay_ms,
        output_path,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_defaults_apply_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.webdriver_url, "http://localhost:9515");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.marketplaces_path.to_string_lossy(),
            "./config/marketplaces.yaml"
        );
        assert_eq!(cfg.nav_timeout_secs, 30);
        assert_eq!(cfg.element_wait_secs, 5);
        assert_eq!(cfg.settle_delay_ms, 2000);
        assert_eq!(cfg.inter_request_delay_ms, 1500);
        assert_eq!(cfg.output_path.to_string_lossy(), "./sellers.jsonl");
    }

    #[test]
    fn build_app_config_nav_timeout_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SELLSCAN_NAV_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.nav_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_nav_timeout_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SELLSCAN_NAV_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SELLSCAN_NAV_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SELLSCAN_NAV_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_delay_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SELLSCAN_INTER_REQUEST_DELAY_MS", "500");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.inter_request_delay_ms, 500);
    }

    #[test]
    fn build_app_config_delay_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SELLSCAN_INTER_REQUEST_DELAY_MS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SELLSCAN_INTER_REQUEST_DELAY_MS"),
            "expected InvalidEnvVar(SELLSCAN_INTER_REQUEST_DELAY_MS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_webdriver_url_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SELLSCAN_WEBDRIVER_URL", "http://selenium:4444");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.webdriver_url, "http://selenium:4444");
    }
}
