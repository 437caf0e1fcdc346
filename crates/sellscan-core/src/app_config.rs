use std::path::PathBuf;

/// Runtime configuration for a scraping run, loaded from environment
/// variables by [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WebDriver endpoint the browser session is obtained from.
    pub webdriver_url: String,
    pub log_level: String,
    /// Path to the marketplace descriptor table (YAML).
    pub marketplaces_path: PathBuf,
    /// Upper bound for a single page navigation.
    pub nav_timeout_secs: u64,
    /// Upper bound for waiting on a single element locator.
    pub element_wait_secs: u64,
    /// Fixed delay after navigation so asynchronous page content can render.
    pub settle_delay_ms: u64,
    /// Pause between consecutive page visits.
    pub inter_request_delay_ms: u64,
    /// Destination for the JSON Lines record sink.
    pub output_path: PathBuf,
}
