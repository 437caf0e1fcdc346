use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One regional storefront of the retail platform.
///
/// Consumed by the scraper only for URL construction; the descriptor table
/// is external static configuration and is never re-derived at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marketplace {
    /// Short locale tag, e.g. `"uk"` or `"de"`. Dedup provenance is recorded
    /// against this code.
    pub code: String,
    /// Storefront hostname, e.g. `"www.amazon.co.uk"`.
    pub domain: String,
    pub currency: String,
    pub tld: String,
}

#[derive(Debug, Deserialize)]
pub struct MarketplacesFile {
    pub marketplaces: Vec<Marketplace>,
}

impl MarketplacesFile {
    /// Select marketplaces by code, preserving the order of `codes` so that
    /// "first seen on" provenance follows the caller-requested order.
    ///
    /// An empty `codes` slice selects every configured marketplace in file
    /// order. Codes are matched case-insensitively; unknown codes are
    /// silently ignored.
    #[must_use]
    pub fn subset(&self, codes: &[String]) -> Vec<Marketplace> {
        if codes.is_empty() {
            return self.marketplaces.clone();
        }
        codes
            .iter()
            .filter_map(|code| {
                self.marketplaces
                    .iter()
                    .find(|m| m.code.eq_ignore_ascii_case(code))
                    .cloned()
            })
            .collect()
    }
}

/// Load and validate the marketplace descriptor table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_marketplaces(path: &Path) -> Result<MarketplacesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MarketplacesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: MarketplacesFile = serde_yaml::from_str(&content)?;

    validate_marketplaces(&file)?;

    Ok(file)
}

fn validate_marketplaces(file: &MarketplacesFile) -> Result<(), ConfigError> {
    if file.marketplaces.is_empty() {
        return Err(ConfigError::Validation(
            "marketplace table must not be empty".to_string(),
        ));
    }

    let mut seen_codes = HashSet::new();
    for marketplace in &file.marketplaces {
        if marketplace.code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "marketplace code must be non-empty".to_string(),
            ));
        }
        if marketplace.domain.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "marketplace '{}' has an empty domain",
                marketplace.code
            )));
        }

        let lower_code = marketplace.code.to_lowercase();
        if !seen_codes.insert(lower_code) {
            return Err(ConfigError::Validation(format!(
                "duplicate marketplace code: '{}'",
                marketplace.code
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> MarketplacesFile {
        MarketplacesFile {
            marketplaces: entries
                .iter()
                .map(|(code, domain)| Marketplace {
                    code: (*code).to_string(),
                    domain: (*domain).to_string(),
                    currency: "EUR".to_string(),
                    tld: "de".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn parses_yaml_table() {
        let yaml = r"
marketplaces:
  - code: uk
    domain: www.amazon.co.uk
    currency: GBP
    tld: co.uk
  - code: de
    domain: www.amazon.de
    currency: EUR
    tld: de
";
        let file: MarketplacesFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.marketplaces.len(), 2);
        assert_eq!(file.marketplaces[0].code, "uk");
        assert_eq!(file.marketplaces[1].domain, "www.amazon.de");
    }

    #[test]
    fn validation_rejects_duplicate_codes() {
        let file = table(&[("uk", "www.amazon.co.uk"), ("UK", "www.amazon.co.uk")]);
        let result = validate_marketplaces(&file);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected duplicate-code validation error, got: {result:?}"
        );
    }

    #[test]
    fn validation_rejects_empty_domain() {
        let file = table(&[("de", "")]);
        assert!(validate_marketplaces(&file).is_err());
    }

    #[test]
    fn validation_rejects_empty_table() {
        let file = MarketplacesFile {
            marketplaces: vec![],
        };
        assert!(validate_marketplaces(&file).is_err());
    }

    #[test]
    fn subset_empty_codes_returns_all_in_file_order() {
        let file = table(&[("uk", "a"), ("de", "b"), ("fr", "c")]);
        let selected = file.subset(&[]);
        let codes: Vec<_> = selected.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, ["uk", "de", "fr"]);
    }

    #[test]
    fn subset_preserves_requested_order() {
        let file = table(&[("uk", "a"), ("de", "b"), ("fr", "c")]);
        let selected = file.subset(&["fr".to_string(), "uk".to_string()]);
        let codes: Vec<_> = selected.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, ["fr", "uk"]);
    }

    #[test]
    fn subset_matches_codes_case_insensitively_and_drops_unknown() {
        let file = table(&[("uk", "a"), ("de", "b")]);
        let selected = file.subset(&["DE".to_string(), "jp".to_string()]);
        let codes: Vec<_> = selected.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, ["de"]);
    }

    #[test]
    fn load_marketplaces_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marketplaces.yaml");
        std::fs::write(
            &path,
            "marketplaces:\n  - code: us\n    domain: www.amazon.com\n    currency: USD\n    tld: com\n",
        )
        .unwrap();
        let file = load_marketplaces(&path).unwrap();
        assert_eq!(file.marketplaces.len(), 1);
        assert_eq!(file.marketplaces[0].code, "us");
    }

    #[test]
    fn load_marketplaces_missing_file_is_io_error() {
        let result = load_marketplaces(Path::new("/nonexistent/marketplaces.yaml"));
        assert!(matches!(
            result,
            Err(ConfigError::MarketplacesFileIo { .. })
        ));
    }
}
