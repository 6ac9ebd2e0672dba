//! Configuration for the placer and the watchlist appender

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Characters Excel refuses in sheet names
const FORBIDDEN_TITLE_CHARS: &[char] = &['[', ']', '*', '?', ':', '/', '\\'];
/// Longest sheet name Excel accepts
const MAX_TITLE_LEN: usize = 31;

/// Top-level configuration, usually loaded from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub placer: PlacerConfig,
    #[serde(default)]
    pub watchlist: Option<WatchlistConfig>,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.placer.validate()?;
        if let Some(watchlist) = &self.watchlist {
            watchlist.validate()?;
        }
        Ok(())
    }
}

/// Settings for the cover-page placer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacerConfig {
    /// Template workbook whose first sheet is cloned into workbooks that
    /// lack a cover sheet
    #[serde(default)]
    pub template_path: Option<PathBuf>,
    /// Root directory whose tree is walked for spreadsheet files
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    /// Canonical name the cover sheet must ultimately bear
    #[serde(default = "default_target_title")]
    pub target_sheet_title: String,
    /// Substring identifying an existing cover sheet by name
    /// (case-sensitive)
    #[serde(default = "default_marker")]
    pub marker_substring: String,
    /// Rename a non-canonical marker match to the target title instead of
    /// leaving its name untouched
    #[serde(default)]
    pub rename_matches: bool,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            template_path: None,
            root_dir: None,
            target_sheet_title: default_target_title(),
            marker_substring: default_marker(),
            rename_matches: false,
        }
    }
}

impl PlacerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.marker_substring.is_empty() {
            anyhow::bail!("Configuration error: marker_substring must not be empty");
        }
        if self.target_sheet_title.is_empty() {
            anyhow::bail!("Configuration error: target_sheet_title must not be empty");
        }
        if self.target_sheet_title.chars().count() > MAX_TITLE_LEN {
            anyhow::bail!(
                "Configuration error: target_sheet_title exceeds {} characters",
                MAX_TITLE_LEN
            );
        }
        if let Some(c) = self
            .target_sheet_title
            .chars()
            .find(|c| FORBIDDEN_TITLE_CHARS.contains(c))
        {
            anyhow::bail!(
                "Configuration error: target_sheet_title contains '{}', which Excel forbids in sheet names",
                c
            );
        }
        Ok(())
    }
}

/// Settings for the watchlist companion tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistConfig {
    /// Credential for the catalog API
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Existing workbook the metadata row is appended to
    pub output_path: PathBuf,
    /// Region whose streaming providers are reported
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl WatchlistConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("Configuration error: watchlist api_key must not be empty");
        }
        if self.region.is_empty() {
            anyhow::bail!("Configuration error: watchlist region must not be empty");
        }
        Ok(())
    }
}

fn default_target_title() -> String {
    "CUI Cover Page".to_string()
}

fn default_marker() -> String {
    "CUI".to_string()
}

fn default_api_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.placer.target_sheet_title, "CUI Cover Page");
        assert_eq!(config.placer.marker_substring, "CUI");
        assert!(!config.placer.rename_matches);
        assert!(config.watchlist.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [placer]
            template_path = "template.xlsx"
            root_dir = "workbooks"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.placer.template_path.as_deref(),
            Some(Path::new("template.xlsx"))
        );
        assert_eq!(config.placer.root_dir.as_deref(), Some(Path::new("workbooks")));
        // Unset fields fall back to defaults
        assert_eq!(config.placer.marker_substring, "CUI");
    }

    #[test]
    fn test_parse_watchlist_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [watchlist]
            api_key = "secret"
            output_path = "Watchlist.xlsx"
            region = "GB"
            "#,
        )
        .unwrap();

        let watchlist = config.watchlist.unwrap();
        assert_eq!(watchlist.api_key, "secret");
        assert_eq!(watchlist.region, "GB");
        assert_eq!(watchlist.api_base_url, "https://api.themoviedb.org/3");
        assert_eq!(watchlist.timeout_seconds, 10);
    }

    #[test]
    fn test_validation_rejects_empty_marker() {
        let mut config = AppConfig::default();
        config.placer.marker_substring = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_titles() {
        let mut config = AppConfig::default();
        config.placer.target_sheet_title = "Cover/Page".to_string();
        assert!(config.validate().is_err());

        config.placer.target_sheet_title = "X".repeat(32);
        assert!(config.validate().is_err());

        config.placer.target_sheet_title = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_api_key() {
        let config: AppConfig = toml::from_str(
            r#"
            [watchlist]
            api_key = ""
            output_path = "Watchlist.xlsx"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
