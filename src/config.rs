use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub office: OfficeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Working directory for the outbox and logs
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    /// Hide the contact panel on terminals narrower than this
    #[serde(default = "default_contact_panel_min_width")]
    pub contact_panel_min_width: u16,
}

fn default_contact_panel_min_width() -> u16 {
    100
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

/// Where completed inquiries are delivered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Write each inquiry to the local outbox directory
    #[serde(default = "default_outbox_enabled")]
    pub outbox_enabled: bool,
    /// Optional HTTP endpoint that receives each inquiry
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

fn default_outbox_enabled() -> bool {
    true
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            outbox_enabled: default_outbox_enabled(),
            webhook: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_webhook_enabled")]
    pub enabled: bool,
    pub url: String,
    /// Environment variable holding a bearer token
    #[serde(default)]
    pub token_env: Option<String>,
    /// Retries after the first attempt (default: 3)
    #[serde(default = "default_webhook_retries")]
    pub max_retries: usize,
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

fn default_webhook_enabled() -> bool {
    true
}

fn default_webhook_retries() -> usize {
    3
}

fn default_webhook_timeout() -> u64 {
    10
}

/// Static office details shown next to the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeConfig {
    pub headline: String,
    pub tagline: String,
    pub office_name: String,
    pub address: Vec<String>,
    pub phones: Vec<String>,
    pub email: String,
    pub emergency_title: String,
    pub emergency_note: String,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            headline: "Get in touch".to_string(),
            tagline: "Contacting one of our expert travel designers will be your first step towards your trip of a lifetime.".to_string(),
            office_name: "Uganda Office".to_string(),
            address: vec![
                "Mirage Complex, Second Floor".to_string(),
                "RM MC2 - 05 Kitintale".to_string(),
                "P.O. Box 200473 Nakawa K'la".to_string(),
            ],
            phones: vec![
                "+256 788 232 695".to_string(),
                "+256 756 733 094".to_string(),
                "+256 763 174 100".to_string(),
            ],
            email: "info@jestudyabroad.com".to_string(),
            emergency_title: "Emergency 24 / 7".to_string(),
            emergency_note: "An emergency number will be provided to you at arrival.".to_string(),
        }
    }
}

impl Config {
    /// Path to the project config file within .inquiry/
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".inquiry/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the wizard works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let project_config = Self::project_config_path();
        if project_config.exists() {
            builder = builder.add_source(config::File::from(project_config));
        }

        // User config in ~/.config/inquiry/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("inquiry").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with INQUIRY_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("INQUIRY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to .inquiry/config.toml
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::project_config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(config_path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    /// Get absolute path to the data directory
    pub fn data_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.data);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Directory holding delivered inquiries
    pub fn outbox_path(&self) -> PathBuf {
        self.data_path().join("outbox")
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.data_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                data: ".inquiry".to_string(), // Relative to cwd
            },
            ui: UiConfig {
                refresh_rate_ms: 250,
                contact_panel_min_width: default_contact_panel_min_width(),
            },
            logging: LoggingConfig::default(),
            submission: SubmissionConfig::default(),
            office: OfficeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths_hang_off_data_dir() {
        let config = Config::default();
        assert!(config.outbox_path().ends_with(".inquiry/outbox"));
        assert!(config.logs_path().ends_with(".inquiry/logs"));
    }

    #[test]
    fn test_absolute_data_path_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.data = temp_dir.path().to_string_lossy().to_string();
        assert_eq!(config.data_path(), temp_dir.path());
    }

    #[test]
    fn test_default_submission_uses_outbox_only() {
        let config = Config::default();
        assert!(config.submission.outbox_enabled);
        assert!(config.submission.webhook.is_none());
    }

    #[test]
    fn test_default_office_matches_contact_page() {
        let office = OfficeConfig::default();
        assert_eq!(office.phones.len(), 3);
        assert_eq!(office.email, "info@jestudyabroad.com");
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[paths]
data = "/tmp/inquiry-test"

[submission]
outbox_enabled = false

[submission.webhook]
url = "https://crm.example.com/hooks/inquiry"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.paths.data, "/tmp/inquiry-test");
        assert!(!config.submission.outbox_enabled);
        let webhook = config.submission.webhook.unwrap();
        assert_eq!(webhook.url, "https://crm.example.com/hooks/inquiry");
        assert!(webhook.enabled);
        assert_eq!(webhook.max_retries, 3);
        // Untouched sections keep their defaults
        assert_eq!(config.ui.refresh_rate_ms, 250);
    }

    #[test]
    fn test_save_roundtrips_through_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.office.office_name = "Kampala Office".to_string();

        config.save_to(&path).unwrap();
        let loaded: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.office.office_name, "Kampala Office");
        assert_eq!(loaded.office.address.len(), 3);
    }
}
