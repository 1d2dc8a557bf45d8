//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chart::{AxisDirection, ChartOptions, ChartVariant, Theme};
use crate::notification::{NotificationDefaults, DEFAULT_ICON, DEFAULT_TITLE};
use crate::weight::SortOrder;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chart rendering defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub variant: ChartVariant,

    #[serde(default)]
    pub axis_direction: AxisDirection,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub sort_order: SortOrder,
}

impl ChartConfig {
    pub fn options(&self) -> ChartOptions {
        ChartOptions {
            variant: self.variant,
            axis_direction: self.axis_direction,
        }
    }
}

/// Push notification defaults
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notification_title")]
    pub default_title: String,

    #[serde(default = "default_notification_icon")]
    pub icon: String,
}

fn default_notification_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_notification_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_title: default_notification_title(),
            icon: default_notification_icon(),
        }
    }
}

impl NotificationConfig {
    pub fn defaults(&self) -> NotificationDefaults {
        NotificationDefaults {
            title: self.default_title.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// API server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1 MB
}

fn default_max_entries() -> usize {
    10_000
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
            max_entries: default_max_entries(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> String {
        format!("vetchart={},tower_http={}", self.level, self.level)
    }

    /// Install the global tracing subscriber, writing to stderr
    ///
    /// `RUST_LOG` takes precedence over the configured level. Calling this
    /// twice is harmless; the second call is ignored.
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.filter_directive()));
        let registry = tracing_subscriber::registry().with(filter);

        let result = match self.format.as_str() {
            "json" => registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            _ => registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init(),
        };

        if result.is_err() {
            tracing::debug!("Tracing subscriber already installed");
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("vetchart").join("config.toml")),
            Some(PathBuf::from("/etc/vetchart/config.toml")),
            Some(PathBuf::from("./vetchart.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparsable values are ignored
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Chart overrides
        if let Some(variant) = lookup("VETCHART_CHART_VARIANT").and_then(|v| v.parse().ok()) {
            self.chart.variant = variant;
        }
        if let Some(direction) = lookup("VETCHART_AXIS_DIRECTION").and_then(|v| v.parse().ok()) {
            self.chart.axis_direction = direction;
        }
        if let Some(theme) = lookup("VETCHART_THEME").and_then(|v| v.parse().ok()) {
            self.chart.theme = theme;
        }
        if let Some(order) = lookup("VETCHART_SORT_ORDER").and_then(|v| v.parse().ok()) {
            self.chart.sort_order = order;
        }

        // Notification overrides
        if let Some(title) = lookup("VETCHART_NOTIFICATION_TITLE") {
            self.notifications.default_title = title;
        }
        if let Some(icon) = lookup("VETCHART_NOTIFICATION_ICON") {
            self.notifications.icon = icon;
        }

        // API overrides
        if let Some(host) = lookup("VETCHART_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("VETCHART_API_PORT").and_then(|p| p.parse().ok()) {
            self.api.port = port;
        }
        if let Some(max) = lookup("VETCHART_API_MAX_ENTRIES").and_then(|m| m.parse().ok()) {
            self.api.max_entries = max;
        }

        // Logging overrides
        if let Some(level) = lookup("VETCHART_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("VETCHART_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Vetchart Configuration
#
# Environment variables override these settings:
# - VETCHART_CHART_VARIANT
# - VETCHART_AXIS_DIRECTION
# - VETCHART_THEME
# - VETCHART_SORT_ORDER
# - VETCHART_NOTIFICATION_TITLE
# - VETCHART_NOTIFICATION_ICON
# - VETCHART_API_HOST
# - VETCHART_API_PORT
# - VETCHART_API_MAX_ENTRIES
# - VETCHART_LOG_LEVEL
# - VETCHART_LOG_FORMAT

[chart]
# Chart variant: basic or detailed
variant = "detailed"

# Horizontal axis policy: chronological (earliest date always on the left)
# or follow_sort_order (descending lists mirror the axis)
axis_direction = "chronological"

# Presentation mode: light or dark
theme = "light"

# Default sort order of weight lists: asc or desc
sort_order = "asc"

[notifications]
# Title used when a push message carries none
default_title = "Nova Notificação"

# Icon path attached to every notification
icon = "/icon.png"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

# Maximum request body size (bytes)
max_body_size = 1048576

# Maximum number of weight entries in one chart request
max_entries = 10000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config = Config::from_toml_str(&generate_default_config()).unwrap();
        assert_eq!(config.chart.variant, ChartVariant::Detailed);
        assert_eq!(config.chart.axis_direction, AxisDirection::Chronological);
        assert_eq!(config.notifications.default_title, DEFAULT_TITLE);
        assert_eq!(config.api.port, 8086);
        assert_eq!(config.api.max_entries, 10_000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml_str("[chart]\ntheme = \"dark\"\n").unwrap();
        assert_eq!(config.chart.theme, Theme::Dark);
        assert_eq!(config.chart.variant, ChartVariant::Detailed);
        assert_eq!(config.notifications.icon, DEFAULT_ICON);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml_str("[chart]\nvariant = \"3d\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/vetchart.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vetchart.toml");
        std::fs::write(&path, "[api]\nport = 9000\nmax_entries = 500\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.max_entries, 500);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VETCHART_CHART_VARIANT", "basic"),
            ("VETCHART_AXIS_DIRECTION", "follow_sort_order"),
            ("VETCHART_THEME", "dark"),
            ("VETCHART_API_PORT", "not-a-port"),
            ("VETCHART_API_MAX_ENTRIES", "250"),
            ("VETCHART_NOTIFICATION_TITLE", "New notification"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.chart.variant, ChartVariant::Basic);
        assert_eq!(config.chart.axis_direction, AxisDirection::FollowSortOrder);
        assert_eq!(config.chart.theme, Theme::Dark);
        assert_eq!(config.api.port, 8086);
        assert_eq!(config.api.max_entries, 250);
        assert_eq!(config.notifications.defaults().title, "New notification");
        assert_eq!(config.chart.options().variant, ChartVariant::Basic);
    }

    #[test]
    fn test_filter_directive() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };
        assert_eq!(logging.filter_directive(), "vetchart=debug,tower_http=debug");
    }
}
