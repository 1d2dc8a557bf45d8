//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::chart::WeightChart;
use crate::config::{ApiSettings, Config};
use crate::notification::{BackgroundMessageHandler, NotificationDefaults, TracingSink};
use crate::weight::SortOrder;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Chart renderer carrying the configured defaults
    pub chart: WeightChart,
    /// Sort order used when a request does not name one
    pub sort_order: SortOrder,
    /// Resolves and displays push payloads
    pub notifier: BackgroundMessageHandler,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with default chart options and a logging notification sink
    pub fn new(config: ApiConfig) -> Self {
        Self {
            chart: WeightChart::default(),
            sort_order: SortOrder::default(),
            notifier: BackgroundMessageHandler::new(
                Arc::new(TracingSink),
                NotificationDefaults::default(),
            ),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create state from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            chart: WeightChart::new(config.chart.options(), config.chart.theme),
            sort_order: config.chart.sort_order,
            notifier: BackgroundMessageHandler::new(
                Arc::new(TracingSink),
                config.notifications.defaults(),
            ),
            config: Arc::new(ApiConfig::from(&config.api)),
            start_time: Instant::now(),
        }
    }

    /// Builder method: replace the notification handler
    pub fn notifier(mut self, notifier: BackgroundMessageHandler) -> Self {
        self.notifier = notifier;
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Maximum number of entries accepted in one chart request
    pub max_entries: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8086,
            max_body_size: 1024 * 1024, // 1MB
            max_entries: 10_000,
        }
    }
}

impl From<&ApiSettings> for ApiConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            max_body_size: settings.max_body_size,
            max_entries: settings.max_entries,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartVariant, Theme};

    #[test]
    fn test_addr() {
        assert_eq!(ApiConfig::new("127.0.0.1", 9000).addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.chart.variant = ChartVariant::Basic;
        config.chart.theme = Theme::Dark;
        config.chart.sort_order = SortOrder::Desc;
        config.notifications.default_title = "Hello".to_string();
        config.api.port = 9100;
        config.api.max_entries = 42;

        let state = AppState::from_config(&config);
        assert_eq!(state.chart.options().variant, ChartVariant::Basic);
        assert_eq!(state.sort_order, SortOrder::Desc);
        assert_eq!(state.notifier.defaults().title, "Hello");
        assert_eq!(state.config.port, 9100);
        assert_eq!(state.config.max_entries, 42);
    }
}
