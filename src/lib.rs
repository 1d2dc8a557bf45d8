//! # Vetchart
//!
//! Weight-history charts and background push notifications for pet medical
//! records.
//!
//! ## Features
//!
//! - **Unit normalization**: kg, lb and g measurements on one canonical scale
//! - **Weight charts**: positioned scenes rendered to self-contained SVG,
//!   with a basic and a detailed (interactive) variant
//! - **Push notifications**: title/body resolution with defaults, delivered
//!   to pluggable sinks
//! - **Import**: weight histories from JSON and CSV files
//!
//! ## Modules
//!
//! - [`weight`]: Weight entries, units and histories
//! - [`chart`]: Chart layout, selection and SVG rendering
//! - [`notification`]: Push payload handling
//! - [`import`]: JSON and CSV history import
//! - [`config`]: TOML configuration with environment overrides
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use vetchart::chart::{Theme, WeightChart};
//! use vetchart::weight::{SortOrder, WeightHistory};
//!
//! let history = WeightHistory::sample();
//! let chart = WeightChart::default().theme(Theme::Dark);
//!
//! let svg = chart
//!     .render_svg(history.entries(), SortOrder::Desc)
//!     .expect("three entries are enough to draw");
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod import;
pub mod notification;
pub mod weight;

pub use chart::{ChartOptions, ChartScene, WeightChart};
pub use config::Config;
pub use notification::{BackgroundMessageHandler, Notification, PushPayload};
pub use weight::{SortOrder, WeightEntry, WeightHistory, WeightUnit};
