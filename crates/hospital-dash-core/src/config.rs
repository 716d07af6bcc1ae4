//! Runtime configuration and logging setup.
//!
//! Values come from an optional config file layered under
//! `HOSPITAL_DASH__*` environment variables, e.g.
//! `HOSPITAL_DASH__API__BASE_URL=http://ward-7:5000`.

use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::dashboard::DEFAULT_PREVIEW_LIMIT;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Backend origin; `/api/...` paths are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No timeout when unset
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_toast_ttl_ms")]
    pub toast_ttl_ms: u64,
    #[serde(default = "default_toast_fade_ms")]
    pub toast_fade_ms: u64,
    /// Items shown in each dashboard list
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            toast_ttl_ms: default_toast_ttl_ms(),
            toast_fade_ms: default_toast_fade_ms(),
            preview_limit: default_preview_limit(),
        }
    }
}

impl UiConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    pub fn toast_fade(&self) -> Duration {
        Duration::from_millis(self.toast_fade_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_toast_ttl_ms() -> u64 {
    5000
}

fn default_toast_fade_ms() -> u64 {
    300
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration. The file is optional; a missing one yields defaults
/// plus whatever the environment sets.
pub fn load_config(path: Option<&str>) -> Result<DashConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path).required(false));
    }
    let config = builder
        .add_source(
            Environment::with_prefix("HOSPITAL_DASH")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
