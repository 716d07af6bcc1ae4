//! Hospital Dashboard Core Library
//!
//! Client core for a hospital-management dashboard: patients, surgeries,
//! doctors, operating rooms, medical supplies and notifications, all owned
//! by a REST backend.
//!
//! # Architecture
//!
//! ```text
//!   UI host (webview / native shell)
//!        │  events: navigate, data-action clicks, keystrokes, form fields
//!        ▼
//!   ┌──────────────────────────────┐        ┌───────────────────┐
//!   │ Dashboard (app)              │ ─────▶ │ HospitalApi       │
//!   │  router · modals · toasts    │ ◀───── │  HttpApi (reqwest)│
//!   │  generation tokens · debounce│        └───────────────────┘
//!   └──────────────┬───────────────┘
//!                  │ AppState (state)
//!                  ▼
//!            render::page ──▶ RenderedPage (HTML fragments per region)
//! ```
//!
//! # Core Principle
//!
//! **The backend is the single source of truth.** Every view transition
//! fetches fresh data; the client keeps only the latest committed snapshot
//! per view and never caches across views.
//!
//! # Modules
//!
//! - [`models`]: Records and write payloads
//! - [`api`]: `HospitalApi` seam, `HttpApi`, `WriteOutcome`
//! - [`app`]: The `Dashboard` controller
//! - [`state`]: Explicit per-view application state
//! - [`render`]: HTML projection of the state
//! - [`forms`]: Form validation and payload building
//! - [`dispatch`]: Action table for `data-action` attributes
//! - [`ui`]: Router, modals, toasts, debouncing, generation tokens
//! - [`dashboard`], [`notifications`]: Aggregates and bulk mark-as-read
//! - [`config`]: Layered configuration and tracing setup

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod format;
pub mod forms;
pub mod models;
pub mod notifications;
pub mod render;
pub mod state;
pub mod ui;

// Re-export commonly used types
pub use api::{ApiError, HospitalApi, HttpApi, PatientQuery, SurgeryQuery, WriteOutcome};
pub use app::Dashboard;
pub use crate::config::{load_config, DashConfig};
pub use dispatch::Action;
pub use forms::{FormData, FormId};
pub use models::{
    Doctor, Notification, NotificationKind, OperatingRoom, Patient, Supply, Surgery,
    SurgeryStatus,
};
pub use render::{RenderContext, RenderedPage};
pub use state::AppState;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::ui::SearchField;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DashError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Backend error: {0}")]
    ApiError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<api::ApiError> for DashError {
    fn from(e: api::ApiError) -> Self {
        DashError::ApiError(e.to_string())
    }
}

impl From<anyhow::Error> for DashError {
    fn from(e: anyhow::Error) -> Self {
        DashError::ConfigError(e.to_string())
    }
}

impl From<std::io::Error> for DashError {
    fn from(e: std::io::Error) -> Self {
        DashError::RuntimeError(e.to_string())
    }
}

impl From<dispatch::DispatchError> for DashError {
    fn from(e: dispatch::DispatchError) -> Self {
        DashError::InvalidInput(e.to_string())
    }
}

impl From<forms::FormError> for DashError {
    fn from(e: forms::FormError) -> Self {
        DashError::InvalidInput(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Load configuration, connect to the backend and run the initial load.
///
/// `config_path` names an optional config file (extension optional);
/// `HOSPITAL_DASH__*` environment variables override it.
#[uniffi::export]
pub fn open_dashboard(config_path: Option<String>) -> Result<Arc<HospitalDashCore>, DashError> {
    let config = load_config(config_path.as_deref())?;
    crate::config::init_tracing(&config.observability.log_level);

    let api = HttpApi::new(&config.api.base_url, config.api.request_timeout())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let dashboard = Arc::new(Dashboard::new(api, &config.ui));

    runtime.block_on(dashboard.start());
    tracing::info!(base_url = %config.api.base_url, "dashboard opened");

    Ok(Arc::new(HospitalDashCore { runtime, dashboard }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Dashboard controller plus the runtime that drives it.
///
/// Every method blocks until its requests finish and returns the frame to
/// paint, except `search_input`, which returns at once and loads in the
/// background after the debounce delay. Hosts poll `frame` to pick up
/// background loads and toast expiry.
#[derive(uniffi::Object)]
pub struct HospitalDashCore {
    runtime: Runtime,
    dashboard: Arc<Dashboard<HttpApi>>,
}

#[uniffi::export]
impl HospitalDashCore {
    /// Switch sections. Unknown targets are ignored.
    pub fn navigate(&self, target: String) -> FfiFrame {
        self.runtime.block_on(self.dashboard.navigate(&target));
        self.frame()
    }

    /// Run the action named by a clicked element's `data-action`/`data-id`.
    pub fn dispatch(&self, action: String, argument: Option<String>) -> Result<FfiFrame, DashError> {
        self.runtime
            .block_on(self.dashboard.dispatch_raw(&action, argument.as_deref()))?;
        Ok(self.frame())
    }

    /// A keystroke in `patientSearch` or `surgerySearch`.
    pub fn search_input(&self, field: String, value: String) -> Result<FfiFrame, DashError> {
        let field: SearchField = field.parse().map_err(DashError::InvalidInput)?;
        let dashboard = Arc::clone(&self.dashboard);
        self.runtime.spawn(async move {
            dashboard.on_search_input(field, &value).await;
        });
        Ok(self.frame())
    }

    pub fn set_surgery_status_filter(&self, value: String) -> FfiFrame {
        self.runtime
            .block_on(self.dashboard.set_surgery_status_filter(&value));
        self.frame()
    }

    pub fn set_surgery_date_filter(&self, value: String) -> FfiFrame {
        self.runtime
            .block_on(self.dashboard.set_surgery_date_filter(&value));
        self.frame()
    }

    /// Submit a form by element id with its fields in document order.
    pub fn submit_form(&self, form: String, fields: Vec<FfiFormField>) -> Result<FfiFrame, DashError> {
        let form: FormId = form.parse()?;
        let data = FormData::from_pairs(fields.into_iter().map(|f| (f.name, f.value)));
        self.runtime.block_on(self.dashboard.submit_form(form, &data));
        Ok(self.frame())
    }

    /// Reload the active section and notifications.
    pub fn refresh(&self) -> FfiFrame {
        self.runtime.block_on(self.dashboard.refresh());
        self.frame()
    }

    /// Current frame without any requests.
    pub fn frame(&self) -> FfiFrame {
        self.dashboard.page().into()
    }
}

// =========================================================================
// FFI Record Types
// =========================================================================

/// One rendered frame, split by page region.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFrame {
    pub sidebar: String,
    pub header: String,
    pub content: String,
    pub modal: String,
    pub toasts: String,
    pub notifications: String,
    pub badge: String,
}

impl From<RenderedPage> for FfiFrame {
    fn from(page: RenderedPage) -> Self {
        Self {
            sidebar: page.sidebar,
            header: page.header,
            content: page.content,
            modal: page.modal,
            toasts: page.toasts,
            notifications: page.notifications,
            badge: page.badge,
        }
    }
}

/// A submitted form field.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormField {
    pub name: String,
    pub value: String,
}
