//! HTML projection of [`AppState`].
//!
//! Rendering never touches the network or mutates state: the same state and
//! context always produce the same page. Every interactive element carries
//! its [`Action`](crate::dispatch::Action) as `data-*` attributes.

mod dashboard;
mod modals;
mod notifications;
mod tables;

pub use dashboard::*;
pub use modals::*;
pub use notifications::*;
pub use tables::*;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tokio::time::Instant;

use crate::dispatch::Action;
use crate::state::AppState;
use crate::ui::{Section, ToastPhase};

/// Clock readings used while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Local calendar day for "Today"/"Tomorrow" and upcoming checks
    pub today: NaiveDate,
    /// Wall clock for "time ago" labels
    pub now: DateTime<Utc>,
    /// Monotonic clock for toast phases
    pub instant: Instant,
}

impl RenderContext {
    pub fn current() -> Self {
        Self {
            today: Local::now().date_naive(),
            now: Utc::now(),
            instant: Instant::now(),
        }
    }
}

/// One rendered frame, split by page region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub sidebar: String,
    pub header: String,
    /// The active content panel
    pub content: String,
    /// Overlay plus visible dialogs; empty when closed
    pub modal: String,
    pub toasts: String,
    /// Notification dropdown list
    pub notifications: String,
    /// Unread badge text
    pub badge: String,
}

/// Render the whole page.
pub fn page(state: &AppState, ctx: &RenderContext) -> RenderedPage {
    let unread = crate::notifications::unread_count(state.notifications.rows());
    let badge = crate::notifications::badge_text(unread);
    let notifications = notification_list(&state.notifications, ctx);
    RenderedPage {
        sidebar: sidebar(state),
        header: header(state, &badge, &notifications),
        content: content(state, ctx),
        modal: modal_layer(state),
        toasts: toasts(state, ctx),
        notifications,
        badge,
    }
}

/// Escape text for element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn sidebar(state: &AppState) -> String {
    let items: String = Section::ALL
        .iter()
        .map(|section| {
            let class = if state.router.is_active(*section) { " class=\"active\"" } else { "" };
            format!(
                r##"<li{}><a href="#" id="{}" {}><i class="fas {}"></i> <span>{}</span></a></li>"##,
                class,
                section.nav_id(),
                Action::navigate(*section).data_attrs(),
                section.icon(),
                section.title()
            )
        })
        .collect();

    let collapsed = if state.chrome.sidebar_collapsed() { " active" } else { "" };
    format!(
        r#"<nav id="sidebar" class="sidebar{}"><ul class="list-unstyled components">{}</ul></nav>"#,
        collapsed, items
    )
}

fn header(state: &AppState, badge: &str, list: &str) -> String {
    use crate::ui::Dropdown;

    let show = |dropdown| if state.chrome.is_open(dropdown) { " show" } else { "" };
    format!(
        r##"<header class="topbar">
    <button type="button" id="sidebarCollapse" class="btn" {toggle_sidebar}><i class="fas fa-bars"></i></button>
    <div class="topbar-actions">
        <div class="notifications">
            <button type="button" class="btn notification-toggle" {toggle_notifications}>
                <i class="fas fa-bell"></i><span id="unreadNotificationsCount" class="badge">{badge}</span>
            </button>
            <div id="notificationsDropdown" class="dropdown-menu{notifications_show}">
                <div class="dropdown-header">Notifications <a href="#" id="markAllRead" {mark_all}>Mark all as read</a></div>
                <div id="notificationsList">{list}</div>
            </div>
        </div>
        <div class="user-menu">
            <button type="button" class="btn user-toggle" {toggle_user}><i class="fas fa-user-circle"></i></button>
            <div id="userDropdown" class="dropdown-menu{user_show}">
                <a href="#" {profile}>Profile</a>
                <a href="#" {settings}>Settings</a>
            </div>
        </div>
    </div>
</header>"##,
        toggle_sidebar = Action::ToggleSidebar.data_attrs(),
        toggle_notifications = Action::ToggleNotifications.data_attrs(),
        badge = badge,
        notifications_show = show(Dropdown::Notifications),
        mark_all = Action::MarkAllRead.data_attrs(),
        list = list,
        toggle_user = Action::ToggleUserMenu.data_attrs(),
        user_show = show(Dropdown::UserMenu),
        profile = Action::Navigate("profile".into()).data_attrs(),
        settings = Action::Navigate("settings".into()).data_attrs(),
    )
}

fn content(state: &AppState, ctx: &RenderContext) -> String {
    let section = state.router.active();
    let body = match section {
        Section::Dashboard => dashboard_panel(&state.dashboard, ctx),
        Section::Patients => patients_panel(&state.patients),
        Section::Surgeries => surgeries_panel(&state.surgeries),
        Section::Doctors => doctors_panel(&state.doctors),
        Section::OperatingRooms => rooms_panel(&state.rooms),
        Section::MedicalSupplies => supplies_panel(&state.supplies),
    };
    format!(
        r#"<section id="{}" class="content-section active"><h2>{}</h2>{}</section>"#,
        section.content_id(),
        section.title(),
        body
    )
}

fn toasts(state: &AppState, ctx: &RenderContext) -> String {
    let items: String = state
        .toasts
        .iter()
        .map(|toast| {
            let fading = match toast.phase(ctx.instant) {
                ToastPhase::Visible => "",
                ToastPhase::FadingOut => " fade-out",
            };
            let icon = match toast.kind {
                crate::ui::ToastKind::Success => "fa-check-circle",
                crate::ui::ToastKind::Error => "fa-exclamation-circle",
            };
            format!(
                r#"<div class="toast toast-{}{}" data-toast-id="{}"><i class="fas {}"></i><span class="toast-message">{}</span><button type="button" class="toast-close" {}>&times;</button></div>"#,
                toast.kind.as_str(),
                fading,
                escape(&toast.id),
                icon,
                escape(&toast.message),
                Action::DismissToast(toast.id.clone()).data_attrs()
            )
        })
        .collect();
    format!(r#"<div id="toastContainer">{}</div>"#, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ModalId;

    fn ctx() -> RenderContext {
        RenderContext {
            today: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            now: Utc::now(),
            instant: Instant::now(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_sidebar_marks_active_section() {
        let mut state = AppState::default();
        state.router.activate(Section::Doctors);
        let page = page(&state, &ctx());
        assert!(page.sidebar.contains(r##"<li class="active"><a href="#" id="nav-doctors""##));
        assert!(!page.sidebar.contains(r##"<li class="active"><a href="#" id="nav-dashboard""##));
        assert!(page.content.contains(r#"id="doctorsContent""#));
    }

    #[test]
    fn test_modal_layer_empty_when_closed() {
        let mut state = AppState::default();
        assert!(page(&state, &ctx()).modal.is_empty());

        state.modal.show(ModalId::AddPatient);
        let modal = page(&state, &ctx()).modal;
        assert!(modal.contains("modalOverlay"));
        assert!(modal.contains("addPatientForm"));
    }

    #[test]
    fn test_toasts_rendered_escaped() {
        let mut state = AppState::default();
        state.toasts.error("Error: <Conflict>");
        let toasts = page(&state, &ctx()).toasts;
        assert!(toasts.contains("toast-error"));
        assert!(toasts.contains("Error: &lt;Conflict&gt;"));
    }
}
