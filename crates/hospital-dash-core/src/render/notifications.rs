//! Notification dropdown list.

use super::{escape, RenderContext};
use crate::dispatch::Action;
use crate::format::{notification_icon, time_ago_str};
use crate::models::Notification;
use crate::state::ListState;

pub fn notification_list(list: &ListState<Notification>, ctx: &RenderContext) -> String {
    match list {
        ListState::Loaded(items) if items.is_empty() => {
            r#"<div class="no-notifications">No notifications</div>"#.to_string()
        }
        ListState::Loaded(items) => items.iter().map(|n| notification_item(n, ctx)).collect(),
        ListState::Idle | ListState::Failed => String::new(),
    }
}

fn notification_item(notification: &Notification, ctx: &RenderContext) -> String {
    format!(
        r#"<div class="notification-item {}" data-notification="{}">
    <div class="notification-icon"><i class="fas {}"></i></div>
    <div class="notification-content">
        <div class="notification-message">{}</div>
        <div class="notification-time">{}</div>
    </div>
    <div class="notification-actions"><button type="button" class="mark-read-btn" {}><i class="fas fa-check"></i></button></div>
</div>"#,
        if notification.read { "read" } else { "unread" },
        notification.id,
        notification_icon(&notification.kind),
        escape(&notification.message),
        escape(&time_ago_str(&notification.created_at, ctx.now)),
        Action::MarkRead(notification.id).data_attrs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tokio::time::Instant;

    fn ctx() -> RenderContext {
        RenderContext {
            today: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            now: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
            instant: Instant::now(),
        }
    }

    #[test]
    fn test_items_show_icon_and_age() {
        let list = ListState::Loaded(vec![
            Notification {
                id: 1,
                message: "Low stock: Gauze".into(),
                kind: NotificationKind::Supply,
                created_at: "2026-03-10T09:00:00".into(),
                read: false,
            },
            Notification {
                id: 2,
                message: "Surgery scheduled".into(),
                kind: NotificationKind::Surgery,
                created_at: "2026-03-10T11:59:30".into(),
                read: true,
            },
        ]);
        let html = notification_list(&list, &ctx());
        assert!(html.contains("fa-box-open"));
        assert!(html.contains("3 hours ago"));
        assert!(html.contains("just now"));
        assert!(html.contains(r#"notification-item unread" data-notification="1""#));
        assert!(html.contains(r#"data-action="mark-read" data-id="2""#));
    }

    #[test]
    fn test_empty_list() {
        let html = notification_list(&ListState::Loaded(vec![]), &ctx());
        assert_eq!(html, r#"<div class="no-notifications">No notifications</div>"#);
    }
}
