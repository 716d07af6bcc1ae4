//! Notification bell: unread counting and bulk mark-as-read.

use futures::future::join_all;
use tracing::warn;

use crate::api::{HospitalApi, WriteOutcome};
use crate::models::{Notification, RecordId};

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

pub fn unread_ids(notifications: &[Notification]) -> Vec<RecordId> {
    notifications
        .iter()
        .filter(|n| !n.read)
        .map(|n| n.id)
        .collect()
}

/// Badge text; empty when nothing is unread.
pub fn badge_text(unread: usize) -> String {
    if unread == 0 {
        String::new()
    } else {
        unread.to_string()
    }
}

/// Result of a bulk mark-as-read batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkReadReport {
    pub attempted: usize,
    pub failed: usize,
}

impl BulkReadReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Issue one write per id concurrently and wait for all of them.
///
/// Successful writes are not rolled back when another fails. A refusal in
/// the response body counts as a failure, as does a transport error.
pub async fn mark_all_read<A>(api: &A, ids: &[RecordId]) -> BulkReadReport
where
    A: HospitalApi + ?Sized,
{
    let results = join_all(ids.iter().map(|id| api.mark_notification_read(*id))).await;

    let failed = results
        .iter()
        .zip(ids)
        .filter(|(result, id)| match result {
            Ok(WriteOutcome::Ok(())) => false,
            Ok(WriteOutcome::Rejected(message)) => {
                warn!(notification = **id, %message, "mark-as-read refused");
                true
            }
            Err(e) => {
                warn!(notification = **id, error = %e, "mark-as-read failed");
                true
            }
        })
        .count();

    BulkReadReport {
        attempted: ids.len(),
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    fn notification(id: RecordId, read: bool) -> Notification {
        Notification {
            id,
            message: format!("Notification {}", id),
            kind: NotificationKind::Alert,
            created_at: "2026-01-01T00:00:00".into(),
            read,
        }
    }

    #[test]
    fn test_unread_helpers() {
        let list = vec![notification(1, false), notification(2, true), notification(3, false)];
        assert_eq!(unread_count(&list), 2);
        assert_eq!(unread_ids(&list), vec![1, 3]);
    }

    #[test]
    fn test_badge_hidden_when_zero() {
        assert_eq!(badge_text(0), "");
        assert_eq!(badge_text(4), "4");
    }
}
