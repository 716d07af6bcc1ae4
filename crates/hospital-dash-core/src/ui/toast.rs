//! Transient success/error messages.

use std::time::Duration;

use tokio::time::Instant;

/// Default time a toast stays fully visible.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);
/// Default fade-out phase before removal.
pub const DEFAULT_TOAST_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    FadingOut,
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Stable key the host can use for its element
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
    fade_at: Instant,
}

impl Toast {
    pub fn phase(&self, now: Instant) -> ToastPhase {
        if now < self.fade_at {
            ToastPhase::Visible
        } else {
            ToastPhase::FadingOut
        }
    }
}

/// Ordered queue of live toasts, oldest first.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    ttl: Duration,
    fade: Duration,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL, DEFAULT_TOAST_FADE)
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration, fade: Duration) -> Self {
        Self {
            ttl,
            fade,
            toasts: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> String {
        self.push_at(ToastKind::Success, message, Instant::now())
    }

    pub fn error(&mut self, message: impl Into<String>) -> String {
        self.push_at(ToastKind::Error, message, Instant::now())
    }

    /// Queue a toast shown at `now`; returns its id. Toasts that finished
    /// fading by `now` are dropped first.
    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) -> String {
        self.expire(now);
        let id = uuid::Uuid::new_v4().to_string();
        self.toasts.push(Toast {
            id: id.clone(),
            kind,
            message: message.into(),
            fade_at: now + self.ttl,
        });
        id
    }

    /// Close control: start fading right away. Returns false for unknown ids.
    pub fn dismiss(&mut self, id: &str, now: Instant) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                if now < toast.fade_at {
                    toast.fade_at = now;
                }
                true
            }
            None => false,
        }
    }

    /// Drop toasts whose fade has finished.
    pub fn expire(&mut self, now: Instant) {
        let fade = self.fade;
        self.toasts.retain(|t| now < t.fade_at + fade);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_lifecycle() {
        let start = Instant::now();
        let mut queue = ToastQueue::default();
        queue.push_at(ToastKind::Success, "Patient added successfully", start);

        let toast = queue.latest().unwrap();
        assert_eq!(toast.phase(start + Duration::from_secs(4)), ToastPhase::Visible);
        assert_eq!(toast.phase(start + Duration::from_secs(5)), ToastPhase::FadingOut);

        queue.expire(start + Duration::from_millis(5_299));
        assert_eq!(queue.len(), 1);
        queue.expire(start + Duration::from_millis(5_300));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_starts_fade() {
        let start = Instant::now();
        let mut queue = ToastQueue::default();
        let id = queue.push_at(ToastKind::Error, "An error occurred. Please try again.", start);

        let later = start + Duration::from_secs(1);
        assert!(queue.dismiss(&id, later));
        assert_eq!(queue.latest().unwrap().phase(later), ToastPhase::FadingOut);

        queue.expire(later + DEFAULT_TOAST_FADE);
        assert!(queue.is_empty());
        assert!(!queue.dismiss(&id, later));
    }

    #[test]
    fn test_push_drops_finished_toasts() {
        let start = Instant::now();
        let mut queue = ToastQueue::default();
        for n in 0..50 {
            queue.push_at(ToastKind::Error, format!("failure {}", n), start);
        }
        assert_eq!(queue.len(), 50);

        queue.push_at(ToastKind::Success, "Supply restocked successfully", start + Duration::from_secs(6));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.latest().unwrap().message, "Supply restocked successfully");
    }
}
