//! Search-box debouncing.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Default quiet period after the last keystroke.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A debounced search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Patients,
    Surgeries,
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patients" | "patientSearch" => Ok(SearchField::Patients),
            "surgeries" | "surgerySearch" => Ok(SearchField::Surgeries),
            other => Err(format!("unknown search field: {}", other)),
        }
    }
}

/// Trailing-edge debouncer keyed by search field.
///
/// Each keystroke calls [`settle`](Self::settle); only the call made by the
/// last keystroke before a quiet period resolves to `true`.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    latest: Mutex<HashMap<SearchField, u64>>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a keystroke, wait out the delay, and report whether no newer
    /// keystroke arrived meanwhile.
    pub async fn settle(&self, field: SearchField) -> bool {
        let token = {
            let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            let entry = latest.entry(field).or_insert(0);
            *entry += 1;
            *entry
        };

        tokio::time::sleep(self.delay).await;

        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        latest.get(&field) == Some(&token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_keystroke_fires() {
        let debouncer = Arc::new(SearchDebouncer::default());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let d = debouncer.clone();
            handles.push(tokio::spawn(async move { d.settle(SearchField::Patients).await }));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let mut fired = Vec::new();
        for handle in handles {
            fired.push(handle.await.unwrap());
        }
        assert_eq!(fired, vec![false, false, false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_keystrokes_each_fire() {
        let debouncer = SearchDebouncer::default();
        assert!(debouncer.settle(SearchField::Surgeries).await);
        assert!(debouncer.settle(SearchField::Surgeries).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fields_are_independent() {
        let debouncer = SearchDebouncer::default();
        let (patients, surgeries) = tokio::join!(
            debouncer.settle(SearchField::Patients),
            debouncer.settle(SearchField::Surgeries)
        );
        assert!(patients && surgeries);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!("patientSearch".parse::<SearchField>(), Ok(SearchField::Patients));
        assert!("doctors".parse::<SearchField>().is_err());
    }
}
