//! Derived views recomputed by the shell after every mutation.

use std::collections::BTreeMap;

use crate::session::Session;
use crate::types::TagEvent;

impl Session {
    /// Tag totals keyed by the label stored on each event, in label order.
    ///
    /// Labels no longer in the layout still count.
    pub fn compute_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for event in self.events() {
            *counts.entry(event.label.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Events most recent first. Among events recorded in the same second
    /// the later insertion comes first.
    pub fn sorted_events(&self) -> Vec<&TagEvent> {
        let mut sorted: Vec<&TagEvent> = self.events().iter().rev().collect();
        // Stable sort over the reversed log keeps same-second ties newest-first.
        sorted.sort_by(|a, b| b.timestamp_iso.cmp(&a.timestamp_iso));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(19, 0, secs)
            .unwrap()
    }

    fn session_with(tags: &[(&str, u32)]) -> Session {
        let mut session = Session::new();
        for (label, secs) in tags {
            session
                .record_tag("Acadia", NaiveDate::from_ymd_opt(2024, 1, 15), label, at(*secs))
                .unwrap();
        }
        session
    }

    #[test]
    fn test_counts_in_label_order() {
        let session = session_with(&[("A", 0), ("B", 1), ("A", 2), ("C", 3), ("A", 4)]);
        let counts: Vec<_> = session.compute_counts().into_iter().collect();
        assert_eq!(
            counts,
            vec![("A".to_string(), 3), ("B".to_string(), 1), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn test_counts_ignore_first_occurrence_order() {
        let session = session_with(&[("Turnover", 0), ("Rebound", 1)]);
        let labels: Vec<_> = session.compute_counts().into_keys().collect();
        assert_eq!(labels, vec!["Rebound", "Turnover"]);
    }

    #[test]
    fn test_counts_empty() {
        assert!(Session::new().compute_counts().is_empty());
    }

    #[test]
    fn test_sorted_events_most_recent_first() {
        let session = session_with(&[("A", 5), ("B", 1), ("C", 9)]);
        let labels: Vec<_> = session
            .sorted_events()
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_sorted_events_same_second_latest_insert_first() {
        let session = session_with(&[("A", 3), ("B", 3), ("C", 3), ("D", 1)]);
        let labels: Vec<_> = session
            .sorted_events()
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_sorted_events_leaves_log_order() {
        let session = session_with(&[("A", 5), ("B", 1)]);
        let _ = session.sorted_events();
        assert_eq!(session.events()[0].label, "A");
    }
}
