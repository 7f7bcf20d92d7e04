//! Read-only projections of the cache.

use super::operations::Cache;
use crate::types::{DocumentStatus, TimelineEvent};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Events by date, newest first. Ties keep id order.
pub fn events_newest_first(events: &[TimelineEvent]) -> Vec<&TimelineEvent> {
    let mut sorted: Vec<&TimelineEvent> = events.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    sorted
}

/// Events of one category, newest first.
pub fn events_in_category<'a>(events: &'a [TimelineEvent], category: &str) -> Vec<&'a TimelineEvent> {
    events_newest_first(events)
        .into_iter()
        .filter(|e| e.event_type == category)
        .collect()
}

/// Interview readiness summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Mastered questions that exist in the question bank.
    pub mastered: usize,
    pub questions: usize,
    /// Documents that are uploaded or packed.
    pub ready_documents: usize,
    pub documents: usize,
    /// Required documents still `missing`.
    pub required_missing: usize,
    /// Negative once the interview date has passed.
    pub days_until_interview: Option<i64>,
}

impl Progress {
    pub fn compute(cache: &Cache, today: NaiveDate) -> Self {
        let question_ids: HashSet<u32> = cache.questions.iter().map(|q| q.id).collect();

        Self {
            mastered: cache
                .mastery
                .ids()
                .filter(|id| question_ids.contains(id))
                .count(),
            questions: cache.questions.len(),
            ready_documents: cache.docs.iter().filter(|d| d.status.is_ready()).count(),
            documents: cache.docs.len(),
            required_missing: cache
                .docs
                .iter()
                .filter(|d| d.required && d.status == DocumentStatus::Missing)
                .count(),
            days_until_interview: cache
                .settings
                .interview_date
                .as_deref()
                .and_then(parse_date)
                .map(|date| (date - today).num_days()),
        }
    }

    pub fn mastery_percent(&self) -> u8 {
        percent(self.mastered, self.questions)
    }

    pub fn documents_percent(&self) -> u8 {
        percent(self.ready_documents, self.documents)
    }
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part.min(whole) * 100) / whole) as u8
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{default_documents, default_questions};

    #[test]
    fn test_newest_first() {
        let events = vec![
            TimelineEvent::new("a", "2019-01-01", "travel", "A"),
            TimelineEvent::new("b", "2022-05-01", "work", "B"),
            TimelineEvent::new("c", "2020-03-01", "travel", "C"),
        ];
        let ids: Vec<&str> = events_newest_first(&events).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let travel: Vec<&str> = events_in_category(&events, "travel")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(travel, vec!["c", "a"]);
    }

    #[test]
    fn test_progress() {
        let mut cache = Cache {
            questions: default_questions(),
            docs: default_documents(),
            ..Cache::default()
        };
        cache.mastery.set(1, true);
        cache.mastery.set(2, true);
        cache.mastery.set(500, true);
        cache.docs[0].status = DocumentStatus::Packed;
        cache.docs[1].status = DocumentStatus::Found;
        cache.settings.interview_date = Some("2026-11-02".into());

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let progress = Progress::compute(&cache, today);

        assert_eq!(progress.mastered, 2);
        assert_eq!(progress.questions, 100);
        assert_eq!(progress.ready_documents, 1);
        assert_eq!(progress.documents, 12);
        assert_eq!(progress.required_missing, 2);
        assert_eq!(progress.days_until_interview, Some(15));
        assert_eq!(progress.mastery_percent(), 2);
    }

    #[test]
    fn test_progress_empty() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let progress = Progress::compute(&Cache::default(), today);
        assert_eq!(progress.mastery_percent(), 0);
        assert_eq!(progress.documents_percent(), 0);
        assert_eq!(progress.days_until_interview, None);
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-11-02T09:00:00Z").is_some());
        assert!(parse_date("Nov 2").is_none());
        assert!(parse_date("").is_none());
    }
}
