//! Structural validators for untrusted snapshot input.
//!
//! Every validator is a total function from a JSON value to an optional
//! typed record: it never panics and never fails the whole import. Required
//! fields must have the right type; optional fields are kept only when they
//! do.

use crate::types::{
    CivicsQuestion, Document, DocumentMeta, DocumentStatus, EventCategory, TimelineEvent,
    UserSettings,
};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// Result of filtering a list through a validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filtered<T> {
    pub valid: Vec<T>,
    pub dropped: usize,
}

/// Filter an array through `validate`. `None` if `value` is not an array.
pub fn filter_list<T>(value: &Value, validate: fn(&Value) -> Option<T>) -> Option<Filtered<T>> {
    let items = value.as_array()?;
    let valid: Vec<T> = items.iter().filter_map(validate).collect();
    Some(Filtered {
        dropped: items.len() - valid.len(),
        valid,
    })
}

pub fn event(value: &Value) -> Option<TimelineEvent> {
    let obj = value.as_object()?;

    let mut event = TimelineEvent::new(
        required_str(obj, "id")?,
        required_str(obj, "date")?,
        required_str(obj, "type")?,
        required_str(obj, "title")?,
    );
    event.end_date = optional_str(obj, &["endDate"]);
    event.description = optional_str(obj, &["desc", "description"]);
    event.linked_document_ids = str_list(obj, &["linkedDocIds", "linkedDocumentIds"]);
    event.evidence_link = optional_str(obj, &["evidenceLink"]);
    event.evidence_ref = optional_str(obj, &["evidenceRef"]);
    Some(event)
}

pub fn question(value: &Value) -> Option<CivicsQuestion> {
    let obj = value.as_object()?;

    Some(CivicsQuestion {
        id: question_id(obj.get("id")?)?,
        question: first_str(obj, &["q", "question"])?,
        answer: first_str(obj, &["a", "answer"])?,
        section: required_str(obj, "section")?,
    })
}

pub fn document(value: &Value) -> Option<Document> {
    let obj = value.as_object()?;

    let status = DocumentStatus::parse(obj.get("status")?.as_str()?)?;
    let meta = obj
        .get("meta")
        .and_then(Value::as_object)
        .map(|meta| DocumentMeta {
            expiry: optional_str(meta, &["expiry"]),
            issuer: optional_str(meta, &["issuer"]),
            location: optional_str(meta, &["location"]),
        })
        .unwrap_or_default();

    Some(Document {
        id: required_str(obj, "id")?,
        name: required_str(obj, "name")?,
        status,
        required: obj.get("required")?.as_bool()?,
        notes: optional_str(obj, &["notes"]),
        meta,
        parent_id: optional_str(obj, &["parentId"]),
        is_custom: optional_bool(obj, "isCustom").unwrap_or(false),
        submitted_to_uscis: optional_bool(obj, "submittedToUSCIS"),
    })
}

pub fn settings(value: &Value) -> Option<UserSettings> {
    let obj = value.as_object()?;

    let mut settings = UserSettings::named(required_str(obj, "name")?);
    settings.arrival_date = optional_str(obj, &["arrivalDate"]);
    settings.green_card_date = optional_str(obj, &["greenCardDate"]);
    settings.filing_date = optional_str(obj, &["filingDate"]);
    settings.interview_date = optional_str(obj, &["interviewDate"]);
    settings.dark_mode = optional_bool(obj, "darkMode");
    settings.event_categories = obj
        .get("eventCategories")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(event_category).collect());
    settings.alien_number = optional_str(obj, &["alienNumber"]);
    settings.alien_number_blurred = optional_bool(obj, "alienNumberBlurred");
    Some(settings)
}

fn event_category(value: &Value) -> Option<EventCategory> {
    let obj = value.as_object()?;
    Some(EventCategory {
        id: required_str(obj, "id")?,
        label: required_str(obj, "label")?,
        color: required_str(obj, "color")?,
    })
}

/// Keep entries whose key is a question id and whose value is `true`.
///
/// `None` if `value` is not an object.
pub fn mastery(value: &Value) -> Option<Filtered<u32>> {
    let obj = value.as_object()?;
    let valid: Vec<u32> = obj
        .iter()
        .filter(|(_, flag)| flag.as_bool() == Some(true))
        .filter_map(|(key, _)| key.parse::<u32>().ok())
        .collect();
    Some(Filtered {
        dropped: obj.len() - valid.len(),
        valid,
    })
}

/// Keep entries whose value is a non-empty string.
///
/// `None` if `value` is not an object.
pub fn notes(value: &Value) -> Option<Filtered<(String, String)>> {
    let obj = value.as_object()?;
    let valid: Vec<(String, String)> = obj
        .iter()
        .filter_map(|(key, content)| {
            let content = content.as_str().filter(|c| !c.is_empty())?;
            Some((key.clone(), content.to_string()))
        })
        .collect();
    Some(Filtered {
        dropped: obj.len() - valid.len(),
        valid,
    })
}

/// Integral, non-negative, within `u32`. Integral floats (`5.0`) count.
fn question_id(value: &Value) -> Option<u32> {
    if let Some(id) = value.as_u64() {
        return u32::try_from(id).ok();
    }
    let id = value.as_f64()?;
    (id.fract() == 0.0 && id >= 0.0 && id <= f64::from(u32::MAX)).then_some(id as u32)
}

fn required_str(obj: &Object, key: &str) -> Option<String> {
    obj.get(key)?.as_str().map(str::to_string)
}

fn first_str(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| required_str(obj, key))
}

fn optional_str(obj: &Object, keys: &[&str]) -> Option<String> {
    first_str(obj, keys)
}

fn optional_bool(obj: &Object, key: &str) -> Option<bool> {
    obj.get(key)?.as_bool()
}

fn str_list(obj: &Object, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| obj.get(*key)?.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_required_fields() {
        assert!(event(&json!({"id": "e", "date": "2020-01-01", "type": "trip", "title": "T"})).is_some());
        assert!(event(&json!({"id": "e", "date": "2020-01-01", "type": "trip"})).is_none());
        assert!(event(&json!({"id": 1, "date": "2020-01-01", "type": "trip", "title": "T"})).is_none());
        assert!(event(&json!("e1")).is_none());
        assert!(event(&Value::Null).is_none());
    }

    #[test]
    fn test_event_optional_fields_lenient() {
        let parsed = event(&json!({
            "id": "e", "date": "2020-01-01", "type": "trip", "title": "T",
            "desc": 42,
            "endDate": "2020-01-09",
            "linkedDocIds": ["d1", 7, "d2"],
            "evidenceRef": null
        }))
        .unwrap();

        assert_eq!(parsed.description, None);
        assert_eq!(parsed.end_date.as_deref(), Some("2020-01-09"));
        assert_eq!(parsed.linked_document_ids, vec!["d1", "d2"]);
        assert_eq!(parsed.evidence_ref, None);
    }

    #[test]
    fn test_question_ids() {
        let base = |id: Value| json!({"id": id, "q": "Q", "a": "A", "section": "S"});
        assert_eq!(question(&base(json!(5))).unwrap().id, 5);
        assert_eq!(question(&base(json!(5.0))).unwrap().id, 5);
        assert!(question(&base(json!(5.5))).is_none());
        assert!(question(&base(json!(-1))).is_none());
        assert!(question(&base(json!("5"))).is_none());
        assert!(question(&base(json!(u64::MAX))).is_none());
    }

    #[test]
    fn test_question_long_names() {
        let parsed = question(&json!({
            "id": 1, "question": "Q?", "answer": "A.", "section": "Principles"
        }))
        .unwrap();
        assert_eq!(parsed.question, "Q?");
        assert_eq!(parsed.answer, "A.");
    }

    #[test]
    fn test_document_rules() {
        let valid = json!({"id": "d1", "name": "Card", "status": "found", "required": true});
        let parsed = document(&valid).unwrap();
        assert_eq!(parsed.status, DocumentStatus::Found);
        assert_eq!(parsed.meta, DocumentMeta::default());

        let missing_required = json!({"id": "d1", "name": "Card", "status": "found"});
        assert!(document(&missing_required).is_none());

        let string_required = json!({"id": "d1", "name": "Card", "status": "found", "required": "yes"});
        assert!(document(&string_required).is_none());

        let unknown_status = json!({"id": "d1", "name": "Card", "status": "lost", "required": true});
        assert!(document(&unknown_status).is_none());
    }

    #[test]
    fn test_document_meta_and_flags() {
        let parsed = document(&json!({
            "id": "c", "name": "Child", "status": "packed", "required": false,
            "meta": {"expiry": "2030-01-01", "issuer": 3},
            "parentId": "d1", "isCustom": true, "submittedToUSCIS": false
        }))
        .unwrap();

        assert_eq!(parsed.meta.expiry.as_deref(), Some("2030-01-01"));
        assert_eq!(parsed.meta.issuer, None);
        assert_eq!(parsed.parent_id.as_deref(), Some("d1"));
        assert!(parsed.is_custom);
        assert_eq!(parsed.submitted_to_uscis, Some(false));
    }

    #[test]
    fn test_settings_requires_name() {
        assert!(settings(&json!({"darkMode": true})).is_none());
        assert!(settings(&json!({"name": 5})).is_none());

        let parsed = settings(&json!({
            "name": "Jane",
            "darkMode": "yes",
            "interviewDate": "2026-11-02",
            "eventCategories": [
                {"id": "school", "label": "School", "color": "teal"},
                {"id": "broken"}
            ]
        }))
        .unwrap();
        assert_eq!(parsed.name, "Jane");
        assert_eq!(parsed.dark_mode, None);
        assert_eq!(parsed.interview_date.as_deref(), Some("2026-11-02"));
        assert_eq!(parsed.event_categories.unwrap().len(), 1);
    }

    #[test]
    fn test_mastery_entries() {
        let filtered = mastery(&json!({"5": true, "foo": true, "6": false, "7": "true", "8": true})).unwrap();
        assert_eq!(filtered.dropped, 3);
        let mut ids = filtered.valid;
        ids.sort_unstable();
        assert_eq!(ids, vec![5, 8]);

        assert!(mastery(&json!([5])).is_none());
    }

    #[test]
    fn test_notes_entries() {
        let filtered = notes(&json!({"d1": "copy", "d2": "", "d3": 4})).unwrap();
        assert_eq!(filtered.dropped, 2);
        assert_eq!(filtered.valid, vec![("d1".to_string(), "copy".to_string())]);
        assert!(notes(&json!("notes")).is_none());
    }

    #[test]
    fn test_filter_list() {
        let input = json!([
            {"id": "a", "date": "2020", "type": "t", "title": "x"},
            {"id": "b"},
            7
        ]);
        let filtered = filter_list(&input, event).unwrap();
        assert_eq!(filtered.valid.len(), 1);
        assert_eq!(filtered.dropped, 2);

        assert!(filter_list(&json!({"id": "a"}), event).is_none());
    }
}
