use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::entries::repo::CalorieEntry;

/// Request body for creating an entry. `calories` may be omitted, in which
/// case it is resolved via the nutrition lookup before anything is persisted.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub date: Date,
    pub time: Time,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    pub user_id: i64,
}

/// Partial update for an entry. A field is applied only when present and
/// non-empty; an absent field and an empty text value both leave the stored
/// value untouched. Ownership never changes through a patch.
#[derive(Debug, Default, Deserialize)]
pub struct EntryPatch {
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub time: Option<Time>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
}

impl EntryPatch {
    pub fn apply(&self, entry: &mut CalorieEntry) {
        if let Some(date) = self.date {
            entry.entry_date = date;
        }
        if let Some(time) = self.time {
            entry.entry_time = time;
        }
        if let Some(text) = &self.text {
            if !text.is_empty() {
                entry.text = Some(text.clone());
            }
        }
        if let Some(calories) = self.calories {
            entry.calories = Some(calories);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn sample_entry() -> CalorieEntry {
        CalorieEntry {
            id: 1,
            entry_date: date!(2024 - 01 - 15),
            entry_time: time!(12:30),
            text: Some("oatmeal".into()),
            calories: Some(100.0),
            user_id: 1,
        }
    }

    #[test]
    fn patching_calories_leaves_other_fields() {
        let mut entry = sample_entry();
        let patch = EntryPatch {
            calories: Some(150.0),
            ..Default::default()
        };
        patch.apply(&mut entry);
        assert_eq!(entry.calories, Some(150.0));
        assert_eq!(entry.entry_date, date!(2024 - 01 - 15));
        assert_eq!(entry.entry_time, time!(12:30));
        assert_eq!(entry.text.as_deref(), Some("oatmeal"));
    }

    #[test]
    fn empty_text_leaves_text_unchanged() {
        let mut entry = sample_entry();
        let patch = EntryPatch {
            text: Some(String::new()),
            ..Default::default()
        };
        patch.apply(&mut entry);
        assert_eq!(entry.text.as_deref(), Some("oatmeal"));
    }

    #[test]
    fn present_fields_overwrite() {
        let mut entry = sample_entry();
        let patch = EntryPatch {
            date: Some(date!(2024 - 02 - 01)),
            time: Some(time!(18:00)),
            text: Some("dinner".into()),
            calories: Some(640.5),
        };
        patch.apply(&mut entry);
        assert_eq!(entry.entry_date, date!(2024 - 02 - 01));
        assert_eq!(entry.entry_time, time!(18:00));
        assert_eq!(entry.text.as_deref(), Some("dinner"));
        assert_eq!(entry.calories, Some(640.5));
    }

    #[test]
    fn empty_patch_is_a_noop() {
        let mut entry = sample_entry();
        EntryPatch::default().apply(&mut entry);
        assert_eq!(entry.calories, Some(100.0));
        assert_eq!(entry.text.as_deref(), Some("oatmeal"));
    }

    #[test]
    fn patch_deserializes_with_missing_fields() {
        let patch: EntryPatch = serde_json::from_str(r#"{"calories": 150}"#).unwrap();
        assert_eq!(patch.calories, Some(150.0));
        assert!(patch.date.is_none());
        assert!(patch.time.is_none());
        assert!(patch.text.is_none());
    }

    #[test]
    fn entry_serializes_api_field_names() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"date\""));
        assert!(json.contains("\"time\""));
        assert!(!json.contains("entry_date"));
    }
}
