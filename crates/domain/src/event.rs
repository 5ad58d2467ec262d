use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use talentra_core::RecordId;

use crate::dates;
use crate::wire;

/// One scheduled calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Store-assigned identifier; absent until the record is persisted.
    #[serde(
        default,
        deserialize_with = "wire::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Event name.
    #[serde(default)]
    pub name_event: String,
    /// Event description.
    #[serde(default)]
    pub description_event: String,
    /// Event date as an ISO date string.
    #[serde(default)]
    pub date_event: String,
}

impl EventRecord {
    /// Projects the editable fields into form values keyed by wire name.
    #[must_use]
    pub fn form_values(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("nameEvent".to_owned(), self.name_event.clone()),
            ("descriptionEvent".to_owned(), self.description_event.clone()),
            ("dateEvent".to_owned(), dates::normalize(&self.date_event)),
        ])
    }

    /// Rebuilds a record from form values, carrying the id through unchanged.
    #[must_use]
    pub fn from_form_values(id: Option<&RecordId>, values: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| values.get(key).cloned().unwrap_or_default();

        Self {
            id: id.map(|id| id.as_str().to_owned()),
            name_event: text("nameEvent"),
            description_event: text("descriptionEvent"),
            date_event: dates::normalize(&text("dateEvent")),
        }
    }
}
