//! Serde helpers for the remote store's wire quirks.

use serde::{Deserialize, Deserializer};

/// Accepts a store-assigned id serialized as a string or a number.
///
/// Blank ids collapse to `None` so unsaved records never carry identity.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
        Text(String),
        Number(i64),
    }

    let value = Option::<WireId>::deserialize(deserializer)?;
    Ok(value
        .map(|id| match id {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        })
        .filter(|text| !text.trim().is_empty()))
}
