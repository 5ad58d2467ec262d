use std::collections::BTreeMap;

use chrono::NaiveDate;
use talentra_core::{AppError, AppResult, RecordId};
use talentra_domain::{ErrorMap, RuleSet};

/// Live editable state for one entity screen.
///
/// Owns the field values, the validation results, and the dirty flag; the
/// store-assigned id rides along unchanged through every edit. Created when
/// a screen opens and dropped when it closes.
#[derive(Debug, Clone)]
pub struct EntityForm {
    rules: RuleSet,
    id: Option<RecordId>,
    values: BTreeMap<String, String>,
    errors: ErrorMap,
    dirty: bool,
}

impl EntityForm {
    /// Seeds a form from an entity's projected values or variant defaults.
    ///
    /// Every tracked field starts with an empty error entry.
    #[must_use]
    pub fn seeded(
        rules: RuleSet,
        id: Option<RecordId>,
        values: BTreeMap<String, String>,
    ) -> Self {
        let errors = rules
            .rules()
            .iter()
            .map(|rule| (rule.field().to_owned(), String::new()))
            .collect();

        Self {
            rules,
            id,
            values,
            errors,
            dirty: false,
        }
    }

    /// Re-seeds from a different entity, discarding uncommitted edits.
    pub fn reseed(&mut self, id: Option<RecordId>, values: BTreeMap<String, String>) {
        self.id = id;
        self.values = values;
        self.errors = self
            .rules
            .rules()
            .iter()
            .map(|rule| (rule.field().to_owned(), String::new()))
            .collect();
        self.dirty = false;
    }

    /// Applies one edit and re-validates that field in place.
    pub fn edit(&mut self, field: &str, value: impl Into<String>, today: NaiveDate) {
        let value = value.into();
        let message = self.rules.validate_field(field, &value, today);
        if self.rules.rule_for(field).is_some() {
            self.errors.insert(field.to_owned(), message);
        }
        self.values.insert(field.to_owned(), value);
        self.dirty = true;
    }

    /// Recomputes the whole error map; returns whether the form is clean.
    pub fn validate_all(&mut self, today: NaiveDate) -> bool {
        self.errors = self.rules.validate_form(&self.values, today);
        talentra_domain::is_clean(&self.errors)
    }

    /// Returns the rule set backing this form.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the store-assigned id, when the entity is persisted.
    #[must_use]
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Returns the id or the identity error shown before update/delete.
    pub fn require_id(&self) -> AppResult<&RecordId> {
        self.id
            .as_ref()
            .ok_or_else(|| AppError::MissingIdentity("ID no encontrado".to_owned()))
    }

    /// Returns one field value, empty when unset.
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Returns the current field values keyed by wire name.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Returns one field's current error, empty when valid.
    #[must_use]
    pub fn error(&self, field: &str) -> &str {
        self.errors.get(field).map(String::as_str).unwrap_or("")
    }

    /// Returns the current error map.
    #[must_use]
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns whether any field was edited since seeding.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
