//! Declarative validation rule engine.
//!
//! Rules are data: each tracked field pairs a required-ness flag with an
//! ordered list of constraints and their messages. The same rule sets back
//! the create and modify screens; screens choose which set applies, never
//! how a field is validated.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::dates;
use crate::options::{
    BLOOD_TYPES, DIET_PREFERENCES, DOCUMENT_TYPES, FORMATION_CENTERS, HIRING_STATUSES,
    OptionCatalog,
};

/// User-facing validation messages (single observed locale).
pub mod messages {
    /// Blank required text field.
    pub const REQUIRED_FIELD: &str = "El campo es obligatorio";
    /// Blank required numeric field.
    pub const REQUIRED_NUMBER: &str = "El número es obligatorio";
    /// Blank required email field.
    pub const REQUIRED_EMAIL: &str = "El correo electrónico es obligatorio";
    /// Blank required birth date.
    pub const REQUIRED_BIRTHDATE: &str = "La fecha de nacimiento es obligatoria";
    /// Blank required event date.
    pub const REQUIRED_EVENT_DATE: &str = "La fecha del evento es obligatoria";
    /// Non-letter characters in a letters-only field.
    pub const LETTERS_ONLY: &str = "Este campo solo debe contener letras";
    /// Structurally invalid email address.
    pub const INVALID_EMAIL: &str = "Formato de correo electrónico inválido";
    /// Date that does not normalize to a calendar day.
    pub const INVALID_DATE: &str = "La fecha no es válida";
    /// Birth date not strictly before today.
    pub const DATE_NOT_IN_PAST: &str = "La fecha debe ser en el pasado";
    /// Person younger than the minimum age.
    pub const UNDERAGE: &str = "Debe tener al menos 18 años";
    /// Unset document type selection.
    pub const SELECT_DOCUMENT_TYPE: &str = "Selecciona un tipo de documento";
    /// Unset formation center selection.
    pub const SELECT_FORMATION_CENTER: &str = "Selecciona un centro de formación";
    /// Unset blood type selection.
    pub const SELECT_BLOOD_TYPE: &str = "Selecciona un tipo de sangre";
    /// Unset diet preference selection.
    pub const SELECT_DIET_PREFERENCE: &str = "Selecciona una preferencia alimenticia";
    /// Unset hiring status selection.
    pub const SELECT_HIRING_STATUS: &str = "Selecciona un estado de contratación";

    /// Message for an exact-length digit rule.
    #[must_use]
    pub fn exact_digits(len: usize) -> String {
        format!("Debe contener {len} dígitos")
    }

    /// Message for a bounded-length digit rule.
    #[must_use]
    pub fn bounded_digits(min_len: usize, max_len: usize) -> String {
        format!("Debe tener entre {min_len} y {max_len} dígitos")
    }
}

/// Mapping from field name to a human-readable message, empty when valid.
///
/// A field is submittable only when its entry is empty; a form only when
/// every tracked entry is empty.
pub type ErrorMap = BTreeMap<String, String>;

/// Returns whether every tracked field passed validation.
#[must_use]
pub fn is_clean(errors: &ErrorMap) -> bool {
    errors.values().all(String::is_empty)
}

/// One declarative predicate over a trimmed, non-blank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Unicode letters and spaces only (accents and ñ/Ñ pass).
    Letters,
    /// Digits only, with an inclusive length window.
    Digits {
        /// Minimum accepted length.
        min_len: usize,
        /// Maximum accepted length.
        max_len: usize,
    },
    /// RFC-5322-lite email shape: local part, `@`, dotted domain, 2+
    /// character alphabetic TLD.
    Email,
    /// Membership in a fixed option catalog.
    Choice(&'static OptionCatalog),
    /// Normalizes to a calendar day.
    ParseableDate,
    /// Strictly before today.
    PastDate,
    /// At least this many full years before today.
    MinimumAge {
        /// Minimum age in full years.
        years: u32,
    },
}

impl Constraint {
    fn holds(self, value: &str, today: NaiveDate) -> bool {
        match self {
            Self::Letters => value
                .chars()
                .all(|character| character.is_alphabetic() || character.is_whitespace()),
            Self::Digits { min_len, max_len } => {
                value.chars().all(|character| character.is_ascii_digit())
                    && (min_len..=max_len).contains(&value.len())
            }
            Self::Email => is_well_formed_email(value),
            Self::Choice(catalog) => catalog.contains(value),
            Self::ParseableDate => !dates::normalize(value).is_empty(),
            Self::PastDate => match dates::parse_canonical(&dates::normalize(value)) {
                Some(date) => date < today,
                None => false,
            },
            Self::MinimumAge { years } => {
                let minimum = i32::try_from(years).unwrap_or(i32::MAX);
                match dates::parse_canonical(&dates::normalize(value)) {
                    Some(birth) => age_in_full_years(birth, today) >= minimum,
                    None => false,
                }
            }
        }
    }
}

/// Age in completed years: the raw year difference, decremented when
/// today's (month, day) precedes the birthdate's.
fn age_in_full_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn is_well_formed_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    if domain.split('.').any(str::is_empty) {
        return false;
    }

    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
}

/// Declarative rule for one tracked form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    field: &'static str,
    required: bool,
    required_message: &'static str,
    constraints: Vec<(Constraint, String)>,
}

impl FieldRule {
    fn new(field: &'static str, required: bool, required_message: &'static str) -> Self {
        Self {
            field,
            required,
            required_message,
            constraints: Vec::new(),
        }
    }

    fn with(mut self, constraint: Constraint, message: impl Into<String>) -> Self {
        self.constraints.push((constraint, message.into()));
        self
    }

    /// Required letters-only text field.
    #[must_use]
    pub fn letters(field: &'static str) -> Self {
        Self::new(field, true, messages::REQUIRED_FIELD)
            .with(Constraint::Letters, messages::LETTERS_ONLY)
    }

    /// Letters-only text field validated only when filled in.
    #[must_use]
    pub fn optional_letters(field: &'static str) -> Self {
        Self::new(field, false, messages::REQUIRED_FIELD)
            .with(Constraint::Letters, messages::LETTERS_ONLY)
    }

    /// Required digit field with an inclusive length window; the message is
    /// derived from whether the window is exact.
    #[must_use]
    pub fn digits(field: &'static str, min_len: usize, max_len: usize) -> Self {
        Self::new(field, true, messages::REQUIRED_NUMBER)
            .with(Constraint::Digits { min_len, max_len }, digit_message(min_len, max_len))
    }

    /// Digit field validated only when filled in.
    #[must_use]
    pub fn optional_digits(field: &'static str, min_len: usize, max_len: usize) -> Self {
        Self::new(field, false, messages::REQUIRED_NUMBER)
            .with(Constraint::Digits { min_len, max_len }, digit_message(min_len, max_len))
    }

    /// Required email field.
    #[must_use]
    pub fn email(field: &'static str) -> Self {
        Self::new(field, true, messages::REQUIRED_EMAIL)
            .with(Constraint::Email, messages::INVALID_EMAIL)
    }

    /// Email field validated only when filled in.
    #[must_use]
    pub fn optional_email(field: &'static str) -> Self {
        Self::new(field, false, messages::REQUIRED_EMAIL)
            .with(Constraint::Email, messages::INVALID_EMAIL)
    }

    /// Required enumerated selection with a per-field message.
    #[must_use]
    pub fn choice(
        field: &'static str,
        catalog: &'static OptionCatalog,
        message: &'static str,
    ) -> Self {
        Self::new(field, true, message).with(Constraint::Choice(catalog), message)
    }

    /// Required birth date: parseable, strictly past, and at least 18 years
    /// before today by exact year/month/day arithmetic.
    #[must_use]
    pub fn birthdate(field: &'static str) -> Self {
        Self::new(field, true, messages::REQUIRED_BIRTHDATE)
            .with(Constraint::ParseableDate, messages::INVALID_DATE)
            .with(Constraint::PastDate, messages::DATE_NOT_IN_PAST)
            .with(Constraint::MinimumAge { years: 18 }, messages::UNDERAGE)
    }

    /// Required event date: parseable, any day.
    #[must_use]
    pub fn event_date(field: &'static str) -> Self {
        Self::new(field, true, messages::REQUIRED_EVENT_DATE)
            .with(Constraint::ParseableDate, messages::INVALID_DATE)
    }

    /// Required free text with no shape constraint.
    #[must_use]
    pub fn required_text(field: &'static str) -> Self {
        Self::new(field, true, messages::REQUIRED_FIELD)
    }

    /// Returns the tracked field name.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Evaluates the rule, returning a message or the empty string.
    ///
    /// Pure: the result depends only on the value and the supplied `today`.
    #[must_use]
    pub fn validate(&self, value: &str, today: NaiveDate) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return if self.required {
                self.required_message.to_owned()
            } else {
                String::new()
            };
        }

        for (constraint, message) in &self.constraints {
            if !constraint.holds(trimmed, today) {
                return message.clone();
            }
        }

        String::new()
    }
}

fn digit_message(min_len: usize, max_len: usize) -> String {
    if min_len == max_len {
        messages::exact_digits(min_len)
    } else {
        messages::bounded_digits(min_len, max_len)
    }
}

/// Ordered collection of field rules backing one screen variant.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Rules for the apprentice screens: exact 10-digit document and phone.
    #[must_use]
    pub fn apprentice() -> Self {
        Self {
            rules: vec![
                FieldRule::letters("name"),
                FieldRule::letters("lastName"),
                FieldRule::letters("rol"),
                FieldRule::letters("programName"),
                FieldRule::letters("strategyCompetition"),
                FieldRule::letters("competitionName"),
                FieldRule::digits("documentNumber", 10, 10),
                FieldRule::digits("phone", 10, 10),
                FieldRule::email("email"),
                FieldRule::birthdate("birthdate"),
                FieldRule::choice("documentType", &DOCUMENT_TYPES, messages::SELECT_DOCUMENT_TYPE),
                FieldRule::choice(
                    "formationCenter",
                    &FORMATION_CENTERS,
                    messages::SELECT_FORMATION_CENTER,
                ),
            ],
        }
    }

    /// Rules for the competitor screens: the apprentice set plus the
    /// competitor-only selections and optional productive-stage contacts.
    #[must_use]
    pub fn competitor() -> Self {
        let mut rules = Self::apprentice().rules;
        rules.extend([
            FieldRule::choice("bloodType", &BLOOD_TYPES, messages::SELECT_BLOOD_TYPE),
            FieldRule::choice(
                "dietPreferences",
                &DIET_PREFERENCES,
                messages::SELECT_DIET_PREFERENCE,
            ),
            FieldRule::choice(
                "hiringStatus",
                &HIRING_STATUSES,
                messages::SELECT_HIRING_STATUS,
            ),
            FieldRule::optional_letters("immediateBossName"),
            FieldRule::optional_email("bossEmail"),
            FieldRule::optional_digits("bossPhone", 7, 10),
            FieldRule::optional_digits("nit", 8, 12),
        ]);
        Self { rules }
    }

    /// Rules for the expert screens: bounded digit windows (8–12 document,
    /// 7–10 phone) and the expert-only text fields.
    #[must_use]
    pub fn expert() -> Self {
        Self {
            rules: vec![
                FieldRule::letters("name"),
                FieldRule::letters("lastName"),
                FieldRule::letters("rol"),
                FieldRule::letters("area"),
                FieldRule::letters("senaVinculation"),
                FieldRule::letters("competitionName"),
                FieldRule::digits("documentNumber", 8, 12),
                FieldRule::digits("phone", 7, 10),
                FieldRule::email("email"),
                FieldRule::birthdate("birthdate"),
                FieldRule::choice("documentType", &DOCUMENT_TYPES, messages::SELECT_DOCUMENT_TYPE),
                FieldRule::choice("bloodType", &BLOOD_TYPES, messages::SELECT_BLOOD_TYPE),
                FieldRule::choice(
                    "dietPreferences",
                    &DIET_PREFERENCES,
                    messages::SELECT_DIET_PREFERENCE,
                ),
                FieldRule::choice(
                    "formationCenter",
                    &FORMATION_CENTERS,
                    messages::SELECT_FORMATION_CENTER,
                ),
            ],
        }
    }

    /// Rules for the event screens.
    #[must_use]
    pub fn event() -> Self {
        Self {
            rules: vec![
                FieldRule::required_text("nameEvent"),
                FieldRule::required_text("descriptionEvent"),
                FieldRule::event_date("dateEvent"),
            ],
        }
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Returns the rule tracking a field, if any.
    #[must_use]
    pub fn rule_for(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    /// Validates one field; fields without a rule are never flagged.
    #[must_use]
    pub fn validate_field(&self, field: &str, value: &str, today: NaiveDate) -> String {
        self.rule_for(field)
            .map(|rule| rule.validate(value, today))
            .unwrap_or_default()
    }

    /// Re-runs every rule over the form values, producing an entry per
    /// tracked field (empty string when the field passes).
    #[must_use]
    pub fn validate_form(
        &self,
        values: &BTreeMap<String, String>,
        today: NaiveDate,
    ) -> ErrorMap {
        self.rules
            .iter()
            .map(|rule| {
                let value = values.get(rule.field).map(String::as_str).unwrap_or("");
                (rule.field.to_owned(), rule.validate(value, today))
            })
            .collect()
    }
}
