//! Domain records, option catalogs, and validation rules.

#![forbid(unsafe_code)]

pub mod dates;
mod event;
mod options;
mod person;
mod validation;
mod wire;

pub use event::EventRecord;
pub use options::{
    BLOOD_TYPES, DIET_PREFERENCES, DOCUMENT_TYPES, FORMATION_CENTERS, FORMATION_PROGRAMS,
    HIRING_STATUSES, OptionCatalog,
};
pub use person::PersonRecord;
pub use validation::{
    Constraint, ErrorMap, FieldRule, RuleSet, is_clean, messages,
};
