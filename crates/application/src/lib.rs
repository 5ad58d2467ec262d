//! Application services: form state, submission lifecycle, the calendar
//! index, and the CRUD orchestrators that coordinate them.

#![forbid(unsafe_code)]

mod agenda;
mod calendar;
mod form;
mod modal;
mod roster;
mod roster_ports;
mod submission;

#[cfg(test)]
mod test_support;

pub use agenda::AgendaController;
pub use calendar::EventIndex;
pub use form::EntityForm;
pub use modal::ModalState;
pub use roster::{RosterController, RosterVariant};
pub use roster_ports::RosterGateway;
pub use submission::{
    FORM_NOTICE, SubmissionGate, SubmissionMachine, SubmissionOutcome, SubmissionState,
};
