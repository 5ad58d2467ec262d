use chrono::NaiveDate;
use talentra_core::{AppError, AppResult};

use crate::form::EntityForm;

/// Form-level notice shown when whole-form validation fails.
pub const FORM_NOTICE: &str = "Corrija los errores del formulario";

/// Fallback shown when a remote failure carries no usable message.
const REMOTE_FALLBACK: &str = "Error al comunicarse con el servidor";

/// Submission lifecycle states.
///
/// `Success` and `Failed` are settled states; the next submission attempt
/// (or an explicit [`SubmissionMachine::acknowledge`]) returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Awaiting a submit action.
    Idle,
    /// Whole-form validation is running.
    Validating,
    /// The remote call is outstanding; the UI shows a loading flag.
    Submitting,
    /// The remote call succeeded; dependent lists must re-fetch.
    Success,
    /// The remote call failed; the form keeps its input for a retry.
    Failed,
}

/// Decision returned by the `begin_*` transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionGate {
    /// Validation passed; the caller must issue the remote call.
    Proceed,
    /// Validation failed; no network call is made.
    Rejected,
    /// A submission is already in flight; this attempt is ignored.
    AlreadySubmitting,
}

/// Final outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The mutation completed; the owning screen closes and re-fetches.
    Saved,
    /// Validation rejected the form before any network call.
    Rejected,
    /// A duplicate submit arrived while one was in flight.
    Ignored,
    /// The remote call failed with this user-facing message.
    Failed(String),
}

/// Sequences validate → submit → (success | failure) → idle.
///
/// Identical across create, update, and delete; only the remote call the
/// caller issues between `begin` and [`SubmissionMachine::complete`]
/// differs. Owns the user-visible notice for every failure path.
#[derive(Debug, Default)]
pub struct SubmissionMachine {
    state: SubmissionState,
    notice: Option<String>,
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SubmissionMachine {
    /// Creates an idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Loading flag for the owning screen.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Returns the pending user-facing notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Takes the pending notice, clearing it.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Starts a form submission: guards re-entrancy, then validates.
    ///
    /// On `Rejected` the machine is back at `Idle` with the form-level
    /// notice set and the per-field errors stored on the form.
    pub fn begin_form(&mut self, form: &mut EntityForm, today: NaiveDate) -> SubmissionGate {
        if self.state == SubmissionState::Submitting {
            return SubmissionGate::AlreadySubmitting;
        }

        self.state = SubmissionState::Validating;
        if form.validate_all(today) {
            self.state = SubmissionState::Submitting;
            SubmissionGate::Proceed
        } else {
            self.state = SubmissionState::Idle;
            self.notice = Some(FORM_NOTICE.to_owned());
            SubmissionGate::Rejected
        }
    }

    /// Starts a formless submission (delete): guards re-entrancy only.
    pub fn begin_unchecked(&mut self) -> SubmissionGate {
        if self.state == SubmissionState::Submitting {
            return SubmissionGate::AlreadySubmitting;
        }

        self.state = SubmissionState::Submitting;
        SubmissionGate::Proceed
    }

    /// Settles the in-flight submission with the remote call's result.
    pub fn complete(&mut self, result: AppResult<()>) -> SubmissionOutcome {
        match result {
            Ok(()) => {
                self.state = SubmissionState::Success;
                SubmissionOutcome::Saved
            }
            Err(error) => {
                let message = surface_message(&error);
                self.state = SubmissionState::Failed;
                self.notice = Some(message.clone());
                SubmissionOutcome::Failed(message)
            }
        }
    }

    /// Returns a settled machine to `Idle`.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, SubmissionState::Success | SubmissionState::Failed) {
            self.state = SubmissionState::Idle;
        }
    }
}

/// Message shown to the user for a failed submission: the server-provided
/// text when the error carries one, a generic fallback otherwise.
fn surface_message(error: &AppError) -> String {
    match error {
        AppError::Validation(message)
        | AppError::MissingIdentity(message)
        | AppError::Remote(message)
        | AppError::NotFound(message) => {
            if message.trim().is_empty() {
                REMOTE_FALLBACK.to_owned()
            } else {
                message.clone()
            }
        }
        AppError::MalformedResponse(_) | AppError::Internal(_) => REMOTE_FALLBACK.to_owned(),
    }
}
