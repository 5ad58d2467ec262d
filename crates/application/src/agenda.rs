use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use talentra_core::{AppError, AppResult, RecordId};
use talentra_domain::{EventRecord, RuleSet, dates};

use crate::calendar::EventIndex;
use crate::form::EntityForm;
use crate::modal::ModalState;
use crate::roster_ports::RosterGateway;
use crate::submission::{SubmissionGate, SubmissionMachine, SubmissionOutcome};

/// CRUD orchestrator for the event calendar.
///
/// Holds the fetched event list and its date index, the selected day, the
/// active modal, and the live form. The index is rebuilt wholesale after
/// every re-fetch; mutations never patch it in place.
pub struct AgendaController {
    gateway: Arc<dyn RosterGateway>,
    events: Vec<EventRecord>,
    index: EventIndex,
    selected_day: Option<String>,
    modal: ModalState<EventRecord>,
    form: Option<EntityForm>,
    submission: SubmissionMachine,
    notice: Option<String>,
}

impl AgendaController {
    /// Creates a controller over the gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn RosterGateway>) -> Self {
        Self {
            gateway,
            events: Vec::new(),
            index: EventIndex::default(),
            selected_day: None,
            modal: ModalState::Closed,
            form: None,
            submission: SubmissionMachine::new(),
            notice: None,
        }
    }

    /// Returns the fetched event list.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Returns the current date index.
    #[must_use]
    pub fn index(&self) -> &EventIndex {
        &self.index
    }

    /// Returns the active modal.
    #[must_use]
    pub fn modal(&self) -> &ModalState<EventRecord> {
        &self.modal
    }

    /// Returns the live form, when a create or edit screen is open.
    #[must_use]
    pub fn form(&self) -> Option<&EntityForm> {
        self.form.as_ref()
    }

    /// Mutable access to the live form for field edits.
    pub fn form_mut(&mut self) -> Option<&mut EntityForm> {
        self.form.as_mut()
    }

    /// Returns the submission machine (loading flag, failure notices).
    #[must_use]
    pub fn submission(&self) -> &SubmissionMachine {
        &self.submission
    }

    /// Mutable access to the submission machine.
    pub fn submission_mut(&mut self) -> &mut SubmissionMachine {
        &mut self.submission
    }

    /// Returns the pending success notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Takes the pending success notice, clearing it.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Re-fetches the event list and rebuilds the index.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.events = self.gateway.list_events().await?;
        self.index = EventIndex::build(&self.events);
        Ok(())
    }

    /// Selects a calendar day, opening the day-detail view.
    ///
    /// Returns false (and keeps the previous selection) when the input does
    /// not normalize to a day.
    pub fn select_day(&mut self, raw: &str) -> bool {
        let day = dates::normalize(raw);
        if day.is_empty() {
            return false;
        }

        self.selected_day = Some(day);
        true
    }

    /// Clears the day-detail selection.
    pub fn clear_day(&mut self) {
        self.selected_day = None;
    }

    /// Returns the selected canonical day, if any.
    #[must_use]
    pub fn selected_day(&self) -> Option<&str> {
        self.selected_day.as_deref()
    }

    /// Returns the events on the selected day, empty when none is selected.
    #[must_use]
    pub fn day_events(&self) -> &[EventRecord] {
        match &self.selected_day {
            Some(day) => self.index.lookup(day),
            None => &[],
        }
    }

    /// Title for the day-detail view, e.g. "Eventos para el 05/03/2024".
    #[must_use]
    pub fn day_title(&self) -> String {
        self.selected_day
            .as_deref()
            .map(|day| format!("Eventos para el {}", dates::display(day)))
            .unwrap_or_default()
    }

    /// Opens the create screen with an empty form, pre-dated to the
    /// selected day when one is active.
    pub fn open_create(&mut self) -> bool {
        if !self.modal.is_closed() {
            return false;
        }

        let mut values = BTreeMap::new();
        if let Some(day) = &self.selected_day {
            values.insert("dateEvent".to_owned(), day.clone());
        }
        self.form = Some(EntityForm::seeded(RuleSet::event(), None, values));
        self.modal = ModalState::Creating;
        true
    }

    /// Opens the edit screen for one day-detail entry.
    pub fn open_edit(&mut self, event: EventRecord) -> bool {
        if !self.modal.is_closed() {
            return false;
        }

        let id = event.id.as_deref().and_then(|raw| RecordId::new(raw).ok());
        self.form = Some(EntityForm::seeded(RuleSet::event(), id, event.form_values()));
        self.modal = ModalState::Editing(event);
        true
    }

    /// Explicit cancel: closes the modal and discards the form. The day
    /// selection survives so the day-detail view stays in front.
    pub fn close(&mut self) {
        self.modal = ModalState::Closed;
        self.form = None;
        self.submission.acknowledge();
    }

    /// Submits the open create or edit form.
    pub async fn save(&mut self, today: NaiveDate) -> AppResult<SubmissionOutcome> {
        let creating = matches!(self.modal, ModalState::Creating);
        if !creating && !matches!(self.modal, ModalState::Editing(_)) {
            return Err(AppError::Internal("no open form to save".to_owned()));
        }
        let Some(form) = self.form.as_mut() else {
            return Err(AppError::Internal("no open form to save".to_owned()));
        };

        match self.submission.begin_form(form, today) {
            SubmissionGate::AlreadySubmitting => return Ok(SubmissionOutcome::Ignored),
            SubmissionGate::Rejected => return Ok(SubmissionOutcome::Rejected),
            SubmissionGate::Proceed => {}
        }

        let call_result = if creating {
            let record = EventRecord::from_form_values(None, form.values());
            self.gateway.create_event(record).await.map(drop)
        } else {
            match form.require_id().cloned() {
                Ok(id) => {
                    let record = EventRecord::from_form_values(Some(&id), form.values());
                    self.gateway.update_event(&id, record).await.map(drop)
                }
                Err(error) => Err(error),
            }
        };

        let outcome = self.submission.complete(call_result);
        if outcome == SubmissionOutcome::Saved {
            self.notice = Some(if creating {
                "Evento creado exitosamente".to_owned()
            } else {
                "Evento modificado exitosamente".to_owned()
            });
            self.submission.acknowledge();
            self.modal = ModalState::Closed;
            self.form = None;
            self.refresh().await?;
        }

        Ok(outcome)
    }

    /// Deletes one day-detail entry directly.
    ///
    /// Requires a resolved id before any network call; a success closes the
    /// day-detail view and re-fetches exactly once.
    pub async fn delete(&mut self, event: &EventRecord) -> AppResult<SubmissionOutcome> {
        if self.submission.begin_unchecked() == SubmissionGate::AlreadySubmitting {
            return Ok(SubmissionOutcome::Ignored);
        }

        let call_result = match event.id.as_deref() {
            Some(raw) => match RecordId::new(raw) {
                Ok(id) => self.gateway.delete_event(&id).await,
                Err(error) => Err(error),
            },
            None => Err(AppError::MissingIdentity("ID no encontrado".to_owned())),
        };

        let outcome = self.submission.complete(call_result);

        if outcome == SubmissionOutcome::Saved {
            self.notice = Some("Evento eliminado exitosamente".to_owned());
            self.submission.acknowledge();
            self.selected_day = None;
            self.refresh().await?;
        }

        Ok(outcome)
    }
}
