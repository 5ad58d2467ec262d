use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use talentra_core::{AppError, AppResult, RecordId};
use talentra_domain::{
    BLOOD_TYPES, DIET_PREFERENCES, DOCUMENT_TYPES, FORMATION_CENTERS, FORMATION_PROGRAMS,
    HIRING_STATUSES, PersonRecord, RuleSet,
};

use crate::form::EntityForm;
use crate::modal::ModalState;
use crate::roster_ports::RosterGateway;
use crate::submission::{SubmissionGate, SubmissionMachine, SubmissionOutcome};

/// Which person screens a controller serves.
///
/// The variants share one remote collection and differ in rule set,
/// create-form defaults, and the `rol` value rows are filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterVariant {
    /// Apprentice screens.
    Apprentice,
    /// Competitor screens.
    Competitor,
    /// Expert screens.
    Expert,
}

impl RosterVariant {
    /// Role value rows of this variant carry in the shared collection.
    #[must_use]
    pub fn role_label(&self) -> &'static str {
        match self {
            Self::Apprentice => "Aprendiz",
            Self::Competitor => "Competidor",
            Self::Expert => "Experto",
        }
    }

    /// Validation rule set backing this variant's screens.
    #[must_use]
    pub fn rules(&self) -> RuleSet {
        match self {
            Self::Apprentice => RuleSet::apprentice(),
            Self::Competitor => RuleSet::competitor(),
            Self::Expert => RuleSet::expert(),
        }
    }

    /// Seed values for a fresh create form: the role plus the catalog
    /// defaults each create screen starts from.
    #[must_use]
    pub fn default_form_values(&self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::from([
            ("rol".to_owned(), self.role_label().to_owned()),
            (
                "documentType".to_owned(),
                DOCUMENT_TYPES.default_value().to_owned(),
            ),
            (
                "formationCenter".to_owned(),
                FORMATION_CENTERS.default_value().to_owned(),
            ),
        ]);

        match self {
            Self::Apprentice => {
                values.insert(
                    "programName".to_owned(),
                    FORMATION_PROGRAMS.default_value().to_owned(),
                );
            }
            Self::Competitor => {
                values.insert(
                    "programName".to_owned(),
                    FORMATION_PROGRAMS.default_value().to_owned(),
                );
                values.insert("bloodType".to_owned(), BLOOD_TYPES.default_value().to_owned());
                values.insert(
                    "dietPreferences".to_owned(),
                    DIET_PREFERENCES.default_value().to_owned(),
                );
                values.insert(
                    "hiringStatus".to_owned(),
                    HIRING_STATUSES.default_value().to_owned(),
                );
            }
            Self::Expert => {
                values.insert("bloodType".to_owned(), BLOOD_TYPES.default_value().to_owned());
                values.insert(
                    "dietPreferences".to_owned(),
                    DIET_PREFERENCES.default_value().to_owned(),
                );
            }
        }

        values
    }
}

/// CRUD orchestrator for one person variant.
///
/// Holds the fetched rows, the active modal, and the live form. After any
/// completed mutation the list is re-fetched exactly once; the re-fetched
/// list is the sole source of truth, never an optimistic local edit.
pub struct RosterController {
    gateway: Arc<dyn RosterGateway>,
    variant: RosterVariant,
    people: Vec<PersonRecord>,
    modal: ModalState<PersonRecord>,
    form: Option<EntityForm>,
    submission: SubmissionMachine,
    notice: Option<String>,
}

impl RosterController {
    /// Creates a controller over the gateway for one variant.
    #[must_use]
    pub fn new(gateway: Arc<dyn RosterGateway>, variant: RosterVariant) -> Self {
        Self {
            gateway,
            variant,
            people: Vec::new(),
            modal: ModalState::Closed,
            form: None,
            submission: SubmissionMachine::new(),
            notice: None,
        }
    }

    /// Returns the variant this controller serves.
    #[must_use]
    pub fn variant(&self) -> RosterVariant {
        self.variant
    }

    /// Returns the rows fetched for this variant.
    #[must_use]
    pub fn people(&self) -> &[PersonRecord] {
        &self.people
    }

    /// Returns the active modal.
    #[must_use]
    pub fn modal(&self) -> &ModalState<PersonRecord> {
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

    /// Re-fetches the shared collection and keeps this variant's rows.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let label = self.variant.role_label();
        let people = self.gateway.list_people().await?;
        self.people = people
            .into_iter()
            .filter(|person| person.rol.eq_ignore_ascii_case(label))
            .collect();
        Ok(())
    }

    /// Opens the create screen with a defaults-seeded form. Only legal from
    /// the closed list; returns whether the transition happened.
    pub fn open_create(&mut self) -> bool {
        if !self.modal.is_closed() {
            return false;
        }

        self.form = Some(EntityForm::seeded(
            self.variant.rules(),
            None,
            self.variant.default_form_values(),
        ));
        self.modal = ModalState::Creating;
        true
    }

    /// Opens the read-only view screen for a list row.
    pub fn open_view(&mut self, record: PersonRecord) -> bool {
        if !self.modal.is_closed() {
            return false;
        }

        self.modal = ModalState::Viewing(record);
        true
    }

    /// Opens the edit screen directly from a list row.
    pub fn open_edit(&mut self, record: PersonRecord) -> bool {
        if !self.modal.is_closed() {
            return false;
        }

        self.seed_edit_form(&record);
        self.modal = ModalState::Editing(record);
        true
    }

    /// Moves from the view screen to the edit screen for the same record.
    pub fn edit_current(&mut self) -> bool {
        let ModalState::Viewing(record) = &self.modal else {
            return false;
        };

        let record = record.clone();
        self.seed_edit_form(&record);
        self.modal = ModalState::Editing(record);
        true
    }

    /// Cancels an edit, returning to the view screen without a re-fetch and
    /// discarding the form.
    pub fn cancel_edit(&mut self) -> bool {
        let ModalState::Editing(record) = &self.modal else {
            return false;
        };

        self.modal = ModalState::Viewing(record.clone());
        self.form = None;
        true
    }

    /// Asks for delete confirmation from the view or edit screen.
    pub fn request_delete(&mut self) -> bool {
        match &self.modal {
            ModalState::Viewing(record) | ModalState::Editing(record) => {
                self.modal = ModalState::ConfirmingDelete(record.clone());
                self.form = None;
                true
            }
            _ => false,
        }
    }

    /// Backs out of a pending delete, returning to the view screen.
    pub fn cancel_delete(&mut self) -> bool {
        let ModalState::ConfirmingDelete(record) = &self.modal else {
            return false;
        };

        self.modal = ModalState::Viewing(record.clone());
        true
    }

    /// Explicit cancel from any state: closes the modal and discards the
    /// form without a re-fetch.
    pub fn close(&mut self) {
        self.modal = ModalState::Closed;
        self.form = None;
        self.submission.acknowledge();
    }

    /// Submits the open create or edit form.
    ///
    /// Validation failures and duplicate submits never reach the gateway;
    /// a success closes the screen and re-fetches exactly once.
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
            let record = PersonRecord::from_form_values(None, form.values());
            self.gateway.create_person(record).await.map(drop)
        } else {
            match form.require_id().cloned() {
                Ok(id) => {
                    let record = PersonRecord::from_form_values(Some(&id), form.values());
                    self.gateway.update_person(&id, record).await.map(drop)
                }
                Err(error) => Err(error),
            }
        };

        let outcome = self.submission.complete(call_result);
        if outcome == SubmissionOutcome::Saved {
            let label = self.variant.role_label();
            self.notice = Some(if creating {
                format!("{label} creado exitosamente")
            } else {
                format!("{label} modificado exitosamente")
            });
            self.submission.acknowledge();
            self.modal = ModalState::Closed;
            self.form = None;
            self.refresh().await?;
        }

        Ok(outcome)
    }

    /// Executes a confirmed delete.
    ///
    /// Requires a resolved id before any network call; a success closes the
    /// modal and re-fetches exactly once.
    pub async fn confirm_delete(&mut self) -> AppResult<SubmissionOutcome> {
        let ModalState::ConfirmingDelete(record) = &self.modal else {
            return Err(AppError::Internal(
                "no delete awaiting confirmation".to_owned(),
            ));
        };

        if self.submission.begin_unchecked() == SubmissionGate::AlreadySubmitting {
            return Ok(SubmissionOutcome::Ignored);
        }

        let call_result = match record.id.as_deref() {
            Some(raw) => match RecordId::new(raw) {
                Ok(id) => self.gateway.delete_person(&id).await,
                Err(error) => Err(error),
            },
            None => Err(AppError::MissingIdentity("ID no encontrado".to_owned())),
        };

        let outcome = self.submission.complete(call_result);
        if outcome == SubmissionOutcome::Saved {
            self.notice = Some(format!(
                "{} eliminado exitosamente",
                self.variant.role_label()
            ));
            self.submission.acknowledge();
            self.modal = ModalState::Closed;
            self.form = None;
            self.refresh().await?;
        }

        Ok(outcome)
    }

    fn seed_edit_form(&mut self, record: &PersonRecord) {
        let id = record
            .id
            .as_deref()
            .and_then(|raw| RecordId::new(raw).ok());
        self.form = Some(EntityForm::seeded(
            self.variant.rules(),
            id,
            record.form_values(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::NaiveDate;

    use talentra_domain::PersonRecord;

    use super::{ModalState, RosterController, RosterVariant};
    use crate::submission::{FORM_NOTICE, SubmissionOutcome};
    use crate::test_support::FakeGateway;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap_or_else(|| unreachable!())
    }

    fn apprentice(id: Option<&str>, name: &str) -> PersonRecord {
        PersonRecord {
            id: id.map(str::to_owned),
            name: name.to_owned(),
            last_name: "Gómez".to_owned(),
            document_type: "Cédula de ciudadanía".to_owned(),
            document_number: "1023456789".to_owned(),
            email: "maria@example.com".to_owned(),
            birthdate: "2000-05-17".to_owned(),
            phone: "3001234567".to_owned(),
            program_name: "Multimedia".to_owned(),
            formation_center: "Centro de comercio y servicios".to_owned(),
            competition_name: "Diseño web".to_owned(),
            strategy_competition: "WorldSkills".to_owned(),
            index_course: "2567890".to_owned(),
            rol: "Aprendiz".to_owned(),
            ..PersonRecord::default()
        }
    }

    fn fill_valid_apprentice(controller: &mut RosterController) {
        let edits = [
            ("name", "María"),
            ("lastName", "Gómez"),
            ("strategyCompetition", "WorldSkills"),
            ("competitionName", "Diseño web"),
            ("documentNumber", "1023456789"),
            ("phone", "3001234567"),
            ("email", "maria@example.com"),
            ("birthdate", "2000-05-17"),
        ];
        let form = controller.form_mut().unwrap_or_else(|| unreachable!());
        for (field, value) in edits {
            form.edit(field, value, today());
        }
    }

    #[tokio::test]
    async fn refresh_keeps_only_this_variants_rows() {
        let gateway = FakeGateway::with_people(vec![
            apprentice(Some("1"), "María"),
            PersonRecord {
                rol: "Experto".to_owned(),
                ..apprentice(Some("2"), "Luis")
            },
        ]);
        let mut controller = RosterController::new(gateway, RosterVariant::Apprentice);

        controller.refresh().await.unwrap_or_else(|_| unreachable!());
        assert_eq!(controller.people().len(), 1);
        assert_eq!(controller.people()[0].name, "María");
    }

    #[tokio::test]
    async fn create_flow_saves_closes_and_refetches_once() {
        let gateway = FakeGateway::new();
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);

        assert!(controller.open_create());
        assert_eq!(
            controller
                .form()
                .map(|form| form.value("documentType").to_owned()),
            Some("Cédula de ciudadanía".to_owned())
        );
        fill_valid_apprentice(&mut controller);

        let outcome = controller.save(today()).await.unwrap_or_else(|_| unreachable!());
        assert_eq!(outcome, SubmissionOutcome::Saved);
        assert!(controller.modal().is_closed());
        assert!(controller.form().is_none());
        assert_eq!(gateway.create_person_calls.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.list_people_calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.people().len(), 1);
        assert_eq!(
            controller.take_notice().as_deref(),
            Some("Aprendiz creado exitosamente")
        );
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_without_any_network_call() {
        let gateway = FakeGateway::new();
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);

        assert!(controller.open_create());
        let outcome = controller.save(today()).await.unwrap_or_else(|_| unreachable!());

        assert_eq!(outcome, SubmissionOutcome::Rejected);
        assert_eq!(gateway.create_person_calls.load(Ordering::SeqCst), 0);
        assert_eq!(gateway.list_people_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.submission().notice(), Some(FORM_NOTICE));
        assert!(matches!(controller.modal(), ModalState::Creating));
    }

    #[tokio::test]
    async fn update_without_id_aborts_before_the_network() {
        let gateway = FakeGateway::new();
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);

        assert!(controller.open_edit(apprentice(None, "María")));
        fill_valid_apprentice(&mut controller);

        let outcome = controller.save(today()).await.unwrap_or_else(|_| unreachable!());
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed("ID no encontrado".to_owned())
        );
        assert_eq!(gateway.update_person_calls.load(Ordering::SeqCst), 0);
        assert!(matches!(controller.modal(), ModalState::Editing(_)));
    }

    #[tokio::test]
    async fn duplicate_submit_while_in_flight_is_ignored() {
        let gateway = FakeGateway::new();
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);

        assert!(controller.open_create());
        fill_valid_apprentice(&mut controller);

        // First submit is still outstanding.
        controller.submission_mut().begin_unchecked();
        let outcome = controller.save(today()).await.unwrap_or_else(|_| unreachable!());

        assert_eq!(outcome, SubmissionOutcome::Ignored);
        assert_eq!(gateway.create_person_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_flow_sends_the_id_and_refetches() {
        let gateway = FakeGateway::with_people(vec![apprentice(Some("7"), "María")]);
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);
        controller.refresh().await.unwrap_or_else(|_| unreachable!());

        let row = controller.people()[0].clone();
        assert!(controller.open_view(row));
        assert!(controller.edit_current());

        if let Some(form) = controller.form_mut() {
            form.edit("name", "Mariana", today());
        }
        let outcome = controller.save(today()).await.unwrap_or_else(|_| unreachable!());

        assert_eq!(outcome, SubmissionOutcome::Saved);
        assert_eq!(gateway.update_person_calls.load(Ordering::SeqCst), 1);
        // One initial fetch plus exactly one post-mutation re-fetch.
        assert_eq!(gateway.list_people_calls.load(Ordering::SeqCst), 2);
        assert_eq!(controller.people()[0].name, "Mariana");
        assert_eq!(
            controller.take_notice().as_deref(),
            Some("Aprendiz modificado exitosamente")
        );
    }

    #[tokio::test]
    async fn cancelled_edit_returns_to_view_without_refetch() {
        let gateway = FakeGateway::with_people(vec![apprentice(Some("7"), "María")]);
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);
        controller.refresh().await.unwrap_or_else(|_| unreachable!());

        let row = controller.people()[0].clone();
        controller.open_view(row);
        controller.edit_current();
        assert!(controller.cancel_edit());

        assert!(matches!(controller.modal(), ModalState::Viewing(_)));
        assert!(controller.form().is_none());
        assert_eq!(gateway.list_people_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_closes_and_refetches_once() {
        let gateway = FakeGateway::with_people(vec![apprentice(Some("7"), "María")]);
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);
        controller.refresh().await.unwrap_or_else(|_| unreachable!());

        let row = controller.people()[0].clone();
        controller.open_view(row);
        assert!(controller.request_delete());

        let outcome = controller
            .confirm_delete()
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(outcome, SubmissionOutcome::Saved);
        assert_eq!(gateway.delete_person_calls.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.list_people_calls.load(Ordering::SeqCst), 2);
        assert!(controller.modal().is_closed());
        assert!(controller.people().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_keeps_the_form_open_for_retry() {
        let gateway = FakeGateway::new();
        gateway.fail_next_mutation("duplicado").await;
        let mut controller = RosterController::new(gateway.clone(), RosterVariant::Apprentice);

        controller.open_create();
        fill_valid_apprentice(&mut controller);
        let outcome = controller.save(today()).await.unwrap_or_else(|_| unreachable!());

        assert_eq!(outcome, SubmissionOutcome::Failed("duplicado".to_owned()));
        assert!(matches!(controller.modal(), ModalState::Creating));
        assert_eq!(
            controller
                .form()
                .map(|form| form.value("name").to_owned()),
            Some("María".to_owned())
        );
        assert_eq!(gateway.list_people_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn modals_cannot_stack() {
        let gateway = FakeGateway::new();
        let mut controller = RosterController::new(gateway, RosterVariant::Apprentice);

        assert!(controller.open_create());
        assert!(!controller.open_view(apprentice(Some("1"), "María")));
        assert!(!controller.open_edit(apprentice(Some("1"), "María")));
        assert!(!controller.edit_current());

        controller.close();
        assert!(controller.modal().is_closed());
        assert!(controller.form().is_none());
    }
}
