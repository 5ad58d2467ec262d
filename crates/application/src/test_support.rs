//! In-memory gateway fake shared by the orchestrator tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use talentra_core::{AppError, AppResult, RecordId};
use talentra_domain::{EventRecord, PersonRecord};
use tokio::sync::Mutex;

use crate::roster_ports::RosterGateway;

pub(crate) struct FakeGateway {
    pub people: Mutex<Vec<PersonRecord>>,
    pub events: Mutex<Vec<EventRecord>>,
    pub list_people_calls: AtomicUsize,
    pub create_person_calls: AtomicUsize,
    pub update_person_calls: AtomicUsize,
    pub delete_person_calls: AtomicUsize,
    pub list_events_calls: AtomicUsize,
    pub create_event_calls: AtomicUsize,
    pub update_event_calls: AtomicUsize,
    pub delete_event_calls: AtomicUsize,
    fail_next: Mutex<Option<AppError>>,
    next_id: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Self::seeded(Vec::new(), Vec::new())
    }

    pub fn with_people(people: Vec<PersonRecord>) -> Arc<Self> {
        Self::seeded(people, Vec::new())
    }

    pub fn with_events(events: Vec<EventRecord>) -> Arc<Self> {
        Self::seeded(Vec::new(), events)
    }

    fn seeded(people: Vec<PersonRecord>, events: Vec<EventRecord>) -> Arc<Self> {
        Arc::new(Self {
            people: Mutex::new(people),
            events: Mutex::new(events),
            list_people_calls: AtomicUsize::new(0),
            create_person_calls: AtomicUsize::new(0),
            update_person_calls: AtomicUsize::new(0),
            delete_person_calls: AtomicUsize::new(0),
            list_events_calls: AtomicUsize::new(0),
            create_event_calls: AtomicUsize::new(0),
            update_event_calls: AtomicUsize::new(0),
            delete_event_calls: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
            next_id: AtomicUsize::new(1),
        })
    }

    /// Makes the next mutating call fail with a remote error.
    pub async fn fail_next_mutation(&self, message: &str) {
        *self.fail_next.lock().await = Some(AppError::Remote(message.to_owned()));
    }

    async fn take_failure(&self) -> Option<AppError> {
        self.fail_next.lock().await.take()
    }

    fn assign_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

#[async_trait]
impl RosterGateway for FakeGateway {
    async fn list_people(&self) -> AppResult<Vec<PersonRecord>> {
        self.list_people_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.people.lock().await.clone())
    }

    async fn create_person(&self, mut person: PersonRecord) -> AppResult<PersonRecord> {
        self.create_person_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure().await {
            return Err(error);
        }

        person.id = Some(self.assign_id());
        self.people.lock().await.push(person.clone());
        Ok(person)
    }

    async fn update_person(
        &self,
        id: &RecordId,
        person: PersonRecord,
    ) -> AppResult<PersonRecord> {
        self.update_person_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure().await {
            return Err(error);
        }

        let mut people = self.people.lock().await;
        let Some(stored) = people
            .iter_mut()
            .find(|stored| stored.id.as_deref() == Some(id.as_str()))
        else {
            return Err(AppError::NotFound(format!("person '{id}' does not exist")));
        };

        *stored = person.clone();
        Ok(person)
    }

    async fn delete_person(&self, id: &RecordId) -> AppResult<()> {
        self.delete_person_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure().await {
            return Err(error);
        }

        let mut people = self.people.lock().await;
        let before = people.len();
        people.retain(|stored| stored.id.as_deref() != Some(id.as_str()));
        if people.len() == before {
            return Err(AppError::NotFound(format!("person '{id}' does not exist")));
        }
        Ok(())
    }

    async fn list_events(&self) -> AppResult<Vec<EventRecord>> {
        self.list_events_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.events.lock().await.clone())
    }

    async fn create_event(&self, mut event: EventRecord) -> AppResult<EventRecord> {
        self.create_event_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure().await {
            return Err(error);
        }

        event.id = Some(self.assign_id());
        self.events.lock().await.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: &RecordId, event: EventRecord) -> AppResult<EventRecord> {
        self.update_event_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure().await {
            return Err(error);
        }

        let mut events = self.events.lock().await;
        let Some(stored) = events
            .iter_mut()
            .find(|stored| stored.id.as_deref() == Some(id.as_str()))
        else {
            return Err(AppError::NotFound(format!("event '{id}' does not exist")));
        };

        *stored = event.clone();
        Ok(event)
    }

    async fn delete_event(&self, id: &RecordId) -> AppResult<()> {
        self.delete_event_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_failure().await {
            return Err(error);
        }

        let mut events = self.events.lock().await;
        let before = events.len();
        events.retain(|stored| stored.id.as_deref() != Some(id.as_str()));
        if events.len() == before {
            return Err(AppError::NotFound(format!("event '{id}' does not exist")));
        }
        Ok(())
    }
}
