use async_trait::async_trait;
use talentra_core::{AppResult, RecordId};
use talentra_domain::{EventRecord, PersonRecord};

/// Port to the remote store holding both managed collections.
///
/// People share one collection disambiguated by `rol`; events live in their
/// own. Every call is a potential suspension point; implementations surface
/// remote failures as [`talentra_core::AppError::Remote`].
#[async_trait]
pub trait RosterGateway: Send + Sync {
    /// Fetches every person record.
    async fn list_people(&self) -> AppResult<Vec<PersonRecord>>;

    /// Creates a person record and returns the stored version.
    async fn create_person(&self, person: PersonRecord) -> AppResult<PersonRecord>;

    /// Updates a person record by id and returns the stored version.
    async fn update_person(
        &self,
        id: &RecordId,
        person: PersonRecord,
    ) -> AppResult<PersonRecord>;

    /// Deletes a person record by id.
    async fn delete_person(&self, id: &RecordId) -> AppResult<()>;

    /// Fetches every event record.
    async fn list_events(&self) -> AppResult<Vec<EventRecord>>;

    /// Creates an event record and returns the stored version.
    async fn create_event(&self, event: EventRecord) -> AppResult<EventRecord>;

    /// Updates an event record by id and returns the stored version.
    async fn update_event(&self, id: &RecordId, event: EventRecord) -> AppResult<EventRecord>;

    /// Deletes an event record by id.
    async fn delete_event(&self, id: &RecordId) -> AppResult<()>;
}
