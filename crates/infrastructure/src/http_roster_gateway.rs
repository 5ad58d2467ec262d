use async_trait::async_trait;
use serde_json::Value;
use talentra_application::RosterGateway;
use talentra_core::{AppError, AppResult, RecordId};
use talentra_domain::{EventRecord, PersonRecord};
use tracing::warn;

/// HTTP implementation of the roster gateway against the remote REST API.
pub struct HttpRosterGateway {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpRosterGateway {
    /// Creates a gateway over a shared HTTP client and a base URL.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http_client,
            base_url,
        }
    }

    fn people_url(&self) -> String {
        format!("{}/api/clientes", self.base_url)
    }

    fn person_url(&self, id: &RecordId) -> String {
        format!("{}/api/clientes/{id}", self.base_url)
    }

    fn events_url(&self) -> String {
        format!("{}/api/eventos", self.base_url)
    }

    fn event_url(&self, id: &RecordId) -> String {
        format!("{}/api/eventos/{id}", self.base_url)
    }
}

fn transport_error(error: reqwest::Error) -> AppError {
    AppError::Remote(format!("No fue posible contactar el servidor: {error}"))
}

/// Passes successful responses through; turns failures into the server's
/// `message` payload when present, a status fallback otherwise.
async fn checked(response: reqwest::Response) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| {
            format!(
                "Error {} al comunicarse con el servidor",
                status.as_u16()
            )
        });

    if status == reqwest::StatusCode::NOT_FOUND {
        Err(AppError::NotFound(message))
    } else {
        Err(AppError::Remote(message))
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> AppResult<T> {
    response.json::<T>().await.map_err(|error| {
        AppError::MalformedResponse(format!("{context} response did not match contract: {error}"))
    })
}

/// Unwraps the events endpoint's nested `{ "body": [ [Event, ...] ] }`
/// shape. Returns `None` when the nesting is absent; malformed entries
/// inside an otherwise valid array are skipped.
fn events_from_envelope(envelope: &Value) -> Option<Vec<EventRecord>> {
    let nested = envelope.get("body")?.as_array()?.first()?.as_array()?;

    let mut events = Vec::with_capacity(nested.len());
    for raw in nested {
        match serde_json::from_value::<EventRecord>(raw.clone()) {
            Ok(event) => events.push(event),
            Err(error) => warn!(%error, "skipping malformed event record"),
        }
    }

    Some(events)
}

#[async_trait]
impl RosterGateway for HttpRosterGateway {
    async fn list_people(&self) -> AppResult<Vec<PersonRecord>> {
        let response = self
            .http_client
            .get(self.people_url())
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(checked(response).await?, "people list").await
    }

    async fn create_person(&self, person: PersonRecord) -> AppResult<PersonRecord> {
        let response = self
            .http_client
            .post(self.people_url())
            .json(&person)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(checked(response).await?, "person create").await
    }

    async fn update_person(
        &self,
        id: &RecordId,
        person: PersonRecord,
    ) -> AppResult<PersonRecord> {
        let response = self
            .http_client
            .put(self.person_url(id))
            .json(&person)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(checked(response).await?, "person update").await
    }

    async fn delete_person(&self, id: &RecordId) -> AppResult<()> {
        let response = self
            .http_client
            .delete(self.person_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        checked(response).await.map(drop)
    }

    async fn list_events(&self) -> AppResult<Vec<EventRecord>> {
        let response = self
            .http_client
            .get(self.events_url())
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: Value = parse_json(checked(response).await?, "events list").await?;

        Ok(events_from_envelope(&envelope).unwrap_or_else(|| {
            warn!("events response missing the nested body array; treating as empty");
            Vec::new()
        }))
    }

    async fn create_event(&self, event: EventRecord) -> AppResult<EventRecord> {
        let response = self
            .http_client
            .post(self.events_url())
            .json(&event)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(checked(response).await?, "event create").await
    }

    async fn update_event(&self, id: &RecordId, event: EventRecord) -> AppResult<EventRecord> {
        let response = self
            .http_client
            .put(self.event_url(id))
            .json(&event)
            .send()
            .await
            .map_err(transport_error)?;
        parse_json(checked(response).await?, "event update").await
    }

    async fn delete_event(&self, id: &RecordId) -> AppResult<()> {
        let response = self
            .http_client
            .delete(self.event_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        checked(response).await.map(drop)
    }
}
