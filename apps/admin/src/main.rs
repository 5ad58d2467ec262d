//! Talentra admin console runtime.
//!
//! Headless wiring of the HTTP gateway into the roster and agenda
//! controllers: loads configuration, fetches both collections, and logs a
//! summary. The interactive shell lives outside this workspace.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use talentra_application::{AgendaController, RosterController, RosterGateway, RosterVariant};
use talentra_core::{AppError, AppResult};
use talentra_infrastructure::HttpRosterGateway;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct AdminConfig {
    api_base_url: String,
    http_timeout_seconds: u64,
}

impl AdminConfig {
    fn load() -> AppResult<Self> {
        let api_base_url =
            env::var("ROSTER_API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        if api_base_url.trim().is_empty() {
            return Err(AppError::Validation(
                "ROSTER_API_BASE_URL must not be empty".to_owned(),
            ));
        }

        let http_timeout_seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(15);

        Ok(Self {
            api_base_url,
            http_timeout_seconds,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AdminConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let gateway: Arc<dyn RosterGateway> = Arc::new(HttpRosterGateway::new(
        http_client,
        config.api_base_url.clone(),
    ));

    info!(api_base_url = %config.api_base_url, "talentra-admin started");

    for variant in [
        RosterVariant::Apprentice,
        RosterVariant::Competitor,
        RosterVariant::Expert,
    ] {
        let mut roster = RosterController::new(Arc::clone(&gateway), variant);
        roster.refresh().await?;
        info!(
            role = variant.role_label(),
            count = roster.people().len(),
            "fetched roster rows"
        );
    }

    let mut agenda = AgendaController::new(Arc::clone(&gateway));
    agenda.refresh().await?;
    info!(
        events = agenda.events().len(),
        days = agenda.index().day_count(),
        "fetched event calendar"
    );

    for (day, events) in agenda.index().days() {
        for event in events {
            info!(day, name = %event.name_event, "scheduled event");
        }
    }

    Ok(())
}
