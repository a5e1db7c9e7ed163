//! Contact persistence.
//!
//! The store is picked once at startup by [`select_store`]; handlers only see
//! `Arc<dyn ContactStore>` and never branch on which backend is active.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use portfolio_contract::{ContactSubmission, StoreStatus};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

const SUPABASE_TIMEOUT: Duration = Duration::from_secs(10);

/// Persistence failures. Details are logged, never returned to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store rejected insert with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("store response had no inserted row")]
    EmptyResponse,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A persisted submission as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredContact {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Destination for validated contact submissions.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Value reported as `supabase` by `GET /health`.
    fn status(&self) -> StoreStatus;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Persists one validated submission.
    async fn insert(&self, submission: &ContactSubmission) -> Result<StoredContact, StoreError>;
}

#[derive(Debug, Serialize)]
struct NewContactRow<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    created_at: DateTime<Utc>,
}

/// Supabase PostgREST table store.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(project_url: &str, api_key: &str, table: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(SUPABASE_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", project_url.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Reads the first row of a `return=representation` response.
fn parse_inserted_row(body: &Value, fallback_created_at: DateTime<Utc>) -> Option<StoredContact> {
    let row = match body {
        Value::Array(rows) => rows.first()?,
        Value::Object(_) => body,
        _ => return None,
    };
    let id = match row.get("id")? {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    let created_at = row
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or(fallback_created_at);
    Some(StoredContact { id, created_at })
}

#[async_trait]
impl ContactStore for SupabaseStore {
    fn status(&self) -> StoreStatus {
        StoreStatus::Connected
    }

    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn insert(&self, submission: &ContactSubmission) -> Result<StoredContact, StoreError> {
        let created_at = Utc::now();
        let row = NewContactRow {
            name: &submission.name,
            email: &submission.email,
            subject: &submission.subject,
            message: &submission.message,
            created_at,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        parse_inserted_row(&body, created_at).ok_or(StoreError::EmptyResponse)
    }
}

/// Demo-mode store: logs the submission and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingStore;

#[async_trait]
impl ContactStore for LoggingStore {
    fn status(&self) -> StoreStatus {
        StoreStatus::NotConfigured
    }

    fn name(&self) -> &'static str {
        "logging"
    }

    async fn insert(&self, submission: &ContactSubmission) -> Result<StoredContact, StoreError> {
        let stored = StoredContact {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        };
        info!(
            id = %stored.id,
            name = %submission.name,
            email = %submission.email,
            subject = %submission.subject,
            message = %submission.message,
            "demo mode: contact submission logged, not persisted"
        );
        Ok(stored)
    }
}

/// Picks the store for this process: Supabase when URL and key are both set, else demo mode.
pub fn select_store(config: &Config) -> Result<Arc<dyn ContactStore>, StoreError> {
    match (&config.supabase_url, &config.supabase_key) {
        (Some(url), Some(key)) => {
            let store = SupabaseStore::new(url, key, &config.supabase_table)?;
            info!(endpoint = %store.endpoint(), "persisting contact submissions to Supabase");
            Ok(Arc::new(store))
        }
        (Some(_), None) => {
            warn!("SUPABASE_URL is set without SUPABASE_ANON_KEY; running in demo mode");
            Ok(Arc::new(LoggingStore))
        }
        (None, Some(_)) => {
            warn!("SUPABASE_ANON_KEY is set without SUPABASE_URL; running in demo mode");
            Ok(Arc::new(LoggingStore))
        }
        (None, None) => {
            info!("Supabase not configured; running in demo mode");
            Ok(Arc::new(LoggingStore))
        }
    }
}
