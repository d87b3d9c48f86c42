// API client module: a small blocking HTTP client that talks to the laundry
// backend's admin API. The backend authenticates with a session cookie, so
// the reqwest client keeps a cookie store and the login call must happen
// before any admin request.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::error::AppError;

/// Blocking client bound to one backend. Holds the session cookie after a
/// successful [`ApiClient::login`].
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Roles the backend knows about. Serialized with the backend's enum names.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[value(name = "USER")]
    User,
    #[value(name = "STAFF")]
    Staff,
    #[value(name = "LAUNDRY_ADMIN")]
    LaundryAdmin,
    #[value(name = "ROOFTOP_ADMIN")]
    RooftopAdmin,
    #[value(name = "MASTER_ADMIN")]
    MasterAdmin,
}

/// Login request payload.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub room_number: &'a str,
    pub password: &'a str,
}

/// Body of the bulk-generate call. Unset options are left out so the
/// backend applies its own defaults.
#[derive(Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BulkGenerateRequest {
    pub rooms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite_existing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_washer_minutes_per_week: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dryer_minutes_per_week: Option<i64>,
}

/// Outcome for a single room.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStatus {
    Created,
    Updated,
    SkippedExists,
    /// Local dry-run result, never returned by the backend.
    Preview,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationStatus::Created => "CREATED",
            GenerationStatus::Updated => "UPDATED",
            GenerationStatus::SkippedExists => "SKIPPED_EXISTS",
            GenerationStatus::Preview => "PREVIEW",
            GenerationStatus::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Generated credential for one room. `password` is missing for rooms that
/// were skipped because the account already exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCredential {
    pub room_number: String,
    #[serde(default)]
    pub password: Option<String>,
    pub status: GenerationStatus,
}

/// Response of the bulk-generate endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkGenerationSummary {
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub credentials: Vec<GeneratedCredential>,
}

impl ApiClient {
    /// Create a client for `base_url`. A trailing slash is ignored.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        // The backend hashes every generated password inside one transaction;
        // giving up early would lose credentials that were already committed.
        let client = Client::builder()
            .timeout(None)
            .cookie_store(true)
            .default_headers(headers)
            .build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authenticate as an administrator. The session cookie from the
    /// response is kept for later calls.
    pub fn login(&self, room_number: &str, password: &str) -> Result<(), AppError> {
        let url = self.url("/auth/login");
        debug!(%url, room_number, "logging in");
        let res = self
            .client
            .post(&url)
            .json(&LoginRequest {
                room_number,
                password,
            })
            .send()?;
        if res.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidCredentials);
        }
        error_for_status(res)?;
        info!(room_number, "logged in");
        Ok(())
    }

    /// Create (or overwrite) accounts for the requested rooms.
    pub fn bulk_generate(
        &self,
        req: &BulkGenerateRequest,
    ) -> Result<BulkGenerationSummary, AppError> {
        let url = self.url("/api/users/bulk/generate");
        debug!(%url, rooms = req.rooms.len(), "requesting bulk generation");
        let res = self.client.post(&url).json(req).send()?;
        let res = error_for_status(res)?;
        let body = res.text()?;
        let summary: BulkGenerationSummary = serde_json::from_str(&body)
            .map_err(|e| AppError::UnexpectedResponse(e.to_string()))?;
        info!(
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            "bulk generation finished"
        );
        Ok(summary)
    }
}

/// Turn a non-success response into [`AppError::Api`] carrying the body.
fn error_for_status(res: Response) -> Result<Response, AppError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    debug!(status = status.as_u16(), %body, "request failed");
    Err(AppError::Api {
        status: status.as_u16(),
        body,
    })
}
