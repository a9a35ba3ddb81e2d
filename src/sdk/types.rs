//! Wire types exchanged with the Pergaminos API

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Internal digitization staff
    Staff,
    /// Customer user bound to one company
    Client,
}

/// Authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Accepts RFC 3339 timestamps as well as the naive UTC timestamps the
/// backend emits for values read back from its store.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// Login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

/// Response of `POST /init/admin`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitAdminResponse {
    pub message: String,
    /// Only present when the administrator was just created
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// New user, created by staff
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

/// Customer company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Company creation payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Digitization project owned by a company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub company_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub semantic_instructions: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Project creation payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProject {
    pub name: String,
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_instructions: Option<String>,
}

/// Server side processing state of a document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    Completed,
    Failed,
    NeedsReview,
    #[serde(other)]
    Unknown,
}

/// Uploaded document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    pub original_filename: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub status: DocumentStatus,
    #[serde(default)]
    pub display_order: Option<u32>,
    #[serde(default)]
    pub extracted_data: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of any endpoint that launches a server-side job.
///
/// No `task_id` means the server produced the result synchronously and
/// the whole body is the result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskAccepted {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Counters for the dashboard. Client users only receive a subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    #[serde(default)]
    pub companies_count: Option<u64>,
    #[serde(default)]
    pub projects_count: Option<u64>,
    #[serde(default)]
    pub documents_total: Option<u64>,
    #[serde(default)]
    pub documents_completed: Option<u64>,
    #[serde(default)]
    pub documents_failed: Option<u64>,
    #[serde(default)]
    pub documents_processing: Option<u64>,
    #[serde(default)]
    pub documents_needs_review: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Quality assurance agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaAgent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub qa_instructions: Option<String>,
    #[serde(default)]
    pub project_ids: Vec<String>,
    #[serde(default)]
    pub is_universal: bool,
    #[serde(default)]
    pub quality_checks: HashMap<String, bool>,
}

/// QA agent creation payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewQaAgent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub qa_instructions: String,
    pub project_ids: Vec<String>,
    pub is_universal: bool,
    pub quality_checks: HashMap<String, bool>,
}

/// Question about a project's extracted data
#[derive(Debug, Clone, Serialize)]
pub struct AskAiRequest {
    pub question: String,
    pub include_context: bool,
}

/// Answer from the document assistant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AskAiResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
}
