//! Error handling

use serde::Deserialize;
use thiserror::Error;

/// Error
#[derive(Error, Debug)]
pub enum SDKError {
    /// Rejected locally before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, expired or rejected credentials (HTTP 401)
    #[error("Authentication error: {}", .detail.as_deref().unwrap_or("unauthorized"))]
    AuthError { detail: Option<String> },

    /// HTTP 403
    #[error("Access denied: {}", .detail.as_deref().unwrap_or("forbidden"))]
    Forbidden { detail: Option<String> },

    /// HTTP 404
    #[error("Not found: {}", .detail.as_deref().unwrap_or("resource not found"))]
    NotFound { detail: Option<String> },

    /// Any other non-success status
    #[error("API error (HTTP {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    ApiError { status: u16, detail: Option<String> },

    /// Error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Local file access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// SDK result type
pub type Result<T> = std::result::Result<T, SDKError>;

/// Fallback messages shown to users when the server gives no `detail`.
pub mod fallback {
    pub const LOGIN: &str = "Error al iniciar sesión";
    pub const SESSION: &str = "La sesión ha expirado, inicie sesión nuevamente";
    pub const FETCH_COMPANIES: &str = "Error al cargar las empresas";
    pub const CREATE_COMPANY: &str = "Error al crear la empresa";
    pub const FETCH_PROJECTS: &str = "Error al cargar los proyectos";
    pub const CREATE_PROJECT: &str = "Error al crear el proyecto";
    pub const FETCH_DOCUMENTS: &str = "Error al cargar los documentos";
    pub const UPLOAD_DOCUMENT: &str = "Error al subir el documento";
    pub const RENAME_DOCUMENT: &str = "Error al renombrar el documento";
    pub const PROCESS_DOCUMENTS: &str = "Error al procesar los documentos";
    pub const PROCESS_STATUS: &str = "Error al consultar el estado del procesamiento";
    pub const DOWNLOAD: &str = "Error al descargar el archivo procesado";
    pub const FETCH_USERS: &str = "Error al cargar los usuarios";
    pub const CREATE_USER: &str = "Error al crear el usuario";
    pub const UPDATE_USER: &str = "Error al actualizar el usuario";
    pub const QA_AGENTS: &str = "Error al gestionar los agentes de calidad";
    pub const ASK_AI: &str = "Error al consultar a la IA";
    pub const DASHBOARD: &str = "Error al cargar las estadísticas";
}

/// FastAPI error body: `detail` is either a message or a list of
/// validation entries carrying `msg`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extract the human readable `detail` from an error response body.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .map(str::to_string),
        _ => None,
    }
}

impl SDKError {
    /// Build the error matching an HTTP status and its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => SDKError::AuthError { detail },
            403 => SDKError::Forbidden { detail },
            404 => SDKError::NotFound { detail },
            408 | 504 => SDKError::Timeout(detail.unwrap_or_else(|| format!("HTTP {status}"))),
            _ => SDKError::ApiError { status, detail },
        }
    }

    /// Server supplied detail, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            SDKError::AuthError { detail }
            | SDKError::Forbidden { detail }
            | SDKError::NotFound { detail }
            | SDKError::ApiError { detail, .. } => detail.as_deref(),
            SDKError::Validation(msg) => Some(msg),
            _ => None,
        }
    }

    /// Message for the user: server detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Error
    pub fn is_retryable(&self) -> bool {
        match self {
            SDKError::NetworkError(_) | SDKError::Timeout(_) => true,
            SDKError::ApiError { status, .. } => *status == 429 || *status >= 500,
            SDKError::HttpError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Error
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SDKError::AuthError { .. })
    }

    /// Raised locally, no request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, SDKError::Validation(_))
    }
}
