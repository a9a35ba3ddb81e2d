//! Task types

use serde::{Deserialize, Serialize};

/// Status reported for a server task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Queued, not started
    Pending,
    /// Running
    Processing,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Anything else the server reports; treated as still running
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// `completed` and `failed` are the only terminal states
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// One long-running server-side job as seen by a status poll
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(default)]
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Task {
    /// Fresh task right after the server accepted a job
    pub fn pending(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: TaskStatus::Pending,
            progress: None,
            download_url: None,
            result: None,
            error: None,
            message: None,
        }
    }

    /// Synthetic failed task, used when polling itself fails or times out
    pub fn failed(task_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Failed,
            error: Some(error.into()),
            ..Self::pending(task_id)
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == TaskStatus::Failed
    }

    /// Progress clamped to 0..=100, 0 when unknown
    pub fn percent(&self) -> u32 {
        self.progress.unwrap_or(0).min(100)
    }
}
