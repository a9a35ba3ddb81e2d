//! Launching server jobs and reading their status

use super::client::ApiClient;
use crate::core::batch::DocumentChange;
use crate::core::task::Task;
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::types::TaskAccepted;
use reqwest::Method;
use reqwest::multipart::Form;
use std::collections::BTreeMap;
use tracing::info;

impl ApiClient {
    /// Submit the full pending rename/reorder state of a project
    pub async fn process_rename_reorder(
        &self,
        project_id: &str,
        changes: &BTreeMap<String, DocumentChange>,
    ) -> Result<TaskAccepted> {
        let form = Form::new()
            .text("document_changes", serde_json::to_string(changes)?)
            .text("project_id", project_id.to_string());

        let url = self.endpoint(&[
            "projects",
            project_id,
            "documents",
            "process-rename-reorder",
        ])?;
        let accepted: TaskAccepted = self
            .send(self.request(Method::POST, url).multipart(form))
            .await?;

        info!(
            "Submitted {} document changes for project {} (task {:?})",
            changes.len(),
            project_id,
            accepted.task_id
        );
        Ok(accepted)
    }

    /// Process a project with free-text semantic instructions
    pub async fn process_reorder(&self, project_id: &str, instructions: &str) -> Result<TaskAccepted> {
        self.post_instructions(
            &["projects", project_id, "documents", "process-reorder"],
            instructions,
        )
        .await
    }

    /// Start a semantic reorder, tracked through [`ApiClient::reorder_status`]
    pub async fn start_reorder(&self, project_id: &str, instructions: &str) -> Result<TaskAccepted> {
        self.post_instructions(&["projects", project_id, "documents", "reorder"], instructions)
            .await
    }

    /// Current state of a rename/reorder task.
    ///
    /// Sent once with no retry; a failed status read ends the poll.
    pub async fn process_status(&self, project_id: &str, task_id: &str) -> Result<Task> {
        self.get_json_once(&["projects", project_id, "process-status", task_id])
            .await
    }

    /// Current state of a semantic reorder task, sent once like
    /// [`ApiClient::process_status`]
    pub async fn reorder_status(&self, project_id: &str, task_id: &str) -> Result<Task> {
        self.get_json_once(&["projects", project_id, "reorder-status", task_id])
            .await
    }

    async fn post_instructions(&self, segments: &[&str], instructions: &str) -> Result<TaskAccepted> {
        let instructions = instructions.trim();
        if instructions.is_empty() {
            return Err(SDKError::Validation(
                "Ingrese instrucciones para el procesamiento".to_string(),
            ));
        }

        let url = self.endpoint(segments)?;
        self.send(
            self.request(Method::POST, url)
                .form(&[("semantic_instructions", instructions)]),
        )
        .await
    }
}
