//! QA agents and the document assistant

use super::client::ApiClient;
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::types::{AskAiRequest, AskAiResponse, NewQaAgent, QaAgent, TaskAccepted};
use reqwest::Method;

impl ApiClient {
    pub async fn list_qa_agents(&self) -> Result<Vec<QaAgent>> {
        self.get_json(&["qa-agents"]).await
    }

    pub async fn create_qa_agent(&self, agent: &NewQaAgent) -> Result<QaAgent> {
        if agent.name.trim().is_empty() || agent.qa_instructions.trim().is_empty() {
            return Err(SDKError::Validation(
                "El agente necesita nombre e instrucciones".to_string(),
            ));
        }
        if !agent.is_universal && agent.project_ids.is_empty() {
            return Err(SDKError::Validation(
                "Seleccione al menos un proyecto o marque el agente como universal".to_string(),
            ));
        }
        self.post_json(&["qa-agents"], agent).await
    }

    pub async fn run_qa_agent(&self, agent_id: &str) -> Result<TaskAccepted> {
        let url = self.endpoint(&["qa-agents", agent_id, "run"])?;
        self.send(self.request(Method::POST, url)).await
    }

    /// Ask a question about the extracted data of a project
    pub async fn ask_ai(
        &self,
        project_id: &str,
        question: &str,
        include_context: bool,
    ) -> Result<AskAiResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SDKError::Validation("Escriba una pregunta".to_string()));
        }
        let request = AskAiRequest {
            question: question.to_string(),
            include_context,
        };
        self.post_json(&["projects", project_id, "ask-ai"], &request)
            .await
    }
}
