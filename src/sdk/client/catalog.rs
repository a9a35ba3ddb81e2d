//! Companies, projects and dashboard

use super::client::ApiClient;
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::types::{Company, DashboardStats, NewCompany, NewProject, Project};

impl ApiClient {
    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        self.get_json(&["companies"]).await
    }

    pub async fn get_company(&self, company_id: &str) -> Result<Company> {
        self.get_json(&["companies", company_id]).await
    }

    pub async fn create_company(&self, company: &NewCompany) -> Result<Company> {
        if company.name.trim().is_empty() {
            return Err(SDKError::Validation(
                "El nombre de la empresa es obligatorio".to_string(),
            ));
        }
        self.post_json(&["companies"], company).await
    }

    /// Projects visible to the current user
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_json(&["projects"]).await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.get_json(&["projects", project_id]).await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
        if project.name.trim().is_empty() || project.company_id.trim().is_empty() {
            return Err(SDKError::Validation(
                "El proyecto necesita nombre y empresa".to_string(),
            ));
        }
        self.post_json(&["projects"], project).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get_json(&["dashboard", "stats"]).await
    }
}
