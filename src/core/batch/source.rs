//! Where the reconciler reloads documents from

use crate::sdk::errors::Result;
use crate::sdk::types::Document;
use async_trait::async_trait;

/// Lists the documents of a project
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn list_documents(&self, project_id: &str) -> Result<Vec<Document>>;
}
