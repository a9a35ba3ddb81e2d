//! Document listing, upload, rename and download

use super::client::ApiClient;
use crate::core::batch::DocumentSource;
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::types::Document;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

impl ApiClient {
    pub async fn list_documents(&self, project_id: &str) -> Result<Vec<Document>> {
        self.get_json(&["projects", project_id, "documents"]).await
    }

    /// Upload a PDF into a project
    pub async fn upload_document(&self, project_id: &str, path: &Path) -> Result<Document> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SDKError::Validation(format!("Ruta inválida: {}", path.display())))?
            .to_string();

        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(SDKError::Validation(
                "Solo se admiten archivos PDF".to_string(),
            ));
        }

        let content = tokio::fs::read(path).await?;
        debug!("Uploading {} ({} bytes)", file_name, content.len());

        let part = Part::bytes(content)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let url = self.endpoint(&["projects", project_id, "documents", "upload"])?;
        self.send(self.request(Method::POST, url).multipart(form)).await
    }

    /// Rename a single document right away
    pub async fn rename_document(&self, document_id: &str, new_name: &str) -> Result<Document> {
        if new_name.trim().is_empty() {
            return Err(SDKError::Validation(
                "El nombre no puede estar vacío".to_string(),
            ));
        }
        let url = self.endpoint(&["documents", document_id, "rename"])?;
        self.send(
            self.request(Method::PUT, url)
                .form(&[("new_name", new_name.trim())]),
        )
        .await
    }

    /// Fetch a server artifact into memory
    pub async fn download(&self, locator: &str) -> Result<Vec<u8>> {
        let url = self.resolve(locator)?;
        let response = self.execute(self.request(Method::GET, url)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Stream a server artifact into `dest`. Returns the bytes written.
    pub async fn download_to(&self, locator: &str, dest: &Path) -> Result<u64> {
        let url = self.resolve(locator)?;
        let response = self.execute(self.request(Method::GET, url)).await?;

        write_stream(response.bytes_stream(), dest).await
    }
}

/// Write `chunks` into a new file at `dest`. Returns the bytes written.
/// On failure the partial file is removed.
pub(super) async fn write_stream<S, B, E>(chunks: S, dest: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    SDKError: From<E>,
{
    let mut file = tokio::fs::File::create(dest).await?;
    let copied = async {
        let mut written = 0u64;
        let mut chunks = std::pin::pin!(chunks);
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            file.write_all(chunk.as_ref()).await?;
            written += chunk.as_ref().len() as u64;
        }
        file.flush().await?;
        Ok::<_, SDKError>(written)
    }
    .await;

    match copied {
        Ok(written) => {
            info!("Downloaded {} bytes to {}", written, dest.display());
            Ok(written)
        }
        Err(e) => {
            warn!("Download to {} interrupted: {}", dest.display(), e);
            drop(file);
            if let Err(remove) = tokio::fs::remove_file(dest).await {
                debug!("Could not remove partial {}: {}", dest.display(), remove);
            }
            Err(e)
        }
    }
}

#[async_trait]
impl DocumentSource for ApiClient {
    async fn list_documents(&self, project_id: &str) -> Result<Vec<Document>> {
        ApiClient::list_documents(self, project_id).await
    }
}
