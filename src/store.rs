//! A tolerant facade over [`Client`] for fire-and-forget file storage.
//!
//! Callers that archive artifacts in Drive usually cannot do anything useful
//! with a failed upload besides logging it. `FileStore` encodes that contract:
//! every operation swallows the error, reports it through `tracing`, and
//! returns `None` / `false`.

use crate::client::Client;
#[cfg(feature = "auth")]
use crate::client::{ClientConfig, CredentialsError};
use crate::http::files::create::{CreateFileRequest, FileMetadata};
use crate::http::files::delete::DeleteFileRequest;
use crate::http::files::download::Range;
use crate::http::files::get::GetFileRequest;

const CREATE_FIELDS: &str = "id,name,webViewLink,webContentLink,parents";

#[derive(Clone)]
pub struct FileStore {
    client: Client,
}

impl FileStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a store from the `GOOGLE_CREDENTIALS` environment variable.
    /// Missing or unusable credentials fail here; the storage operations
    /// below never do.
    #[cfg(feature = "auth")]
    pub async fn from_env() -> Result<Self, CredentialsError> {
        let config = ClientConfig::default().with_env_credentials().await?;
        Ok(Self::new(Client::new(config)))
    }

    /// Uploads `content` as `filename` into the folder and returns the file
    /// id and web view link, or `None` on any failure.
    pub async fn upload(&self, content: Vec<u8>, filename: &str, folder_id: &str) -> Option<(String, String)> {
        let req = CreateFileRequest {
            metadata: FileMetadata {
                name: filename.to_string(),
                parents: vec![folder_id.to_string()],
                ..Default::default()
            },
            fields: Some(CREATE_FIELDS.to_string()),
            ..Default::default()
        };
        match self.client.create_file(&req, content).await {
            Ok(file) => {
                tracing::info!(id = %file.id, name = %filename, "uploaded file");
                let link = file.web_view_link.unwrap_or_default();
                Some((file.id, link))
            }
            Err(err) => {
                tracing::error!(name = %filename, error = %err, "upload failed");
                None
            }
        }
    }

    /// Downloads the content of the file, or `None` on any failure.
    pub async fn download(&self, file_id: &str) -> Option<Vec<u8>> {
        let req = GetFileRequest {
            file_id: file_id.to_string(),
            ..Default::default()
        };
        match self.client.download_file(&req, &Range::default()).await {
            Ok(content) => {
                tracing::info!(id = %file_id, size = content.len(), "downloaded file");
                Some(content)
            }
            Err(err) => {
                tracing::error!(id = %file_id, error = %err, "download failed");
                None
            }
        }
    }

    /// Deletes the file. Returns whether the delete went through.
    pub async fn delete(&self, file_id: &str) -> bool {
        let req = DeleteFileRequest {
            file_id: file_id.to_string(),
            ..Default::default()
        };
        match self.client.delete_file(&req).await {
            Ok(()) => {
                tracing::info!(id = %file_id, "deleted file");
                true
            }
            Err(err) => {
                tracing::error!(id = %file_id, error = %err, "delete failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::FileStore;
    use crate::client::{Client, ClientConfig};

    #[ctor::ctor]
    fn init() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    // Nothing listens on port 1, so every request fails before leaving the host.
    fn unreachable_store() -> FileStore {
        let config = ClientConfig {
            drive_endpoint: "http://127.0.0.1:1/drive/v3".to_string(),
            upload_endpoint: "http://127.0.0.1:1/upload/drive/v3".to_string(),
            ..Default::default()
        };
        FileStore::new(Client::new(config))
    }

    #[tokio::test]
    async fn upload_failure_returns_none() {
        let store = unreachable_store();
        let result = store.upload(b"hello".to_vec(), "a.txt", "folder123").await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn download_failure_returns_none() {
        let store = unreachable_store();
        assert_eq!(store.download("1vQ9qGhFbDq0").await, None);
    }

    #[tokio::test]
    async fn delete_failure_returns_false() {
        let store = unreachable_store();
        assert!(!store.delete("1vQ9qGhFbDq0").await);
    }
}
