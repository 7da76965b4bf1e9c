use std::sync::Arc;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use token_source::TokenSource;

use crate::http::files::create::CreateFileRequest;
use crate::http::files::delete::DeleteFileRequest;
use crate::http::files::download::Range;
use crate::http::files::get::GetFileRequest;
use crate::http::files::list::{ListFilesRequest, ListFilesResponse};
use crate::http::files::DriveFile;
use crate::http::resumable_upload_client::ResumableUploadClient;
use crate::http::{check_response_status, files, Error};

/// Only files created or opened by the app are visible through this scope.
pub const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/drive.file"];

#[derive(Clone)]
pub struct DriveClient {
    ts: Option<Arc<dyn TokenSource>>,
    v3_endpoint: String,
    v3_upload_endpoint: String,
    http: ClientWithMiddleware,
}

impl DriveClient {
    pub(crate) fn new(
        ts: Option<Arc<dyn TokenSource>>,
        endpoint: &str,
        upload_endpoint: &str,
        http: ClientWithMiddleware,
    ) -> Self {
        Self {
            ts,
            v3_endpoint: endpoint.to_string(),
            v3_upload_endpoint: upload_endpoint.to_string(),
            http,
        }
    }

    /// Uploads the content in a single multipart request and returns the
    /// created file, with the fields selected by `req.fields` filled in.
    ///
    /// ```
    /// use gcloud_drive::client::Client;
    /// use gcloud_drive::http::files::create::{CreateFileRequest, FileMetadata};
    ///
    /// async fn run(client: Client) {
    ///     let request = CreateFileRequest {
    ///         metadata: FileMetadata {
    ///             name: "report.docx".to_string(),
    ///             parents: vec!["folder-id".to_string()],
    ///             ..Default::default()
    ///         },
    ///         fields: Some("id,webViewLink".to_string()),
    ///         ..Default::default()
    ///     };
    ///     let file = client.create_file(&request, vec![0u8; 100]).await.unwrap();
    ///     println!("uploaded {} -> {:?}", file.id, file.web_view_link);
    /// }
    /// ```
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create_file(&self, req: &CreateFileRequest, content: Vec<u8>) -> Result<DriveFile, Error> {
        let builder = files::create::build(self.v3_upload_endpoint.as_str(), &self.http, req, content);
        self.send(builder).await
    }

    /// Starts a resumable upload session and returns a client bound to the
    /// session URI. Content is then sent in one or more chunks.
    ///
    /// ```
    /// use gcloud_drive::client::Client;
    /// use gcloud_drive::http::files::create::{CreateFileRequest, FileMetadata};
    /// use gcloud_drive::http::resumable_upload_client::ChunkSize;
    ///
    /// async fn run(client: Client, data: Vec<u8>) {
    ///     let request = CreateFileRequest {
    ///         metadata: FileMetadata {
    ///             name: "big.bin".to_string(),
    ///             ..Default::default()
    ///         },
    ///         ..Default::default()
    ///     };
    ///     let session = client.prepare_resumable_upload(&request).await.unwrap();
    ///     let size = data.len();
    ///     let file = session.upload_single_chunk(data, size).await.unwrap();
    ///     println!("uploaded {}", file.id);
    /// }
    /// ```
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn prepare_resumable_upload(&self, req: &CreateFileRequest) -> Result<ResumableUploadClient, Error> {
        let builder = files::create::build_resumable_session(self.v3_upload_endpoint.as_str(), &self.http, req);
        let builder = self.with_headers(builder).await?;
        let response = builder.send().await?;
        let response = check_response_status(response).await?;
        let session_url = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .ok_or_else(|| Error::InvalidResumableSession("missing location header".to_string()))?;
        Ok(ResumableUploadClient::new(session_url, self.http.clone()))
    }

    /// Gets the file metadata.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_file(&self, req: &GetFileRequest) -> Result<DriveFile, Error> {
        let builder = files::get::build(self.v3_endpoint.as_str(), &self.http, req);
        self.send(builder).await
    }

    /// Downloads the file content.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn download_file(&self, req: &GetFileRequest, range: &Range) -> Result<Vec<u8>, Error> {
        let builder = files::download::build(self.v3_endpoint.as_str(), &self.http, req, range);
        let builder = self.with_headers(builder).await?;
        let response = builder.send().await?;
        let response = check_response_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Downloads the file content as a byte stream.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn download_streamed_file(
        &self,
        req: &GetFileRequest,
        range: &Range,
    ) -> Result<impl Stream<Item = Result<Bytes, Error>>, Error> {
        let builder = files::download::build(self.v3_endpoint.as_str(), &self.http, req, range);
        let builder = self.with_headers(builder).await?;
        let response = builder.send().await?;
        let response = check_response_status(response).await?;
        Ok(response.bytes_stream().map_err(Error::HttpClient))
    }

    /// Permanently deletes the file, bypassing the trash.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_file(&self, req: &DeleteFileRequest) -> Result<(), Error> {
        let builder = files::delete::build(self.v3_endpoint.as_str(), &self.http, req);
        self.send_get_empty(builder).await
    }

    /// Lists files matching the query.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_files(&self, req: &ListFilesRequest) -> Result<ListFilesResponse, Error> {
        let builder = files::list::build(self.v3_endpoint.as_str(), &self.http, req);
        self.send(builder).await
    }

    async fn with_headers(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let builder = builder
            .header("X-Goog-Api-Client", "rust")
            .header(reqwest::header::USER_AGENT, "gcloud-drive");
        match &self.ts {
            Some(ts) => {
                let token = ts.token().await.map_err(Error::TokenSource)?;
                Ok(builder.header(reqwest::header::AUTHORIZATION, token))
            }
            None => Ok(builder),
        }
    }

    async fn send<T: for<'de> serde::Deserialize<'de>>(&self, builder: RequestBuilder) -> Result<T, Error> {
        let builder = self.with_headers(builder).await?;
        let response = builder.send().await?;
        let response = check_response_status(response).await?;
        Ok(response.json().await?)
    }

    async fn send_get_empty(&self, builder: RequestBuilder) -> Result<(), Error> {
        let builder = self.with_headers(builder).await?;
        let response = builder.send().await?;
        check_response_status(response).await?;
        Ok(())
    }
}
