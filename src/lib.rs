#![allow(clippy::result_large_err)]
//! # gcloud-drive
//!
//! Google Drive file storage client library.
//!
//! * [About Google Drive](https://developers.google.com/drive)
//! * [JSON API Documentation](https://developers.google.com/drive/api/reference/rest/v3)
//!
//! The client is restricted to the `drive.file` scope: it only sees files it
//! created or was handed.
//!
//! ## Quick Start
//!
//! ### Authentication
//! There are two ways to create a client that is authenticated against the google cloud.
//!
//! #### Automatically
//!
//! The function `with_auth()` will try and read the credentials from a file specified in the environment variable
//! `GOOGLE_APPLICATION_CREDENTIALS`, `GOOGLE_APPLICATION_CREDENTIALS_JSON` or from a metadata server.
//!
//! ```
//! use gcloud_drive::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_auth().await.unwrap();
//!     let client = Client::new(config);
//! }
//! ```
//!
//! #### From a single environment variable
//!
//! `with_env_credentials()` reads the whole service account JSON from
//! `GOOGLE_CREDENTIALS`. A missing variable is a configuration error and fails
//! before any request is made.
//!
//! ```
//! use gcloud_drive::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_env_credentials().await.unwrap();
//!     let client = Client::new(config);
//! }
//! ```
//!
//! ### Usage
//!
//! ```
//! use gcloud_drive::client::Client;
//! use gcloud_drive::http::files::create::{CreateFileRequest, FileMetadata};
//! use gcloud_drive::http::files::delete::DeleteFileRequest;
//! use gcloud_drive::http::files::download::Range;
//! use gcloud_drive::http::files::get::GetFileRequest;
//! use gcloud_drive::http::Error;
//!
//! async fn run(client: Client) -> Result<(), Error> {
//!     // Upload the file into a folder.
//!     let uploaded = client
//!         .create_file(
//!             &CreateFileRequest {
//!                 metadata: FileMetadata {
//!                     name: "report.docx".to_string(),
//!                     parents: vec!["folder-id".to_string()],
//!                     ..Default::default()
//!                 },
//!                 fields: Some("id,webViewLink".to_string()),
//!                 ..Default::default()
//!             },
//!             "hello world".as_bytes().to_vec(),
//!         )
//!         .await?;
//!
//!     // Download the content back.
//!     let data = client
//!         .download_file(
//!             &GetFileRequest {
//!                 file_id: uploaded.id.clone(),
//!                 ..Default::default()
//!             },
//!             &Range::default(),
//!         )
//!         .await?;
//!
//!     // Delete the file.
//!     client
//!         .delete_file(&DeleteFileRequest {
//!             file_id: uploaded.id,
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Tolerant helper
//!
//! [`store::FileStore`] wraps the client with the catch-everything contract of
//! a background job: failures are logged and turned into `None` / `false`
//! instead of propagating.

pub mod client;
pub mod http;
pub mod store;
