use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

/// Request message for files.delete.
///
/// Deleting skips the trash; the file is permanently removed, together with
/// any descendants the credential owns.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileRequest {
    /// Required. The ID of the file.
    #[serde(skip_serializing)]
    pub file_id: String,
    /// Whether the request supports both My Drives and shared drives.
    pub supports_all_drives: Option<bool>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &DeleteFileRequest) -> RequestBuilder {
    let url = format!("{}/files/{}", base_url, req.file_id.escape());
    client.delete(url).query(&req)
}
