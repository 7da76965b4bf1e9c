use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

/// Request message for files.get.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetFileRequest {
    /// Required. The ID of the file.
    #[serde(skip_serializing)]
    pub file_id: String,
    /// Selector for the fields to return, e.g. `id,name,size`.
    pub fields: Option<String>,
    /// Whether the request supports both My Drives and shared drives.
    pub supports_all_drives: Option<bool>,
    /// Whether to acknowledge the risk of downloading known malware or other
    /// abusive files. Only relevant with `alt=media`.
    pub acknowledge_abuse: Option<bool>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &GetFileRequest) -> RequestBuilder {
    let url = format!("{}/files/{}", base_url, req.file_id.escape());
    client.get(url).query(&req)
}
