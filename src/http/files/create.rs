use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// Metadata sent with a new file.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// The name of the file.
    pub name: String,
    /// The IDs of the parent folders the file is created in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    /// The MIME type of the content. When unset the service detects one, and
    /// serves `application/octet-stream` as a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Request message for files.create.
#[derive(Clone, PartialEq, Eq, Default, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// Metadata of the file to create. Sent as the first part of the
    /// multipart body, not as a query parameter.
    #[serde(skip_serializing)]
    pub metadata: FileMetadata,
    /// Whether the request supports both My Drives and shared drives.
    pub supports_all_drives: Option<bool>,
    /// Selector for the fields of the created file to return,
    /// e.g. `id,webViewLink`.
    pub fields: Option<String>,
}

// Drive frames the related parts strictly by the leading `--boundary` lines.
pub(crate) const UPLOAD_BOUNDARY: &str = "gcloud_drive_upload_boundary";

/// https://developers.google.com/drive/api/guides/manage-uploads#multipart
pub(crate) fn build(base_url: &str, client: &Client, req: &CreateFileRequest, content: Vec<u8>) -> RequestBuilder {
    let url = format!("{}/files?uploadType=multipart", base_url);
    let metadata = serde_json::to_vec(&req.metadata).unwrap();
    let content_type = req.metadata.mime_type.as_deref().unwrap_or("application/octet-stream");

    let mut body = Vec::with_capacity(metadata.len() + content.len() + 256);
    body.extend_from_slice(format!("--{UPLOAD_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(&metadata);
    body.extend_from_slice(format!("\r\n--{UPLOAD_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(&content);
    body.extend_from_slice(format!("\r\n--{UPLOAD_BOUNDARY}--").as_bytes());

    client
        .post(url)
        .query(&req)
        .header(
            reqwest::header::CONTENT_TYPE,
            format!("multipart/related; boundary={UPLOAD_BOUNDARY}"),
        )
        .body(body)
}

/// https://developers.google.com/drive/api/guides/manage-uploads#resumable
pub(crate) fn build_resumable_session(base_url: &str, client: &Client, req: &CreateFileRequest) -> RequestBuilder {
    let url = format!("{}/files?uploadType=resumable", base_url);
    client.post(url).query(&req).json(&req.metadata)
}

#[cfg(test)]
mod test {
    use super::{build, build_resumable_session, CreateFileRequest, FileMetadata, UPLOAD_BOUNDARY};
    use reqwest_middleware::ClientWithMiddleware;

    const BASE_URL: &str = "https://www.googleapis.com/upload/drive/v3";

    fn client() -> ClientWithMiddleware {
        reqwest::Client::new().into()
    }

    fn request() -> CreateFileRequest {
        CreateFileRequest {
            metadata: FileMetadata {
                name: "report.docx".to_string(),
                parents: vec!["folder123".to_string()],
                ..Default::default()
            },
            fields: Some("id,webViewLink".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn build_multipart() {
        let req = request();
        let http_request = build(BASE_URL, &client(), &req, b"hello drive".to_vec()).build().unwrap();

        assert_eq!(http_request.method(), reqwest::Method::POST);
        assert_eq!(http_request.url().path(), "/upload/drive/v3/files");
        assert!(http_request.url().query().unwrap().contains("uploadType=multipart"));

        let content_type = http_request.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap();
        assert_eq!(content_type, format!("multipart/related; boundary={UPLOAD_BOUNDARY}"));

        let body = http_request.body().unwrap().as_bytes().unwrap();
        let body = String::from_utf8_lossy(body);
        assert!(body.contains(r#""name":"report.docx""#));
        assert!(body.contains(r#""parents":["folder123"]"#));
        assert!(body.contains("Content-Type: application/octet-stream"));
        assert!(body.contains("hello drive"));
        assert!(body.ends_with(&format!("--{UPLOAD_BOUNDARY}--")));
    }

    #[test]
    fn build_multipart_with_explicit_mime_type() {
        let mut req = request();
        req.metadata.mime_type = Some("text/plain".to_string());
        let http_request = build(BASE_URL, &client(), &req, b"x".to_vec()).build().unwrap();
        let body = http_request.body().unwrap().as_bytes().unwrap();
        let body = String::from_utf8_lossy(body);
        assert!(body.contains("Content-Type: text/plain"));
        assert!(body.contains(r#""mimeType":"text/plain""#));
    }

    #[test]
    fn build_resumable() {
        let req = request();
        let http_request = build_resumable_session(BASE_URL, &client(), &req).build().unwrap();

        assert_eq!(http_request.method(), reqwest::Method::POST);
        assert!(http_request.url().query().unwrap().contains("uploadType=resumable"));

        // the session init only carries the metadata
        let body = http_request.body().unwrap().as_bytes().unwrap();
        let metadata: super::FileMetadata = serde_json::from_slice(body).unwrap();
        assert_eq!(metadata.name, "report.docx");
        assert_eq!(metadata.parents, vec!["folder123".to_string()]);
    }
}
