use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::files::DriveFile;

/// Request message for files.list.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesRequest {
    /// A query for filtering the results, e.g.
    /// `'folder-id' in parents and trashed=false`.
    /// See [Search for files](https://developers.google.com/drive/api/guides/search-files).
    pub q: Option<String>,
    /// The maximum number of files to return per page. The service may return
    /// fewer, so the presence of `next_page_token` should always be checked.
    pub page_size: Option<i32>,
    /// The token of the page to return, from a previous response.
    pub page_token: Option<String>,
    /// A comma-separated list of sort keys, e.g. `modifiedTime desc,name`.
    pub order_by: Option<String>,
    /// Selector for the fields to return, e.g. `nextPageToken,files(id,name)`.
    pub fields: Option<String>,
    /// Whether the request supports both My Drives and shared drives.
    pub supports_all_drives: Option<bool>,
    /// Whether items from shared drives should be included in the results.
    pub include_items_from_all_drives: Option<bool>,
}

/// The result of a call to files.list.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponse {
    /// The page of files. May be empty.
    pub files: Option<Vec<DriveFile>>,
    /// The continuation token. Provide this value in a subsequent request to
    /// return the next page.
    pub next_page_token: Option<String>,
    /// Whether the search was complete. When `true`, some results may be
    /// missing because not all corpora were searched.
    pub incomplete_search: Option<bool>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListFilesRequest) -> RequestBuilder {
    let url = format!("{}/files", base_url);
    client.get(url).query(&req)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::{build, ListFilesRequest, ListFilesResponse};
    use reqwest_middleware::ClientWithMiddleware;

    #[test]
    fn build_list_query() {
        let client: ClientWithMiddleware = reqwest::Client::new().into();
        let req = ListFilesRequest {
            q: Some("trashed=false".to_string()),
            page_size: Some(100),
            order_by: Some("name".to_string()),
            ..Default::default()
        };
        let http_request = build("https://www.googleapis.com/drive/v3", &client, &req).build().unwrap();
        assert_eq!(http_request.url().path(), "/drive/v3/files");

        let pairs: HashMap<String, String> = http_request.url().query_pairs().into_owned().collect();
        assert_eq!(pairs["q"], "trashed=false");
        assert_eq!(pairs["pageSize"], "100");
        assert_eq!(pairs["orderBy"], "name");
        assert!(!pairs.contains_key("pageToken"));
    }

    #[test]
    fn deserialize_page() {
        let body = r#"{
            "kind": "drive#fileList",
            "incompleteSearch": false,
            "nextPageToken": "token-1",
            "files": [
                {"id": "a1", "name": "one.txt", "mimeType": "text/plain"},
                {"id": "b2", "name": "two.txt", "mimeType": "text/plain"}
            ]
        }"#;
        let page: ListFilesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("token-1"));
        assert_eq!(page.files.as_ref().unwrap().len(), 2);
        assert_eq!(page.files.unwrap()[1].id, "b2");
    }
}
