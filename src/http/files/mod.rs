use time::OffsetDateTime;

pub mod create;
pub mod delete;
pub mod download;
pub mod get;
pub mod list;

/// A file stored in Google Drive.
///
/// Which fields the service fills in depends on the `fields` selector of the
/// request; everything but `id` may be absent.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// The ID of the file, assigned by the service.
    pub id: String,
    /// The name of the file. Not necessarily unique within a folder.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// The MIME type of the file. Folders use `application/vnd.google-apps.folder`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mime_type: String,
    /// The IDs of the parent folders containing the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
    /// A link for opening the file in a relevant Google editor or viewer in a browser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    /// A link for downloading the content of the file in a browser.
    /// Only present for files with binary content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_content_link: Option<String>,
    /// Size in bytes. String-encoded on the wire; absent for folders and
    /// Google Docs formats.
    #[serde(
        default,
        deserialize_with = "crate::http::from_str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<i64>,
    /// The MD5 checksum for the content of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5_checksum: Option<String>,
    /// The time at which the file was created.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<OffsetDateTime>,
    /// The last time the file was modified by anyone.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<OffsetDateTime>,
    /// Whether the file has been trashed. Trashed files are still listed
    /// unless a query filters them out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trashed: Option<bool>,
}
