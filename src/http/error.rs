use std::error::Error;
use std::fmt;

/// An error response returned from the Google Drive API.
///
/// See the [`Resolve errors`][1] documentation for more details.
///
/// [1]: https://developers.google.com/drive/api/guides/handle-errors
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// An HTTP status value, without the textual description.
    ///
    /// Example values include: `400` (Bad Request), `401` (Unauthorized), and `404` (Not Found).
    pub code: u16,

    /// A container for the error details. Not every error carries one.
    pub errors: Option<Vec<ErrorResponseItem>>,

    /// Description of the error. Same as `errors.message`.
    pub message: String,
}

impl ErrorResponse {
    /// Returns `true` if the error is worth retrying according to the
    /// [error guide][1].
    ///
    /// [1]: https://developers.google.com/drive/api/guides/handle-errors
    pub fn is_retriable(&self) -> bool {
        matches!(self.code, 408 | 429 | 500..=599)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl Error for ErrorResponse {}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseItem {
    /// The scope of the error. Example values include: `global` and `usageLimits`.
    pub domain: Option<String>,

    /// The specific item within the `locationType` that caused the error. For example, if you
    /// specify an invalid value for a parameter, the `location` will be the name of the parameter.
    pub location: Option<String>,

    /// The location or part of the request that caused the error. Use with `location` to pinpoint
    /// the error.
    ///
    /// Example values include `header` and `parameter`.
    pub location_type: Option<String>,

    /// Description of the error.
    pub message: String,

    /// Example values include `notFound`, `rateLimitExceeded`, and `userRateLimitExceeded`.
    pub reason: Option<String>,
}

impl fmt::Display for ErrorResponseItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.message.fmt(f)
    }
}

/// The Drive error response JSON format contains an extra object level that is inconvenient to
/// include in our error.
#[derive(serde::Deserialize)]
pub(crate) struct ErrorWrapper {
    pub(crate) error: ErrorResponse,
}

#[cfg(test)]
mod test {
    use super::ErrorWrapper;

    #[test]
    fn deserialize_not_found() {
        let body = r#"{
            "error": {
                "errors": [{
                    "domain": "global",
                    "reason": "notFound",
                    "message": "File not found: abc123",
                    "locationType": "parameter",
                    "location": "fileId"
                }],
                "code": 404,
                "message": "File not found: abc123"
            }
        }"#;
        let wrapper: ErrorWrapper = serde_json::from_str(body).unwrap();
        let error = wrapper.error;
        assert_eq!(error.code, 404);
        assert_eq!(error.message, "File not found: abc123");
        let items = error.errors.as_ref().unwrap();
        assert_eq!(items[0].reason.as_deref(), Some("notFound"));
        assert!(!error.is_retriable());
    }

    #[test]
    fn deserialize_without_error_items() {
        let body = r#"{"error": {"code": 500, "message": "Internal Error"}}"#;
        let wrapper: ErrorWrapper = serde_json::from_str(body).unwrap();
        assert!(wrapper.error.is_retriable());
    }

    #[test]
    fn rate_limit_is_retriable() {
        let body = r#"{
            "error": {
                "errors": [{"domain": "usageLimits", "reason": "userRateLimitExceeded", "message": "Rate limit exceeded"}],
                "code": 429,
                "message": "Rate limit exceeded"
            }
        }"#;
        let wrapper: ErrorWrapper = serde_json::from_str(body).unwrap();
        assert!(wrapper.error.is_retriable());
    }
}
