use std::fmt;

use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE};
use reqwest::{Body, Response};
use reqwest_middleware::ClientWithMiddleware;

use crate::http::{check_response_status, files::DriveFile, Error};

#[derive(thiserror::Error, Debug)]
pub enum ChunkError {
    #[error("invalid range: first={0} last={1}")]
    InvalidRange(u64, u64),
    #[error("total object size must not be zero")]
    ZeroTotalObjectSize,
    #[error("last byte must be less than total object size: last={0} total={1}")]
    InvalidLastBytes(u64, u64),
}

#[derive(PartialEq, Debug)]
pub enum UploadStatus {
    Ok(DriveFile),
    ResumeIncomplete,
}

#[derive(Clone, Debug)]
pub struct ChunkSize {
    first_byte: u64,
    last_byte: u64,
    total_object_size: Option<u64>,
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.first_byte == self.last_byte {
            write!(f, "bytes */")?;
        } else {
            write!(f, "bytes {}-{}/", self.first_byte, self.last_byte)?;
        }

        match self.total_object_size {
            Some(total_object_size) => write!(f, "{total_object_size}"),
            None => write!(f, "*"),
        }
    }
}

impl ChunkSize {
    /// `first_byte` and `last_byte` are inclusive offsets. Equal offsets
    /// denote an empty chunk, used for status probes.
    pub fn new(first_byte: u64, last_byte: u64, total_object_size: Option<u64>) -> Result<ChunkSize, ChunkError> {
        if first_byte > last_byte {
            return Err(ChunkError::InvalidRange(first_byte, last_byte));
        }
        if let Some(total) = total_object_size {
            if total == 0 {
                return Err(ChunkError::ZeroTotalObjectSize);
            }
            if first_byte != last_byte && last_byte >= total {
                return Err(ChunkError::InvalidLastBytes(last_byte, total));
            }
        }
        Ok(Self {
            first_byte,
            last_byte,
            total_object_size,
        })
    }

    pub fn size(&self) -> u64 {
        if self.first_byte == self.last_byte {
            0
        } else {
            self.last_byte - self.first_byte + 1
        }
    }
}

/// Uploads content against a session URI handed out by
/// [`prepare_resumable_upload`](crate::http::drive_client::DriveClient::prepare_resumable_upload).
#[derive(Clone)]
pub struct ResumableUploadClient {
    session_url: String,
    http: ClientWithMiddleware,
}

impl ResumableUploadClient {
    pub fn new(session_url: String, http: ClientWithMiddleware) -> Self {
        Self { session_url, http }
    }

    pub fn url(&self) -> &str {
        self.session_url.as_str()
    }

    /// https://developers.google.com/drive/api/guides/manage-uploads#uploading
    pub async fn upload_single_chunk<T: Into<Body>>(&self, data: T, size: usize) -> Result<DriveFile, Error> {
        let response = self
            .http
            .put(&self.session_url)
            .header(CONTENT_LENGTH, size)
            .body(data)
            .send()
            .await?;
        let response = check_response_status(response).await?;
        Ok(response.json().await?)
    }

    /// https://developers.google.com/drive/api/guides/manage-uploads#chunked
    pub async fn upload_multiple_chunk<T: Into<Body>>(&self, data: T, size: &ChunkSize) -> Result<UploadStatus, Error> {
        let response = self
            .http
            .put(&self.session_url)
            .header(CONTENT_RANGE, size.to_string())
            .header(CONTENT_LENGTH, size.size())
            .body(data)
            .send()
            .await?;
        Self::map_resume_response(response).await
    }

    /// https://developers.google.com/drive/api/guides/manage-uploads#resume-upload
    pub async fn status(&self, object_size: Option<u64>) -> Result<UploadStatus, Error> {
        let probe = ChunkSize {
            first_byte: 0,
            last_byte: 0,
            total_object_size: object_size,
        };
        self.upload_multiple_chunk("", &probe).await
    }

    /// Cancels the session. The service answers 499 for a cancelled session.
    pub async fn cancel(self) -> Result<(), Error> {
        let response = self
            .http
            .delete(&self.session_url)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;
        if response.status() == 499 {
            Ok(())
        } else {
            check_response_status(response).await?;
            Ok(())
        }
    }

    async fn map_resume_response(response: Response) -> Result<UploadStatus, Error> {
        if response.status() == 308 {
            Ok(UploadStatus::ResumeIncomplete)
        } else {
            let response = check_response_status(response).await?;
            Ok(UploadStatus::Ok(response.json::<DriveFile>().await?))
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ChunkError, ChunkSize};

    #[test]
    fn chunk_size_content_range() {
        let chunk = ChunkSize::new(0, 1999, Some(4000)).unwrap();
        assert_eq!(chunk.to_string(), "bytes 0-1999/4000");
        assert_eq!(chunk.size(), 2000);

        let chunk = ChunkSize::new(2000, 3999, None).unwrap();
        assert_eq!(chunk.to_string(), "bytes 2000-3999/*");
    }

    #[test]
    fn chunk_size_status_probe() {
        let probe = ChunkSize::new(0, 0, Some(4000)).unwrap();
        assert_eq!(probe.to_string(), "bytes */4000");
        assert_eq!(probe.size(), 0);
    }

    #[test]
    fn chunk_size_rejects_reversed_range() {
        assert!(matches!(
            ChunkSize::new(10, 5, None),
            Err(ChunkError::InvalidRange(10, 5))
        ));
    }

    #[test]
    fn chunk_size_rejects_overflowing_last_byte() {
        assert!(matches!(
            ChunkSize::new(0, 4000, Some(4000)),
            Err(ChunkError::InvalidLastBytes(4000, 4000))
        ));
        assert!(matches!(ChunkSize::new(0, 1, Some(0)), Err(ChunkError::ZeroTotalObjectSize)));
    }
}
