use std::ops::Deref;

use reqwest_middleware::ClientWithMiddleware;
use token_source::TokenSourceProvider;

use crate::http::drive_client::DriveClient;

/// The environment variable holding the whole service account JSON.
pub const CREDENTIALS_ENV: &str = "GOOGLE_CREDENTIALS";

#[derive(Debug)]
pub struct ClientConfig {
    pub http: Option<ClientWithMiddleware>,
    pub drive_endpoint: String,
    pub upload_endpoint: String,
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    pub project_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            drive_endpoint: "https://www.googleapis.com/drive/v3".to_string(),
            upload_endpoint: "https://www.googleapis.com/upload/drive/v3".to_string(),
            token_source_provider: None,
            project_id: None,
        }
    }
}

impl ClientConfig {
    pub fn anonymous(mut self) -> Self {
        self.token_source_provider = None;
        self
    }
}

#[cfg(feature = "auth")]
pub use google_cloud_auth;

/// Failure to turn configuration into a credential.
#[cfg(feature = "auth")]
#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("environment variable GOOGLE_CREDENTIALS is not set")]
    MissingEnv,
    #[error(transparent)]
    Auth(#[from] google_cloud_auth::error::Error),
}

#[cfg(feature = "auth")]
impl ClientConfig {
    pub async fn with_auth(self) -> Result<Self, google_cloud_auth::error::Error> {
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new(Self::auth_config()).await?;
        Ok(self.with_token_source(ts).await)
    }

    pub async fn with_credentials(
        self,
        credentials: google_cloud_auth::credentials::CredentialsFile,
    ) -> Result<Self, google_cloud_auth::error::Error> {
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new_with_credentials(
            Self::auth_config(),
            Box::new(credentials),
        )
        .await?;
        Ok(self.with_token_source(ts).await)
    }

    /// Reads the service account JSON from the `GOOGLE_CREDENTIALS`
    /// environment variable. An unset variable fails here, before any
    /// request leaves the process.
    pub async fn with_env_credentials(self) -> Result<Self, CredentialsError> {
        let json = std::env::var(CREDENTIALS_ENV).map_err(|_| CredentialsError::MissingEnv)?;
        let credentials = google_cloud_auth::credentials::CredentialsFile::new_from_str(&json).await?;
        Ok(self.with_credentials(credentials).await?)
    }

    async fn with_token_source(mut self, ts: google_cloud_auth::token::DefaultTokenSourceProvider) -> Self {
        match &ts.source_credentials {
            // Credential file is used.
            Some(cred) => {
                self.project_id = cred.project_id.clone();
            }
            // On Google Cloud
            None => {
                self.project_id = Some(google_cloud_metadata::project_id().await);
            }
        }
        self.token_source_provider = Some(Box::new(ts));
        self
    }

    fn auth_config() -> google_cloud_auth::project::Config<'static> {
        google_cloud_auth::project::Config::default().with_scopes(&crate::http::drive_client::SCOPES)
    }
}

#[derive(Clone)]
pub struct Client {
    drive_client: DriveClient,
}

impl Deref for Client {
    type Target = DriveClient;

    fn deref(&self) -> &Self::Target {
        &self.drive_client
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Client {
    /// New client
    pub fn new(config: ClientConfig) -> Self {
        let ts = match config.token_source_provider {
            Some(tsp) => Some(tsp.token_source()),
            None => {
                tracing::trace!("Use anonymous access due to lack of token");
                None
            }
        };
        let http = config.http.unwrap_or_else(|| reqwest::Client::default().into());
        let drive_client = DriveClient::new(
            ts,
            config.drive_endpoint.as_str(),
            config.upload_endpoint.as_str(),
            http,
        );
        Self { drive_client }
    }
}

#[cfg(test)]
mod test {
    use serial_test::serial;

    use super::{ClientConfig, CredentialsError, CREDENTIALS_ENV};

    #[ctor::ctor]
    fn init() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    #[tokio::test]
    #[serial]
    async fn missing_credentials_env_fails_without_io() {
        std::env::remove_var(CREDENTIALS_ENV);
        let result = ClientConfig::default().with_env_credentials().await;
        assert!(matches!(result, Err(CredentialsError::MissingEnv)));
    }

    #[tokio::test]
    #[serial]
    async fn malformed_credentials_env_fails() {
        std::env::set_var(CREDENTIALS_ENV, "{ not json");
        let result = ClientConfig::default().with_env_credentials().await;
        assert!(matches!(result, Err(CredentialsError::Auth(_))));
        std::env::remove_var(CREDENTIALS_ENV);
    }
}
