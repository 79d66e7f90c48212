use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{ApiError, ApiFailure, DocumentStatusPayload, SystemStatsPayload};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Root of the backend. Paths are joined below it, so a deployment under
    /// a subpath needs the trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Read access to the backend's two status endpoints. Implementations report
/// every failure as a typed error; callers decide how much of it to surface.
#[async_trait::async_trait]
pub trait StatusApi: Send + Sync {
    async fn document_status(&self, doc_id: &str) -> Result<DocumentStatusPayload, ApiError>;

    async fn system_stats(&self) -> Result<SystemStatsPayload, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusApi {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl ReqwestStatusApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(ApiFailure::InvalidUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(ApiFailure::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl StatusApi for ReqwestStatusApi {
    async fn document_status(&self, doc_id: &str) -> Result<DocumentStatusPayload, ApiError> {
        let url = self.endpoint(&format!("api/document-status/{doc_id}"))?;
        self.get_json(url).await
    }

    async fn system_stats(&self) -> Result<SystemStatsPayload, ApiError> {
        let url = self.endpoint("api/system-stats")?;
        self.get_json(url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(ApiFailure::Parse, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
