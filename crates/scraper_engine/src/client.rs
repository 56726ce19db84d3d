use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use scraper_core::DataRow;
use serde::Serialize;

use crate::{FailureKind, RequestError};

/// Message shown when the scrape endpoint answers with a failure status.
pub const SCRAPE_STATUS_MESSAGE: &str = "Failed to fetch data from webhook";
/// Message shown when the dispatch endpoint answers with a failure status.
pub const DISPATCH_STATUS_MESSAGE: &str = "Failed to send email";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub scrape_url: String,
    pub dispatch_url: String,
    pub connect_timeout: Duration,
    /// Applies to dispatch only; scrape jobs may run arbitrarily long.
    pub dispatch_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            scrape_url: "http://localhost:5678/webhook/scrape".to_string(),
            dispatch_url: "http://localhost:5678/webhook/dispatch".to_string(),
            connect_timeout: Duration::from_secs(10),
            dispatch_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    #[serde(rename = "Industry")]
    industry: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
}

#[derive(Debug, Serialize)]
struct DispatchRequest<'a> {
    data: &'a [DataRow],
}

/// Triggers a scrape job and returns the raw response body.
#[async_trait::async_trait]
pub trait ScrapeClient: Send + Sync {
    async fn scrape(
        &self,
        industry: &str,
        location: &str,
    ) -> Result<serde_json::Value, RequestError>;
}

/// Forwards a result set to the notification pipeline.
#[async_trait::async_trait]
pub trait DispatchClient: Send + Sync {
    async fn dispatch(&self, rows: &[DataRow]) -> Result<(), RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScrapeClient {
    url: String,
    client: reqwest::Client,
}

impl ReqwestScrapeClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, RequestError> {
        Ok(Self {
            url: settings.scrape_url.clone(),
            client: build_client(settings.connect_timeout)?,
        })
    }
}

#[async_trait::async_trait]
impl ScrapeClient for ReqwestScrapeClient {
    async fn scrape(
        &self,
        industry: &str,
        location: &str,
    ) -> Result<serde_json::Value, RequestError> {
        let url = parse_url(&self.url)?;
        engine_info!("Scrape request industry={} location={}", industry, location);

        let response = self
            .client
            .post(url)
            .json(&ScrapeRequest { industry, location })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            engine_warn!("Scrape endpoint returned {}", status);
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                SCRAPE_STATUS_MESSAGE,
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        engine_debug!("Scrape response {} bytes", body.len());
        serde_json::from_slice(&body)
            .map_err(|err| RequestError::new(FailureKind::Decode, err.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestDispatchClient {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ReqwestDispatchClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, RequestError> {
        Ok(Self {
            url: settings.dispatch_url.clone(),
            timeout: settings.dispatch_timeout,
            client: build_client(settings.connect_timeout)?,
        })
    }
}

#[async_trait::async_trait]
impl DispatchClient for ReqwestDispatchClient {
    async fn dispatch(&self, rows: &[DataRow]) -> Result<(), RequestError> {
        let url = parse_url(&self.url)?;
        engine_info!("Dispatching {} rows", rows.len());

        let response = self
            .client
            .post(url)
            .json(&DispatchRequest { data: rows })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            engine_warn!("Dispatch endpoint returned {}", status);
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                DISPATCH_STATUS_MESSAGE,
            ));
        }
        Ok(())
    }
}

fn build_client(connect_timeout: Duration) -> Result<reqwest::Client, RequestError> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))
}

fn parse_url(raw: &str) -> Result<reqwest::Url, RequestError> {
    reqwest::Url::parse(raw).map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
