use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Somewhere raw METAR text can be fetched from.
#[async_trait]
pub trait MetarSource: Send + Sync {
    async fn fetch(&self, icao: &str) -> Result<String, FetchError>;
}

// checks that an airport code is 4 letters, case doesn't matter
pub fn validate_icao_code(icao: &str) -> bool {
    icao.len() == 4 && icao.chars().all(|c| c.is_ascii_alphabetic())
}

// fetches raw metar data from the aviation weather api
pub struct AviationWeatherClient {
    http: reqwest::Client,
    api_url: String,
}

impl AviationWeatherClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }
}

#[async_trait]
impl MetarSource for AviationWeatherClient {
    async fn fetch(&self, icao: &str) -> Result<String, FetchError> {
        if !validate_icao_code(icao) {
            return Err(FetchError::InvalidCode(icao.to_string()));
        }
        let icao = icao.to_uppercase();

        debug!(station = %icao, url = %self.api_url, "requesting METAR");

        let response = self
            .http
            .get(&self.api_url)
            .query(&[("ids", icao.as_str()), ("format", "raw")])
            .send()
            .await
            .map_err(|e| classify_request_error(e, &icao))?;

        let status = response.status();
        if !status.is_success() {
            warn!(station = %icao, status = status.as_u16(), "provider returned an error");
            return Err(FetchError::Http(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_request_error(e, &icao))?;

        first_report(&text).ok_or(FetchError::NoData(icao))
    }
}

// the provider can return several observations, one per line, newest first
fn first_report(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

fn classify_request_error(err: reqwest::Error, icao: &str) -> FetchError {
    warn!(station = %icao, error = %err, "METAR request failed");
    if err.is_timeout() {
        FetchError::Timeout(icao.to_string())
    } else if err.is_connect() {
        FetchError::Connection
    } else if let Some(status) = err.status() {
        FetchError::Http(status.as_u16())
    } else {
        FetchError::Request(err.to_string())
    }
}
