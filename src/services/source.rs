use crate::models::country::{Country, RestCountry};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Fields requested from `/all`; the upstream rejects unfiltered list requests.
const LIST_FIELDS: &str = "cca3,name,latlng,flags,capital,population,languages,currencies";

const USER_AGENT: &str = concat!("countrysrv/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CountryError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Country not found: {0}")]
    NotFound(String),
}

/// Remote source of country data.
///
/// The only seam that performs network I/O; every call is one request with no
/// retries.
pub trait CountrySource: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Country>, CountryError>> + Send;

    fn fetch_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Country, CountryError>> + Send;
}

/// [`CountrySource`] backed by the REST Countries API.
#[derive(Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestCountriesClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CountryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CountryError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str) -> Result<(StatusCode, Vec<u8>), CountryError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, e))?;

        Ok((status, body.to_vec()))
    }
}

fn transport_error(url: &str, error: reqwest::Error) -> CountryError {
    if error.is_timeout() {
        CountryError::Network(format!("Request to {} timed out", url))
    } else {
        CountryError::Network(format!("Request to {} failed: {}", url, error))
    }
}

fn parse_countries(body: &[u8]) -> Result<Vec<Country>, CountryError> {
    let raw: Vec<RestCountry> = serde_json::from_slice(body)
        .map_err(|e| CountryError::MalformedResponse(e.to_string()))?;

    Ok(raw.into_iter().map(Country::from).collect())
}

impl CountrySource for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>, CountryError> {
        let url = format!("{}/all?fields={}", self.base_url, LIST_FIELDS);
        let (status, body) = self.get(&url).await?;

        if !status.is_success() {
            warn!("Country list request returned HTTP {}", status);
            return Err(CountryError::Network(format!("HTTP {} from {}", status, url)));
        }

        let countries = parse_countries(&body)?;
        info!("Fetched {} countries", countries.len());

        Ok(countries)
    }

    async fn fetch_by_code(&self, code: &str) -> Result<Country, CountryError> {
        let url = format!("{}/alpha/{}", self.base_url, code);
        let (status, body) = self.get(&url).await?;

        // The upstream answers 400 for codes it cannot parse and 404 for unknown ones.
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            return Err(CountryError::NotFound(code.to_string()));
        }

        if !status.is_success() {
            warn!("Lookup of {} returned HTTP {}", code, status);
            return Err(CountryError::Network(format!("HTTP {} from {}", status, url)));
        }

        parse_countries(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| CountryError::NotFound(code.to_string()))
    }
}
