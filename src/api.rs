//! Synchronous client for the **REST Countries API (v3.1)**.
//!
//! This module covers the `all` and `region/{name}` endpoints and returns results
//! as validated `models::RawCountry` records. There is no pagination upstream; one
//! GET returns the whole region.
//!
//! ### Notes
//! - Every request carries a `fields=` projection so only the columns the crate reads
//!   are transferred.
//! - Failures are never retried. A non-2xx status, a transport error, an undecodable
//!   body or a body that is not a JSON array all surface as a single `FetchError`.
//! - Network timeouts use a sane default (30s) and can be adjusted with
//!   [`Client::with_timeout`].
//!
//! Typical usage:
//! ```no_run
//! # use world_ranks::{Client, DataSource, Region};
//! let client = Client::default();
//! let raw = client.fetch_region(Region::Europe)?;
//! # Ok::<(), world_ranks::FetchError>(())
//! ```

use crate::error::FetchError;
use crate::models::{RawCountry, Region};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Public endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Columns requested from the API; must cover every field `RawCountry` reads.
pub const FIELDS: &str = "name,population,area,independent,unMember,flags,region,ccn3,cca3";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce the raw dataset for a region.
///
/// `Client` is the HTTP implementation; tests and embedders can supply their own.
pub trait DataSource: Send + Sync {
    fn fetch_region(&self, region: Region) -> Result<Vec<RawCountry>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn build_http(timeout: Duration) -> HttpClient {
    HttpClient::builder()
        .timeout(timeout) // total request timeout
        .connect_timeout(Duration::from_secs(10)) // connect timeout
        .redirect(Policy::limited(5)) // cap redirects
        .user_agent(concat!("world_ranks/", env!("CARGO_PKG_VERSION"))) // set user agent
        .build()
        .expect("reqwest client build")
}

impl Client {
    /// Client for a custom base URL (e.g. a mirror or a local test server).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Same as [`Client::new`] with an explicit total request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: build_http(timeout),
        }
    }

    /// Full request URL for a region, including the field projection.
    ///
    /// ```
    /// # use world_ranks::{Client, Region};
    /// let c = Client::new("http://localhost:8080/v3.1/");
    /// assert_eq!(
    ///     c.endpoint(Region::Europe),
    ///     format!("http://localhost:8080/v3.1/region/europe?fields={}", world_ranks::api::FIELDS)
    /// );
    /// ```
    pub fn endpoint(&self, region: Region) -> String {
        format!(
            "{}/{}?fields={}",
            self.base_url.trim_end_matches('/'),
            region.to_path(),
            FIELDS
        )
    }
}

impl DataSource for Client {
    fn fetch_region(&self, region: Region) -> Result<Vec<RawCountry>, FetchError> {
        let url = self.endpoint(region);
        log::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let v = resp
            .json::<Value>()
            .map_err(|e| FetchError::Decode(format!("GET {}: {}", url, e)))?;
        let countries = parse_countries(v)?;
        log::debug!("{} countries received for {}", countries.len(), region);
        Ok(countries)
    }
}

/// Validate a decoded response body into typed records.
///
/// The body must be a JSON array; each element must match `RawCountry`.
pub fn parse_countries(v: Value) -> Result<Vec<RawCountry>, FetchError> {
    let arr = match v {
        Value::Array(arr) => arr,
        other => {
            return Err(FetchError::Shape(format!(
                "expected a top-level array, got {}",
                kind_of(&other)
            )));
        }
    };

    arr.into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<RawCountry>(item)
                .map_err(|e| FetchError::Shape(format!("record {}: {}", i, e)))
        })
        .collect()
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
