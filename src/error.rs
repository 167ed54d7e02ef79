use thiserror::Error;

/// The single failure kind of the pipeline: the dataset could not be fetched.
///
/// Variants record why the fetch failed; callers can treat them alike.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed: network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetch failed: GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("fetch failed: could not decode response: {0}")]
    Decode(String),
    #[error("fetch failed: unexpected response shape: {0}")]
    Shape(String),
    #[error("fetch failed: request aborted: {0}")]
    Aborted(String),
}

