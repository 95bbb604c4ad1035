//! Remote fetch collaborator.
//!
//! The pipeline only sees the `Fetcher` trait; `CurlFetcher` is the libcurl
//! implementation used by the CLI. Every call is a single GET with a static
//! User-Agent. There is no retry: callers log failures and move on.

mod http;

pub use http::CurlFetcher;

use thiserror::Error;

/// Failure of a single GET (stylesheet or asset).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, timeout, TLS...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// Stylesheet body was not valid UTF-8.
    #[error("response from {url} is not valid UTF-8")]
    Utf8 {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Text and binary GETs needed by the asset pipeline.
pub trait Fetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_text(url)
    }

    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch_binary(url)
    }
}

/// Decodes a stylesheet body, keeping the URL for the error message.
pub(crate) fn decode_text(url: &str, body: Vec<u8>) -> Result<String, FetchError> {
    String::from_utf8(body).map_err(|source| FetchError::Utf8 {
        url: url.to_string(),
        source,
    })
}
