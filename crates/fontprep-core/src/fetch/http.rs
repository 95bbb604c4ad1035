//! libcurl-backed single GET.

use std::time::Duration;

use super::{decode_text, FetchError, Fetcher};
use crate::config::FetchConfig;

/// Blocking fetcher: one curl easy handle per request.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(user_agent: impl Into<String>, connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            connect_timeout,
            timeout,
        }
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self::new(
            cfg.user_agent.clone(),
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                url: url.to_string(),
                status,
            });
        }
        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

impl Fetcher for CurlFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get(url)?;
        decode_text(url, body)
    }

    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_configured_values() {
        let cfg = FetchConfig {
            user_agent: "fontprep-test/1.0".to_string(),
            connect_timeout_secs: 3,
            timeout_secs: 9,
            ..FetchConfig::default()
        };
        let f = CurlFetcher::from_config(&cfg);
        assert_eq!(f.user_agent, "fontprep-test/1.0");
        assert_eq!(f.connect_timeout, Duration::from_secs(3));
        assert_eq!(f.timeout, Duration::from_secs(9));
    }

    #[test]
    fn unreachable_host_is_a_curl_error() {
        // Port 9 on localhost is almost never listening; connection is refused immediately.
        let f = CurlFetcher::new("t", Duration::from_secs(2), Duration::from_secs(5));
        let err = f.fetch_binary("http://127.0.0.1:9/x.woff2").unwrap_err();
        assert!(matches!(err, FetchError::Curl(_)));
    }
}
