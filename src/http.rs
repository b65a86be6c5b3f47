use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

/// Response headers from a single exchange. Names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSnapshot {
    headers: HashMap<String, String>,
}

impl HeaderSnapshot {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for HeaderSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let headers = iter
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
            .collect();
        Self { headers }
    }
}

/// Performs a GET and hands back the response headers.
pub trait HeaderFetch {
    fn fetch_headers(&self, url: &str) -> Result<HeaderSnapshot>;
}

impl<T: HeaderFetch + ?Sized> HeaderFetch for &T {
    fn fetch_headers(&self, url: &str) -> Result<HeaderSnapshot> {
        (**self).fetch_headers(url)
    }
}

pub struct MinreqFetcher {
    timeout: Duration,
}

impl MinreqFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl HeaderFetch for MinreqFetcher {
    /// Returns once the status line and headers are in. The body is never read.
    fn fetch_headers(&self, url: &str) -> Result<HeaderSnapshot> {
        let response = minreq::get(url)
            .with_timeout(self.timeout.as_secs().max(1))
            .send_lazy()
            .map_err(|source| Error::HttpRequest {
                url: url.to_string(),
                source,
            })?;

        debug!(
            url,
            status = response.status_code,
            headers = response.headers.len(),
            "received response"
        );
        Ok(response
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect())
    }
}
