//! CDN detection.
//!
//! The scan runs in a fixed order and stops at the first hit:
//! nameserver signatures, then HTTPS response headers, then plain HTTP
//! response headers. Lookup and request failures end the scan.

use std::fmt;

use tracing::{debug, info};

use crate::dns::NameserverLookup;
use crate::error::{Error, Result};
use crate::http::{HeaderFetch, HeaderSnapshot};
use crate::signatures::{HeaderSignatures, NameserverSignatures};

/// Separator for the joined nameserver list. Never valid inside a hostname.
const NS_SEPARATOR: &str = "::";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(String),
    NotFound,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found(provider) => f.write_str(provider),
            Outcome::NotFound => f.write_str("not found"),
        }
    }
}

pub struct CdnDetector<D, H> {
    resolver: D,
    fetcher: H,
    nameservers: NameserverSignatures,
    headers: HeaderSignatures,
}

impl<D: NameserverLookup, H: HeaderFetch> CdnDetector<D, H> {
    pub fn new(
        resolver: D,
        fetcher: H,
        nameservers: NameserverSignatures,
        headers: HeaderSignatures,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            nameservers,
            headers,
        }
    }

    pub fn detect(&self, hostname: &str) -> Result<Outcome> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(Error::Configuration("hostname is empty".to_string()));
        }

        let nameservers = self.resolver.lookup_ns(hostname)?;
        if let Some(provider) = match_nameservers(&nameservers, &self.nameservers) {
            info!(hostname, provider, "matched nameserver signature");
            return Ok(Outcome::Found(provider.to_string()));
        }
        debug!(hostname, "no nameserver match, checking response headers");

        for scheme in ["https", "http"] {
            let url = format!("{}://{}", scheme, hostname);
            let headers = self.fetcher.fetch_headers(&url)?;
            if let Some(provider) = match_headers(&headers, &self.headers) {
                info!(url = %url, provider = %provider, "matched response header");
                return Ok(Outcome::Found(provider));
            }
            debug!(url = %url, "no header match");
        }

        info!(hostname, "no CDN provider matched");
        Ok(Outcome::NotFound)
    }
}

/// Returns the first provider whose pattern occurs in the joined nameserver list.
pub fn match_nameservers<'a>(
    nameservers: &[String],
    signatures: &'a NameserverSignatures,
) -> Option<&'a str> {
    if nameservers.is_empty() {
        return None;
    }
    signatures.find(&nameservers.join(NS_SEPARATOR))
}

/// A non-empty `server` header wins outright and is reported uppercased.
/// Otherwise the first configured key present with a value names the provider.
pub fn match_headers(headers: &HeaderSnapshot, signatures: &HeaderSignatures) -> Option<String> {
    if let Some(server) = headers.get("server").filter(|v| !v.is_empty()) {
        return Some(server.to_uppercase());
    }

    signatures
        .iter()
        .find(|(_, keys)| {
            keys.iter()
                .any(|key| headers.get(key).map_or(false, |v| !v.is_empty()))
        })
        .map(|(provider, _)| provider.to_string())
}
