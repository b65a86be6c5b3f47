//! Identify the CDN in front of a hostname from its NS records and
//! HTTP(S) response headers.

pub mod config;
pub mod detector;
pub mod dns;
pub mod error;
pub mod http;
pub mod signatures;

pub use config::Config;
pub use detector::{match_headers, match_nameservers, CdnDetector, Outcome};
pub use dns::{NameserverLookup, SystemResolver};
pub use error::{Error, Result};
pub use http::{HeaderFetch, HeaderSnapshot, MinreqFetcher};
pub use signatures::{HeaderSignatures, NameserverSignatures, SignatureTable};

/// Loads both signature tables, then scans `hostname` with the system
/// resolver and a blocking HTTP client.
pub fn run_cdn_scan(config: &Config, hostname: &str) -> Result<Outcome> {
    if hostname.trim().is_empty() {
        return Err(Error::Configuration("hostname flag is empty".to_string()));
    }

    let (nameservers, headers) = config.load_signatures()?;

    let resolver = SystemResolver::new(config.timeout)?;
    let fetcher = MinreqFetcher::new(config.timeout);

    CdnDetector::new(resolver, fetcher, nameservers, headers).detect(hostname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hostname_checked_before_config() {
        let config = Config {
            ns_records: "does/not/exist.json".into(),
            ..Config::default()
        };

        match run_cdn_scan(&config, "") {
            Err(Error::Configuration(msg)) => assert!(msg.contains("hostname")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_bad_config_fails_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            ns_records: dir.path().join("ns_records.json"),
            header_keys: dir.path().join("header_keys.json"),
            ..Config::default()
        };
        std::fs::write(&config.ns_records, "[]").unwrap();

        assert!(matches!(
            run_cdn_scan(&config, "example.com"),
            Err(Error::Configuration(_))
        ));
    }
}
