use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::signatures::{HeaderSignatures, NameserverSignatures};

pub const DEFAULT_NS_RECORDS: &str = "resources/ns_records.json";
pub const DEFAULT_HEADER_KEYS: &str = "resources/header_keys.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ns_records: PathBuf,
    pub header_keys: PathBuf,
    /// Applied to each HTTP request and each DNS query.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ns_records: PathBuf::from(DEFAULT_NS_RECORDS),
            header_keys: PathBuf::from(DEFAULT_HEADER_KEYS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads and validates both signature tables.
    pub fn load_signatures(&self) -> Result<(NameserverSignatures, HeaderSignatures)> {
        let nameservers = NameserverSignatures::load(&self.ns_records)?;
        let headers = HeaderSignatures::load(&self.header_keys)?;
        debug!(
            ns_records = %self.ns_records.display(),
            header_keys = %self.header_keys.display(),
            "signature tables loaded"
        );
        Ok((nameservers, headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    #[test]
    fn test_load_signatures() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            ns_records: dir.path().join("ns.json"),
            header_keys: dir.path().join("headers.json"),
            ..Config::default()
        };
        fs::write(&config.ns_records, r#"{"Cloudflare": ["cloudflare.com"]}"#).unwrap();
        fs::write(&config.header_keys, r#"{"Fastly": ["x-served-by"]}"#).unwrap();

        let (nameservers, headers) = config.load_signatures().unwrap();
        assert_eq!(nameservers.find("ns1.cloudflare.com"), Some("Cloudflare"));
        assert_eq!(headers.iter().count(), 1);
    }

    #[test]
    fn test_missing_header_keys_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            ns_records: dir.path().join("ns.json"),
            header_keys: dir.path().join("missing.json"),
            ..Config::default()
        };
        fs::write(&config.ns_records, "{}").unwrap();

        assert!(matches!(
            config.load_signatures(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_bundled_tables_load() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let config = Config {
            ns_records: root.join(DEFAULT_NS_RECORDS),
            header_keys: root.join(DEFAULT_HEADER_KEYS),
            ..Config::default()
        };

        let (nameservers, headers) = config.load_signatures().unwrap();
        assert_eq!(
            nameservers.find("ns-1234.awsdns-26.org.::ns-99.awsdns-12.com."),
            Some("Amazon CloudFront")
        );
        assert!(headers.iter().any(|(provider, _)| provider == "Fastly"));
    }

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert_eq!(config.ns_records, PathBuf::from("resources/ns_records.json"));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
