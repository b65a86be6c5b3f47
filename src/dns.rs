use std::fmt;
use std::time::Duration;

use tracing::debug;
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::Resolver;

use crate::error::{Error, Result};

/// Source of NS records for a hostname.
pub trait NameserverLookup {
    fn lookup_ns(&self, hostname: &str) -> Result<Vec<String>>;
}

/// Blocking resolver built from the system DNS configuration.
pub struct SystemResolver {
    resolver: Resolver,
}

impl SystemResolver {
    /// Fails with a configuration error when the local resolver setup is unusable.
    pub fn new(timeout: Duration) -> Result<Self> {
        let (config, mut opts) = read_system_conf().map_err(setup_error)?;
        opts.timeout = timeout;
        opts.attempts = 1;

        let resolver = Resolver::new(config, opts).map_err(setup_error)?;
        Ok(Self { resolver })
    }
}

fn setup_error(e: impl fmt::Display) -> Error {
    Error::Configuration(format!("could not set up the system resolver: {}", e))
}

impl NameserverLookup for SystemResolver {
    fn lookup_ns(&self, hostname: &str) -> Result<Vec<String>> {
        let lookup = self
            .resolver
            .ns_lookup(hostname)
            .map_err(|source| Error::DnsLookup {
                hostname: hostname.to_string(),
                source,
            })?;

        let hosts: Vec<String> = lookup.iter().map(|ns| ns.to_string()).collect();
        debug!(hostname, nameservers = ?hosts, "resolved NS records");
        Ok(hosts)
    }
}

impl<T: NameserverLookup + ?Sized> NameserverLookup for &T {
    fn lookup_ns(&self, hostname: &str) -> Result<Vec<String>> {
        (**self).lookup_ns(hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_setup_failure_is_configuration_error() {
        let err = setup_error(io::Error::new(
            io::ErrorKind::NotFound,
            "/etc/resolv.conf: no such file",
        ));

        match err {
            Error::Configuration(msg) => assert!(msg.contains("resolv.conf")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
