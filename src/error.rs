use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("could not lookup NS records for {hostname}: {source}")]
    DnsLookup {
        hostname: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("could not GET {url}: {source}")]
    HttpRequest {
        url: String,
        #[source]
        source: minreq::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
