use thiserror::Error;
use url::Url;

use fetcher_core::Height;

/// Path of the node's block-hash lookup route.
pub const BLOCK_HASH_PATH: &str = "/block-hash";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("host must not be empty")]
    EmptyHost,
    #[error("port must be in 1..=65535, got {0:?}")]
    InvalidPort(String),
    #[error("cannot build url for host {host:?}: {reason}")]
    InvalidUrl { host: String, reason: String },
}

/// Host and port of the node serving `/block-hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    pub fn new(host: &str, port: &str) -> Result<Self, EndpointError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        let port_num = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| EndpointError::InvalidPort(port.to_string()))?;

        let raw = format!("http://{host}:{port_num}{BLOCK_HASH_PATH}");
        let base = Url::parse(&raw).map_err(|err| EndpointError::InvalidUrl {
            host: host.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self { base })
    }

    /// `http://{host}:{port}/block-hash?height={height}`
    pub fn block_hash_url(&self, height: Height) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("height", &height.to_string());
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_block_hash_url() {
        let endpoint = Endpoint::new("localhost", "8080").unwrap();
        assert_eq!(
            endpoint.block_hash_url(12),
            "http://localhost:8080/block-hash?height=12"
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Endpoint::new("  ", "80"), Err(EndpointError::EmptyHost));
        assert_eq!(
            Endpoint::new("localhost", "0"),
            Err(EndpointError::InvalidPort("0".to_string()))
        );
        assert_eq!(
            Endpoint::new("localhost", "out.txt"),
            Err(EndpointError::InvalidPort("out.txt".to_string()))
        );
        assert!(matches!(
            Endpoint::new("bad host", "80"),
            Err(EndpointError::InvalidUrl { .. })
        ));
    }
}
