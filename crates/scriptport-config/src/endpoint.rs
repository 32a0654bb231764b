//! TCP endpoint description for the command socket.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::{DEFAULT_PORT, default_host};

/// Address and port the command socket binds to.
///
/// The wire protocol is plain TCP; there is no Unix-socket or TLS transport.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TcpEndpoint {
    /// Host name or address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl TcpEndpoint {
    /// Builds an endpoint from a host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for TcpEndpoint {
    fn default() -> Self {
        Self::new(default_host(), DEFAULT_PORT)
    }
}

impl fmt::Display for TcpEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.host, self.port)
    }
}

impl FromStr for TcpEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (host, port) = input
            .rsplit_once(':')
            .ok_or_else(|| EndpointParseError::MissingPort(input.to_string()))?;
        if host.is_empty() {
            return Err(EndpointParseError::MissingHost(input.to_string()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| EndpointParseError::InvalidPort(port.to_string()))?;
        Ok(Self::new(host, port))
    }
}

/// Errors encountered while parsing a [`TcpEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// No `:port` suffix was present.
    #[error("missing port in endpoint '{0}'")]
    MissingPort(String),
    /// The host part was empty.
    #[error("missing host in endpoint '{0}'")]
    MissingHost(String),
    /// The port part was not a valid number.
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn display_round_trips_default() {
        let endpoint = TcpEndpoint::default();
        assert_eq!(endpoint.to_string(), "127.0.0.1:12288");
    }

    #[test]
    fn parses_host_and_port() {
        let endpoint: TcpEndpoint = "0.0.0.0:9000".parse().expect("parse endpoint");
        assert_eq!(endpoint, TcpEndpoint::new("0.0.0.0", 9000));
    }

    #[rstest]
    #[case::no_port("localhost")]
    #[case::empty_host(":9000")]
    #[case::bad_port("localhost:port")]
    fn rejects_malformed_endpoints(#[case] input: &str) {
        assert!(input.parse::<TcpEndpoint>().is_err());
    }
}
