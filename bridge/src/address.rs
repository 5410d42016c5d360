//! Listening address reported by a dev server once its socket is bound.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Address family of a structured listening address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
    /// A DNS name such as `localhost`; rendered like IPv4 (no brackets).
    Hostname,
}

/// Where a dev server ended up listening.
///
/// Only `Structured` addresses can be turned into a URL. Anything the OS
/// reports in another form (a Unix socket path, a named pipe) is `Opaque`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddress {
    Structured { family: AddressFamily, address: String, port: u16 },
    Opaque(String),
}

impl ListenAddress {
    #[must_use]
    pub fn structured(family: AddressFamily, address: impl Into<String>, port: u16) -> Self {
        Self::Structured { family, address: address.into(), port }
    }

    #[must_use]
    pub fn opaque(value: impl Into<String>) -> Self {
        Self::Opaque(value.into())
    }

    /// HTTP URL a backend can reach the dev server at.
    ///
    /// IPv6 addresses are bracketed, IPv4 and host names are not. `Opaque`
    /// addresses have no URL form.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        match self {
            Self::Structured { family: AddressFamily::Ipv6, address, port } => {
                Some(format!("http://[{address}]:{port}"))
            }
            Self::Structured { address, port, .. } => Some(format!("http://{address}:{port}")),
            Self::Opaque(_) => None,
        }
    }
}

impl From<SocketAddr> for ListenAddress {
    fn from(addr: SocketAddr) -> Self {
        let family = match addr.ip() {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        };
        Self::structured(family, addr.ip().to_string(), addr.port())
    }
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.url()) {
            (_, Some(url)) => f.write_str(&url),
            (Self::Opaque(value), None) => f.write_str(value),
            (Self::Structured { .. }, None) => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
