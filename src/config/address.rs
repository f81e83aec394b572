//! Bind address and server settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use super::ConfigError;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address keyword.
pub const DEFAULT_ADDRESS: &str = "localhost";

/// Where the HTTP server listens.
///
/// - `localhost`: loopback only (`127.0.0.1`)
/// - `any`: all interfaces (`0.0.0.0`)
/// - a dotted-quad IPv4 literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindAddress {
    Localhost,
    Any,
    Ipv4(Ipv4Addr),
}

impl BindAddress {
    /// IP address the listener binds to.
    pub const fn ip(self) -> IpAddr {
        match self {
            Self::Localhost => IpAddr::V4(Ipv4Addr::LOCALHOST),
            Self::Any => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Self::Ipv4(ip) => IpAddr::V4(ip),
        }
    }

    /// Host name written into URLs handed to the browser.
    pub fn host(self) -> String {
        match self {
            Self::Localhost => "localhost".to_string(),
            Self::Any => Ipv4Addr::UNSPECIFIED.to_string(),
            Self::Ipv4(ip) => ip.to_string(),
        }
    }
}

impl FromStr for BindAddress {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "localhost" => Ok(Self::Localhost),
            "any" => Ok(Self::Any),
            _ => s
                .parse::<Ipv4Addr>()
                .map(Self::Ipv4)
                .map_err(|_| ConfigError::InvalidAddress(s.to_string())),
        }
    }
}

/// Validated HTTP server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: BindAddress,
    pub port: u16,
}

impl ServerConfig {
    /// Validate raw CLI values.
    ///
    /// The port arrives as `i64` so that out-of-range input is reported
    /// here instead of as a parse error.
    pub fn parse(address: &str, port: i64) -> Result<Self, ConfigError> {
        let port = u16::try_from(port)
            .ok()
            .filter(|p| *p != 0)
            .ok_or(ConfigError::InvalidPort(port))?;
        let address = address.parse()?;
        Ok(Self { address, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address.ip(), self.port)
    }

    /// Address of the event-stream endpoint as seen from the browser.
    ///
    /// `request_host` is the `Host` header of the page request. When present
    /// it wins, since it is how the browser already reached this server
    /// (`0.0.0.0` is not connectable from another machine).
    pub fn events_url(&self, request_host: Option<&str>) -> String {
        match request_host {
            Some(host) if !host.is_empty() => format!("http://{host}/events"),
            _ => format!("http://{}:{}/events", self.address.host(), self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!("localhost".parse::<BindAddress>().unwrap(), BindAddress::Localhost);
        assert_eq!("any".parse::<BindAddress>().unwrap(), BindAddress::Any);
    }

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(
            "192.168.1.20".parse::<BindAddress>().unwrap(),
            BindAddress::Ipv4(Ipv4Addr::new(192, 168, 1, 20))
        );
    }

    #[test]
    fn test_parse_invalid_address() {
        for input in ["999.1.1.1", "1.2.3", "1.2.3.4.5", "example.com", "::1", ""] {
            let err = input.parse::<BindAddress>().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidAddress(ref s) if s == input),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_any_binds_all_interfaces() {
        assert_eq!(BindAddress::Any.ip(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(BindAddress::Localhost.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_port_range() {
        assert_eq!(ServerConfig::parse("localhost", 1).unwrap().port, 1);
        assert_eq!(ServerConfig::parse("localhost", 65535).unwrap().port, 65535);

        for port in [0, -1, 65536, 99999] {
            let err = ServerConfig::parse("localhost", port).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPort(p) if p == port));
        }
    }

    #[test]
    fn test_port_checked_before_address() {
        let err = ServerConfig::parse("999.1.1.1", 99999).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(99999)));
    }

    #[test]
    fn test_events_url() {
        let config = ServerConfig::parse(DEFAULT_ADDRESS, i64::from(DEFAULT_PORT)).unwrap();
        assert_eq!(config.events_url(None), "http://localhost:8080/events");
        assert_eq!(
            config.events_url(Some("192.168.1.20:8080")),
            "http://192.168.1.20:8080/events"
        );

        let any = ServerConfig::parse("any", 3000).unwrap();
        assert_eq!(any.events_url(None), "http://0.0.0.0:3000/events");
        assert_eq!(any.socket_addr().to_string(), "0.0.0.0:3000");
    }
}
