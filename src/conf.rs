use crate::{query::QuerySession, MsqErr, StatusRecord};
use std::{
    net::{Ipv4Addr, SocketAddr, ToSocketAddrs},
    time::Duration,
};

/// Default port of the query listener (`query.port` in `server.properties`).
pub const DEFAULT_QUERY_PORT: u16 = 25565;

/// The queried server. Immutable once a session has been created from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTarget {
    /// Server IP address or a domain name.
    pub host: String,
    /// Server query port.
    pub port: u16,
}

/// Socket and wait-loop configuration for a [QuerySession].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConf {
    /// How long each stage waits for a reply. The default value is 5000ms.
    pub timeout: Duration,
    /// Pause between two empty polls of the socket.
    pub poll_interval: Duration,
    /// Set the write timeout for socket.
    pub write_timeout: Option<Duration>,
    /// Specify the local address for the UDP socket.
    /// The default value is [Ipv4Addr::UNSPECIFIED].
    pub rep_udp_ipv4: Ipv4Addr,
    /// Specify the local port for the UDP socket.
    /// The default value is 0, letting the OS pick an ephemeral port.
    pub rep_udp_port: u16,
}

impl Default for SocketConf {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            poll_interval: Duration::from_millis(10),
            write_timeout: None,
            rep_udp_ipv4: Ipv4Addr::UNSPECIFIED,
            rep_udp_port: 0,
        }
    }
}

impl ToSocketAddrs for ServerTarget {
    type Iter = std::vec::IntoIter<SocketAddr>;

    fn to_socket_addrs(&self) -> std::io::Result<Self::Iter> {
        (&*self.host, self.port).to_socket_addrs()
    }
}

impl std::fmt::Display for ServerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl ServerTarget {
    /// Create a target using the default query port.
    ///
    /// # Examples
    ///
    /// ```
    /// # use msq::ServerTarget;
    /// #
    /// let target = ServerTarget::create("www.example.com");
    /// #
    /// # assert_eq!(target.host, "www.example.com");
    /// # assert_eq!(target.port, 25565);
    /// ```
    pub fn create(host: &str) -> Self {
        Self {
            host: host.trim().into(),
            port: DEFAULT_QUERY_PORT,
        }
    }

    /// Create a target using the specified port.
    ///
    /// # Example
    ///
    /// ```
    /// # use msq::ServerTarget;
    /// #
    /// let target = ServerTarget::create_with_port("www.example.com", 25575);
    /// #
    /// # assert_eq!(target.port, 25575);
    /// ```
    pub fn create_with_port(host: &str, port: u16) -> Self {
        Self {
            host: host.trim().into(),
            port,
        }
    }

    /// Create a target from a `host:port` string.
    ///
    /// If the string does not split into exactly two parts, or the port
    /// cannot be converted to [u16], a [MsqErr::DataErr] is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use msq::{ServerTarget, MsqErr};
    /// #
    /// # fn main() -> Result<(), MsqErr> {
    ///     let target = ServerTarget::create_from_str("www.example.com:25565")?;
    /// #
    /// #   assert_eq!(target.host, "www.example.com");
    /// #   assert_eq!(target.port, 25565);
    /// #
    /// #   assert!(ServerTarget::create_from_str("25565").is_err());
    /// #   assert!(ServerTarget::create_from_str("www.example.com:-1").is_err());
    /// #   Ok(())
    /// # }
    /// ```
    pub fn create_from_str(addr: &str) -> Result<Self, MsqErr> {
        let addr_split = addr.split(':').map(|x| x.trim()).collect::<Vec<_>>();

        if addr_split.len() != 2 || addr_split[0].is_empty() {
            return Err(MsqErr::DataErr(format!(
                "Invalid IPv4 socket address syntax: {}",
                addr
            )));
        }

        match addr_split[1].parse::<u16>() {
            Ok(port) => Ok(Self::create_with_port(addr_split[0], port)),
            Err(_) => Err(MsqErr::DataErr(format!("Invalid port: {}", addr_split[1]))),
        }
    }

    /// Run one full stat [Query](https://wiki.vg/Query) against this server
    /// with the default [SocketConf].
    ///
    /// To use this protocol, the server needs `enable-query=true` in its
    /// `server.properties`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use msq::{MsqErr, ServerTarget};
    ///
    /// fn main() -> Result<(), MsqErr> {
    ///     let target = ServerTarget::create_with_port("www.example.com", 25565);
    ///     let status = target.query_full()?;
    ///
    ///     println!("{}", status);
    ///     Ok(())
    /// }
    /// ```
    pub fn query_full(&self) -> Result<StatusRecord, MsqErr> {
        let mut session = QuerySession::create(self.clone());

        Ok(session.query()?.clone())
    }
}
