mod decoder;
mod handshake;
mod packet;
mod stat;
mod status;

use crate::{
    timeout::TimeoutGuard,
    transport::{Transport, UdpTransport},
    MsqErr, ServerTarget, SocketConf,
};
use decoder::decode_full_stat;
pub use handshake::{parse_handshake_reply, SessionToken};
use handshake::run_handshake;
use log::{debug, trace, warn};
pub use packet::{build_handshake_packet, build_stat_packet, decode_token, encode_token};
use packet::{hex_dump, PacketType};
use stat::run_stat_request;
pub use status::{ModPlugin, StatusRecord, UNKNOWN};

/// Where the most recent [QuerySession::query] call got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Handshaking,
    RequestingStats,
    Decoding,
    Succeeded,
    Failed,
}

/// A full stat query session against one server.
///
/// Holds the last successfully decoded [StatusRecord]. A failed query never
/// touches it.
pub struct QuerySession<T: Transport = UdpTransport> {
    target: ServerTarget,
    socket_conf: SocketConf,
    transport: T,
    guard: TimeoutGuard,
    status: StatusRecord,
    state: QueryState,
}

impl QuerySession<UdpTransport> {
    /// Create a session over UDP using the default [SocketConf].
    ///
    /// No socket is opened until the first [QuerySession::query].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use msq::{MsqErr, QuerySession, ServerTarget};
    ///
    /// fn main() -> Result<(), MsqErr> {
    ///     let mut session = QuerySession::create(ServerTarget::create("www.example.com"));
    ///
    ///     session.query()?;
    ///     println!("{} / {} online", session.online_players(), session.max_players());
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn create(target: ServerTarget) -> Self {
        Self::create_with_conf(target, SocketConf::default())
    }

    pub fn create_with_conf(target: ServerTarget, socket_conf: SocketConf) -> Self {
        let transport = UdpTransport::create(target.clone(), socket_conf.clone());

        Self::with_transport(target, socket_conf, transport)
    }
}

impl<T: Transport> QuerySession<T> {
    /// Create a session that talks through a custom [Transport].
    pub fn with_transport(target: ServerTarget, socket_conf: SocketConf, transport: T) -> Self {
        Self {
            guard: TimeoutGuard::create(socket_conf.timeout),
            target,
            socket_conf,
            transport,
            status: StatusRecord::default(),
            state: QueryState::Idle,
        }
    }

    /// Run handshake, full stat request and decode.
    ///
    /// Every call performs a fresh handshake. On success the new status
    /// replaces the stored one; on any error the stored status is kept.
    pub fn query(&mut self) -> Result<&StatusRecord, MsqErr> {
        match self.run_query() {
            Ok(status) => {
                self.status = status;
                self.state = QueryState::Succeeded;
                debug!("Query of {} succeeded", self.target);

                Ok(&self.status)
            }
            Err(err) => {
                warn!(
                    "Query of {} failed while {:?}: {}",
                    self.target, self.state, err
                );
                self.state = QueryState::Failed;

                Err(err)
            }
        }
    }

    fn run_query(&mut self) -> Result<StatusRecord, MsqErr> {
        self.state = QueryState::Handshaking;
        let token = run_handshake(&mut self.transport, &mut self.guard, &self.socket_conf)?;

        self.state = QueryState::RequestingStats;
        let bufs = run_stat_request(
            &mut self.transport,
            &mut self.guard,
            &self.socket_conf,
            &token,
        )?;

        self.state = QueryState::Decoding;
        decode_full_stat(&bufs)
    }

    pub fn target(&self) -> &ServerTarget {
        &self.target
    }

    pub fn socket_conf(&self) -> &SocketConf {
        &self.socket_conf
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn status(&self) -> &StatusRecord {
        &self.status
    }

    pub fn motd(&self) -> &str {
        self.status.motd()
    }

    pub fn game_type(&self) -> &str {
        self.status.game_type()
    }

    pub fn game_id(&self) -> &str {
        self.status.game_id()
    }

    pub fn version(&self) -> &str {
        self.status.version()
    }

    pub fn plugins(&self) -> &str {
        self.status.plugins()
    }

    pub fn map(&self) -> &str {
        self.status.map()
    }

    pub fn online_players(&self) -> i32 {
        self.status.online_players()
    }

    pub fn max_players(&self) -> i32 {
        self.status.max_players()
    }

    pub fn host_port(&self) -> i32 {
        self.status.host_port()
    }

    pub fn host_ip(&self) -> &str {
        self.status.host_ip()
    }

    pub fn players(&self) -> &str {
        self.status.players()
    }
}

fn send_packet<T: Transport>(transport: &mut T, packet: &[u8]) -> Result<(), MsqErr> {
    trace!("-> {}", hex_dump(packet));

    transport.send(packet)
}

/// Throw away datagrams left over from an earlier query, such as a stat
/// reply that arrived after its timeout.
fn discard_stale<T: Transport>(transport: &mut T) -> Result<(), MsqErr> {
    while let Some(bufs) = transport.poll_receive()? {
        trace!("Discarding stale {}", hex_dump(&bufs));
    }

    Ok(())
}

/// Poll the transport until a datagram arrives or the guard expires.
fn wait_for_reply<T: Transport>(
    transport: &mut T,
    guard: &mut TimeoutGuard,
    socket_conf: &SocketConf,
    stage: PacketType,
) -> Result<Vec<u8>, MsqErr> {
    guard.reset();

    loop {
        if guard.expired() {
            return Err(MsqErr::TimeoutErr(format!(
                "No {:?} reply within {}ms",
                stage,
                guard.timeout().as_millis()
            )));
        }

        if let Some(bufs) = transport.poll_receive()? {
            trace!("<- {}", hex_dump(&bufs));

            return Ok(bufs);
        }

        std::thread::sleep(socket_conf.poll_interval);
    }
}
