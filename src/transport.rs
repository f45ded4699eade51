use crate::{MsqErr, ServerTarget, SocketConf};
use log::debug;
use std::{io::ErrorKind, net::UdpSocket};

/// Largest datagram a query reply can occupy.
const MAX_DATAGRAM: usize = 65_535;

/// Datagram channel used by a query session.
///
/// `poll_receive` must never block: it returns `Ok(None)` when nothing has
/// arrived yet.
pub trait Transport {
    fn send(&mut self, bufs: &[u8]) -> Result<(), MsqErr>;

    fn poll_receive(&mut self) -> Result<Option<Vec<u8>>, MsqErr>;
}

/// Non-blocking UDP transport connected to a single server.
///
/// The local socket is bound and connected on first use and kept for the
/// lifetime of the transport. An ICMP port unreachable for a connected
/// socket surfaces as `ConnectionRefused` or `ConnectionReset`; both count
/// as "nothing arrived", so an unanswered query still runs into its timeout.
#[derive(Debug)]
pub struct UdpTransport {
    target: ServerTarget,
    socket_conf: SocketConf,
    socket: Option<UdpSocket>,
    recv_bufs: Vec<u8>,
}

impl UdpTransport {
    pub fn create(target: ServerTarget, socket_conf: SocketConf) -> Self {
        Self {
            target,
            socket_conf,
            socket: None,
            recv_bufs: vec![0u8; MAX_DATAGRAM],
        }
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, bufs: &[u8]) -> Result<(), MsqErr> {
        let sent = bound_socket(&mut self.socket, &self.target, &self.socket_conf)?.send(bufs);

        match sent {
            Ok(_) => Ok(()),
            Err(err) if is_unreachable(err.kind()) => {
                debug!("Dropping send to unreachable {}: {}", self.target, err);
                Ok(())
            }
            Err(err) => Err(MsqErr::IoErr(err)),
        }
    }

    fn poll_receive(&mut self) -> Result<Option<Vec<u8>>, MsqErr> {
        let socket = bound_socket(&mut self.socket, &self.target, &self.socket_conf)?;

        match socket.recv(&mut self.recv_bufs) {
            Ok(len) => Ok(Some(self.recv_bufs[..len].to_vec())),
            Err(err) => match err.kind() {
                ErrorKind::WouldBlock | ErrorKind::Interrupted => Ok(None),
                kind if is_unreachable(kind) => {
                    debug!("{} is unreachable: {}", self.target, err);
                    Ok(None)
                }
                _ => Err(MsqErr::IoErr(err)),
            },
        }
    }
}

fn is_unreachable(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionRefused | ErrorKind::ConnectionReset
    )
}

fn bound_socket<'a>(
    socket: &'a mut Option<UdpSocket>,
    target: &ServerTarget,
    socket_conf: &SocketConf,
) -> Result<&'a UdpSocket, MsqErr> {
    if socket.is_none() {
        *socket = Some(create_udp_socket(target, socket_conf)?);
    }

    match socket.as_ref() {
        Some(socket) => Ok(socket),
        None => Err(MsqErr::DataErr("UDP socket is not bound".into())),
    }
}

fn create_udp_socket(target: &ServerTarget, socket_conf: &SocketConf) -> Result<UdpSocket, MsqErr> {
    let socket = UdpSocket::bind((socket_conf.rep_udp_ipv4, socket_conf.rep_udp_port))?;

    socket.set_write_timeout(socket_conf.write_timeout)?;
    socket.connect(target)?;
    socket.set_nonblocking(true)?;

    debug!(
        "Bound query socket {} for {}",
        socket.local_addr()?,
        target
    );

    Ok(socket)
}
