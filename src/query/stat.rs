use super::{
    packet::{build_stat_packet, expect_type, PacketType},
    send_packet, wait_for_reply, SessionToken,
};
use crate::{timeout::TimeoutGuard, transport::Transport, MsqErr, SocketConf};
use log::debug;

/// Send the full stat request and wait for a reply starting with `0x00`.
///
/// The returned datagram still carries the type byte and session ID echo.
pub(crate) fn run_stat_request<T: Transport>(
    transport: &mut T,
    guard: &mut TimeoutGuard,
    socket_conf: &SocketConf,
    token: &SessionToken,
) -> Result<Vec<u8>, MsqErr> {
    debug!("Sending full stat request with token {}", token.text);
    send_packet(transport, &build_stat_packet(token.value))?;

    let bufs = wait_for_reply(transport, guard, socket_conf, PacketType::Stat)?;
    expect_type(&bufs, PacketType::Stat)?;

    debug!("Received full stat reply, {} bytes", bufs.len());

    Ok(bufs)
}
