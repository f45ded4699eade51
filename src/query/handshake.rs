use super::{
    packet::{build_handshake_packet, expect_type, PacketType},
    discard_stale, send_packet, wait_for_reply,
};
use crate::{timeout::TimeoutGuard, transport::Transport, MsqErr, SocketConf};
use log::debug;

/// Offset of the token text: type byte plus the echoed session ID.
const TOKEN_OFFSET: usize = 5;

/// Challenge token issued for one handshake/stat request pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Decimal text exactly as received.
    pub text: String,
    pub value: i32,
}

/// Drop stale datagrams, send the handshake and wait for the server's challenge token.
pub(crate) fn run_handshake<T: Transport>(
    transport: &mut T,
    guard: &mut TimeoutGuard,
    socket_conf: &SocketConf,
) -> Result<SessionToken, MsqErr> {
    discard_stale(transport)?;

    debug!("Sending handshake packet");
    send_packet(transport, &build_handshake_packet())?;

    let bufs = wait_for_reply(transport, guard, socket_conf, PacketType::Handshake)?;
    let token = parse_handshake_reply(&bufs)?;

    debug!("Handshake done, token: {}", token.text);

    Ok(token)
}

/// Process the handshake [response](https://wiki.vg/Query#Response).
pub fn parse_handshake_reply(bufs: &[u8]) -> Result<SessionToken, MsqErr> {
    expect_type(bufs, PacketType::Handshake)?;

    if bufs.len() <= TOKEN_OFFSET {
        return Err(MsqErr::ParseErr(format!(
            "Handshake reply too short to carry a token, current len: {}",
            bufs.len()
        )));
    }

    let token_bufs = &bufs[TOKEN_OFFSET..];
    let token_bufs = match token_bufs.iter().position(|&b| b == 0x00) {
        Some(end) => &token_bufs[..end],
        None => token_bufs,
    };

    let text = match std::str::from_utf8(token_bufs) {
        Ok(text) => text.to_string(),
        Err(err) => {
            return Err(MsqErr::ParseErr(format!(
                "Challenge token is not ASCII text: {}",
                err
            )));
        }
    };
    let value = text.parse::<i32>().map_err(|err| {
        MsqErr::ParseErr(format!("Challenge token {:?} is not an i32: {}", text, err))
    })?;

    Ok(SessionToken { text, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrKind;

    fn reply(token: &str) -> Vec<u8> {
        let mut bufs = vec![0x09, 0x04, 0x05, 0x06, 0x07];
        bufs.extend_from_slice(token.as_bytes());
        bufs.push(0x00);
        bufs
    }

    #[test]
    fn parses_positive_and_negative_tokens() {
        let token = parse_handshake_reply(&reply("9513307")).unwrap();
        assert_eq!(token.text, "9513307");
        assert_eq!(token.value, 9_513_307);

        assert_eq!(parse_handshake_reply(&reply("-5")).unwrap().value, -5);
    }

    #[test]
    fn token_stops_at_first_null() {
        let mut bufs = reply("42");
        bufs.extend_from_slice(b"99\0");

        assert_eq!(parse_handshake_reply(&bufs).unwrap().value, 42);
    }

    #[test]
    fn unterminated_token_reads_to_end() {
        let bufs = [0x09, 0x04, 0x05, 0x06, 0x07, b'1', b'7'];

        assert_eq!(parse_handshake_reply(&bufs).unwrap().value, 17);
    }

    #[test]
    fn wrong_type_is_protocol_error() {
        let mut bufs = reply("42");
        bufs[0] = 0x00;

        assert_eq!(
            parse_handshake_reply(&bufs).unwrap_err().kind(),
            ErrKind::Protocol
        );
    }

    #[test]
    fn bad_token_is_parse_error() {
        for bufs in [
            vec![0x09, 0x04, 0x05],
            reply(""),
            reply("12ab"),
            reply("4294967296"),
        ] {
            assert_eq!(
                parse_handshake_reply(&bufs).unwrap_err().kind(),
                ErrKind::Parse
            );
        }
    }
}
