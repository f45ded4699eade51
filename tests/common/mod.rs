//! Shared fixtures: reply builders and a scripted in-memory transport.

#![allow(dead_code)]

use msq::{MsqErr, Transport};
use std::collections::VecDeque;

pub struct Fields<'a> {
    pub motd: &'a str,
    pub game_type: &'a str,
    pub game_id: &'a str,
    pub version: &'a str,
    pub plugins: &'a str,
    pub map: &'a str,
    pub online: &'a str,
    pub max: &'a str,
    pub host_port: &'a str,
    pub host_ip: &'a str,
}

impl Default for Fields<'_> {
    fn default() -> Self {
        Self {
            motd: "Test Server",
            game_type: "SMP",
            game_id: "MINECRAFT",
            version: "1.20.4",
            plugins: "",
            map: "world",
            online: "3",
            max: "20",
            host_port: "25565",
            host_ip: "127.0.0.1",
        }
    }
}

pub fn handshake_reply(token: &str) -> Vec<u8> {
    let mut bufs = vec![0x09, 0x04, 0x05, 0x06, 0x07];
    bufs.extend_from_slice(token.as_bytes());
    bufs.push(0x00);
    bufs
}

/// Full stat reply laid out the way a vanilla server sends it.
pub fn full_stat_reply(fields: &Fields, players: &[&str]) -> Vec<u8> {
    let mut bufs = vec![0x00, 0x04, 0x05, 0x06, 0x07];
    bufs.extend_from_slice(b"splitnum\0\x80\0");

    for (key, value) in [
        ("hostname", fields.motd),
        ("gametype", fields.game_type),
        ("game_id", fields.game_id),
        ("version", fields.version),
        ("plugins", fields.plugins),
        ("map", fields.map),
        ("numplayers", fields.online),
        ("maxplayers", fields.max),
        ("hostport", fields.host_port),
        ("hostip", fields.host_ip),
    ] {
        bufs.extend_from_slice(key.as_bytes());
        bufs.push(0x00);
        bufs.extend_from_slice(value.as_bytes());
        bufs.push(0x00);
    }

    bufs.push(0x00);
    bufs.extend_from_slice(b"\x01player_\0\0");
    for player in players {
        bufs.extend_from_slice(player.as_bytes());
        bufs.push(0x00);
    }
    bufs.push(0x00);

    bufs
}

/// Transport that answers each send with the next canned reply and
/// records everything sent through it.
///
/// A `None` reply leaves that request unanswered. `lag` empty polls are
/// reported after every send before its reply shows up. Datagrams pushed
/// into `inbox` directly are waiting before any request goes out.
#[derive(Default)]
pub struct Scripted {
    pub replies: VecDeque<Option<Vec<u8>>>,
    pub inbox: VecDeque<Vec<u8>>,
    pub sent: Vec<Vec<u8>>,
    pub lag: usize,
    silent_polls: usize,
}

impl Scripted {
    pub fn replying(replies: Vec<Vec<u8>>) -> Self {
        Self {
            replies: replies.into_iter().map(Some).collect(),
            ..Default::default()
        }
    }
}

impl Transport for Scripted {
    fn send(&mut self, bufs: &[u8]) -> Result<(), MsqErr> {
        self.sent.push(bufs.to_vec());
        self.inbox.extend(self.replies.pop_front().flatten());
        self.silent_polls = self.lag;
        Ok(())
    }

    fn poll_receive(&mut self) -> Result<Option<Vec<u8>>, MsqErr> {
        if self.silent_polls > 0 {
            self.silent_polls -= 1;
            return Ok(None);
        }

        Ok(self.inbox.pop_front())
    }
}
