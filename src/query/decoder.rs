use super::status::StatusRecord;
use crate::MsqErr;
use log::trace;

/// Fields of the full stat key/value section, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatField {
    Motd,
    GameType,
    GameId,
    Version,
    Plugins,
    Map,
    OnlinePlayers,
    MaxPlayers,
    HostPort,
    HostIp,
}

/// Writes one decoded value into the record.
pub(crate) type FieldSetter = fn(&mut StatusRecord, &[u8]) -> Result<(), MsqErr>;

/// One decode step: skip `skip` bytes, read a null-terminated value, hand it to `set`.
#[derive(Clone, Copy)]
pub(crate) struct FieldLayout {
    pub(crate) field: StatField,
    pub(crate) skip: usize,
    pub(crate) set: FieldSetter,
}

const fn layout(field: StatField, skip: usize, set: FieldSetter) -> FieldLayout {
    FieldLayout { field, skip, set }
}

/// Skip widths are measured from the previous value's terminator. The
/// first one covers type, session ID, `splitnum\0\x80\0` and `hostname\0`.
pub(crate) const FULL_STAT_LAYOUT: [FieldLayout; 10] = [
    layout(StatField::Motd, 25, set_motd),
    layout(StatField::GameType, 10, set_game_type),
    layout(StatField::GameId, 9, set_game_id),
    layout(StatField::Version, 9, set_version),
    layout(StatField::Plugins, 9, set_plugins),
    layout(StatField::Map, 5, set_map),
    layout(StatField::OnlinePlayers, 12, set_online_players),
    layout(StatField::MaxPlayers, 12, set_max_players),
    layout(StatField::HostPort, 10, set_host_port),
    layout(StatField::HostIp, 8, set_host_ip),
];

fn set_motd(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.motd = decode_text(bufs);
    Ok(())
}

fn set_game_type(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.game_type = decode_text(bufs);
    Ok(())
}

fn set_game_id(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.game_id = decode_text(bufs);
    Ok(())
}

fn set_version(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.version = decode_text(bufs);
    Ok(())
}

fn set_plugins(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.plugins = decode_text(bufs);
    Ok(())
}

fn set_map(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.map = decode_text(bufs);
    Ok(())
}

fn set_online_players(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.online_players = decode_int(StatField::OnlinePlayers, bufs)?;
    Ok(())
}

fn set_max_players(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.max_players = decode_int(StatField::MaxPlayers, bufs)?;
    Ok(())
}

fn set_host_port(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.host_port = decode_int(StatField::HostPort, bufs)?;
    Ok(())
}

fn set_host_ip(status: &mut StatusRecord, bufs: &[u8]) -> Result<(), MsqErr> {
    status.host_ip = decode_text(bufs);
    Ok(())
}

/// `\0` ending the key/value section, then `\x01player_\0\0`.
const PLAYER_SECTION_MARKER: usize = 12;

/// Bounds-checked cursor over a received datagram.
pub(crate) struct QueryReader<'a> {
    bufs: &'a [u8],
    current_idx: usize,
}

impl<'a> QueryReader<'a> {
    pub(crate) fn create(bufs: &'a [u8]) -> Self {
        Self {
            bufs,
            current_idx: 0,
        }
    }

    pub(crate) fn set_current_idx_forward(&mut self, idx: usize) -> Result<(), MsqErr> {
        let next_idx = self.current_idx + idx;

        if next_idx > self.bufs.len() {
            return Err(MsqErr::ParseErr(format!(
                "Cannot skip to {}, packet is only {} bytes long",
                next_idx,
                self.bufs.len()
            )));
        }

        self.current_idx = next_idx;

        Ok(())
    }

    /// Read up to the next `0x00`, leaving the cursor on the terminator.
    pub(crate) fn read_until_null(&mut self) -> Result<&'a [u8], MsqErr> {
        let rest = &self.bufs[self.current_idx..];

        match rest.iter().position(|&b| b == 0x00) {
            Some(len) => {
                self.current_idx += len;
                Ok(&rest[..len])
            }
            None => Err(MsqErr::ParseErr(format!(
                "Missing null terminator after offset {}",
                self.current_idx
            ))),
        }
    }

    /// Bytes from the cursor up to, but excluding, the last byte.
    pub(crate) fn rest_without_last(&self) -> Result<&'a [u8], MsqErr> {
        let end = self.bufs.len().saturating_sub(1);

        if self.current_idx > end || self.bufs.is_empty() {
            return Err(MsqErr::ParseErr(format!(
                "Player section starts at {}, beyond the end of a {} byte packet",
                self.current_idx,
                self.bufs.len()
            )));
        }

        Ok(&self.bufs[self.current_idx..end])
    }
}

/// Decode text, falling back to Latin-1 when the bytes are not UTF-8.
///
/// Servers with a mis-encoded `server.properties` send bare `§` (0xA7)
/// colour codes.
pub(crate) fn decode_text(bufs: &[u8]) -> String {
    match std::str::from_utf8(bufs) {
        Ok(text) => text.into(),
        Err(_) => bufs.iter().map(|&b| b as char).collect(),
    }
}

fn decode_int(field: StatField, bufs: &[u8]) -> Result<i32, MsqErr> {
    let text = decode_text(bufs);

    text.trim().parse::<i32>().map_err(|err| {
        MsqErr::ParseErr(format!(
            "{:?} value {:?} is not an integer: {}",
            field, text, err
        ))
    })
}

/// Decode a validated full stat reply. Nothing is returned unless every
/// field decoded.
pub(crate) fn decode_full_stat(bufs: &[u8]) -> Result<StatusRecord, MsqErr> {
    let mut reader = QueryReader::create(bufs);
    let mut status = StatusRecord::default();

    for step in FULL_STAT_LAYOUT.iter() {
        reader.set_current_idx_forward(step.skip)?;
        let value = reader.read_until_null()?;
        trace!("{:?} = {:?}", step.field, decode_text(value));
        (step.set)(&mut status, value)?;
    }

    reader.set_current_idx_forward(PLAYER_SECTION_MARKER)?;
    status.players = decode_players(reader.rest_without_last()?);

    Ok(status)
}

fn decode_players(bufs: &[u8]) -> String {
    let mut players = decode_text(bufs).replace('\0', ",");

    if players.ends_with(',') {
        players.pop();
    }

    players
}
