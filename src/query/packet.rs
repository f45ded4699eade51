use crate::MsqErr;

/// Prefix of every client to server query packet.
pub(crate) const MAGIC: [u8; 2] = [0xFE, 0xFD];
/// Session identifier echoed back by the server. Kept constant.
pub(crate) const SESSION_ID: [u8; 4] = [0x04, 0x05, 0x06, 0x07];
/// Trailing padding that selects the full stat variant.
const FULL_STAT_PADDING: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PacketType {
    Handshake,
    Stat,
}

impl From<PacketType> for u8 {
    fn from(packet_type: PacketType) -> Self {
        match packet_type {
            PacketType::Handshake => 0x09,
            PacketType::Stat => 0x00,
        }
    }
}

impl TryFrom<u8> for PacketType {
    type Error = MsqErr;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x09 => Ok(Self::Handshake),
            0x00 => Ok(Self::Stat),
            _ => Err(MsqErr::ProtocolErr(format!(
                "Unknown packet type: 0x{:02X}",
                value
            ))),
        }
    }
}

/// Check that a reply starts with the type byte of `expected`.
pub(crate) fn expect_type(bufs: &[u8], expected: PacketType) -> Result<(), MsqErr> {
    let expected_byte = u8::from(expected);

    match bufs.first() {
        Some(&b) if b == expected_byte => Ok(()),
        Some(&b) => Err(MsqErr::ProtocolErr(format!(
            "{:?} reply invalid, expected start with 0x{:02X}, but got: 0x{:02X}",
            expected, expected_byte, b
        ))),
        None => Err(MsqErr::ProtocolErr(format!(
            "{:?} reply invalid, got an empty datagram",
            expected
        ))),
    }
}

/// Build the [handshake](https://wiki.vg/Query#Request) packet.
///
/// Magic: 0xFE, 0xFD
/// Type: 0x09
/// Session ID: [SESSION_ID]
pub fn build_handshake_packet() -> Vec<u8> {
    let mut packet = Vec::with_capacity(7);

    packet.extend_from_slice(&MAGIC);
    packet.push(PacketType::Handshake.into());
    packet.extend_from_slice(&SESSION_ID);

    packet
}

/// Build the [full stat](https://wiki.vg/Query#Request_2) request packet.
pub fn build_stat_packet(token: i32) -> Vec<u8> {
    let mut packet = Vec::with_capacity(15);

    packet.extend_from_slice(&MAGIC);
    packet.push(PacketType::Stat.into());
    packet.extend_from_slice(&SESSION_ID);
    packet.extend_from_slice(&encode_token(token));
    // Without the padding the server answers with the basic stat.
    packet.extend_from_slice(&FULL_STAT_PADDING);

    packet
}

pub fn encode_token(token: i32) -> [u8; 4] {
    token.to_be_bytes()
}

pub fn decode_token(bufs: [u8; 4]) -> i32 {
    i32::from_be_bytes(bufs)
}

/// Render a packet as space separated hex for trace logs.
pub(crate) fn hex_dump(bufs: &[u8]) -> String {
    bufs.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
