//! Minecraft server [Query](https://wiki.vg/Query) client.
//!
//! Speaks the GameSpy4 derived full stat protocol over UDP: a handshake
//! to obtain a challenge token, then a full stat request whose reply is
//! decoded into a [StatusRecord].
//!
//! ```no_run
//! use msq::{MsqErr, ServerTarget};
//!
//! fn main() -> Result<(), MsqErr> {
//!     let status = ServerTarget::create_from_str("www.example.com:25565")?.query_full()?;
//!
//!     println!("{}", status);
//!     Ok(())
//! }
//! ```
//!
//! Decoding internals are not part of the API:
//!
//! ```compile_fail
//! use msq::QueryReader;
//! ```

mod conf;
mod error;
mod query;
mod timeout;
mod transport;

pub use conf::{ServerTarget, SocketConf, DEFAULT_QUERY_PORT};
pub use error::{ErrKind, MsqErr};
pub use query::{
    build_handshake_packet, build_stat_packet, decode_token, encode_token, parse_handshake_reply,
    ModPlugin, QuerySession, QueryState, SessionToken, StatusRecord, UNKNOWN,
};
pub use timeout::TimeoutGuard;
pub use transport::{Transport, UdpTransport};
