/// Msq error uniform error definition.
#[derive(Debug)]
pub enum MsqErr {
    /// The server did not reply within the configured timeout.
    TimeoutErr(String),
    /// The reply's leading type byte does not belong to the current stage.
    ProtocolErr(String),
    /// The reply is truncated or carries text that cannot be decoded.
    ParseErr(String),
    /// Invalid input supplied by the caller.
    DataErr(String),
    /// Handling errors that occur during sockets.
    IoErr(std::io::Error),
}

/// Fieldless mirror of [MsqErr], handy for matching on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    Timeout,
    Protocol,
    Parse,
    Data,
    Io,
}

impl MsqErr {
    pub fn kind(&self) -> ErrKind {
        match self {
            MsqErr::TimeoutErr(_) => ErrKind::Timeout,
            MsqErr::ProtocolErr(_) => ErrKind::Protocol,
            MsqErr::ParseErr(_) => ErrKind::Parse,
            MsqErr::DataErr(_) => ErrKind::Data,
            MsqErr::IoErr(_) => ErrKind::Io,
        }
    }
}

impl std::fmt::Display for MsqErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MsqErr::TimeoutErr(str) => write!(f, "timeout: {}", str),
            MsqErr::ProtocolErr(str) => write!(f, "protocol error: {}", str),
            MsqErr::ParseErr(str) => write!(f, "parse error: {}", str),
            MsqErr::DataErr(str) => write!(f, "{}", str),
            MsqErr::IoErr(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MsqErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MsqErr::IoErr(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MsqErr {
    fn from(err: std::io::Error) -> Self {
        MsqErr::IoErr(err)
    }
}

impl From<std::num::ParseIntError> for MsqErr {
    fn from(err: std::num::ParseIntError) -> Self {
        MsqErr::ParseErr(err.to_string())
    }
}
