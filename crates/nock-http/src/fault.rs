//! Canned transport-level failures for fault replies.
//!
//! Any `Error + Send + Sync` value can be bound with
//! [`PendingExpectation::reply_error`](crate::PendingExpectation::reply_error);
//! these cover the failures tests reach for most often.

use serde::{Deserialize, Serialize};
use std::io;

/// Transport failures a stubbed call can simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, thiserror::Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportFault {
    /// Peer closed the connection with RST
    #[error("connection reset by peer")]
    ConnectionResetByPeer,
    /// Nothing listening on the target port
    #[error("connection refused")]
    ConnectionRefused,
    /// Host name could not be resolved
    #[error("name resolution failed")]
    NameResolution,
    #[error("operation timed out")]
    TimedOut,
}

impl TransportFault {
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            TransportFault::ConnectionResetByPeer => io::ErrorKind::ConnectionReset,
            TransportFault::ConnectionRefused => io::ErrorKind::ConnectionRefused,
            TransportFault::NameResolution => io::ErrorKind::NotFound,
            TransportFault::TimedOut => io::ErrorKind::TimedOut,
        }
    }
}

impl From<TransportFault> for io::Error {
    fn from(fault: TransportFault) -> Self {
        io::Error::new(fault.kind(), fault)
    }
}
