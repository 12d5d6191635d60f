//! Protocol error types

use thiserror::Error;

/// A packet that does not match the layout its header claims
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Packet too small for {packet}: expected at least {expected}, got {actual}")]
    PacketTooSmall {
        packet: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid header type: {0:#04x}")]
    InvalidHeader(u8),
}
