//! Game protocol library
//!
//! Packet layouts for the login, character selection and scope packets,
//! the login field obfuscator and the two-level packet dispatch.

pub mod constants;
pub mod dispatch;
pub mod error;
pub mod packets;
pub mod xor;

pub use constants::*;
pub use dispatch::{CharacterPacket, InboundPacket, LoginLogoutPacket};
pub use error::ProtocolError;
pub use packets::{PacketLayout, PacketSink, PacketWriter};
pub use xor::Xor3;
