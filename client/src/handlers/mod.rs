//! Client state machine
//!
//! Inbound packets are classified by [`InboundPacket::parse`] and handled
//! one at a time on the calling thread. Handlers may block on console input;
//! no further packet is processed until they return.

mod character;
mod login;
mod scope;

#[cfg(test)]
pub(crate) mod test_support;

use crate::output::Console;
use crate::session::{ClientState, Session};
use protocol::packets::{packet_sub_type, packet_type};
use protocol::{
    CharacterPacket, InboundPacket, LoginLogoutPacket, PacketSink, ProtocolError, Xor3,
    DEFAULT_CLIENT_SERIAL,
};
use std::io;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Malformed packet: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub client_serial: String,
    pub strict_sequence: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            client_serial: DEFAULT_CLIENT_SERIAL.to_string(),
            strict_sequence: false,
        }
    }
}

/// Logs in, selects a character and reports what the server sends
pub struct GameClient {
    session: Session,
    state: ClientState,
    xor3: Xor3,
    options: ClientOptions,
    started: Instant,
}

impl GameClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            session: Session::new(),
            state: ClientState::Disconnected,
            xor3: Xor3::new(0),
            options,
            started: Instant::now(),
        }
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The transport is up; the server greets with the game server entry
    pub fn connected(&mut self) {
        self.transition(ClientState::AwaitingWorldEntry);
    }

    /// Handles one complete inbound packet
    ///
    /// Unknown packets are ignored. A known packet that does not fit its
    /// layout is returned as [`ClientError::Protocol`].
    pub fn handle_packet(
        &mut self,
        data: &[u8],
        sink: &mut dyn PacketSink,
        console: &mut dyn Console,
    ) -> Result<(), ClientError> {
        let Some(packet) = InboundPacket::parse(data)? else {
            debug!(
                code = ?packet_type(data),
                sub_code = ?packet_sub_type(data),
                len = data.len(),
                "Ignoring unhandled packet"
            );
            return Ok(());
        };

        if !self.expects(&packet) {
            if self.options.strict_sequence {
                warn!(packet = packet.name(), state = ?self.state, "Dropping out-of-sequence packet");
                return Ok(());
            }
            warn!(packet = packet.name(), state = ?self.state, "Handling out-of-sequence packet");
        }

        debug!(packet = packet.name(), state = ?self.state, "Dispatching packet");

        match packet {
            InboundPacket::LoginLogout(packet) => self.handle_login_logout(packet, sink, console),
            InboundPacket::Character(packet) => self.handle_character_packets(packet, sink, console),
            InboundPacket::AddNpcsToScope(packet) => {
                self.handle_add_npcs_to_scope(&packet, console);
                Ok(())
            }
            InboundPacket::AddCharactersToScope(packet) => {
                self.handle_add_characters_to_scope(&packet, console);
                Ok(())
            }
        }
    }

    fn handle_login_logout(
        &mut self,
        packet: LoginLogoutPacket<'_>,
        sink: &mut dyn PacketSink,
        console: &mut dyn Console,
    ) -> Result<(), ClientError> {
        match packet {
            LoginLogoutPacket::GameServerEntered(packet) => {
                self.handle_game_server_entered(packet, sink, console)
            }
            LoginLogoutPacket::LoginResponse(packet) => {
                self.handle_login_response(packet, sink, console)
            }
            LoginLogoutPacket::LogoutResponse(packet) => {
                self.handle_logout_response(packet, console);
                Ok(())
            }
        }
    }

    fn handle_character_packets(
        &mut self,
        packet: CharacterPacket<'_>,
        sink: &mut dyn PacketSink,
        console: &mut dyn Console,
    ) -> Result<(), ClientError> {
        match packet {
            CharacterPacket::CharacterList(packet) => {
                self.handle_character_list(packet, sink, console)
            }
            CharacterPacket::CharacterInformation(packet) => {
                self.handle_character_information(packet, console);
                Ok(())
            }
        }
    }

    /// Whether the packet fits the current position in the login sequence
    fn expects(&self, packet: &InboundPacket<'_>) -> bool {
        match packet {
            InboundPacket::LoginLogout(LoginLogoutPacket::GameServerEntered(_)) => {
                self.state == ClientState::AwaitingWorldEntry
            }
            InboundPacket::LoginLogout(LoginLogoutPacket::LoginResponse(_)) => {
                self.state == ClientState::AwaitingLoginResult
            }
            InboundPacket::Character(CharacterPacket::CharacterList(_)) => {
                self.state == ClientState::AwaitingCharacterList
            }
            InboundPacket::Character(CharacterPacket::CharacterInformation(_)) => {
                self.state == ClientState::CharacterSelected
            }
            InboundPacket::LoginLogout(LoginLogoutPacket::LogoutResponse(_))
            | InboundPacket::AddNpcsToScope(_)
            | InboundPacket::AddCharactersToScope(_) => self.state.has_entered_world(),
        }
    }

    fn transition(&mut self, next: ClientState) {
        debug!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }

    /// Milliseconds since the client was created, wrapping like a 32 bit
    /// tick counter
    fn tick_count(&self) -> u32 {
        self.started.elapsed().as_millis() as u32
    }
}
