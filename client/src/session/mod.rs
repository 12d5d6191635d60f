//! Client session state for the current connection

use tracing::debug;

/// Position of the client in the login sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Disconnected,
    AwaitingWorldEntry,
    AwaitingLoginResult,
    AwaitingCharacterList,
    CharacterSelected,
}

impl ClientState {
    /// Whether the server has already announced the game server entry
    pub fn has_entered_world(self) -> bool {
        !matches!(
            self,
            ClientState::Disconnected | ClientState::AwaitingWorldEntry
        )
    }
}

/// Durable per-connection data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    player_id: Option<u16>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id assigned by the server on game server entry
    pub fn player_id(&self) -> Option<u16> {
        self.player_id
    }

    pub fn set_player_id(&mut self, player_id: u16) {
        if let Some(previous) = self.player_id.replace(player_id) {
            debug!(previous, player_id, "Player id reassigned");
        }
    }

    /// Whether the object id refers to the own character
    pub fn is_self(&self, object_id: u16) -> bool {
        self.player_id == Some(object_id)
    }
}
