//! Character list, selection and world entry

use super::{ClientError, GameClient};
use crate::output::Console;
use crate::session::ClientState;
use protocol::packets::client_to_server::send_select_character;
use protocol::packets::server_to_client::{CharacterInformation, CharacterList};
use protocol::PacketSink;
use tracing::info;

impl GameClient {
    /// Prints the account's characters and selects the one the user names
    pub(super) fn handle_character_list(
        &mut self,
        packet: CharacterList<'_>,
        sink: &mut dyn PacketSink,
        console: &mut dyn Console,
    ) -> Result<(), ClientError> {
        console.line(&format!(
            "Received character list, count: {}, Characters:",
            packet.character_count()
        ));
        for character in packet.characters() {
            console.line(&format!(
                "Index: {}, Name: {}, Level: {}, Status: {}",
                character.slot_index(),
                character.name(),
                character.level(),
                character.status()
            ));
        }

        let name = console.prompt("Which character should be selected (please enter the name)? ")?;
        send_select_character(sink, &name)?;

        info!(%name, "Sent character selection");
        console.line("Sent selection packet");
        self.transition(ClientState::CharacterSelected);
        Ok(())
    }

    pub(super) fn handle_character_information(
        &self,
        packet: CharacterInformation<'_>,
        console: &mut dyn Console,
    ) {
        console.line(&format!(
            "Character entered the game on map {}, Health: {}/{}",
            packet.map_id(),
            packet.current_health(),
            packet.maximum_health()
        ));
    }
}
