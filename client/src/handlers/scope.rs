//! Objects entering the visible scope

use super::GameClient;
use crate::output::Console;
use protocol::packets::server_to_client::{AddCharactersToScope, AddNpcsToScope};

impl GameClient {
    pub(super) fn handle_add_characters_to_scope(
        &self,
        packet: &AddCharactersToScope<'_>,
        console: &mut dyn Console,
    ) {
        for character in packet.characters() {
            let marker = if self.session.is_self(character.id()) {
                " [Hey, that's me]"
            } else {
                ""
            };
            console.line(&format!(
                "Player in Scope, Id {}, Name {}{}, X: {}, Y: {}, Rotation: {}",
                character.id(),
                character.name(),
                marker,
                character.target_position_x(),
                character.target_position_y(),
                character.rotation()
            ));
        }
    }

    pub(super) fn handle_add_npcs_to_scope(
        &self,
        packet: &AddNpcsToScope<'_>,
        console: &mut dyn Console,
    ) {
        for npc in packet.npcs() {
            console.line(&format!(
                "NPC in Scope, Id {}, Number {}, X: {}, Y: {}, Rotation: {}",
                npc.id(),
                npc.type_number(),
                npc.target_position_x(),
                npc.target_position_y(),
                npc.rotation()
            ));
        }
    }
}
