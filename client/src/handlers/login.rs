//! Game server entry, login and logout

use super::{ClientError, GameClient};
use crate::output::Console;
use crate::session::ClientState;
use protocol::packets::client_to_server::{
    send_request_character_list, start_write_login_long_password,
};
use protocol::packets::server_to_client::{
    GameServerEntered, LoginResponse, LoginResult, LogoutResponse,
};
use protocol::PacketSink;
use tracing::{info, warn};

impl GameClient {
    /// Remembers the assigned player id and answers with the login request
    ///
    /// Username and password are obfuscated in place; the version token is
    /// copied from the server packet as is.
    pub(super) fn handle_game_server_entered(
        &mut self,
        packet: GameServerEntered<'_>,
        sink: &mut dyn PacketSink,
        console: &mut dyn Console,
    ) -> Result<(), ClientError> {
        self.session.set_player_id(packet.player_id());

        console.line(&format!(
            "Received GameServerEntered packet, player id: {}, version: {}",
            packet.player_id(),
            packet.version_string()
        ));
        let username = console.prompt("Enter Username: ")?;
        let password = console.prompt("Enter Password: ")?;

        let mut writer = start_write_login_long_password(sink);
        {
            let mut login = writer.packet();
            login.set_username(&username);
            login.set_password(&password);
            self.xor3.encrypt(login.username_mut());
            self.xor3.encrypt(login.password_mut());
            login.client_version_mut().copy_from_slice(packet.version());
            login.set_tick_count(self.tick_count());
            login.set_client_serial(&self.options.client_serial);
        }
        writer.commit()?;

        info!(player_id = packet.player_id(), "Sent login request");
        console.line("Sent login packet");
        self.transition(ClientState::AwaitingLoginResult);
        Ok(())
    }

    pub(super) fn handle_login_response(
        &mut self,
        packet: LoginResponse<'_>,
        sink: &mut dyn PacketSink,
        console: &mut dyn Console,
    ) -> Result<(), ClientError> {
        match packet.result() {
            LoginResult::Okay => {
                console.line("Login successful");
                send_request_character_list(sink)?;
                console.line("Requested character list");
                self.transition(ClientState::AwaitingCharacterList);
            }
            reason => {
                warn!(%reason, "Login rejected");
                console.line(&format!("Login failed, reason: {}", reason));
            }
        }
        Ok(())
    }

    pub(super) fn handle_logout_response(
        &self,
        packet: LogoutResponse<'_>,
        console: &mut dyn Console,
    ) {
        console.line(&format!("Logout response: {}", packet.logout_type()));
    }
}
