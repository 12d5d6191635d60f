//! Two-level demultiplexing of inbound packets
//!
//! The packet code selects a category; the login/logout and character
//! categories are sub-coded and select the concrete packet by their second
//! byte. Codes and sub-codes without a known layout yield `Ok(None)` and are
//! meant to be dropped silently.

use crate::constants::*;
use crate::error::ProtocolError;
use crate::packets::server_to_client::{
    AddCharactersToScope, AddNpcsToScope, CharacterInformation, CharacterList, GameServerEntered,
    LoginResponse, LogoutResponse,
};
use crate::packets::{packet_sub_type, packet_type};

#[derive(Debug, Clone)]
pub enum InboundPacket<'a> {
    LoginLogout(LoginLogoutPacket<'a>),
    Character(CharacterPacket<'a>),
    AddNpcsToScope(AddNpcsToScope<'a>),
    AddCharactersToScope(AddCharactersToScope<'a>),
}

#[derive(Debug, Clone, Copy)]
pub enum LoginLogoutPacket<'a> {
    GameServerEntered(GameServerEntered<'a>),
    LoginResponse(LoginResponse<'a>),
    LogoutResponse(LogoutResponse<'a>),
}

#[derive(Debug, Clone, Copy)]
pub enum CharacterPacket<'a> {
    CharacterList(CharacterList<'a>),
    CharacterInformation(CharacterInformation<'a>),
}

impl<'a> InboundPacket<'a> {
    /// Classifies a complete packet
    ///
    /// Returns `Ok(None)` for unknown codes and sub-codes and an error when
    /// a known packet is too short for its layout.
    pub fn parse(data: &'a [u8]) -> Result<Option<Self>, ProtocolError> {
        let Some(code) = packet_type(data) else {
            return Ok(None);
        };

        let packet = match code {
            LOGIN_LOGOUT_CODE => LoginLogoutPacket::parse(data)?.map(Self::LoginLogout),
            CHARACTER_CODE => CharacterPacket::parse(data)?.map(Self::Character),
            ADD_NPCS_TO_SCOPE_CODE => Some(Self::AddNpcsToScope(AddNpcsToScope::new(data)?)),
            ADD_CHARACTERS_TO_SCOPE_CODE => {
                Some(Self::AddCharactersToScope(AddCharactersToScope::new(data)?))
            }
            _ => None,
        };
        Ok(packet)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InboundPacket::LoginLogout(LoginLogoutPacket::GameServerEntered(_)) => "GameServerEntered",
            InboundPacket::LoginLogout(LoginLogoutPacket::LoginResponse(_)) => "LoginResponse",
            InboundPacket::LoginLogout(LoginLogoutPacket::LogoutResponse(_)) => "LogoutResponse",
            InboundPacket::Character(CharacterPacket::CharacterList(_)) => "CharacterList",
            InboundPacket::Character(CharacterPacket::CharacterInformation(_)) => {
                "CharacterInformation"
            }
            InboundPacket::AddNpcsToScope(_) => "AddNpcsToScope",
            InboundPacket::AddCharactersToScope(_) => "AddCharactersToScope",
        }
    }
}

impl<'a> LoginLogoutPacket<'a> {
    fn parse(data: &'a [u8]) -> Result<Option<Self>, ProtocolError> {
        let packet = match packet_sub_type(data) {
            Some(GAME_SERVER_ENTERED_SUB_CODE) => {
                Some(Self::GameServerEntered(GameServerEntered::new(data)?))
            }
            Some(LOGIN_SUB_CODE) => Some(Self::LoginResponse(LoginResponse::new(data)?)),
            Some(LOGOUT_SUB_CODE) => Some(Self::LogoutResponse(LogoutResponse::new(data)?)),
            _ => None,
        };
        Ok(packet)
    }
}

impl<'a> CharacterPacket<'a> {
    fn parse(data: &'a [u8]) -> Result<Option<Self>, ProtocolError> {
        let packet = match packet_sub_type(data) {
            Some(CHARACTER_LIST_SUB_CODE) => Some(Self::CharacterList(CharacterList::new(data)?)),
            Some(CHARACTER_INFORMATION_SUB_CODE) => {
                Some(Self::CharacterInformation(CharacterInformation::new(data)?))
            }
            _ => None,
        };
        Ok(packet)
    }
}
