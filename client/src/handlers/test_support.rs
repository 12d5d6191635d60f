//! Test doubles and packet fixtures for the handler tests

use super::{ClientOptions, GameClient};
use crate::output::Console;
use crate::session::ClientState;
use protocol::constants::*;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Line(String),
    Prompt(String),
}

/// Records output and answers prompts from a script; an exhausted script
/// behaves like closed input
pub struct RecordingConsole {
    pub events: Vec<ConsoleEvent>,
    answers: VecDeque<String>,
}

impl RecordingConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            events: Vec::new(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConsoleEvent::Line(line) => Some(line.clone()),
                ConsoleEvent::Prompt(_) => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConsoleEvent::Prompt(question) => Some(question.clone()),
                ConsoleEvent::Line(_) => None,
            })
            .collect()
    }
}

impl Console for RecordingConsole {
    fn line(&mut self, text: &str) {
        self.events.push(ConsoleEvent::Line(text.to_string()));
    }

    fn prompt(&mut self, question: &str) -> io::Result<String> {
        self.events.push(ConsoleEvent::Prompt(question.to_string()));
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}

pub fn connected_client() -> GameClient {
    let mut client = GameClient::new(ClientOptions::default());
    client.connected();
    client
}

pub fn client_awaiting_login() -> GameClient {
    let mut client = connected_client();
    client.transition(ClientState::AwaitingLoginResult);
    client
}

pub fn client_awaiting_character_list() -> GameClient {
    let mut client = connected_client();
    client.transition(ClientState::AwaitingCharacterList);
    client
}

pub fn game_server_entered(player_id: u16, version: &[u8]) -> Vec<u8> {
    let mut data = vec![0xC1, 0x0C, LOGIN_LOGOUT_CODE, GAME_SERVER_ENTERED_SUB_CODE, 0x01];
    data.extend_from_slice(&player_id.to_be_bytes());
    data.extend_from_slice(version);
    data
}

pub fn login_response(result: u8) -> Vec<u8> {
    vec![0xC1, 0x05, LOGIN_LOGOUT_CODE, LOGIN_SUB_CODE, result]
}

pub fn logout_response(logout_type: u8) -> Vec<u8> {
    vec![0xC3, 0x05, LOGIN_LOGOUT_CODE, LOGOUT_SUB_CODE, logout_type]
}

pub fn character_list(entries: &[(u8, &str, u16, u8)]) -> Vec<u8> {
    let mut data = vec![0xC1, 0x00, CHARACTER_CODE, CHARACTER_LIST_SUB_CODE, 0x00, 0x00];
    data.push(entries.len() as u8);
    data.push(0x00);
    for &(slot, name, level, status) in entries {
        let mut entry = [0u8; 34];
        entry[0] = slot;
        entry[1..1 + name.len()].copy_from_slice(name.as_bytes());
        entry[12..14].copy_from_slice(&level.to_le_bytes());
        entry[14] = status;
        data.extend_from_slice(&entry);
    }
    data[1] = data.len() as u8;
    data
}

pub fn character_information(map_id: u16, health: u16, maximum_health: u16) -> Vec<u8> {
    let mut data = vec![0u8; 38];
    data[..4].copy_from_slice(&[0xC3, 38, CHARACTER_CODE, CHARACTER_INFORMATION_SUB_CODE]);
    data[6..8].copy_from_slice(&map_id.to_le_bytes());
    data[34..36].copy_from_slice(&health.to_le_bytes());
    data[36..38].copy_from_slice(&maximum_health.to_le_bytes());
    data
}

fn scope_packet(code: u8, entries: Vec<Vec<u8>>) -> Vec<u8> {
    let mut data = vec![0xC2, 0x00, 0x00, code, entries.len() as u8];
    for entry in entries {
        data.extend_from_slice(&entry);
    }
    let len = data.len() as u16;
    data[1..3].copy_from_slice(&len.to_be_bytes());
    data
}

/// Characters standing at (140, 125) facing 3
pub fn characters_in_scope(characters: &[(u16, &str)]) -> Vec<u8> {
    let entries = characters
        .iter()
        .map(|&(id, name)| {
            let mut entry = vec![0u8; 36];
            entry[0..2].copy_from_slice(&id.to_be_bytes());
            entry[22..22 + name.len()].copy_from_slice(name.as_bytes());
            entry[32] = 140;
            entry[33] = 125;
            entry[34] = 3 << 4;
            entry
        })
        .collect();
    scope_packet(ADD_CHARACTERS_TO_SCOPE_CODE, entries)
}

/// NPCs standing at (130, 120) facing 2, each with one effect
pub fn npcs_in_scope(npcs: &[(u16, u16)]) -> Vec<u8> {
    let entries = npcs
        .iter()
        .map(|&(id, type_number)| {
            let mut entry = vec![0u8; 10];
            entry[0..2].copy_from_slice(&id.to_be_bytes());
            entry[2..4].copy_from_slice(&type_number.to_be_bytes());
            entry[6] = 130;
            entry[7] = 120;
            entry[8] = 2 << 4;
            entry[9] = 1;
            entry.push(0x05);
            entry
        })
        .collect();
    scope_packet(ADD_NPCS_TO_SCOPE_CODE, entries)
}
