//! Read-only views over packets sent by the game server
//!
//! Each view checks the buffer length once on construction; field accessors
//! afterwards index straight into the buffer.

use super::{ensure_len, read_string, read_u16_be, read_u16_le};
use crate::constants::*;
use crate::error::ProtocolError;
use std::fmt;

/// Object ids in scope packets carry a "freshly spawned" flag in the high bit
const NEW_OBJECT_FLAG: u16 = 0x8000;

/// First packet after connecting: assigns the player id and announces the
/// protocol version the server expects
#[derive(Debug, Clone, Copy)]
pub struct GameServerEntered<'a> {
    data: &'a [u8],
}

impl<'a> GameServerEntered<'a> {
    pub const HEADER: HeaderType = HeaderType::C1;
    pub const CODE: u8 = LOGIN_LOGOUT_CODE;
    pub const SUB_CODE: u8 = GAME_SERVER_ENTERED_SUB_CODE;
    pub const LENGTH: usize = 12;

    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        ensure_len("GameServerEntered", data, Self::LENGTH)?;
        Ok(Self { data })
    }

    pub fn success(&self) -> bool {
        self.data[4] != 0
    }

    pub fn player_id(&self) -> u16 {
        read_u16_be(self.data, 5)
    }

    /// Raw version token, copied verbatim into the login request
    pub fn version(&self) -> &'a [u8] {
        &self.data[7..7 + CLIENT_VERSION_LEN]
    }

    pub fn version_string(&self) -> String {
        read_string(self.version())
    }
}

/// Result code of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    InvalidPassword,
    Okay,
    AccountInvalid,
    AccountAlreadyConnected,
    ServerIsFull,
    AccountBlocked,
    WrongVersion,
    ConnectionError,
    ConnectionClosed3Fails,
    NoChargeInfo,
    SubscriptionTermOver,
    SubscriptionTimeOver,
    TemporaryBlocked,
    OnlyPlayersOver15Yrs,
    BadCountry,
    Unknown(u8),
}

impl LoginResult {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => LoginResult::InvalidPassword,
            0x01 => LoginResult::Okay,
            0x02 => LoginResult::AccountInvalid,
            0x03 => LoginResult::AccountAlreadyConnected,
            0x04 => LoginResult::ServerIsFull,
            0x05 => LoginResult::AccountBlocked,
            0x06 => LoginResult::WrongVersion,
            0x07 => LoginResult::ConnectionError,
            0x08 => LoginResult::ConnectionClosed3Fails,
            0x09 => LoginResult::NoChargeInfo,
            0x0A => LoginResult::SubscriptionTermOver,
            0x0B => LoginResult::SubscriptionTimeOver,
            0x0E => LoginResult::TemporaryBlocked,
            0x11 => LoginResult::OnlyPlayersOver15Yrs,
            0xD2 => LoginResult::BadCountry,
            other => LoginResult::Unknown(other),
        }
    }
}

impl fmt::Display for LoginResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginResult::Unknown(code) => write!(f, "Unknown({code:#04x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoginResponse<'a> {
    data: &'a [u8],
}

impl<'a> LoginResponse<'a> {
    pub const HEADER: HeaderType = HeaderType::C1;
    pub const CODE: u8 = LOGIN_LOGOUT_CODE;
    pub const SUB_CODE: u8 = LOGIN_SUB_CODE;
    pub const LENGTH: usize = 5;

    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        ensure_len("LoginResponse", data, Self::LENGTH)?;
        Ok(Self { data })
    }

    pub fn result(&self) -> LoginResult {
        LoginResult::from_u8(self.data[4])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutType {
    CloseGame,
    BackToCharacterSelection,
    BackToServerSelection,
    Unknown(u8),
}

impl LogoutType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => LogoutType::CloseGame,
            0x01 => LogoutType::BackToCharacterSelection,
            0x02 => LogoutType::BackToServerSelection,
            other => LogoutType::Unknown(other),
        }
    }
}

impl fmt::Display for LogoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoutType::Unknown(code) => write!(f, "Unknown({code:#04x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogoutResponse<'a> {
    data: &'a [u8],
}

impl<'a> LogoutResponse<'a> {
    pub const HEADER: HeaderType = HeaderType::C3;
    pub const CODE: u8 = LOGIN_LOGOUT_CODE;
    pub const SUB_CODE: u8 = LOGOUT_SUB_CODE;
    pub const LENGTH: usize = 5;

    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        ensure_len("LogoutResponse", data, Self::LENGTH)?;
        Ok(Self { data })
    }

    pub fn logout_type(&self) -> LogoutType {
        LogoutType::from_u8(self.data[4])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterStatus {
    Normal,
    Banned,
    GameMaster,
    Unknown(u8),
}

impl CharacterStatus {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => CharacterStatus::Normal,
            0x01 => CharacterStatus::Banned,
            0x20 => CharacterStatus::GameMaster,
            other => CharacterStatus::Unknown(other),
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterStatus::Unknown(code) => write!(f, "Unknown({code:#04x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Characters of the logged in account
#[derive(Debug, Clone, Copy)]
pub struct CharacterList<'a> {
    data: &'a [u8],
}

impl<'a> CharacterList<'a> {
    pub const HEADER: HeaderType = HeaderType::C1;
    pub const CODE: u8 = CHARACTER_CODE;
    pub const SUB_CODE: u8 = CHARACTER_LIST_SUB_CODE;
    pub const HEADER_LENGTH: usize = 8;
    const COUNT_OFFSET: usize = 6;

    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        ensure_len("CharacterList", data, Self::HEADER_LENGTH)?;
        let count = data[Self::COUNT_OFFSET] as usize;
        ensure_len(
            "CharacterList",
            data,
            Self::HEADER_LENGTH + count * CharacterListEntry::SIZE,
        )?;
        Ok(Self { data })
    }

    pub fn character_count(&self) -> usize {
        self.data[Self::COUNT_OFFSET] as usize
    }

    /// Entry at `index`
    ///
    /// # Panics
    /// If `index` is not below [`CharacterList::character_count`].
    pub fn character(&self, index: usize) -> CharacterListEntry<'a> {
        let count = self.character_count();
        assert!(
            index < count,
            "character index {index} out of range (count {count})"
        );
        let start = Self::HEADER_LENGTH + index * CharacterListEntry::SIZE;
        CharacterListEntry {
            data: &self.data[start..start + CharacterListEntry::SIZE],
        }
    }

    pub fn characters(&self) -> impl Iterator<Item = CharacterListEntry<'a>> + '_ {
        (0..self.character_count()).map(move |i| self.character(i))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CharacterListEntry<'a> {
    data: &'a [u8],
}

impl CharacterListEntry<'_> {
    pub const SIZE: usize = 34;

    pub fn slot_index(&self) -> u8 {
        self.data[0]
    }

    pub fn name(&self) -> String {
        read_string(&self.data[1..1 + CHARACTER_NAME_LEN])
    }

    pub fn level(&self) -> u16 {
        read_u16_le(self.data, 12)
    }

    pub fn status(&self) -> CharacterStatus {
        CharacterStatus::from_u8(self.data[14])
    }
}

/// Sent once the selected character has entered the world
#[derive(Debug, Clone, Copy)]
pub struct CharacterInformation<'a> {
    data: &'a [u8],
}

impl<'a> CharacterInformation<'a> {
    pub const HEADER: HeaderType = HeaderType::C3;
    pub const CODE: u8 = CHARACTER_CODE;
    pub const SUB_CODE: u8 = CHARACTER_INFORMATION_SUB_CODE;
    pub const LENGTH: usize = 38;

    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        ensure_len("CharacterInformation", data, Self::LENGTH)?;
        Ok(Self { data })
    }

    pub fn x(&self) -> u8 {
        self.data[4]
    }

    pub fn y(&self) -> u8 {
        self.data[5]
    }

    pub fn map_id(&self) -> u16 {
        read_u16_le(self.data, 6)
    }

    pub fn current_health(&self) -> u16 {
        read_u16_le(self.data, 34)
    }

    pub fn maximum_health(&self) -> u16 {
        read_u16_le(self.data, 36)
    }
}

/// Walks a count-prefixed list of records whose size is a fixed part plus
/// one byte per trailing effect, returning the start of every record
fn scope_offsets(
    packet: &'static str,
    data: &[u8],
    fixed_size: usize,
    effect_count_offset: usize,
) -> Result<Vec<usize>, ProtocolError> {
    ensure_len(packet, data, SCOPE_HEADER_LENGTH)?;
    let count = data[SCOPE_COUNT_OFFSET] as usize;
    let mut offsets = Vec::with_capacity(count);
    let mut start = SCOPE_HEADER_LENGTH;
    for _ in 0..count {
        ensure_len(packet, data, start + fixed_size)?;
        let effects = data[start + effect_count_offset] as usize;
        ensure_len(packet, data, start + fixed_size + effects)?;
        offsets.push(start);
        start += fixed_size + effects;
    }
    Ok(offsets)
}

const SCOPE_COUNT_OFFSET: usize = 4;
const SCOPE_HEADER_LENGTH: usize = 5;

/// NPCs and monsters that came into view
#[derive(Debug, Clone)]
pub struct AddNpcsToScope<'a> {
    data: &'a [u8],
    offsets: Vec<usize>,
}

impl<'a> AddNpcsToScope<'a> {
    pub const HEADER: HeaderType = HeaderType::C2;
    pub const CODE: u8 = ADD_NPCS_TO_SCOPE_CODE;

    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        let offsets = scope_offsets("AddNpcsToScope", data, NpcData::FIXED_SIZE, 9)?;
        Ok(Self { data, offsets })
    }

    pub fn npc_count(&self) -> usize {
        self.offsets.len()
    }

    /// # Panics
    /// If `index` is not below [`AddNpcsToScope::npc_count`].
    pub fn npc(&self, index: usize) -> NpcData<'a> {
        let count = self.npc_count();
        assert!(index < count, "npc index {index} out of range (count {count})");
        let start = self.offsets[index];
        let effects = self.data[start + 9] as usize;
        NpcData {
            data: &self.data[start..start + NpcData::FIXED_SIZE + effects],
        }
    }

    pub fn npcs(&self) -> impl Iterator<Item = NpcData<'a>> + '_ {
        (0..self.npc_count()).map(move |i| self.npc(i))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NpcData<'a> {
    data: &'a [u8],
}

impl<'a> NpcData<'a> {
    pub const FIXED_SIZE: usize = 10;

    pub fn id(&self) -> u16 {
        read_u16_be(self.data, 0) & !NEW_OBJECT_FLAG
    }

    pub fn is_new(&self) -> bool {
        read_u16_be(self.data, 0) & NEW_OBJECT_FLAG != 0
    }

    pub fn type_number(&self) -> u16 {
        read_u16_be(self.data, 2)
    }

    pub fn current_position_x(&self) -> u8 {
        self.data[4]
    }

    pub fn current_position_y(&self) -> u8 {
        self.data[5]
    }

    pub fn target_position_x(&self) -> u8 {
        self.data[6]
    }

    pub fn target_position_y(&self) -> u8 {
        self.data[7]
    }

    pub fn rotation(&self) -> u8 {
        self.data[8] >> 4
    }

    pub fn effects(&self) -> &'a [u8] {
        &self.data[Self::FIXED_SIZE..]
    }
}

/// Other players (and the own character) that came into view
#[derive(Debug, Clone)]
pub struct AddCharactersToScope<'a> {
    data: &'a [u8],
    offsets: Vec<usize>,
}

impl<'a> AddCharactersToScope<'a> {
    pub const HEADER: HeaderType = HeaderType::C2;
    pub const CODE: u8 = ADD_CHARACTERS_TO_SCOPE_CODE;

    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        let offsets = scope_offsets(
            "AddCharactersToScope",
            data,
            CharacterScopeData::FIXED_SIZE,
            35,
        )?;
        Ok(Self { data, offsets })
    }

    pub fn character_count(&self) -> usize {
        self.offsets.len()
    }

    /// # Panics
    /// If `index` is not below [`AddCharactersToScope::character_count`].
    pub fn character(&self, index: usize) -> CharacterScopeData<'a> {
        let count = self.character_count();
        assert!(
            index < count,
            "character index {index} out of range (count {count})"
        );
        let start = self.offsets[index];
        let effects = self.data[start + 35] as usize;
        CharacterScopeData {
            data: &self.data[start..start + CharacterScopeData::FIXED_SIZE + effects],
        }
    }

    pub fn characters(&self) -> impl Iterator<Item = CharacterScopeData<'a>> + '_ {
        (0..self.character_count()).map(move |i| self.character(i))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CharacterScopeData<'a> {
    data: &'a [u8],
}

impl<'a> CharacterScopeData<'a> {
    pub const FIXED_SIZE: usize = 36;

    pub fn id(&self) -> u16 {
        read_u16_be(self.data, 0) & !NEW_OBJECT_FLAG
    }

    pub fn is_new(&self) -> bool {
        read_u16_be(self.data, 0) & NEW_OBJECT_FLAG != 0
    }

    pub fn current_position_x(&self) -> u8 {
        self.data[2]
    }

    pub fn current_position_y(&self) -> u8 {
        self.data[3]
    }

    pub fn appearance(&self) -> &'a [u8] {
        &self.data[4..22]
    }

    pub fn name(&self) -> String {
        read_string(&self.data[22..22 + CHARACTER_NAME_LEN])
    }

    pub fn target_position_x(&self) -> u8 {
        self.data[32]
    }

    pub fn target_position_y(&self) -> u8 {
        self.data[33]
    }

    pub fn rotation(&self) -> u8 {
        self.data[34] >> 4
    }

    pub fn effects(&self) -> &'a [u8] {
        &self.data[Self::FIXED_SIZE..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character_list(entries: &[(u8, &str, u16, u8)]) -> Vec<u8> {
        let mut data = vec![0u8; CharacterList::HEADER_LENGTH];
        data[..4].copy_from_slice(&[0xC1, 0x00, CHARACTER_CODE, CHARACTER_LIST_SUB_CODE]);
        data[6] = entries.len() as u8;
        for &(slot, name, level, status) in entries {
            let mut entry = vec![0u8; CharacterListEntry::SIZE];
            entry[0] = slot;
            entry[1..1 + name.len()].copy_from_slice(name.as_bytes());
            entry[12..14].copy_from_slice(&level.to_le_bytes());
            entry[14] = status;
            data.extend_from_slice(&entry);
        }
        data[1] = data.len() as u8;
        data
    }

    fn npc(id: u16, type_number: u16, x: u8, y: u8, rotation: u8, effects: &[u8]) -> Vec<u8> {
        let mut entry = vec![0u8; NpcData::FIXED_SIZE];
        entry[0..2].copy_from_slice(&id.to_be_bytes());
        entry[2..4].copy_from_slice(&type_number.to_be_bytes());
        entry[6] = x;
        entry[7] = y;
        entry[8] = rotation << 4;
        entry[9] = effects.len() as u8;
        entry.extend_from_slice(effects);
        entry
    }

    fn scope_packet(code: u8, entries: &[Vec<u8>]) -> Vec<u8> {
        let mut data = vec![0xC2, 0x00, 0x00, code, entries.len() as u8];
        for entry in entries {
            data.extend_from_slice(entry);
        }
        let len = data.len() as u16;
        data[1..3].copy_from_slice(&len.to_be_bytes());
        data
    }

    #[test]
    fn test_game_server_entered() {
        let data = [0xC1, 0x0C, 0xF1, 0x00, 0x01, 0x12, 0x34, b'1', b'0', b'4', b'0', b'4'];
        let packet = GameServerEntered::new(&data).unwrap();
        assert!(packet.success());
        assert_eq!(packet.player_id(), 0x1234);
        assert_eq!(packet.version(), b"10404");
        assert_eq!(packet.version_string(), "10404");
    }

    #[test]
    fn test_game_server_entered_too_small() {
        let data = [0xC1, 0x07, 0xF1, 0x00, 0x01, 0x12, 0x34];
        let err = GameServerEntered::new(&data).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::PacketTooSmall {
                packet: "GameServerEntered",
                expected: 12,
                actual: 7,
            }
        );
    }

    #[test]
    fn test_login_result_codes() {
        let data = [0xC1, 0x05, 0xF1, 0x01, 0x01];
        assert_eq!(LoginResponse::new(&data).unwrap().result(), LoginResult::Okay);
        assert_eq!(LoginResult::from_u8(0x00), LoginResult::InvalidPassword);
        assert_eq!(LoginResult::from_u8(0x0E), LoginResult::TemporaryBlocked);
        assert_eq!(LoginResult::from_u8(0x0C).to_string(), "Unknown(0x0c)");
        assert_eq!(LoginResult::AccountBlocked.to_string(), "AccountBlocked");
    }

    #[test]
    fn test_logout_type() {
        let data = [0xC3, 0x05, 0xF1, 0x02, 0x01];
        let packet = LogoutResponse::new(&data).unwrap();
        assert_eq!(packet.logout_type(), LogoutType::BackToCharacterSelection);
    }

    #[test]
    fn test_character_list_entries() {
        let data = character_list(&[(0, "Hero", 150, 0x00), (2, "Gamemaster", 400, 0x20)]);
        let list = CharacterList::new(&data).unwrap();
        assert_eq!(list.character_count(), 2);

        let first = list.character(0);
        assert_eq!(first.slot_index(), 0);
        assert_eq!(first.name(), "Hero");
        assert_eq!(first.level(), 150);
        assert_eq!(first.status(), CharacterStatus::Normal);

        let second = list.character(1);
        assert_eq!(second.slot_index(), 2);
        assert_eq!(second.name(), "Gamemaster");
        assert_eq!(second.level(), 400);
        assert_eq!(second.status(), CharacterStatus::GameMaster);

        assert_eq!(list.characters().count(), 2);
    }

    #[test]
    fn test_character_list_empty() {
        let data = character_list(&[]);
        let list = CharacterList::new(&data).unwrap();
        assert_eq!(list.character_count(), 0);
        assert_eq!(list.characters().count(), 0);
    }

    #[test]
    fn test_character_list_truncated() {
        let mut data = character_list(&[(0, "Hero", 1, 0)]);
        data.truncate(data.len() - 1);
        assert!(matches!(
            CharacterList::new(&data),
            Err(ProtocolError::PacketTooSmall { expected: 42, actual: 41, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_character_list_index_out_of_range() {
        let data = character_list(&[(0, "Hero", 1, 0)]);
        let list = CharacterList::new(&data).unwrap();
        let _ = list.character(1);
    }

    #[test]
    fn test_character_information() {
        let mut data = vec![0u8; CharacterInformation::LENGTH];
        data[..4].copy_from_slice(&[0xC3, CharacterInformation::LENGTH as u8, 0xF3, 0x03]);
        data[4] = 130;
        data[5] = 116;
        data[6..8].copy_from_slice(&3u16.to_le_bytes());
        data[34..36].copy_from_slice(&75u16.to_le_bytes());
        data[36..38].copy_from_slice(&110u16.to_le_bytes());

        let info = CharacterInformation::new(&data).unwrap();
        assert_eq!((info.x(), info.y()), (130, 116));
        assert_eq!(info.map_id(), 3);
        assert_eq!(info.current_health(), 75);
        assert_eq!(info.maximum_health(), 110);
    }

    #[test]
    fn test_npcs_with_effects() {
        let data = scope_packet(
            ADD_NPCS_TO_SCOPE_CODE,
            &[npc(0x8010, 249, 130, 120, 3, &[1, 7]), npc(0x0011, 247, 10, 20, 7, &[])],
        );
        let packet = AddNpcsToScope::new(&data).unwrap();
        assert_eq!(packet.npc_count(), 2);

        let guard = packet.npc(0);
        assert_eq!(guard.id(), 0x10);
        assert!(guard.is_new());
        assert_eq!(guard.type_number(), 249);
        assert_eq!((guard.target_position_x(), guard.target_position_y()), (130, 120));
        assert_eq!(guard.rotation(), 3);
        assert_eq!(guard.effects(), &[1, 7]);

        let other = packet.npc(1);
        assert_eq!(other.id(), 0x11);
        assert!(!other.is_new());
        assert_eq!(other.rotation(), 7);
        assert!(other.effects().is_empty());
    }

    #[test]
    fn test_npcs_truncated_effects() {
        let mut data = scope_packet(ADD_NPCS_TO_SCOPE_CODE, &[npc(1, 2, 3, 4, 5, &[9, 9, 9])]);
        data.pop();
        assert!(AddNpcsToScope::new(&data).is_err());
    }

    #[test]
    fn test_characters_in_scope() {
        let mut entry = vec![0u8; CharacterScopeData::FIXED_SIZE];
        entry[0..2].copy_from_slice(&0x8007u16.to_be_bytes());
        entry[22..26].copy_from_slice(b"Hero");
        entry[32] = 140;
        entry[33] = 125;
        entry[34] = 0x51;
        entry[35] = 1;
        entry.push(0x02);

        let data = scope_packet(ADD_CHARACTERS_TO_SCOPE_CODE, &[entry]);
        let packet = AddCharactersToScope::new(&data).unwrap();
        assert_eq!(packet.character_count(), 1);

        let hero = packet.character(0);
        assert_eq!(hero.id(), 7);
        assert!(hero.is_new());
        assert_eq!(hero.name(), "Hero");
        assert_eq!((hero.target_position_x(), hero.target_position_y()), (140, 125));
        assert_eq!(hero.rotation(), 5);
        assert_eq!(hero.effects(), &[0x02]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_characters_in_scope_index_out_of_range() {
        let data = scope_packet(ADD_CHARACTERS_TO_SCOPE_CODE, &[]);
        let packet = AddCharactersToScope::new(&data).unwrap();
        let _ = packet.character(0);
    }
}
