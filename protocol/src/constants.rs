//! Protocol constants: header types, packet codes and field widths

/// First byte of every packet, selecting the header layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HeaderType {
    /// Byte-sized length, plain on the wire
    C1 = 0xC1,

    /// Word-sized length, plain on the wire
    C2 = 0xC2,

    /// Byte-sized length, transport-encrypted on the wire
    C3 = 0xC3,

    /// Word-sized length, transport-encrypted on the wire
    C4 = 0xC4,
}

impl HeaderType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0xC1 => Some(HeaderType::C1),
            0xC2 => Some(HeaderType::C2),
            0xC3 => Some(HeaderType::C3),
            0xC4 => Some(HeaderType::C4),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Number of bytes used by the length field
    pub fn length_size(self) -> usize {
        match self {
            HeaderType::C1 | HeaderType::C3 => 1,
            HeaderType::C2 | HeaderType::C4 => 2,
        }
    }

    /// Offset of the packet code (type) byte; the sub-code follows it
    pub fn code_offset(self) -> usize {
        1 + self.length_size()
    }
}

/// Login, logout and game server entry (sub-coded)
pub const LOGIN_LOGOUT_CODE: u8 = 0xF1;

/// Character list, selection and information (sub-coded)
pub const CHARACTER_CODE: u8 = 0xF3;

/// Players entering the visible scope
pub const ADD_CHARACTERS_TO_SCOPE_CODE: u8 = 0x12;

/// NPCs and monsters entering the visible scope
pub const ADD_NPCS_TO_SCOPE_CODE: u8 = 0x13;

pub const GAME_SERVER_ENTERED_SUB_CODE: u8 = 0x00;
pub const LOGIN_SUB_CODE: u8 = 0x01;
pub const LOGOUT_SUB_CODE: u8 = 0x02;

pub const CHARACTER_LIST_SUB_CODE: u8 = 0x00;
pub const SELECT_CHARACTER_SUB_CODE: u8 = 0x03;
pub const CHARACTER_INFORMATION_SUB_CODE: u8 = 0x03;

/// Character names, padded with NUL
pub const CHARACTER_NAME_LEN: usize = 10;

/// Account name in the login request
pub const USERNAME_LEN: usize = 10;

/// Password in the long-password login request
pub const PASSWORD_LEN: usize = 20;

/// Protocol version token handed out by the server
pub const CLIENT_VERSION_LEN: usize = 5;

/// Client serial sent with the login request
pub const CLIENT_SERIAL_LEN: usize = 16;

/// Serial sent when nothing else is configured
pub const DEFAULT_CLIENT_SERIAL: &str = "k1Pk2jcET48mxL3b";
