//! Packets sent by the client
//!
//! Layout markers implement [`PacketLayout`] and are written through a
//! [`PacketWriter`]; the `*Ref` views read a finished buffer back.

use super::{ensure_len, read_string, read_u32_be, write_string, PacketLayout, PacketSink, PacketWriter};
use crate::constants::*;
use crate::error::ProtocolError;
use std::io;

/// Login request carrying a 20 byte password
pub struct LoginLongPassword;

impl LoginLongPassword {
    const USERNAME_OFFSET: usize = 4;
    const PASSWORD_OFFSET: usize = Self::USERNAME_OFFSET + USERNAME_LEN;
    const TICK_COUNT_OFFSET: usize = Self::PASSWORD_OFFSET + PASSWORD_LEN;
    const CLIENT_VERSION_OFFSET: usize = Self::TICK_COUNT_OFFSET + 4;
    const CLIENT_SERIAL_OFFSET: usize = Self::CLIENT_VERSION_OFFSET + CLIENT_VERSION_LEN;
}

impl PacketLayout for LoginLongPassword {
    const NAME: &'static str = "LoginLongPassword";
    const HEADER: HeaderType = HeaderType::C3;
    const CODE: u8 = LOGIN_LOGOUT_CODE;
    const SUB_CODE: Option<u8> = Some(LOGIN_SUB_CODE);
    const LENGTH: usize = Self::CLIENT_SERIAL_OFFSET + CLIENT_SERIAL_LEN;

    type Fields<'a> = LoginLongPasswordMut<'a>;

    fn fields(data: &mut [u8]) -> LoginLongPasswordMut<'_> {
        LoginLongPasswordMut { data }
    }
}

pub struct LoginLongPasswordMut<'a> {
    data: &'a mut [u8],
}

impl LoginLongPasswordMut<'_> {
    pub fn username_mut(&mut self) -> &mut [u8] {
        let start = LoginLongPassword::USERNAME_OFFSET;
        &mut self.data[start..start + USERNAME_LEN]
    }

    pub fn password_mut(&mut self) -> &mut [u8] {
        let start = LoginLongPassword::PASSWORD_OFFSET;
        &mut self.data[start..start + PASSWORD_LEN]
    }

    pub fn client_version_mut(&mut self) -> &mut [u8] {
        let start = LoginLongPassword::CLIENT_VERSION_OFFSET;
        &mut self.data[start..start + CLIENT_VERSION_LEN]
    }

    pub fn client_serial_mut(&mut self) -> &mut [u8] {
        let start = LoginLongPassword::CLIENT_SERIAL_OFFSET;
        &mut self.data[start..start + CLIENT_SERIAL_LEN]
    }

    pub fn set_username(&mut self, username: &str) {
        write_string(self.username_mut(), username);
    }

    pub fn set_password(&mut self, password: &str) {
        write_string(self.password_mut(), password);
    }

    pub fn set_tick_count(&mut self, tick_count: u32) {
        let start = LoginLongPassword::TICK_COUNT_OFFSET;
        self.data[start..start + 4].copy_from_slice(&tick_count.to_be_bytes());
    }

    pub fn set_client_serial(&mut self, serial: &str) {
        write_string(self.client_serial_mut(), serial);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoginLongPasswordRef<'a> {
    data: &'a [u8],
}

impl<'a> LoginLongPasswordRef<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        ensure_len(LoginLongPassword::NAME, data, LoginLongPassword::LENGTH)?;
        Ok(Self { data })
    }

    /// Username as sent, i.e. still obfuscated
    pub fn username(&self) -> &'a [u8] {
        let start = LoginLongPassword::USERNAME_OFFSET;
        &self.data[start..start + USERNAME_LEN]
    }

    /// Password as sent, i.e. still obfuscated
    pub fn password(&self) -> &'a [u8] {
        let start = LoginLongPassword::PASSWORD_OFFSET;
        &self.data[start..start + PASSWORD_LEN]
    }

    pub fn tick_count(&self) -> u32 {
        read_u32_be(self.data, LoginLongPassword::TICK_COUNT_OFFSET)
    }

    pub fn client_version(&self) -> &'a [u8] {
        let start = LoginLongPassword::CLIENT_VERSION_OFFSET;
        &self.data[start..start + CLIENT_VERSION_LEN]
    }

    pub fn client_serial(&self) -> String {
        let start = LoginLongPassword::CLIENT_SERIAL_OFFSET;
        read_string(&self.data[start..start + CLIENT_SERIAL_LEN])
    }
}

/// Requests the character list of the logged in account
pub struct RequestCharacterList;

impl PacketLayout for RequestCharacterList {
    const NAME: &'static str = "RequestCharacterList";
    const HEADER: HeaderType = HeaderType::C1;
    const CODE: u8 = CHARACTER_CODE;
    const SUB_CODE: Option<u8> = Some(CHARACTER_LIST_SUB_CODE);
    const LENGTH: usize = 4;

    type Fields<'a> = ();

    fn fields(_data: &mut [u8]) {}
}

/// Selects a character by name to enter the world with
pub struct SelectCharacter;

impl SelectCharacter {
    const NAME_OFFSET: usize = 4;
}

impl PacketLayout for SelectCharacter {
    const NAME: &'static str = "SelectCharacter";
    const HEADER: HeaderType = HeaderType::C1;
    const CODE: u8 = CHARACTER_CODE;
    const SUB_CODE: Option<u8> = Some(SELECT_CHARACTER_SUB_CODE);
    const LENGTH: usize = Self::NAME_OFFSET + CHARACTER_NAME_LEN;

    type Fields<'a> = SelectCharacterMut<'a>;

    fn fields(data: &mut [u8]) -> SelectCharacterMut<'_> {
        SelectCharacterMut { data }
    }
}

pub struct SelectCharacterMut<'a> {
    data: &'a mut [u8],
}

impl SelectCharacterMut<'_> {
    pub fn set_name(&mut self, name: &str) {
        let start = SelectCharacter::NAME_OFFSET;
        write_string(&mut self.data[start..start + CHARACTER_NAME_LEN], name);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelectCharacterRef<'a> {
    data: &'a [u8],
}

impl<'a> SelectCharacterRef<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, ProtocolError> {
        ensure_len(SelectCharacter::NAME, data, SelectCharacter::LENGTH)?;
        Ok(Self { data })
    }

    pub fn name(&self) -> String {
        let start = SelectCharacter::NAME_OFFSET;
        read_string(&self.data[start..start + CHARACTER_NAME_LEN])
    }
}

/// Begins a login request; the caller fills and obfuscates the fields and
/// commits the writer
pub fn start_write_login_long_password<S: PacketSink + ?Sized>(
    sink: &mut S,
) -> PacketWriter<'_, LoginLongPassword, S> {
    PacketWriter::start(sink)
}

pub fn send_request_character_list<S: PacketSink + ?Sized>(sink: &mut S) -> io::Result<()> {
    PacketWriter::<RequestCharacterList, S>::start(sink).commit()
}

pub fn send_select_character<S: PacketSink + ?Sized>(sink: &mut S, name: &str) -> io::Result<()> {
    let mut writer = PacketWriter::<SelectCharacter, S>::start(sink);
    writer.packet().set_name(name);
    writer.commit()
}
