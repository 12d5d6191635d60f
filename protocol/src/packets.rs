//! Packet framing helpers and fixed-offset field access
//!
//! Buffers handed to this module are complete, already decrypted packets
//! including their header. Multi-byte fields are stored in the endianness
//! the layout names; strings are fixed-width, NUL padded ASCII.

pub mod client_to_server;
pub mod server_to_client;
mod writer;

pub use writer::{PacketLayout, PacketSink, PacketWriter};

use crate::constants::HeaderType;
use crate::error::ProtocolError;

/// Header layout of a packet, if its first byte is a known header type
pub fn header_type(data: &[u8]) -> Option<HeaderType> {
    data.first().copied().and_then(HeaderType::from_u8)
}

/// Packet code (type) byte
pub fn packet_type(data: &[u8]) -> Option<u8> {
    let header = header_type(data)?;
    data.get(header.code_offset()).copied()
}

/// Sub-code byte directly following the packet code
pub fn packet_sub_type(data: &[u8]) -> Option<u8> {
    let header = header_type(data)?;
    data.get(header.code_offset() + 1).copied()
}

/// Packet length as declared in the header
pub fn declared_length(data: &[u8]) -> Result<usize, ProtocolError> {
    let first = data.first().copied().unwrap_or_default();
    let header = HeaderType::from_u8(first).ok_or(ProtocolError::InvalidHeader(first))?;
    ensure_len("header", data, header.code_offset())?;
    Ok(match header.length_size() {
        1 => data[1] as usize,
        _ => read_u16_be(data, 1) as usize,
    })
}

/// Writes the header into the start of `data`, declaring its full length
pub(crate) fn write_header(data: &mut [u8], header: HeaderType, code: u8, sub_code: Option<u8>) {
    let length = data.len();
    data[0] = header.to_u8();
    match header.length_size() {
        1 => data[1] = length as u8,
        _ => data[1..3].copy_from_slice(&(length as u16).to_be_bytes()),
    }
    let code_offset = header.code_offset();
    data[code_offset] = code;
    if let Some(sub_code) = sub_code {
        data[code_offset + 1] = sub_code;
    }
}

pub(crate) fn ensure_len(
    packet: &'static str,
    data: &[u8],
    expected: usize,
) -> Result<(), ProtocolError> {
    if data.len() < expected {
        return Err(ProtocolError::PacketTooSmall {
            packet,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

pub(crate) fn read_u16_be(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn read_u32_be(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Reads a fixed-width string field up to the first NUL
pub fn read_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    field[..end]
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

/// Writes `value` as ASCII into a fixed-width field, truncating or NUL
/// padding it to the field width
pub fn write_string(field: &mut [u8], value: &str) {
    field.fill(0);
    for (dst, ch) in field.iter_mut().zip(value.chars()) {
        *dst = if ch.is_ascii() { ch as u8 } else { b'?' };
    }
}
