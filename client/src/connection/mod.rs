//! Blocking TCP connection to the game server
//!
//! Splits the byte stream into packets by their header length. Packets are
//! passed on as received; transport encryption of C3/C4 packets is not
//! handled here.

use protocol::packets::declared_length;
use protocol::{HeaderType, PacketSink, ProtocolError};
use std::io::{self, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};
use thiserror::Error;
use tracing::{info, trace};

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Unknown header type {0:#04x}")]
    InvalidHeader(u8),

    #[error("Declared packet length {declared} is shorter than its header ({minimum})")]
    InvalidLength { declared: usize, minimum: usize },

    #[error("Malformed packet header: {0}")]
    Header(#[from] ProtocolError),

    #[error("Connection I/O error: {0}")]
    Io(#[from] io::Error),
}

pub struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer_addr: SocketAddr,
}

impl Connection {
    pub fn connect(address: &str) -> Result<Self, ConnectionError> {
        let stream = TcpStream::connect(address)?;
        stream.set_nodelay(true)?;
        let peer_addr = stream.peer_addr()?;
        let writer = stream.try_clone()?;

        info!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(stream),
            writer,
            peer_addr,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Second handle on the socket, used to shut it down from another task
    pub fn shutdown_handle(&self) -> io::Result<TcpStream> {
        self.writer.try_clone()
    }

    /// Next complete packet, or `None` once the server closed the connection
    pub fn read_packet(&mut self) -> Result<Option<Vec<u8>>, ConnectionError> {
        let packet = read_packet(&mut self.reader)?;
        if let Some(packet) = &packet {
            trace!(len = packet.len(), "Received packet");
        }
        Ok(packet)
    }
}

impl PacketSink for Connection {
    fn send(&mut self, packet: &[u8]) -> io::Result<()> {
        trace!(len = packet.len(), "Sending packet");
        self.writer.write_all(packet)?;
        self.writer.flush()
    }
}

/// Reads one packet, header included
///
/// A clean end of stream before the first header byte yields `Ok(None)`;
/// ending inside a packet is an `UnexpectedEof` I/O error.
pub fn read_packet<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>, ConnectionError> {
    let mut first = [0u8; 1];
    match reader.read_exact(&mut first) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let header = HeaderType::from_u8(first[0]).ok_or(ConnectionError::InvalidHeader(first[0]))?;
    let length_size = header.length_size();

    // header byte followed by the length field
    let mut head = [first[0], 0, 0];
    let head_len = 1 + length_size;
    reader.read_exact(&mut head[1..head_len])?;
    let declared = declared_length(&head[..head_len])?;

    // header byte, length and packet code
    let minimum = header.code_offset() + 1;
    if declared < minimum {
        return Err(ConnectionError::InvalidLength { declared, minimum });
    }

    let mut packet = vec![0u8; declared];
    packet[..head_len].copy_from_slice(&head[..head_len]);
    reader.read_exact(&mut packet[head_len..])?;

    Ok(Some(packet))
}
