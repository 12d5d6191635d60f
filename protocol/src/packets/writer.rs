//! Scoped outbound packet construction

use super::write_header;
use crate::constants::HeaderType;
use std::io;
use std::marker::PhantomData;
use tracing::trace;

/// Destination for complete outbound packets
///
/// The sink is responsible for framing-level encryption and transmission;
/// it receives each packet exactly once and in commit order.
pub trait PacketSink {
    fn send(&mut self, packet: &[u8]) -> io::Result<()>;
}

impl PacketSink for Vec<Vec<u8>> {
    fn send(&mut self, packet: &[u8]) -> io::Result<()> {
        self.push(packet.to_vec());
        Ok(())
    }
}

/// Fixed layout of an outbound packet
pub trait PacketLayout {
    const NAME: &'static str;
    const HEADER: HeaderType;
    const CODE: u8;
    const SUB_CODE: Option<u8>;
    const LENGTH: usize;

    /// Typed field access over the packet buffer
    type Fields<'a>;

    fn fields(data: &mut [u8]) -> Self::Fields<'_>;
}

/// Write handle over a freshly allocated packet buffer
///
/// The header is filled in on creation. Nothing reaches the sink until
/// [`PacketWriter::commit`]; dropping the writer discards the packet.
pub struct PacketWriter<'s, P: PacketLayout, S: PacketSink + ?Sized> {
    sink: &'s mut S,
    buffer: Vec<u8>,
    committed: bool,
    _layout: PhantomData<fn() -> P>,
}

impl<'s, P: PacketLayout, S: PacketSink + ?Sized> PacketWriter<'s, P, S> {
    pub fn start(sink: &'s mut S) -> Self {
        let mut buffer = vec![0u8; P::LENGTH];
        write_header(&mut buffer, P::HEADER, P::CODE, P::SUB_CODE);
        Self {
            sink,
            buffer,
            committed: false,
            _layout: PhantomData,
        }
    }

    pub fn packet(&mut self) -> P::Fields<'_> {
        P::fields(&mut self.buffer)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Hands the complete packet to the sink
    pub fn commit(mut self) -> io::Result<()> {
        self.committed = true;
        trace!(packet = P::NAME, len = self.buffer.len(), "Committing packet");
        self.sink.send(&self.buffer)
    }
}

impl<P: PacketLayout, S: PacketSink + ?Sized> Drop for PacketWriter<'_, P, S> {
    fn drop(&mut self) {
        if !self.committed {
            trace!(packet = P::NAME, "Discarding uncommitted packet");
        }
    }
}
