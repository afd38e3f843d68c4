// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

//! Capabilities of the host sequencing service.

use std::borrow::Cow;

use bitflags::bitflags;
use thiserror::Error;

#[cfg(all(feature = "alsa", target_os = "linux"))]
pub(crate) mod alsa;

#[cfg(test)]
pub(crate) mod fake;

/// Failed call into the sequencing service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {description}")]
pub struct SequencerError {
    /// Name of the failed service call
    pub operation: &'static str,
    /// Human-readable description of the status code, provided by the service
    pub description: Cow<'static, str>,
}

impl SequencerError {
    #[must_use]
    pub fn new(operation: &'static str, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            operation,
            description: description.into(),
        }
    }
}

pub type SequencerResult<T> = std::result::Result<T, SequencerError>;

pub type ClientId = i32;

pub type PortId = i32;

pub type QueueId = i32;

/// Address of a sequencer port
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, derive_more::Display)]
#[display("{client}:{port}")]
pub struct Addr {
    pub client: ClientId,
    pub port: PortId,
}

bitflags! {
    /// Capabilities of a sequencer port
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PortCapability: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const SYNC_READ = 1 << 2;
        const SYNC_WRITE = 1 << 3;
        const DUPLEX = 1 << 4;
        /// Other clients may subscribe for reading
        const SUBS_READ = 1 << 5;
        /// Other clients may subscribe for writing
        const SUBS_WRITE = 1 << 6;
        const NO_EXPORT = 1 << 7;
    }
}

bitflags! {
    /// Declared type of a sequencer port
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PortType: u32 {
        const SPECIFIC = 1 << 0;
        /// Accepts standard channel voice messages
        const MIDI_GENERIC = 1 << 1;
        const MIDI_GM = 1 << 2;
        const MIDI_GS = 1 << 3;
        const MIDI_XG = 1 << 4;
        const MIDI_MT32 = 1 << 5;
        const MIDI_GM2 = 1 << 6;
        const SYNTH = 1 << 10;
        const DIRECT_SAMPLE = 1 << 11;
        const SAMPLE = 1 << 12;
        const HARDWARE = 1 << 16;
        const SOFTWARE = 1 << 17;
        const SYNTHESIZER = 1 << 18;
        const PORT = 1 << 19;
        const APPLICATION = 1 << 20;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub client: ClientId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub addr: Addr,
    pub client_name: String,
    pub name: String,
    pub capability: PortCapability,
    pub port_type: PortType,
}

/// Payload of an outgoing event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventData<'a> {
    NoteOff { channel: u8, note: u8 },
    NoteOn { channel: u8, note: u8, velocity: u8 },
    KeyPressure { channel: u8, note: u8, velocity: u8 },
    Controller { channel: u8, param: u8, value: u8 },
    ProgramChange { channel: u8, value: u8 },
    ChannelPressure { channel: u8, value: u8 },
    /// 14-bit value as transmitted, i.e. not centered around 0.
    PitchBend { channel: u8, value: u16 },
    /// Variable length payload, borrowed from the caller.
    SysEx(&'a [u8]),
}

/// Addressed outgoing event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerEvent<'a> {
    pub source_port: PortId,
    pub dest: Addr,
    pub queue: QueueId,
    pub data: EventData<'a>,
}

/// An open session with the host sequencing service.
///
/// The session is closed when dropped.
pub trait Sequencer {
    /// All clients in enumeration order.
    fn clients(&self) -> Vec<ClientInfo>;

    /// All ports owned by `client` in enumeration order.
    fn ports(&self, client: &ClientInfo) -> Vec<PortInfo>;

    fn create_simple_port(
        &mut self,
        name: &str,
        capability: PortCapability,
        port_type: PortType,
    ) -> SequencerResult<PortId>;

    /// Set the advertised display name of this session.
    fn set_client_name(&mut self, name: &str) -> SequencerResult<()>;

    fn connect_to(&mut self, local_port: PortId, dest: Addr) -> SequencerResult<()>;

    fn alloc_named_queue(&mut self, name: &str) -> SequencerResult<QueueId>;

    fn start_queue(&mut self, queue: QueueId) -> SequencerResult<()>;

    /// Deliver an event immediately, bypassing any output buffer.
    fn output_direct(&mut self, event: &SequencerEvent<'_>) -> SequencerResult<()>;
}

#[cfg(test)]
mod tests;
