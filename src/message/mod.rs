// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

//! Packed MIDI short messages

use strum::{EnumCount, EnumIter, FromRepr};

use crate::EventData;

/// GM System Reset (universal non-realtime System Exclusive)
pub const GM_SYSTEM_RESET: [u8; 6] = [0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7];

/// Upper nibble of the status byte of channel voice messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, EnumIter, EnumCount)]
#[repr(u8)]
pub enum MidiEventClass {
    NoteOff = 0x80,
    NoteOn = 0x90,
    KeyPressure = 0xA0,
    Controller = 0xB0,
    ProgramChange = 0xC0,
    ChannelPressure = 0xD0,
    PitchBend = 0xE0,
}

/// A MIDI short message packed into 32 bits.
///
/// Byte 0 carries the status (event class and channel), byte 1 the first
/// and byte 2 the second data byte. Byte 3 is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::From, derive_more::Display)]
#[display("{_0:#08x}")]
#[repr(transparent)]
pub struct ShortMessage(u32);

impl ShortMessage {
    #[must_use]
    pub const fn new(packed: u32) -> Self {
        Self(packed)
    }

    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn from_parts(status: u8, param1: u8, param2: u8) -> Self {
        Self(status as u32 | (param1 as u32) << 8 | (param2 as u32) << 16)
    }

    #[must_use]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn status(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// The raw event class bits, i.e. the high nibble of the status byte.
    #[must_use]
    pub const fn event_class_bits(self) -> u8 {
        self.status() & 0xF0
    }

    /// The mapped event class, or `None` for anything that is not
    /// a channel voice message.
    #[must_use]
    pub const fn event_class(self) -> Option<MidiEventClass> {
        MidiEventClass::from_repr(self.event_class_bits())
    }

    #[must_use]
    pub const fn channel(self) -> u8 {
        self.status() & 0x0F
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn param1(self) -> u8 {
        ((self.0 >> 8) & 0x7F) as u8
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn param2(self) -> u8 {
        ((self.0 >> 16) & 0x7F) as u8
    }

    /// Translate into the payload of a sequencer event.
    ///
    /// Returns `None` if the message is not a channel voice message.
    #[must_use]
    pub fn to_event_data(self) -> Option<EventData<'static>> {
        let channel = self.channel();
        let param1 = self.param1();
        let param2 = self.param2();
        let data = match self.event_class()? {
            MidiEventClass::NoteOff => EventData::NoteOff {
                channel,
                note: param1,
            },
            MidiEventClass::NoteOn => EventData::NoteOn {
                channel,
                note: param1,
                velocity: param2,
            },
            MidiEventClass::KeyPressure => EventData::KeyPressure {
                channel,
                note: param1,
                velocity: param2,
            },
            MidiEventClass::Controller => EventData::Controller {
                channel,
                param: param1,
                value: param2,
            },
            MidiEventClass::ProgramChange => EventData::ProgramChange {
                channel,
                value: param1,
            },
            MidiEventClass::ChannelPressure => EventData::ChannelPressure {
                channel,
                value: param1,
            },
            MidiEventClass::PitchBend => EventData::PitchBend {
                channel,
                value: pitch_bend_value(param1, param2),
            },
        };
        Some(data)
    }
}

/// Reassemble a 14-bit value from its two 7-bit halves.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn pitch_bend_value(lsb: u8, msb: u8) -> u16 {
    ((msb as u16 & 0x7F) << 7) | (lsb as u16 & 0x7F)
}
