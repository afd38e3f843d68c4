// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

mod device;
#[cfg(all(feature = "alsa", target_os = "linux"))]
pub use self::device::AlsaMidiOutputDevice;
pub use self::device::{
    DeviceConfig, Destination, InitError, MidiOutputDevice, DEFAULT_PORT_NAME, DEVICE_NAME,
};

mod message;
pub use self::message::{pitch_bend_value, MidiEventClass, ShortMessage, GM_SYSTEM_RESET};

mod output;
pub use self::output::{MidiOutDevice, SendError, SendResult, SendStatus};

mod selection;
pub use self::selection::{
    candidate_ports, is_candidate, select_destination, ByAddr, ByIndex, FirstMatch, LastMatch,
    PortNameContains, PortSelector, REQUIRED_CAPABILITY, REQUIRED_PORT_TYPE,
};

mod sequencer;
#[cfg(all(feature = "alsa", target_os = "linux"))]
pub use self::sequencer::alsa::AlsaSequencer;
pub use self::sequencer::{
    Addr, ClientId, ClientInfo, EventData, PortCapability, PortId, PortInfo, PortType, QueueId,
    Sequencer, SequencerError, SequencerEvent, SequencerResult,
};
