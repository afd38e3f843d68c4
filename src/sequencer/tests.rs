// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

use super::*;

#[test]
fn port_capability_contains() {
    let caps = PortCapability::WRITE | PortCapability::SUBS_WRITE | PortCapability::READ;
    assert!(caps.contains(PortCapability::WRITE | PortCapability::SUBS_WRITE));
    assert!(!PortCapability::WRITE.contains(PortCapability::WRITE | PortCapability::SUBS_WRITE));
    assert!(caps.contains(PortCapability::empty()));
}

#[test]
fn bit_values_match_the_host_constants() {
    assert_eq!(0x02, PortCapability::WRITE.bits());
    assert_eq!(0x40, PortCapability::SUBS_WRITE.bits());
    assert_eq!(0x02, PortType::MIDI_GENERIC.bits());
    assert_eq!(0x0010_0000, PortType::APPLICATION.bits());
}

#[test]
fn unknown_bits_are_preserved() {
    let port_type = PortType::from_bits_retain(0x8000_0002);
    assert!(port_type.contains(PortType::MIDI_GENERIC));
    assert_eq!(0x8000_0002, port_type.bits());
    assert_eq!(PortType::MIDI_GENERIC, port_type & PortType::MIDI_GENERIC);
    // Bits unknown to this crate are dropped when talking to the host
    assert_eq!(PortType::MIDI_GENERIC, PortType::from_bits_truncate(0x8000_0002));
}

#[test]
fn required_capability_is_const() {
    assert_eq!(
        PortCapability::WRITE | PortCapability::SUBS_WRITE,
        crate::REQUIRED_CAPABILITY
    );
}

#[test]
fn display_addr() {
    let addr = Addr {
        client: 128,
        port: 0,
    };
    assert_eq!("128:0", addr.to_string());
}

#[test]
fn display_error() {
    let err = SequencerError::new("snd_seq_open", "No such file or directory");
    assert_eq!("snd_seq_open failed: No such file or directory", err.to_string());
}
