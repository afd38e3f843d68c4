// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

use std::{thread, time::Duration};

use midiout::{
    AlsaMidiOutputDevice, DeviceConfig, MidiEventClass, MidiOutDevice as _, PortNameContains,
    ShortMessage,
};

const CHANNEL: u8 = 0;

const VELOCITY: u8 = 100;

/// C major, starting at middle C
const SCALE: [u8; 8] = [60, 62, 64, 65, 67, 69, 71, 72];

fn main() {
    pretty_env_logger::init();
    match run() {
        Ok(()) => (),
        Err(err) => println!("Error: {err}"),
    }
}

fn run() -> anyhow::Result<()> {
    let mut config = DeviceConfig::default().with_client_name("midiout demo");
    if let Some(pattern) = std::env::args().nth(1) {
        println!("Looking for destination port matching \"{pattern}\"");
        config = config.with_selector(PortNameContains(pattern));
    }
    let mut device = AlsaMidiOutputDevice::open(&config);
    if !device.is_initialized() {
        let reason = device
            .init_error()
            .map_or_else(|| "unknown".to_owned(), ToString::to_string);
        anyhow::bail!("{name} not initialized: {reason}", name = device.name());
    }
    if let Some(destination) = device.destination() {
        println!(
            "Playing on {addr} \"{client_name}:{port_name}\"",
            addr = destination.addr,
            client_name = destination.client_name,
            port_name = destination.port_name,
        );
    }

    device.send_midi_reset();
    // Acoustic Grand Piano
    device.send_midi_message(
        ShortMessage::from_parts(MidiEventClass::ProgramChange as u8 | CHANNEL, 0, 0).to_bits(),
    );
    for note in SCALE {
        device.send_midi_message(
            ShortMessage::from_parts(MidiEventClass::NoteOn as u8 | CHANNEL, note, VELOCITY)
                .to_bits(),
        );
        thread::sleep(Duration::from_millis(300));
        device.send_midi_message(
            ShortMessage::from_parts(MidiEventClass::NoteOff as u8 | CHANNEL, note, 0).to_bits(),
        );
    }
    Ok(())
}
