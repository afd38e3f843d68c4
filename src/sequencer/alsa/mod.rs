// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

use std::ffi::CString;

use alsa::seq::{self, ClientIter, EvCtrl, EvNote, Event, EventType, PortIter, PortSubscribe, Seq};

use super::{
    Addr, ClientInfo, EventData, PortCapability, PortId, PortInfo, PortType, QueueId, Sequencer,
    SequencerError, SequencerEvent, SequencerResult,
};

fn map_err(operation: &'static str) -> impl FnOnce(alsa::Error) -> SequencerError {
    move |err| SequencerError::new(operation, err.to_string())
}

fn c_string(operation: &'static str, name: &str) -> SequencerResult<CString> {
    CString::new(name).map_err(|err| SequencerError::new(operation, err.to_string()))
}

const fn to_alsa_addr(addr: Addr) -> seq::Addr {
    let Addr { client, port } = addr;
    seq::Addr { client, port }
}

/// Session with the ALSA sequencer, driven by [`alsa`].
#[allow(missing_debug_implementations)]
pub struct AlsaSequencer {
    seq: Seq,
}

impl AlsaSequencer {
    /// Open a duplex session on the `default` sequencer.
    pub fn open() -> SequencerResult<Self> {
        let seq = Seq::open(None, None, false).map_err(map_err("snd_seq_open"))?;
        Ok(Self { seq })
    }
}

impl Sequencer for AlsaSequencer {
    fn clients(&self) -> Vec<ClientInfo> {
        ClientIter::new(&self.seq)
            .map(|info| ClientInfo {
                client: info.get_client(),
                name: info.get_name().unwrap_or_default().to_owned(),
            })
            .collect()
    }

    fn ports(&self, client: &ClientInfo) -> Vec<PortInfo> {
        PortIter::new(&self.seq, client.client)
            .map(|info| PortInfo {
                addr: Addr {
                    client: client.client,
                    port: info.get_port(),
                },
                client_name: client.name.clone(),
                name: info.get_name().unwrap_or_default().to_owned(),
                capability: PortCapability::from_bits_retain(info.get_capability().bits()),
                port_type: PortType::from_bits_retain(info.get_type().bits()),
            })
            .collect()
    }

    fn create_simple_port(
        &mut self,
        name: &str,
        capability: PortCapability,
        port_type: PortType,
    ) -> SequencerResult<PortId> {
        const OPERATION: &str = "snd_seq_create_simple_port";
        let name = c_string(OPERATION, name)?;
        self.seq
            .create_simple_port(
                &name,
                seq::PortCap::from_bits_truncate(capability.bits()),
                seq::PortType::from_bits_truncate(port_type.bits()),
            )
            .map_err(map_err(OPERATION))
    }

    fn set_client_name(&mut self, name: &str) -> SequencerResult<()> {
        const OPERATION: &str = "snd_seq_set_client_name";
        let name = c_string(OPERATION, name)?;
        self.seq.set_client_name(&name).map_err(map_err(OPERATION))
    }

    fn connect_to(&mut self, local_port: PortId, dest: Addr) -> SequencerResult<()> {
        const OPERATION: &str = "snd_seq_connect_to";
        let client = self.seq.client_id().map_err(map_err(OPERATION))?;
        let subscription = PortSubscribe::empty().map_err(map_err(OPERATION))?;
        subscription.set_sender(seq::Addr {
            client,
            port: local_port,
        });
        subscription.set_dest(to_alsa_addr(dest));
        self.seq
            .subscribe_port(&subscription)
            .map_err(map_err(OPERATION))
    }

    fn alloc_named_queue(&mut self, name: &str) -> SequencerResult<QueueId> {
        const OPERATION: &str = "snd_seq_alloc_named_queue";
        let name = c_string(OPERATION, name)?;
        self.seq
            .alloc_named_queue(&name)
            .map_err(map_err(OPERATION))
    }

    fn start_queue(&mut self, queue: QueueId) -> SequencerResult<()> {
        const OPERATION: &str = "snd_seq_start_queue";
        self.seq
            .control_queue(queue, EventType::Start, 0, None)
            .map_err(map_err(OPERATION))?;
        self.seq.drain_output().map_err(map_err(OPERATION))?;
        Ok(())
    }

    fn output_direct(&mut self, event: &SequencerEvent<'_>) -> SequencerResult<()> {
        const OPERATION: &str = "snd_seq_event_output_direct";
        let SequencerEvent {
            source_port,
            dest,
            queue,
            data,
        } = *event;
        let mut event = new_event(data);
        event.set_source(source_port);
        event.set_dest(to_alsa_addr(dest));
        event.set_queue(queue);
        self.seq
            .event_output_direct(&mut event)
            .map(drop)
            .map_err(map_err(OPERATION))
    }
}

fn new_event(data: EventData<'_>) -> Event<'_> {
    match data {
        EventData::NoteOff { channel, note } => Event::new(
            EventType::Noteoff,
            &EvNote {
                channel,
                note,
                ..Default::default()
            },
        ),
        EventData::NoteOn {
            channel,
            note,
            velocity,
        } => Event::new(
            EventType::Noteon,
            &EvNote {
                channel,
                note,
                velocity,
                ..Default::default()
            },
        ),
        EventData::KeyPressure {
            channel,
            note,
            velocity,
        } => Event::new(
            EventType::Keypress,
            &EvNote {
                channel,
                note,
                velocity,
                ..Default::default()
            },
        ),
        EventData::Controller {
            channel,
            param,
            value,
        } => Event::new(
            EventType::Controller,
            &EvCtrl {
                channel,
                param: param.into(),
                value: value.into(),
            },
        ),
        EventData::ProgramChange { channel, value } => Event::new(
            EventType::Pgmchange,
            &EvCtrl {
                channel,
                param: 0,
                value: value.into(),
            },
        ),
        EventData::ChannelPressure { channel, value } => Event::new(
            EventType::Chanpress,
            &EvCtrl {
                channel,
                param: 0,
                value: value.into(),
            },
        ),
        EventData::PitchBend { channel, value } => Event::new(
            EventType::Pitchbend,
            &EvCtrl {
                channel,
                param: 0,
                value: value.into(),
            },
        ),
        // The payload is borrowed, not copied.
        EventData::SysEx(payload) => Event::new_ext(EventType::Sysex, payload),
    }
}
