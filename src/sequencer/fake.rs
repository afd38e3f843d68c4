// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

//! Scripted in-memory sequencer that records all calls.

use std::{cell::RefCell, rc::Rc};

use super::{
    Addr, ClientId, ClientInfo, EventData, PortCapability, PortId, PortInfo, PortType, QueueId,
    Sequencer, SequencerError, SequencerEvent, SequencerResult,
};

pub(crate) const QUEUE: QueueId = 7;

pub(crate) const LOCAL_PORT: PortId = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SentData {
    Message(EventData<'static>),
    SysEx(Vec<u8>),
}

impl From<EventData<'_>> for SentData {
    fn from(data: EventData<'_>) -> Self {
        let data = match data {
            EventData::SysEx(payload) => return Self::SysEx(payload.to_vec()),
            EventData::NoteOff { channel, note } => EventData::NoteOff { channel, note },
            EventData::NoteOn {
                channel,
                note,
                velocity,
            } => EventData::NoteOn {
                channel,
                note,
                velocity,
            },
            EventData::KeyPressure {
                channel,
                note,
                velocity,
            } => EventData::KeyPressure {
                channel,
                note,
                velocity,
            },
            EventData::Controller {
                channel,
                param,
                value,
            } => EventData::Controller {
                channel,
                param,
                value,
            },
            EventData::ProgramChange { channel, value } => {
                EventData::ProgramChange { channel, value }
            }
            EventData::ChannelPressure { channel, value } => {
                EventData::ChannelPressure { channel, value }
            }
            EventData::PitchBend { channel, value } => EventData::PitchBend { channel, value },
        };
        Self::Message(data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sent {
    pub(crate) source_port: PortId,
    pub(crate) dest: Addr,
    pub(crate) queue: QueueId,
    pub(crate) data: SentData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    CreateSimplePort {
        name: String,
        capability: PortCapability,
        port_type: PortType,
    },
    SetClientName(String),
    ConnectTo {
        local_port: PortId,
        dest: Addr,
    },
    AllocNamedQueue(String),
    StartQueue(QueueId),
    OutputDirect(Sent),
}

#[derive(Debug, Default)]
pub(crate) struct Journal {
    pub(crate) calls: Vec<Call>,
    pub(crate) close_count: usize,
}

impl Journal {
    pub(crate) fn sent(&self) -> Vec<Sent> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::OutputDirect(sent) => Some(sent.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count_calls(&self, mut predicate: impl FnMut(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

pub(crate) type SharedJournal = Rc<RefCell<Journal>>;

#[derive(Debug, Default)]
pub(crate) struct FakeSequencer {
    clients: Vec<(ClientInfo, Vec<PortInfo>)>,
    failing_operation: Option<&'static str>,
    journal: SharedJournal,
}

/// Capability and type of a port that is eligible as a destination.
pub(crate) fn synth_port(port: PortId, name: &str) -> (PortId, String, PortCapability, PortType) {
    (
        port,
        name.to_owned(),
        PortCapability::WRITE | PortCapability::SUBS_WRITE | PortCapability::SUBS_READ,
        PortType::MIDI_GENERIC | PortType::SOFTWARE | PortType::SYNTHESIZER,
    )
}

/// A read-only port that must never be selected.
pub(crate) fn input_port(port: PortId, name: &str) -> (PortId, String, PortCapability, PortType) {
    (
        port,
        name.to_owned(),
        PortCapability::READ | PortCapability::SUBS_READ,
        PortType::MIDI_GENERIC | PortType::HARDWARE,
    )
}

impl FakeSequencer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn with_client(
        mut self,
        client: ClientId,
        name: &str,
        ports: impl IntoIterator<Item = (PortId, String, PortCapability, PortType)>,
    ) -> Self {
        let info = ClientInfo {
            client,
            name: name.to_owned(),
        };
        let ports = ports
            .into_iter()
            .map(|(port, port_name, capability, port_type)| PortInfo {
                addr: Addr { client, port },
                client_name: name.to_owned(),
                name: port_name,
                capability,
                port_type,
            })
            .collect();
        self.clients.push((info, ports));
        self
    }

    /// Let the named operation fail with an error.
    #[must_use]
    pub(crate) fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing_operation = Some(operation);
        self
    }

    pub(crate) fn journal(&self) -> SharedJournal {
        Rc::clone(&self.journal)
    }

    fn record(&self, operation: &'static str, call: Call) -> SequencerResult<()> {
        self.journal.borrow_mut().calls.push(call);
        if self.failing_operation == Some(operation) {
            return Err(SequencerError::new(operation, "Operation not permitted"));
        }
        Ok(())
    }
}

impl Drop for FakeSequencer {
    fn drop(&mut self) {
        self.journal.borrow_mut().close_count += 1;
    }
}

impl Sequencer for FakeSequencer {
    fn clients(&self) -> Vec<ClientInfo> {
        self.clients.iter().map(|(info, _)| info.clone()).collect()
    }

    fn ports(&self, client: &ClientInfo) -> Vec<PortInfo> {
        self.clients
            .iter()
            .find(|(info, _)| info.client == client.client)
            .map(|(_, ports)| ports.clone())
            .unwrap_or_default()
    }

    fn create_simple_port(
        &mut self,
        name: &str,
        capability: PortCapability,
        port_type: PortType,
    ) -> SequencerResult<PortId> {
        self.record(
            "create_simple_port",
            Call::CreateSimplePort {
                name: name.to_owned(),
                capability,
                port_type,
            },
        )
        .map(|()| LOCAL_PORT)
    }

    fn set_client_name(&mut self, name: &str) -> SequencerResult<()> {
        self.record("set_client_name", Call::SetClientName(name.to_owned()))
    }

    fn connect_to(&mut self, local_port: PortId, dest: Addr) -> SequencerResult<()> {
        self.record("connect_to", Call::ConnectTo { local_port, dest })
    }

    fn alloc_named_queue(&mut self, name: &str) -> SequencerResult<QueueId> {
        self.record("alloc_named_queue", Call::AllocNamedQueue(name.to_owned()))
            .map(|()| QUEUE)
    }

    fn start_queue(&mut self, queue: QueueId) -> SequencerResult<()> {
        self.record("start_queue", Call::StartQueue(queue))
    }

    fn output_direct(&mut self, event: &SequencerEvent<'_>) -> SequencerResult<()> {
        let SequencerEvent {
            source_port,
            dest,
            queue,
            data,
        } = *event;
        self.record(
            "output_direct",
            Call::OutputDirect(Sent {
                source_port,
                dest,
                queue,
                data: data.into(),
            }),
        )
    }
}
