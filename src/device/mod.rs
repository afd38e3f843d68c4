// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

use std::{borrow::Cow, fmt};

use thiserror::Error;

use crate::{
    output::log_send_result, select_destination, Addr, EventData, LastMatch, MidiOutDevice,
    PortId, PortSelector, PortType, QueueId, SendError, SendResult, SendStatus, Sequencer,
    SequencerError, SequencerEvent, SequencerResult, ShortMessage, REQUIRED_CAPABILITY,
};

/// Name of this backend
pub const DEVICE_NAME: &str = "ALSA Midi";

/// Default label of the local application port
pub const DEFAULT_PORT_NAME: &str = "Harmony";

const LOG_PREFIX: &str = "ALSA";

fn failure_message(err: &impl fmt::Display) -> String {
    format!("{LOG_PREFIX}: {err}")
}

#[derive(Debug)]
pub struct DeviceConfig {
    /// Title of the host application.
    ///
    /// Advertised as the client name and used as the name of the queue.
    pub client_name: Cow<'static, str>,

    /// Label of the local application port
    pub port_name: Cow<'static, str>,

    /// Chooses the destination among all candidate ports
    pub selector: Box<dyn PortSelector>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            client_name: Cow::Borrowed(env!("CARGO_PKG_NAME")),
            port_name: Cow::Borrowed(DEFAULT_PORT_NAME),
            selector: Box::new(LastMatch),
        }
    }
}

impl DeviceConfig {
    #[must_use]
    pub fn with_client_name(mut self, client_name: impl Into<Cow<'static, str>>) -> Self {
        self.client_name = client_name.into();
        self
    }

    #[must_use]
    pub fn with_port_name(mut self, port_name: impl Into<Cow<'static, str>>) -> Self {
        self.port_name = port_name.into();
        self
    }

    #[must_use]
    pub fn with_selector(mut self, selector: impl PortSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }
}

/// Terminal failure while setting up the device
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error(transparent)]
    Open(SequencerError),
    #[error("no suitable destination port found")]
    NoCandidatePort,
    #[error(transparent)]
    CreatePort(SequencerError),
    #[error(transparent)]
    Connect(SequencerError),
    #[error(transparent)]
    AllocQueue(SequencerError),
    #[error(transparent)]
    StartQueue(SequencerError),
}

/// The selected destination port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub addr: Addr,
    pub client_name: String,
    pub port_name: String,
}

#[derive(Debug)]
struct Connection {
    local_port: PortId,
    destination: Destination,
    queue: QueueId,
}

fn connect<S>(sequencer: &mut S, config: &DeviceConfig) -> Result<Connection, InitError>
where
    S: Sequencer,
{
    let Some(port) = select_destination(&*sequencer, config.selector.as_ref()) else {
        return Err(InitError::NoCandidatePort);
    };
    let destination = Destination {
        addr: port.addr,
        client_name: port.client_name,
        port_name: port.name,
    };
    log::info!(
        "Using destination port {addr} \"{client_name}:{port_name}\"",
        addr = destination.addr,
        client_name = destination.client_name,
        port_name = destination.port_name,
    );
    let local_port = sequencer
        .create_simple_port(
            &config.port_name,
            REQUIRED_CAPABILITY,
            PortType::APPLICATION,
        )
        .map_err(InitError::CreatePort)?;
    if let Err(err) = sequencer.set_client_name(&config.client_name) {
        // Cosmetic only
        log::debug!("{}", failure_message(&err));
    }
    sequencer
        .connect_to(local_port, destination.addr)
        .map_err(InitError::Connect)?;
    let queue = sequencer
        .alloc_named_queue(&config.client_name)
        .map_err(InitError::AllocQueue)?;
    sequencer.start_queue(queue).map_err(InitError::StartQueue)?;
    Ok(Connection {
        local_port,
        destination,
        queue,
    })
}

/// MIDI output to a port of the host sequencer.
///
/// All setup happens once on construction and is never retried.
/// If any step fails the device stays uninitialized for its whole
/// lifetime and silently ignores all messages.
#[allow(missing_debug_implementations)]
pub struct MidiOutputDevice<S> {
    sequencer: Option<S>,
    connection: Option<Connection>,
    init_error: Option<InitError>,
}

impl<S> MidiOutputDevice<S>
where
    S: Sequencer,
{
    /// Open a session and connect to the selected destination port.
    #[must_use]
    pub fn new<F>(open: F, config: &DeviceConfig) -> Self
    where
        F: FnOnce() -> SequencerResult<S>,
    {
        let mut sequencer = match open() {
            Ok(sequencer) => sequencer,
            Err(err) => {
                log::debug!("{}", failure_message(&err));
                return Self {
                    sequencer: None,
                    connection: None,
                    init_error: Some(InitError::Open(err)),
                };
            }
        };
        let (connection, init_error) = match connect(&mut sequencer, config) {
            Ok(connection) => (Some(connection), None),
            Err(err) => {
                log::debug!("{}", failure_message(&err));
                (None, Some(err))
            }
        };
        Self {
            sequencer: Some(sequencer),
            connection,
            init_error,
        }
    }

    /// The reason why the device is not initialized.
    #[must_use]
    pub const fn init_error(&self) -> Option<&InitError> {
        self.init_error.as_ref()
    }

    #[must_use]
    pub fn destination(&self) -> Option<&Destination> {
        self.connection
            .as_ref()
            .map(|connection| &connection.destination)
    }

    pub fn try_send_midi_message(&mut self, message: u32) -> SendResult<SendStatus> {
        let message = ShortMessage::new(message);
        let Some(data) = message.to_event_data() else {
            log::trace!("Ignoring MIDI message {message}");
            return Ok(SendStatus::Dropped);
        };
        self.submit(data)
    }

    /// Submit the payload without copying it.
    pub fn try_send_sysex_message(&mut self, data: &[u8]) -> SendResult<SendStatus> {
        self.submit(EventData::SysEx(data))
    }

    fn submit(&mut self, data: EventData<'_>) -> SendResult<SendStatus> {
        let (Some(sequencer), Some(connection)) = (&mut self.sequencer, &self.connection) else {
            return Err(SendError::NotReady);
        };
        let event = SequencerEvent {
            source_port: connection.local_port,
            dest: connection.destination.addr,
            queue: connection.queue,
            data,
        };
        sequencer.output_direct(&event)?;
        Ok(SendStatus::Submitted)
    }
}

impl<S> MidiOutputDevice<S> {
    /// Close the session.
    ///
    /// Queue and ports are released by the service. Closing
    /// again has no effect.
    pub fn close(&mut self) {
        self.connection = None;
        let Some(sequencer) = self.sequencer.take() else {
            return;
        };
        log::debug!("Closing sequencer session");
        drop(sequencer);
    }
}

impl<S> Drop for MidiOutputDevice<S> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S> MidiOutDevice for MidiOutputDevice<S>
where
    S: Sequencer,
{
    fn send_midi_message(&mut self, message: u32) {
        let result = self.try_send_midi_message(message);
        log_send_result("MIDI message", result);
    }

    fn send_sysex_message(&mut self, data: &[u8]) {
        let result = self.try_send_sysex_message(data);
        log_send_result("SysEx message", result);
    }

    fn name(&self) -> &str {
        DEVICE_NAME
    }

    fn is_initialized(&self) -> bool {
        self.connection.is_some()
    }
}

#[cfg(all(feature = "alsa", target_os = "linux"))]
pub type AlsaMidiOutputDevice = MidiOutputDevice<crate::AlsaSequencer>;

#[cfg(all(feature = "alsa", target_os = "linux"))]
impl MidiOutputDevice<crate::AlsaSequencer> {
    /// Connect to a port of the ALSA sequencer.
    #[must_use]
    pub fn open(config: &DeviceConfig) -> Self {
        Self::new(crate::AlsaSequencer::open, config)
    }
}
