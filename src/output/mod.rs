// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

use thiserror::Error;

use crate::{SequencerError, GM_SYSTEM_RESET};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("not initialized")]
    NotReady,
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}

pub type SendResult<T> = std::result::Result<T, SendError>;

/// Outcome of a successful send operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// The event has been delivered to the service.
    Submitted,
    /// The message has no corresponding event and was ignored.
    Dropped,
}

/// Output backend of the music playback path.
///
/// Sending is fire-and-forget. Failures are logged and
/// never propagated to the caller.
pub trait MidiOutDevice {
    /// Send a packed MIDI short message.
    ///
    /// The status byte is stored in the least significant byte,
    /// followed by the two data bytes.
    fn send_midi_message(&mut self, message: u32);

    /// Send a complete System Exclusive message, including
    /// the leading `F0` and the trailing `F7`.
    fn send_sysex_message(&mut self, data: &[u8]);

    /// Reset all connected General MIDI devices.
    fn send_midi_reset(&mut self) {
        self.send_sysex_message(&GM_SYSTEM_RESET);
    }

    /// Human-readable name of the backend
    #[must_use]
    fn name(&self) -> &str;

    /// Check if the device is ready for sending.
    #[must_use]
    fn is_initialized(&self) -> bool;
}

/// Log the outcome of a send operation that must not fail.
pub(crate) fn log_send_result(what: &str, result: SendResult<SendStatus>) {
    match result {
        Ok(SendStatus::Submitted) => (),
        Ok(SendStatus::Dropped) => {
            log::trace!("{what} dropped");
        }
        Err(SendError::NotReady) => {
            log::trace!("{what} not sent: Device is not initialized");
        }
        Err(SendError::Sequencer(err)) => {
            log::debug!("{what} not sent: {err}");
        }
    }
}
