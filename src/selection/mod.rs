// SPDX-FileCopyrightText: The midiout authors
// SPDX-License-Identifier: MPL-2.0

//! Selection of the destination port

use std::fmt;

use crate::{Addr, PortCapability, PortInfo, PortType, Sequencer};

/// Capabilities a destination port must provide.
pub const REQUIRED_CAPABILITY: PortCapability =
    PortCapability::WRITE.union(PortCapability::SUBS_WRITE);

/// Type a destination port must declare.
pub const REQUIRED_PORT_TYPE: PortType = PortType::MIDI_GENERIC;

/// Check if the port accepts channel voice messages from subscribers.
#[must_use]
pub const fn is_candidate(port: &PortInfo) -> bool {
    port.port_type.contains(REQUIRED_PORT_TYPE) && port.capability.contains(REQUIRED_CAPABILITY)
}

/// Strategy for choosing the destination among all candidate ports.
pub trait PortSelector: fmt::Debug {
    /// Select one of the candidates.
    ///
    /// The candidates are passed in enumeration order, i.e. sorted
    /// by client and then by port as reported by the service.
    fn select_port<'a>(&self, candidates: &'a [PortInfo]) -> Option<&'a PortInfo>;
}

/// The last candidate wins.
///
/// Software synthesizers like TiMidity++ or FluidSynth usually register
/// after all hardware ports and thus become the preferred destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastMatch;

impl PortSelector for LastMatch {
    fn select_port<'a>(&self, candidates: &'a [PortInfo]) -> Option<&'a PortInfo> {
        candidates.last()
    }
}

/// The first candidate wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl PortSelector for FirstMatch {
    fn select_port<'a>(&self, candidates: &'a [PortInfo]) -> Option<&'a PortInfo> {
        candidates.first()
    }
}

/// The last candidate whose client or port name contains the pattern.
///
/// Case-sensitive.
#[derive(Debug, Clone)]
pub struct PortNameContains(pub String);

impl PortSelector for PortNameContains {
    fn select_port<'a>(&self, candidates: &'a [PortInfo]) -> Option<&'a PortInfo> {
        let Self(pattern) = self;
        candidates
            .iter()
            .rev()
            .find(|port| port.client_name.contains(pattern) || port.name.contains(pattern))
    }
}

/// A fixed destination, if it is a candidate.
#[derive(Debug, Clone, Copy)]
pub struct ByAddr(pub Addr);

impl PortSelector for ByAddr {
    fn select_port<'a>(&self, candidates: &'a [PortInfo]) -> Option<&'a PortInfo> {
        let Self(addr) = *self;
        candidates.iter().find(|port| port.addr == addr)
    }
}

/// The n-th (0-based) candidate.
#[derive(Debug, Clone, Copy)]
pub struct ByIndex(pub usize);

impl PortSelector for ByIndex {
    fn select_port<'a>(&self, candidates: &'a [PortInfo]) -> Option<&'a PortInfo> {
        let Self(index) = *self;
        candidates.get(index)
    }
}

/// Enumerate the ports of all clients and collect the candidates.
#[must_use]
pub fn candidate_ports<S>(sequencer: &S) -> Vec<PortInfo>
where
    S: Sequencer + ?Sized,
{
    sequencer
        .clients()
        .iter()
        .flat_map(|client| sequencer.ports(client))
        .filter(|port| {
            let candidate = is_candidate(port);
            if !candidate {
                log::trace!(
                    "Ignoring port {addr} \"{client_name}:{port_name}\"",
                    addr = port.addr,
                    client_name = port.client_name,
                    port_name = port.name,
                );
            }
            candidate
        })
        .collect()
}

/// Enumerate all ports and let the selector choose among the candidates.
#[must_use]
pub fn select_destination<S>(sequencer: &S, selector: &dyn PortSelector) -> Option<PortInfo>
where
    S: Sequencer + ?Sized,
{
    let candidates = candidate_ports(sequencer);
    log::debug!(
        "Found {num_candidates} candidate port(s)",
        num_candidates = candidates.len()
    );
    selector.select_port(&candidates).cloned()
}
