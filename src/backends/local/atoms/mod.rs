// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in atoms and the closed set the engine dispatches over.

pub mod midi_file_reader;
pub mod midi_null;

pub use midi_file_reader::{MidiFileReaderAtom, ReaderSettings};
pub use midi_null::MidiNullAtom;

use crate::errors::AtomError;
use crate::packet::{Packet, PacketIo, PacketValue, RealtimeSourceConfig};
use crate::traits::Atom;
use crate::types::{ConnectionBinding, NodeType};
use crate::world::WorldState;

/// Every atom kind this crate can instantiate.
#[derive(Debug)]
pub enum AtomNode {
    MidiFileReader(MidiFileReaderAtom),
    MidiNull(MidiNullAtom),
}

macro_rules! dispatch {
    ($self:ident, $atom:ident => $body:expr) => {
        match $self {
            AtomNode::MidiFileReader($atom) => $body,
            AtomNode::MidiNull($atom) => $body,
        }
    };
}

impl Atom for AtomNode {
    fn name(&self) -> &'static str {
        dispatch!(self, a => a.name())
    }

    fn atom_type(&self) -> NodeType {
        dispatch!(self, a => a.atom_type())
    }

    fn initialize(&mut self, ws: &WorldState) -> Result<(), AtomError> {
        dispatch!(self, a => a.initialize(ws))
    }

    fn post_initialize(&mut self, binding: &ConnectionBinding) -> Result<(), AtomError> {
        dispatch!(self, a => a.post_initialize(binding))
    }

    fn uninitialize(&mut self) {
        dispatch!(self, a => a.uninitialize())
    }

    fn update(&mut self, dt: f64) {
        dispatch!(self, a => a.update(dt))
    }

    fn is_ready(&self, io: &PacketIo) -> bool {
        dispatch!(self, a => a.is_ready(io))
    }

    fn recv(&mut self, sink_ch: usize, packet: &Packet) -> bool {
        dispatch!(self, a => a.recv(sink_ch, packet))
    }

    fn send(&mut self, cfg: &RealtimeSourceConfig, out: &mut PacketValue, src_ch: usize) -> bool {
        dispatch!(self, a => a.send(cfg, out, src_ch))
    }

    fn last_error(&self) -> Option<&str> {
        dispatch!(self, a => a.last_error())
    }
}

impl From<MidiFileReaderAtom> for AtomNode {
    fn from(atom: MidiFileReaderAtom) -> Self {
        AtomNode::MidiFileReader(atom)
    }
}

impl From<MidiNullAtom> for AtomNode {
    fn from(atom: MidiNullAtom) -> Self {
        AtomNode::MidiNull(atom)
    }
}
