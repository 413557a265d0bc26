// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Packets exchanged between atoms each tick, and the per-tick I/O descriptors
//! the scheduler hands to [`Atom`](crate::traits::Atom) implementations.

pub mod midi;

use std::sync::Arc;

use crate::types::{ChannelType, ValueKind};

pub use midi::{MidiEvent, PipelineStatus, DRUM_CHANNEL};

/// Format a packet is declared with. Set by the scheduler from the channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValueFormat {
    vd: ChannelType,
}

impl ValueFormat {
    pub fn new(vd: ChannelType) -> Self {
        Self { vd }
    }

    pub fn channel_type(&self) -> ChannelType {
        self.vd
    }

    pub fn is_valid(&self) -> bool {
        self.vd.is_valid()
    }

    pub fn is_midi(&self) -> bool {
        self.vd.value == ValueKind::Midi
    }

    pub fn is_audio(&self) -> bool {
        self.vd.value == ValueKind::Audio
    }

    pub fn is_receipt(&self) -> bool {
        self.vd.value == ValueKind::Receipt
    }

    pub fn is_order(&self) -> bool {
        self.vd.value == ValueKind::Order
    }
}

impl From<ChannelType> for ValueFormat {
    fn from(vd: ChannelType) -> Self {
        Self::new(vd)
    }
}

/// Readiness masks refreshed by the scheduler before `is_ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketIo {
    /// Bit `i` set when sink channel `i` has live upstream data.
    pub active_sink_mask: u32,
    /// Bit `i` set when the consumer of source channel `i` cannot take more packets.
    pub full_src_mask: u32,
}

/// Timing of the tick a `send` happens in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RealtimeSourceConfig {
    pub tick: u64,
    /// Transport time at the start of the tick, in seconds.
    pub time: f64,
    pub dt: f64,
}

/// Payload of a packet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PacketData {
    #[default]
    Empty,
    Bytes(Vec<u8>),
    Midi(Vec<MidiEvent>),
    Status(PipelineStatus),
}

/// An outgoing packet being filled by `send`, later shared read-only as a [`Packet`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PacketValue {
    format: ValueFormat,
    data: PacketData,
}

/// An inbound packet.
pub type Packet = Arc<PacketValue>;

impl PacketValue {
    pub fn new(format: ValueFormat) -> Self {
        Self {
            format,
            data: PacketData::Empty,
        }
    }

    pub fn format(&self) -> ValueFormat {
        self.format
    }

    pub fn set_format(&mut self, format: ValueFormat) {
        self.format = format;
    }

    pub fn data(&self) -> &PacketData {
        &self.data
    }

    /// Drop whatever payload was declared; the packet becomes empty.
    pub fn clear_data_type(&mut self) {
        self.data = PacketData::Empty;
    }

    pub fn is_empty(&self) -> bool {
        match &self.data {
            PacketData::Empty => true,
            PacketData::Bytes(b) => b.is_empty(),
            PacketData::Midi(events) => events.is_empty(),
            PacketData::Status(_) => false,
        }
    }

    /// True for typed (non-byte) payloads.
    pub fn is_custom_data(&self) -> bool {
        matches!(self.data, PacketData::Midi(_) | PacketData::Status(_))
    }

    /// Append raw bytes. Panics if the packet already carries a typed payload.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        match &mut self.data {
            PacketData::Empty => self.data = PacketData::Bytes(bytes.to_vec()),
            PacketData::Bytes(existing) => existing.extend_from_slice(bytes),
            other => panic!("cannot append raw bytes to a typed payload: {:?}", other),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.data {
            PacketData::Bytes(b) => b,
            _ => &[],
        }
    }

    /// Event buffer of a MIDI payload, declaring one if needed.
    ///
    /// Panics if the packet format is not MIDI.
    pub fn midi_mut(&mut self) -> &mut Vec<MidiEvent> {
        assert!(
            self.format.is_midi(),
            "packet format {} cannot carry MIDI events",
            self.format.channel_type()
        );
        if !matches!(self.data, PacketData::Midi(_)) {
            self.data = PacketData::Midi(Vec::new());
        }
        match &mut self.data {
            PacketData::Midi(events) => events,
            _ => unreachable!("payload was just declared as MIDI"),
        }
    }

    pub fn midi_events(&self) -> &[MidiEvent] {
        match &self.data {
            PacketData::Midi(events) => events,
            _ => &[],
        }
    }

    pub fn set_status(&mut self, status: PipelineStatus) {
        self.data = PacketData::Status(status);
    }

    pub fn status(&self) -> Option<&PipelineStatus> {
        match &self.data {
            PacketData::Status(status) => Some(status),
            _ => None,
        }
    }
}
