// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory MIDI packet conventions: one fixed-size record per event, plus the
//! one-shot end-of-stream status.

use std::fmt;

/// General MIDI percussion channel (channel 10, zero-based 9).
pub const DRUM_CHANNEL: u8 = 9;

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const AFTERTOUCH: u8 = 0xA0;
const CONTROL_CHANGE: u8 = 0xB0;
const PATCH_CHANGE: u8 = 0xC0;
const PRESSURE: u8 = 0xD0;
const PITCHBEND: u8 = 0xE0;
const META: u8 = 0xFF;
const META_TEMPO: u8 = 0x51;

/// One timestamped MIDI message, stored inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidiEvent {
    /// Index of the track the event was read from.
    pub track: u16,
    pub tick: u32,
    pub seconds: f64,
    len: u8,
    bytes: [u8; MidiEvent::MAX_BYTES],
}

impl MidiEvent {
    /// Largest message a record holds (a tempo meta event: `FF 51 tt tt tt`).
    pub const MAX_BYTES: usize = 6;

    /// `None` when `message` is empty or longer than [`MidiEvent::MAX_BYTES`].
    pub fn new(track: u16, tick: u32, seconds: f64, message: &[u8]) -> Option<Self> {
        if message.is_empty() || message.len() > Self::MAX_BYTES {
            return None;
        }
        let mut bytes = [0u8; Self::MAX_BYTES];
        bytes[..message.len()].copy_from_slice(message);
        Some(Self {
            track,
            tick,
            seconds,
            len: message.len() as u8,
            bytes,
        })
    }

    pub fn message(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn status(&self) -> u8 {
        self.bytes[0]
    }

    fn command(&self) -> u8 {
        self.status() & 0xF0
    }

    fn data(&self, i: usize) -> Option<u8> {
        self.message().get(i + 1).copied()
    }

    /// Zero-based MIDI channel of a channel-voice message.
    pub fn channel(&self) -> u8 {
        self.status() & 0x0F
    }

    pub fn is_meta(&self) -> bool {
        self.status() == META
    }

    pub fn meta_type(&self) -> Option<u8> {
        if self.is_meta() {
            self.data(0)
        } else {
            None
        }
    }

    pub fn is_tempo(&self) -> bool {
        self.meta_type() == Some(META_TEMPO) && self.len >= 5
    }

    /// Microseconds per quarter note carried by a tempo event.
    pub fn tempo_micros(&self) -> Option<u32> {
        if !self.is_tempo() {
            return None;
        }
        let b = &self.bytes;
        Some((b[2] as u32) << 16 | (b[3] as u32) << 8 | b[4] as u32)
    }

    pub fn is_note_on(&self) -> bool {
        !self.is_meta() && self.command() == NOTE_ON && self.data(1).is_some_and(|v| v > 0)
    }

    pub fn is_note_off(&self) -> bool {
        if self.is_meta() {
            return false;
        }
        self.command() == NOTE_OFF || (self.command() == NOTE_ON && self.data(1) == Some(0))
    }

    pub fn is_note(&self) -> bool {
        self.is_note_on() || self.is_note_off()
    }

    pub fn is_aftertouch(&self) -> bool {
        !self.is_meta() && self.command() == AFTERTOUCH
    }

    pub fn is_control_change(&self) -> bool {
        !self.is_meta() && self.command() == CONTROL_CHANGE
    }

    pub fn is_patch_change(&self) -> bool {
        !self.is_meta() && self.command() == PATCH_CHANGE
    }

    pub fn is_pressure(&self) -> bool {
        !self.is_meta() && self.command() == PRESSURE
    }

    pub fn is_pitchbend(&self) -> bool {
        !self.is_meta() && self.command() == PITCHBEND
    }

    /// Note-like data that belongs to one track (or the drum channel) when a
    /// stream is split across outputs. Everything else is broadcast.
    pub fn is_track_bound(&self) -> bool {
        self.is_note()
            || self.is_pitchbend()
            || self.is_aftertouch()
            || self.is_pressure()
            || self.is_patch_change()
    }
}

impl fmt::Display for MidiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {} ({:.3}s):", self.tick, self.seconds)?;
        for b in self.message() {
            write!(f, " {:02x}", b)?;
        }
        Ok(())
    }
}

/// Final status of a replayed stream, sent exactly once on source channel 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineStatus {
    /// Events emitted before this packet.
    pub event_count: u64,
    pub eof: bool,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(message: &[u8]) -> MidiEvent {
        MidiEvent::new(0, 0, 0.0, message).unwrap()
    }

    #[test]
    fn test_record_bounds() {
        assert!(MidiEvent::new(0, 0, 0.0, &[]).is_none());
        assert!(MidiEvent::new(0, 0, 0.0, &[0; 7]).is_none());
        assert_eq!(ev(&[0x90, 60, 100]).message(), &[0x90, 60, 100]);
    }

    #[test]
    fn test_note_classification() {
        assert!(ev(&[0x90, 60, 100]).is_note_on());
        assert!(!ev(&[0x90, 60, 0]).is_note_on());
        assert!(ev(&[0x90, 60, 0]).is_note_off());
        assert!(ev(&[0x83, 60, 0]).is_note_off());
        assert_eq!(ev(&[0x83, 60, 0]).channel(), 3);
        assert!(ev(&[0x99, 36, 90]).is_note());
        assert_eq!(ev(&[0x99, 36, 90]).channel(), DRUM_CHANNEL);
    }

    #[test]
    fn test_track_bound_categories() {
        assert!(ev(&[0xE0, 0, 64]).is_track_bound());
        assert!(ev(&[0xA0, 60, 10]).is_track_bound());
        assert!(ev(&[0xD0, 10]).is_track_bound());
        assert!(ev(&[0xC0, 5]).is_track_bound());
        assert!(!ev(&[0xB0, 7, 100]).is_track_bound());
        assert!(!ev(&[0xFF, 0x51, 0x07, 0xA1, 0x20]).is_track_bound());
    }

    #[test]
    fn test_tempo_meta() {
        let tempo = ev(&[0xFF, 0x51, 0x07, 0xA1, 0x20]);
        assert!(tempo.is_meta());
        assert!(tempo.is_tempo());
        assert_eq!(tempo.tempo_micros(), Some(500_000));
        assert!(!tempo.is_note());
        assert!(!tempo.is_pitchbend());

        let truncated = ev(&[0xFF, 0x51, 0x07]);
        assert!(!truncated.is_tempo());
        assert_eq!(truncated.tempo_micros(), None);
    }

    #[test]
    fn test_display() {
        let e = MidiEvent::new(1, 96, 0.25, &[0x90, 0x3c, 0x64]).unwrap();
        assert_eq!(e.to_string(), "tick 96 (0.250s): 90 3c 64");
    }
}
