// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::AtomError;
use crate::observability::messages::atom::{
    AtomSetupFailed, EventSourceOpened, FinalStatusSent, OutputModeSelected,
};
use crate::observability::messages::StructuredLog;
use crate::packet::{
    MidiEvent, Packet, PacketIo, PacketValue, PipelineStatus, RealtimeSourceConfig, DRUM_CHANNEL,
};
use crate::source::{EventSheet, TrackCursor};
use crate::traits::Atom;
use crate::types::{ChannelType, ConnectionBinding, NodeType, Role, SubKind};
use crate::world::{EngineHandle, TransportClock, WorldState};

/// Horizon used when the stream must drain regardless of elapsed time.
const DRAIN_HORIZON_SECS: f64 = 1e9;

/// Options read during `initialize`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReaderSettings {
    /// Stop the engine once every track has ended.
    pub close_machine: bool,
    /// Source channel that carries percussion instead of a track.
    pub drum_ch: Option<usize>,
    /// Gate on the shared transport clock instead of the atom's own time.
    pub use_global_time: bool,
    /// Drain immediately and finish with a final status packet.
    pub require_success: bool,
    /// Updates to skip after start before time starts moving.
    pub warmup_ticks: u32,
}

impl ReaderSettings {
    pub fn from_world(ws: &WorldState, source_channels: usize) -> Result<Self, AtomError> {
        let drum_ch = match ws.get_int("drum.ch", -1) {
            ch if ch < 0 => None,
            ch if (ch as usize) < source_channels => Some(ch as usize),
            ch => {
                return Err(AtomError::InvalidOption {
                    key: "drum.ch",
                    reason: format!("{} is not a source channel (0..{})", ch, source_channels),
                })
            }
        };
        let warmup_ticks = match ws.get_int("warmup.ticks", 1) {
            n if n < 0 => {
                return Err(AtomError::InvalidOption {
                    key: "warmup.ticks",
                    reason: format!("must not be negative, got {}", n),
                })
            }
            n => u32::try_from(n).unwrap_or(u32::MAX),
        };

        Ok(Self {
            close_machine: ws.get_bool("close_machine", false),
            drum_ch,
            use_global_time: ws.get_bool("use.global.time", false),
            require_success: ws.get_bool("require.success", false),
            warmup_ticks,
        })
    }
}

#[derive(Debug, Clone)]
struct Attachment {
    atom_id: String,
    slot: usize,
    engine: EngineHandle,
    transport: TransportClock,
}

/// Replays a pre-parsed event sheet, releasing each event once its timestamp
/// falls within the current horizon.
///
/// With a single bound source channel every collected event goes out on
/// channel 0. With more, output is split: note-like events go to the channel
/// matching their track (or to the drum channel by MIDI channel), everything
/// else is broadcast. Channel 0 is sent last each tick and owns the batch.
///
/// In require-success mode the atom drains at once and ends with exactly one
/// [`PipelineStatus`] on channel 0.
#[derive(Debug)]
pub struct MidiFileReaderAtom {
    node_type: NodeType,
    settings: ReaderSettings,
    attachment: Option<Attachment>,
    sheet: EventSheet,
    cursors: Vec<TrackCursor>,
    batch: Vec<MidiEvent>,
    song_secs: f64,
    warmup_left: u32,
    split_channels: bool,
    pending_final_status: bool,
    final_status_sent: bool,
    total_events_sent: u64,
    last_error: Option<String>,
}

impl MidiFileReaderAtom {
    pub const PIPE: &'static str = "midi.file.reader.pipe";
    pub const DUAL: &'static str = "midi.file.reader";
    pub const MULTI: &'static str = "midi.file.reader16";

    /// Order in, one MIDI stream out.
    pub fn pipe_type() -> NodeType {
        Self::reader_type(Self::PIPE, 1)
    }

    /// Order in, a MIDI stream plus one optional side stream out.
    pub fn dual_type() -> NodeType {
        Self::reader_type(Self::DUAL, 2)
    }

    /// Order in, a MIDI stream plus fifteen optional side streams out.
    pub fn multi_type() -> NodeType {
        Self::reader_type(Self::MULTI, 16)
    }

    fn reader_type(action: &'static str, outputs: usize) -> NodeType {
        let mut t = NodeType::new(SubKind::new(action), Role::Pipe);
        t.add_in(ChannelType::CENTER_ORDER, false);
        t.add_out(ChannelType::CENTER_MIDI, false);
        for _ in 1..outputs {
            t.add_out(ChannelType::CENTER_MIDI, true);
        }
        t
    }

    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            settings: ReaderSettings::default(),
            attachment: None,
            sheet: EventSheet::default(),
            cursors: Vec::new(),
            batch: Vec::new(),
            song_secs: 0.0,
            warmup_left: 0,
            split_channels: false,
            pending_final_status: false,
            final_status_sent: false,
            total_events_sent: 0,
            last_error: None,
        }
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn is_split(&self) -> bool {
        self.split_channels
    }

    pub fn total_events_sent(&self) -> u64 {
        self.total_events_sent
    }

    pub fn is_final_status_sent(&self) -> bool {
        self.final_status_sent
    }

    /// Every track cursor has reached the end of its events.
    pub fn is_end(&self) -> bool {
        self.cursors
            .iter()
            .zip(self.sheet.tracks())
            .all(|(cursor, track)| cursor.is_done(track))
    }

    fn atom_id(&self) -> &str {
        self.attachment
            .as_ref()
            .map(|a| a.atom_id.as_str())
            .unwrap_or(self.name())
    }

    fn clear(&mut self) {
        self.last_error = None;
        self.sheet = EventSheet::default();
        self.cursors.clear();
        self.batch.clear();
        self.song_secs = 0.0;
        self.warmup_left = 0;
        self.split_channels = false;
        self.pending_final_status = false;
        self.final_status_sent = false;
        self.total_events_sent = 0;
    }

    fn final_status_due(&self) -> bool {
        self.settings.require_success && self.pending_final_status && !self.final_status_sent
    }

    fn horizon(&self) -> f64 {
        if self.settings.require_success {
            DRAIN_HORIZON_SECS
        } else if self.settings.use_global_time {
            self.attachment
                .as_ref()
                .map(|a| a.transport.get())
                .unwrap_or(self.song_secs)
        } else {
            self.song_secs
        }
    }

    fn open(&mut self, ws: &WorldState) -> Result<(), AtomError> {
        self.clear();
        self.settings = ReaderSettings::from_world(ws, self.node_type.source().len())?;

        let filepath = ws
            .get_string("filepath")
            .filter(|p| !p.trim().is_empty())
            .ok_or(AtomError::MissingOption { key: "filepath" })?;
        let path = ws.resolve_path(&filepath);
        self.sheet = EventSheet::load(&path)?;
        self.cursors = vec![TrackCursor::new(); self.sheet.track_count()];
        self.warmup_left = self.settings.warmup_ticks;

        EventSourceOpened {
            atom_id: ws.atom_id(),
            path: &path,
            track_count: self.sheet.track_count(),
            event_count: self.sheet.event_count(),
            duration_secs: self.sheet.duration_secs(),
        }
        .log();
        self.sheet.dump();

        let attachment = Attachment {
            atom_id: ws.atom_id().to_string(),
            slot: ws.slot(),
            engine: ws.engine().clone(),
            transport: ws.transport().clone(),
        };
        attachment.engine.add_to_update_list(attachment.slot);
        self.attachment = Some(attachment);
        Ok(())
    }

    fn fill_split(&self, out: &mut PacketValue, src_ch: usize) {
        let is_drum_ch = self.settings.drum_ch == Some(src_ch);
        let events = out.midi_mut();
        events.extend(self.batch.iter().filter(|ev| {
            if !ev.is_track_bound() {
                true
            } else if is_drum_ch {
                ev.channel() == DRUM_CHANNEL
            } else {
                ev.track as usize == src_ch
            }
        }));
    }
}

impl Atom for MidiFileReaderAtom {
    fn name(&self) -> &'static str {
        self.node_type.sub.map(|s| s.as_str()).unwrap_or(Self::PIPE)
    }

    fn atom_type(&self) -> NodeType {
        self.node_type.clone()
    }

    fn initialize(&mut self, ws: &WorldState) -> Result<(), AtomError> {
        let result = self.open(ws);
        if let Err(e) = &result {
            AtomSetupFailed {
                atom_id: ws.atom_id(),
                action: self.name(),
                error: e,
            }
            .log();
            self.last_error = Some(e.to_string());
        }
        result
    }

    fn post_initialize(&mut self, binding: &ConnectionBinding) -> Result<(), AtomError> {
        // The final status only ever travels on channel 0.
        if self.settings.require_success && !binding.is_primary_source_bound() {
            let e = AtomError::InvalidOption {
                key: "require.success",
                reason: "source channel 0 carries the final status but is not connected"
                    .to_string(),
            };
            AtomSetupFailed {
                atom_id: self.atom_id(),
                action: self.name(),
                error: &e,
            }
            .log();
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        let bound_sources = binding.bound_source_count();
        self.split_channels = bound_sources > 1;
        OutputModeSelected {
            atom_id: self.atom_id(),
            bound_sources,
            split: self.split_channels,
            drum_channel: self.settings.drum_ch,
        }
        .log();
        Ok(())
    }

    fn uninitialize(&mut self) {
        if let Some(a) = self.attachment.take() {
            a.engine.remove_from_update_list(a.slot);
        }
        self.clear();
    }

    fn update(&mut self, dt: f64) {
        if self.settings.close_machine
            && self.is_end()
            && (!self.settings.require_success || self.final_status_sent)
        {
            if let Some(a) = &self.attachment {
                a.engine.set_not_running();
            }
        }

        if self.warmup_left > 0 {
            self.warmup_left -= 1;
            return;
        }

        self.song_secs += dt;
        let horizon = self.horizon();
        for (i, cursor) in self.cursors.iter_mut().enumerate() {
            cursor.collect(self.sheet.track(i), horizon, &mut self.batch);
        }

        if self.settings.require_success && !self.final_status_sent && self.is_end() {
            self.pending_final_status = true;
        }
    }

    fn is_ready(&self, io: &PacketIo) -> bool {
        let final_due = self.final_status_due();
        let has_events = !self.batch.is_empty() || final_due;
        let sink_active = io.active_sink_mask != 0 || final_due;
        let src_ready = io.full_src_mask == 0 || final_due;
        has_events && sink_active && src_ready
    }

    fn recv(&mut self, _sink_ch: usize, _packet: &Packet) -> bool {
        true
    }

    fn send(&mut self, cfg: &RealtimeSourceConfig, out: &mut PacketValue, src_ch: usize) -> bool {
        out.clear_data_type();
        let fmt = out.format();

        if self.final_status_due() && src_ch == 0 && self.batch.is_empty() {
            if !fmt.is_midi() {
                return false;
            }
            out.set_status(PipelineStatus {
                event_count: self.total_events_sent,
                eof: true,
                success: true,
            });
            self.pending_final_status = false;
            self.final_status_sent = true;
            FinalStatusSent {
                atom_id: self.atom_id(),
                event_count: self.total_events_sent,
            }
            .log();
            return true;
        }

        if !fmt.is_midi() {
            return false;
        }
        if self.batch.is_empty() {
            return true;
        }

        let batch_len = self.batch.len();
        let reset_batch = if self.split_channels {
            self.fill_split(out, src_ch);
            // Channel 0 is sent last, after every side channel has seen the batch.
            src_ch == 0
        } else {
            out.midi_mut().extend_from_slice(&self.batch);
            true
        };

        tracing::trace!(
            atom_id = self.atom_id(),
            tick = cfg.tick,
            src_ch,
            events = out.midi_events().len(),
            "midi packet filled"
        );

        if reset_batch {
            self.batch.clear();
            self.total_events_sent += batch_len as u64;
        }
        true
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConnId;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const OPEN_IO: PacketIo = PacketIo {
        active_sink_mask: 1,
        full_src_mask: 0,
    };

    fn sheet_file(yaml: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    fn world(options: &str, file: Option<&NamedTempFile>) -> WorldState {
        let mut options: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(options).unwrap();
        if let Some(file) = file {
            options.insert(
                "filepath".to_string(),
                serde_yaml::Value::String(file.path().display().to_string()),
            );
        }
        WorldState::new("reader", 0, options, EngineHandle::new(), TransportClock::new())
    }

    fn bound(node_type: &NodeType, sources: usize) -> ConnectionBinding {
        let mut b = ConnectionBinding::for_type(node_type);
        for ch in 0..sources {
            b.set_source(ConnId(ch as u32), ch, 0);
        }
        b
    }

    fn midi_out() -> PacketValue {
        PacketValue::new(ChannelType::CENTER_MIDI.into())
    }

    /// One tick of engine-style driving: returns the non-empty packets sent,
    /// highest channel first.
    fn drive(atom: &mut MidiFileReaderAtom, channels: usize, dt: f64) -> Vec<(usize, PacketValue)> {
        atom.update(dt);
        let mut sent = Vec::new();
        if !atom.is_ready(&OPEN_IO) {
            return sent;
        }
        for ch in (0..channels).rev() {
            let mut out = midi_out();
            assert!(atom.send(&RealtimeSourceConfig::default(), &mut out, ch));
            if !out.is_empty() {
                sent.push((ch, out));
            }
        }
        sent
    }

    const THREE_NOTES: &str = r#"
tracks:
  - events:
      - { tick: 0, seconds: 0.1, bytes: [0x90, 60, 100] }
      - { tick: 1, seconds: 0.5, bytes: [0x80, 60, 0] }
      - { tick: 2, seconds: 1.2, bytes: [0x90, 62, 100] }
"#;

    #[test]
    fn test_require_success_drains_then_sends_final_status_once() {
        let file = sheet_file(THREE_NOTES);
        let ws = world("require.success: true", Some(&file));
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        atom.initialize(&ws).unwrap();
        atom.post_initialize(&bound(&atom.atom_type(), 1)).unwrap();
        assert!(ws.engine().is_in_update_list(0));

        // Warm-up tick moves nothing.
        assert!(drive(&mut atom, 1, 0.01).is_empty());

        let sent = drive(&mut atom, 1, 0.01);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.midi_events().len(), 3);

        let sent = drive(&mut atom, 1, 0.01);
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].1.status(),
            Some(&PipelineStatus {
                event_count: 3,
                eof: true,
                success: true
            })
        );

        for _ in 0..3 {
            assert!(drive(&mut atom, 1, 0.01).is_empty());
            let mut out = midi_out();
            assert!(atom.send(&RealtimeSourceConfig::default(), &mut out, 0));
            assert!(out.is_empty());
        }
        assert!(atom.is_final_status_sent());
    }

    #[test]
    fn test_final_status_overrides_backpressure_and_inactive_sinks() {
        let file = sheet_file(THREE_NOTES);
        let blocked = PacketIo {
            active_sink_mask: 0,
            full_src_mask: 1,
        };

        let mut plain = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        plain.initialize(&world("warmup.ticks: 0", Some(&file))).unwrap();
        plain.update(2.0);
        assert!(plain.is_end());
        assert!(!plain.is_ready(&blocked));
        assert!(plain.is_ready(&OPEN_IO));

        let mut strict = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        strict
            .initialize(&world("require.success: true\nwarmup.ticks: 0", Some(&file)))
            .unwrap();
        strict.update(0.01);
        assert!(strict.is_ready(&blocked));
    }

    #[test]
    fn test_local_time_gating_and_warmup() {
        let file = sheet_file(THREE_NOTES);
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        atom.initialize(&world("warmup.ticks: 2", Some(&file))).unwrap();
        atom.post_initialize(&bound(&atom.atom_type(), 1)).unwrap();

        assert!(drive(&mut atom, 1, 0.3).is_empty());
        assert!(drive(&mut atom, 1, 0.3).is_empty());

        let sent = drive(&mut atom, 1, 0.3);
        assert_eq!(sent[0].1.midi_events().len(), 1);
        assert!(drive(&mut atom, 1, 0.0).is_empty());

        let sent = drive(&mut atom, 1, 0.7);
        let secs: Vec<f64> = sent[0].1.midi_events().iter().map(|e| e.seconds).collect();
        assert_eq!(secs, vec![0.5]);
        assert_eq!(atom.total_events_sent(), 2);
        assert!(!atom.is_end());
    }

    #[test]
    fn test_global_time_follows_transport() {
        let file = sheet_file(THREE_NOTES);
        let ws = world("use.global.time: true\nwarmup.ticks: 0", Some(&file));
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        atom.initialize(&ws).unwrap();
        atom.post_initialize(&bound(&atom.atom_type(), 1)).unwrap();

        // Local time would reach 2.0 but the transport is still at 0.
        assert!(drive(&mut atom, 1, 2.0).is_empty());

        ws.transport().set(0.6);
        let sent = drive(&mut atom, 1, 0.0);
        assert_eq!(sent[0].1.midi_events().len(), 2);
    }

    #[test]
    fn test_close_machine_stops_engine_after_final_status() {
        let file = sheet_file(THREE_NOTES);
        let ws = world(
            "require.success: true\nclose_machine: true\nwarmup.ticks: 0",
            Some(&file),
        );
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        atom.initialize(&ws).unwrap();
        atom.post_initialize(&bound(&atom.atom_type(), 1)).unwrap();

        drive(&mut atom, 1, 0.01);
        assert!(ws.engine().is_running());
        drive(&mut atom, 1, 0.01);
        assert!(atom.is_final_status_sent());
        assert!(ws.engine().is_running());
        drive(&mut atom, 1, 0.01);
        assert!(!ws.engine().is_running());
    }

    #[test]
    fn test_split_broadcasts_meta_and_routes_notes_by_track() {
        let file = sheet_file(
            r#"
tracks:
  - events:
      - { tick: 0, seconds: 0.0, bytes: [0x90, 60, 100] }
  - events:
      - { tick: 0, seconds: 0.0, bytes: [0xFF, 0x51, 0x07, 0xA1, 0x20] }
"#,
        );
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::dual_type());
        atom.initialize(&world("warmup.ticks: 0", Some(&file))).unwrap();
        atom.post_initialize(&bound(&atom.atom_type(), 2)).unwrap();
        assert!(atom.is_split());

        let sent = drive(&mut atom, 2, 0.01);
        assert_eq!(sent.len(), 2);
        let (ch1, side) = &sent[0];
        let (ch0, main) = &sent[1];
        assert_eq!((*ch1, *ch0), (1, 0));

        assert_eq!(side.midi_events().len(), 1);
        assert!(side.midi_events()[0].is_tempo());

        assert_eq!(main.midi_events().len(), 2);
        assert!(main.midi_events().iter().any(|e| e.is_note_on() && e.track == 0));
        assert!(main.midi_events().iter().any(|e| e.is_tempo()));

        assert_eq!(atom.total_events_sent(), 2);
    }

    #[test]
    fn test_drum_channel_filters_by_midi_channel() {
        let file = sheet_file(
            r#"
tracks:
  - events:
      - { tick: 0, seconds: 0.0, bytes: [0x99, 36, 100] }
      - { tick: 0, seconds: 0.0, bytes: [0x90, 60, 100] }
      - { tick: 0, seconds: 0.0, bytes: [0xB0, 7, 90] }
"#,
        );
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::dual_type());
        atom.initialize(&world("warmup.ticks: 0\ndrum.ch: 1", Some(&file)))
            .unwrap();
        atom.post_initialize(&bound(&atom.atom_type(), 2)).unwrap();

        let sent = drive(&mut atom, 2, 0.01);
        let drums: Vec<u8> = sent[0].1.midi_events().iter().map(|e| e.status()).collect();
        assert_eq!(drums, vec![0x99, 0xB0]);
        // Track 0 owns both notes on the main channel.
        assert_eq!(sent[1].1.midi_events().len(), 3);
    }

    #[test]
    fn test_send_rejects_non_midi_format() {
        let file = sheet_file(THREE_NOTES);
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        atom.initialize(&world("warmup.ticks: 0\nrequire.success: true", Some(&file)))
            .unwrap();
        atom.update(0.01);

        let mut out = PacketValue::new(ChannelType::CENTER_AUDIO.into());
        assert!(!atom.send(&RealtimeSourceConfig::default(), &mut out, 0));
        assert!(out.is_empty());
        assert_eq!(atom.total_events_sent(), 0);
    }

    #[test]
    fn test_recv_always_accepts() {
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        let packet = Arc::new(PacketValue::new(ChannelType::CENTER_ORDER.into()));
        assert!(atom.recv(0, &packet));
    }

    #[test]
    fn test_initialize_errors() {
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::pipe_type());
        let err = atom.initialize(&world("{}", None)).unwrap_err();
        assert!(matches!(err, AtomError::MissingOption { key: "filepath" }));
        assert_eq!(
            atom.last_error(),
            Some("'filepath' argument is required, but not given")
        );

        let err = atom
            .initialize(&world("filepath: /no/such/song.yaml", None))
            .unwrap_err();
        assert!(err.to_string().starts_with("file does not exist"));

        let file = sheet_file(THREE_NOTES);
        let err = atom
            .initialize(&world("drum.ch: 4", Some(&file)))
            .unwrap_err();
        assert!(matches!(err, AtomError::InvalidOption { key: "drum.ch", .. }));
    }

    #[test]
    fn test_require_success_needs_primary_output() {
        let file = sheet_file(THREE_NOTES);
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::dual_type());
        atom.initialize(&world("require.success: true", Some(&file)))
            .unwrap();

        let mut side_only = ConnectionBinding::for_type(&atom.atom_type());
        side_only.set_source(ConnId(0), 1, 0);
        let err = atom.post_initialize(&side_only).unwrap_err();
        assert!(matches!(err, AtomError::InvalidOption { key: "require.success", .. }));
        assert!(atom.last_error().is_some_and(|m| m.contains("source channel 0")));

        // Without require.success a side-only wiring is fine.
        let mut plain = MidiFileReaderAtom::new(MidiFileReaderAtom::dual_type());
        plain.initialize(&world("{}", Some(&file))).unwrap();
        plain.post_initialize(&side_only).unwrap();
        assert!(!plain.is_split());
    }

    #[test]
    fn test_uninitialize_leaves_update_list() {
        let file = sheet_file(THREE_NOTES);
        let ws = world("{}", Some(&file));
        let mut atom = MidiFileReaderAtom::new(MidiFileReaderAtom::multi_type());
        atom.initialize(&ws).unwrap();
        assert!(ws.engine().is_in_update_list(0));
        atom.uninitialize();
        assert!(!ws.engine().is_in_update_list(0));
        assert_eq!(atom.last_error(), None);
    }

    #[test]
    fn test_reader_types() {
        assert_eq!(MidiFileReaderAtom::pipe_type().source().len(), 1);
        assert_eq!(MidiFileReaderAtom::dual_type().source().len(), 2);
        let multi = MidiFileReaderAtom::multi_type();
        assert_eq!(multi.source().len(), 16);
        assert!(multi.is_valid());
        assert!(!multi.is_source_channel_optional(0));
        assert!(multi.is_source_channel_optional(15));
    }
}
