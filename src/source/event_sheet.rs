// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::SheetError;
use crate::packet::MidiEvent;

pub const DEFAULT_TICKS_PER_QUARTER: u32 = 480;
/// 120 bpm.
pub const DEFAULT_TEMPO_MICROS: u32 = 500_000;

#[derive(Debug, Deserialize)]
struct SheetFile {
    #[serde(default = "default_ticks_per_quarter")]
    ticks_per_quarter: u32,
    #[serde(default)]
    tracks: Vec<TrackFile>,
}

#[derive(Debug, Deserialize)]
struct TrackFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    events: Vec<EventFile>,
}

#[derive(Debug, Deserialize)]
struct EventFile {
    tick: u32,
    #[serde(default)]
    seconds: Option<f64>,
    bytes: Vec<u8>,
}

fn default_ticks_per_quarter() -> u32 {
    DEFAULT_TICKS_PER_QUARTER
}

/// Pre-parsed tracks of timestamped events.
///
/// Loaded from a YAML or JSON file:
///
/// ```yaml
/// ticks_per_quarter: 480
/// tracks:
///   - name: piano
///     events:
///       - { tick: 0, bytes: [0x90, 60, 100] }
///       - { tick: 480, bytes: [0x80, 60, 0] }
/// ```
///
/// Events without an explicit `seconds` are placed on the time axis using the
/// tempo meta events (`FF 51 tt tt tt`) found in any track. Every track is
/// sorted by tick, so timestamps within a track never decrease.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventSheet {
    ticks_per_quarter: u32,
    names: Vec<Option<String>>,
    tracks: Vec<Vec<MidiEvent>>,
}

impl EventSheet {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SheetError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let parse_err = |reason: String| SheetError::Parse {
            path: path.to_path_buf(),
            reason,
        };
        let file: SheetFile = match ext.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| parse_err(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&text).map_err(|e| parse_err(e.to_string()))?,
            _ => {
                return Err(SheetError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        Self::from_file(file, path)
    }

    /// Parses sheet YAML held in memory.
    pub fn from_yaml_str(text: &str) -> Result<Self, SheetError> {
        let path = PathBuf::from("<inline>");
        let file: SheetFile = serde_yaml::from_str(text).map_err(|e| SheetError::Parse {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::from_file(file, &path)
    }

    /// Builds a sheet from already-timed tracks. Each track is sorted by time,
    /// then tick.
    pub fn from_tracks(ticks_per_quarter: u32, mut tracks: Vec<Vec<MidiEvent>>) -> Self {
        for track in &mut tracks {
            track.sort_by(|a, b| a.seconds.total_cmp(&b.seconds).then(a.tick.cmp(&b.tick)));
        }
        Self {
            ticks_per_quarter,
            names: vec![None; tracks.len()],
            tracks,
        }
    }

    fn from_file(file: SheetFile, path: &Path) -> Result<Self, SheetError> {
        if file.ticks_per_quarter == 0 {
            return Err(SheetError::Parse {
                path: path.to_path_buf(),
                reason: "ticks_per_quarter must be positive".to_string(),
            });
        }

        let mut names = Vec::with_capacity(file.tracks.len());
        let mut tracks = Vec::with_capacity(file.tracks.len());
        let mut explicit = Vec::with_capacity(file.tracks.len());
        for (t, track) in file.tracks.into_iter().enumerate() {
            let mut events = Vec::with_capacity(track.events.len());
            let mut timed = Vec::with_capacity(track.events.len());
            for (i, ev) in track.events.into_iter().enumerate() {
                if ev.bytes.is_empty() {
                    return Err(SheetError::EmptyMessage { track: t, index: i });
                }
                // Text metas and sysex do not fit a record; the stream plays without them.
                let Some(record) = MidiEvent::new(t as u16, ev.tick, 0.0, &ev.bytes) else {
                    tracing::warn!(
                        track = t,
                        index = i,
                        tick = ev.tick,
                        len = ev.bytes.len(),
                        "skipping event of {} bytes, records hold at most {}",
                        ev.bytes.len(),
                        MidiEvent::MAX_BYTES
                    );
                    continue;
                };
                events.push(record);
                timed.push(ev.seconds);
            }
            names.push(track.name);
            tracks.push(events);
            explicit.push(timed);
        }

        let tempo_map = tempo_map(&tracks);
        for (t, (track, timed)) in tracks.iter_mut().zip(explicit).enumerate() {
            for (ev, seconds) in track.iter_mut().zip(timed) {
                ev.seconds = seconds
                    .unwrap_or_else(|| seconds_at(&tempo_map, file.ticks_per_quarter, ev.tick));
            }
            track.sort_by_key(|e| e.tick);
            check_monotonic(t, track)?;
        }

        Ok(Self {
            ticks_per_quarter: file.ticks_per_quarter,
            names,
            tracks,
        })
    }

    pub fn ticks_per_quarter(&self) -> u32 {
        self.ticks_per_quarter
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Panics if `i` is not a track index.
    pub fn track(&self, i: usize) -> &[MidiEvent] {
        &self.tracks[i]
    }

    pub fn tracks(&self) -> &[Vec<MidiEvent>] {
        &self.tracks
    }

    pub fn track_name(&self, i: usize) -> Option<&str> {
        self.names.get(i).and_then(|n| n.as_deref())
    }

    pub fn event_count(&self) -> usize {
        self.tracks.iter().map(Vec::len).sum()
    }

    /// Timestamp of the last event in any track.
    pub fn duration_secs(&self) -> f64 {
        self.tracks
            .iter()
            .filter_map(|t| t.last())
            .map(|e| e.seconds)
            .fold(0.0, f64::max)
    }

    /// Logs every track and event at debug level.
    pub fn dump(&self) {
        tracing::debug!(
            tracks = self.track_count(),
            events = self.event_count(),
            ticks_per_quarter = self.ticks_per_quarter,
            "event sheet: {} tracks, {} events",
            self.track_count(),
            self.event_count()
        );
        for (i, track) in self.tracks.iter().enumerate() {
            tracing::debug!(
                track = i,
                name = self.track_name(i).unwrap_or(""),
                events = track.len(),
                "track {}",
                i
            );
            for ev in track {
                tracing::debug!(track = i, "  {}", ev);
            }
        }
    }
}

/// Replay needs time to be non-decreasing along a track once it is in tick order.
fn check_monotonic(track: usize, events: &[MidiEvent]) -> Result<(), SheetError> {
    for pair in events.windows(2) {
        if pair[1].seconds < pair[0].seconds {
            return Err(SheetError::TimeGoesBackwards {
                track,
                tick: pair[1].tick,
                seconds: pair[1].seconds,
                previous: pair[0].seconds,
            });
        }
    }
    Ok(())
}

/// Tempo changes across all tracks as `(tick, micros_per_quarter)`, ordered by tick.
fn tempo_map(tracks: &[Vec<MidiEvent>]) -> Vec<(u32, u32)> {
    let mut map: Vec<(u32, u32)> = tracks
        .iter()
        .flatten()
        .filter_map(|e| e.tempo_micros().map(|us| (e.tick, us)))
        .collect();
    map.sort_by_key(|&(tick, _)| tick);
    map
}

fn seconds_at(tempo_map: &[(u32, u32)], ticks_per_quarter: u32, tick: u32) -> f64 {
    let per_tick = |us: u32| us as f64 / (ticks_per_quarter as f64 * 1_000_000.0);
    let mut secs = 0.0;
    let mut last_tick = 0;
    let mut tempo = DEFAULT_TEMPO_MICROS;
    for &(at, us) in tempo_map {
        if at >= tick {
            break;
        }
        secs += (at - last_tick) as f64 * per_tick(tempo);
        last_tick = at;
        tempo = us;
    }
    secs + (tick - last_tick) as f64 * per_tick(tempo)
}
