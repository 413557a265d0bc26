use crate::packet::MidiEvent;

/// Monotonic read position into one track.
///
/// Events are only handed out once their timestamp is within the horizon and
/// the position only moves past events actually collected, so no event is ever
/// skipped or returned twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackCursor {
    pos: usize,
}

impl TrackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_done(&self, events: &[MidiEvent]) -> bool {
        self.pos >= events.len()
    }

    /// Appends every pending event with `seconds <= horizon` to `out`.
    /// Returns how many were collected.
    pub fn collect(&mut self, events: &[MidiEvent], horizon: f64, out: &mut Vec<MidiEvent>) -> usize {
        let start = self.pos;
        while let Some(ev) = events.get(self.pos) {
            if ev.seconds > horizon {
                break;
            }
            out.push(*ev);
            self.pos += 1;
        }
        self.pos - start
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }
}
