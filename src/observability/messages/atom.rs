// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for atom lifecycle and stream events.
//!
//! This module contains message types for logging events related to:
//! * Atom setup success and failure
//! * Output distribution decisions made after wiring
//! * End-of-stream status delivery and verification

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An atom could not complete `initialize` or `post_initialize`.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use atomflow::observability::messages::atom::AtomSetupFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
/// let msg = AtomSetupFailed {
///     atom_id: "reader",
///     action: "midi.file.reader",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct AtomSetupFailed<'a> {
    pub atom_id: &'a str,
    pub action: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for AtomSetupFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Atom '{}' ({}) setup failed: {}",
            self.atom_id, self.action, self.error
        )
    }
}

impl StructuredLog for AtomSetupFailed<'_> {
    fn log(&self) {
        tracing::error!(
            atom_id = self.atom_id,
            action = self.action,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "atom_setup_failed",
            span_name = name,
            atom_id = self.atom_id,
            action = self.action,
        )
    }
}

/// An event source was opened and time-analyzed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EventSourceOpened<'a> {
    pub atom_id: &'a str,
    pub path: &'a std::path::Path,
    pub track_count: usize,
    pub event_count: usize,
    pub duration_secs: f64,
}

impl Display for EventSourceOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Atom '{}' opened '{}': {} tracks, {} events, {:.3}s",
            self.atom_id,
            self.path.display(),
            self.track_count,
            self.event_count,
            self.duration_secs
        )
    }
}

impl StructuredLog for EventSourceOpened<'_> {
    fn log(&self) {
        tracing::info!(
            atom_id = self.atom_id,
            path = %self.path.display(),
            track_count = self.track_count,
            event_count = self.event_count,
            duration_secs = self.duration_secs,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "event_source",
            span_name = name,
            atom_id = self.atom_id,
            path = %self.path.display(),
        )
    }
}

/// Output distribution chosen once the atom's wiring is final.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct OutputModeSelected<'a> {
    pub atom_id: &'a str,
    pub bound_sources: usize,
    pub split: bool,
    pub drum_channel: Option<usize>,
}

impl Display for OutputModeSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mode = if self.split { "split" } else { "unsplit" };
        write!(
            f,
            "Atom '{}' sends {} across {} bound source channels",
            self.atom_id, mode, self.bound_sources
        )?;
        if let Some(ch) = self.drum_channel {
            write!(f, " (drums on channel {})", ch)?;
        }
        Ok(())
    }
}

impl StructuredLog for OutputModeSelected<'_> {
    fn log(&self) {
        tracing::debug!(
            atom_id = self.atom_id,
            bound_sources = self.bound_sources,
            split = self.split,
            drum_channel = ?self.drum_channel,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "output_mode",
            span_name = name,
            atom_id = self.atom_id,
            split = self.split,
        )
    }
}

/// The one-shot end-of-stream status left the atom.
///
/// # Log Level
/// `info!` - Important operational event
pub struct FinalStatusSent<'a> {
    pub atom_id: &'a str,
    pub event_count: u64,
}

impl Display for FinalStatusSent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Atom '{}' reached end of stream after {} events",
            self.atom_id, self.event_count
        )
    }
}

impl StructuredLog for FinalStatusSent<'_> {
    fn log(&self) {
        tracing::info!(
            atom_id = self.atom_id,
            event_count = self.event_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "final_status",
            span_name = name,
            atom_id = self.atom_id,
            event_count = self.event_count,
        )
    }
}

/// A consumer compared the final status against what it actually received.
///
/// # Log Level
/// `info!` when the counts agree, `error!` otherwise
pub struct StreamVerified<'a> {
    pub atom_id: &'a str,
    pub expected: u64,
    pub received: u64,
    pub ok: bool,
}

impl Display for StreamVerified<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.ok {
            write!(f, "Atom '{}': success! {} events received", self.atom_id, self.received)
        } else {
            write!(
                f,
                "Atom '{}': failure: expected {} events, received {}",
                self.atom_id, self.expected, self.received
            )
        }
    }
}

impl StructuredLog for StreamVerified<'_> {
    fn log(&self) {
        if self.ok {
            tracing::info!(
                atom_id = self.atom_id,
                expected = self.expected,
                received = self.received,
                "{}", self
            );
        } else {
            tracing::error!(
                atom_id = self.atom_id,
                expected = self.expected,
                received = self.received,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stream_verified",
            span_name = name,
            atom_id = self.atom_id,
            ok = self.ok,
        )
    }
}

/// A batch of events arrived at a consumer.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct EventsReceived<'a> {
    pub atom_id: &'a str,
    pub sink_ch: usize,
    pub count: usize,
}

impl Display for EventsReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Atom '{}' received {} midi events on sink {}",
            self.atom_id, self.count, self.sink_ch
        )
    }
}

impl StructuredLog for EventsReceived<'_> {
    fn log(&self) {
        tracing::debug!(
            atom_id = self.atom_id,
            sink_ch = self.sink_ch,
            count = self.count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "events_received",
            span_name = name,
            atom_id = self.atom_id,
            sink_ch = self.sink_ch,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_verified_display() {
        let ok = StreamVerified {
            atom_id: "sink",
            expected: 3,
            received: 3,
            ok: true,
        };
        assert_eq!(ok.to_string(), "Atom 'sink': success! 3 events received");

        let bad = StreamVerified {
            atom_id: "sink",
            expected: 3,
            received: 2,
            ok: false,
        };
        assert_eq!(
            bad.to_string(),
            "Atom 'sink': failure: expected 3 events, received 2"
        );
    }

    #[test]
    fn test_output_mode_display() {
        let msg = OutputModeSelected {
            atom_id: "reader",
            bound_sources: 2,
            split: true,
            drum_channel: Some(1),
        };
        assert_eq!(
            msg.to_string(),
            "Atom 'reader' sends split across 2 bound source channels (drums on channel 1)"
        );
    }
}
