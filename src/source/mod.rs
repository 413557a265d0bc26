// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Source of pre-parsed, timestamped MIDI events and the cursor used to replay
//! them against a moving time horizon.

mod event_sheet;
mod timeline;

pub use event_sheet::{EventSheet, DEFAULT_TEMPO_MICROS, DEFAULT_TICKS_PER_QUARTER};
pub use timeline::TrackCursor;
