// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! What an atom sees of the world around it: its configuration view, the
//! shared transport clock and a handle back to the engine.

mod clock;
mod handle;
mod state;

pub use clock::TransportClock;
pub use handle::EngineHandle;
pub use state::WorldState;
