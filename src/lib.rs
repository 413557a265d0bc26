// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // built-in atoms
pub mod config;        // graph config + registry
pub mod engine;        // graph builder and tick driver
pub mod errors;        // error handling
pub mod observability;
pub mod packet;        // packets and MIDI records
pub mod source;        // pre-parsed event sheets
pub mod traits;        // the Atom protocol
pub mod types;         // typed node interfaces
pub mod world;         // engine services handed to atoms
