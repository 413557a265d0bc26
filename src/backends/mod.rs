// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Atom backend implementations.
//!
//! # Local Backend
//! In-process atoms that replay and consume MIDI streams:
//! - **MidiFileReaderAtom**: time-gated replay of an event sheet, optionally
//!   split across side channels
//! - **MidiNullAtom**: counting sink that verifies the end-of-stream status
//!
//! # Architecture
//!
//! ```text
//! Configuration → AtomRegistry (filled by LocalAtomFactory) → AtomNode → Engine
//! ```
//!
//! # Example
//! ```rust
//! use atomflow::backends::local::LocalAtomFactory;
//! use atomflow::traits::Atom;
//!
//! let registry = LocalAtomFactory::builtin_registry()?;
//! let reader = registry.create("midi.file.reader.pipe").expect("built in");
//! assert_eq!(reader.atom_type().source().len(), 1);
//! # Ok::<(), atomflow::errors::RegistryError>(())
//! ```

pub mod local;
