// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Diagnostic and operational log lines are defined once, as message structs
//! with a `Display` implementation and a [`StructuredLog`](messages::StructuredLog)
//! implementation that emits them at their documented level with typed fields.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - graph building and tick loop lifecycle
//! * `messages::atom` - atom setup, stream output and verification
//! * `messages::validation` - graph configuration validation
//!
//! # Usage
//!
//! ```rust
//! use atomflow::observability::messages::atom::AtomSetupFailed;
//! use atomflow::observability::messages::StructuredLog;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
//! AtomSetupFailed {
//!     atom_id: "reader",
//!     action: "midi.file.reader.pipe",
//!     error: &error,
//! }
//! .log();
//! ```

pub mod messages;
