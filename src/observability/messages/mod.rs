// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `engine` - graph building and tick loop lifecycle
//! * `atom` - atom setup, stream output and verification
//! * `validation` - configuration validation errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use atomflow::observability::messages::engine::EngineStarted;
//! use atomflow::observability::messages::StructuredLog;
//!
//! let msg = EngineStarted {
//!     atom_count: 2,
//!     link_count: 1,
//!     tick_rate_hz: 100.0,
//! };
//!
//! msg.log();
//! let _span = msg.span("run").entered();
//! ```

use tracing::Span;

pub mod atom;
pub mod engine;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its documented level.
    fn log(&self);

    /// Open a span carrying the same fields.
    fn span(&self, name: &str) -> Span;
}
