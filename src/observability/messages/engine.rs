// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph building and tick loop lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Graph wiring from configuration
//! * Engine start and stop
//! * Packets refused by an atom during a tick

use crate::observability::messages::StructuredLog;
use crate::types::ChannelType;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Graph wired and ready to start.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use atomflow::observability::messages::engine::GraphBuilt;
///
/// let msg = GraphBuilt {
///     atom_count: 2,
///     link_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct GraphBuilt {
    pub atom_count: usize,
    pub link_count: usize,
}

impl Display for GraphBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph built: {} atoms, {} links",
            self.atom_count, self.link_count
        )
    }
}

impl StructuredLog for GraphBuilt {
    fn log(&self) {
        tracing::info!(
            atom_count = self.atom_count,
            link_count = self.link_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "graph_built",
            span_name = name,
            atom_count = self.atom_count,
            link_count = self.link_count,
        )
    }
}

/// Every atom initialized; the tick loop is about to run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EngineStarted {
    pub atom_count: usize,
    pub link_count: usize,
    pub tick_rate_hz: f64,
}

impl Display for EngineStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine started: {} atoms, {} links at {} Hz",
            self.atom_count, self.link_count, self.tick_rate_hz
        )
    }
}

impl StructuredLog for EngineStarted {
    fn log(&self) {
        tracing::info!(
            atom_count = self.atom_count,
            link_count = self.link_count,
            tick_rate_hz = self.tick_rate_hz,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine",
            span_name = name,
            atom_count = self.atom_count,
            tick_rate_hz = self.tick_rate_hz,
        )
    }
}

/// Tick loop finished and every atom was uninitialized.
///
/// # Log Level
/// `info!` on success, `error!` when an atom reported a failure
pub struct EngineStopped<'a> {
    pub ticks: u64,
    pub transport_secs: f64,
    pub failure: Option<&'a str>,
}

impl Display for EngineStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine stopped after {} ticks ({:.3}s transport)",
            self.ticks, self.transport_secs
        )?;
        if let Some(failure) = self.failure {
            write!(f, ": {}", failure)?;
        }
        Ok(())
    }
}

impl StructuredLog for EngineStopped<'_> {
    fn log(&self) {
        match self.failure {
            None => tracing::info!(
                ticks = self.ticks,
                transport_secs = self.transport_secs,
                "{}", self
            ),
            Some(failure) => tracing::error!(
                ticks = self.ticks,
                transport_secs = self.transport_secs,
                failure,
                "{}", self
            ),
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine_stopped",
            span_name = name,
            ticks = self.ticks,
            failed = self.failure.is_some(),
        )
    }
}

/// An atom refused to fill a packet of the channel's format.
///
/// # Log Level
/// `warn!` - Recoverable, local to the tick
pub struct SendRejected<'a> {
    pub atom_id: &'a str,
    pub src_ch: usize,
    pub channel_type: ChannelType,
}

impl Display for SendRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Atom '{}' rejected send on source {} ({})",
            self.atom_id, self.src_ch, self.channel_type
        )
    }
}

impl StructuredLog for SendRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            atom_id = self.atom_id,
            src_ch = self.src_ch,
            channel_type = %self.channel_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "send_rejected",
            span_name = name,
            atom_id = self.atom_id,
            src_ch = self.src_ch,
        )
    }
}

/// An atom rejected an inbound packet.
///
/// # Log Level
/// `warn!` - Recoverable, local to the tick
pub struct RecvRejected<'a> {
    pub atom_id: &'a str,
    pub sink_ch: usize,
}

impl Display for RecvRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Atom '{}' rejected packet on sink {}",
            self.atom_id, self.sink_ch
        )
    }
}

impl StructuredLog for RecvRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            atom_id = self.atom_id,
            sink_ch = self.sink_ch,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "recv_rejected",
            span_name = name,
            atom_id = self.atom_id,
            sink_ch = self.sink_ch,
        )
    }
}
