// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for channel binding and graph wiring.

use thiserror::Error;

use crate::types::{ChannelType, ConnId};

use super::ValidationError;

/// Failures of the checked [`ConnectionBinding`](crate::types::ConnectionBinding) setters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("binding has not been realized against a node type")]
    NotRealized,
    #[error("sink channel {channel} out of range ({count} channels)")]
    SinkChannelOutOfRange { channel: usize, count: usize },
    #[error("source channel {channel} out of range ({count} channels)")]
    SourceChannelOutOfRange { channel: usize, count: usize },
}

/// Errors raised while turning a configuration into a wired graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Graph config is invalid: {}", super::format_all(.0))]
    Validation(Vec<ValidationError>),

    #[error("Atom '{atom_id}' uses unknown action '{action}'")]
    UnknownAction { atom_id: String, action: String },

    #[error("Connection {conn}: {side} channel {channel} of atom '{atom_id}' out of range ({count} channels)")]
    ChannelOutOfRange {
        conn: ConnId,
        atom_id: String,
        side: &'static str,
        channel: usize,
        count: usize,
    },

    #[error("Connection {conn}: cannot wire {source_type} from '{from}' into {sink_type} on '{to}'")]
    ChannelTypeMismatch {
        conn: ConnId,
        from: String,
        source_type: ChannelType,
        to: String,
        sink_type: ChannelType,
    },

    #[error("Connection {conn}: sink channel {channel} of atom '{atom_id}' is already bound")]
    SinkAlreadyBound {
        conn: ConnId,
        atom_id: String,
        channel: usize,
    },

    #[error("Connection {conn}: source channel {channel} of atom '{atom_id}' is already bound")]
    SourceAlreadyBound {
        conn: ConnId,
        atom_id: String,
        channel: usize,
    },

    #[error("Atom '{atom_id}' is missing required connections ({node_type})")]
    Incomplete { atom_id: String, node_type: String },

    #[error(transparent)]
    Binding(#[from] BindingError),
}
