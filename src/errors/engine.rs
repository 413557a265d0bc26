// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::AtomError;

/// Errors registering atom kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Atom action '{action}' declares an invalid node type: {node_type}")]
    InvalidNodeType { action: String, node_type: String },

    #[error("Atom action '{action}' is already registered")]
    DuplicateAction { action: String },
}

/// Errors from the tick driver lifecycle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine has already been started")]
    AlreadyStarted,

    #[error("Engine has not been started")]
    NotStarted,

    #[error("Atom '{atom_id}' failed to initialize: {source}")]
    AtomInitialize {
        atom_id: String,
        #[source]
        source: AtomError,
    },

    #[error("Atom '{atom_id}' failed post-initialize: {source}")]
    AtomPostInitialize {
        atom_id: String,
        #[source]
        source: AtomError,
    },
}
