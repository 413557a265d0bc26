// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph configuration validation.
//!
//! This module contains message types for logging events related to:
//! * Cyclic link detection
//! * Links naming atoms that do not exist
//! * Duplicate atom ids
//! * Engine option range checks

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cycle found among links.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use atomflow::observability::messages::validation::CyclicLinkDetected;
///
/// let cycle = vec!["a", "b", "a"];
/// let msg = CyclicLinkDetected { cycle: &cycle };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicLinkDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicLinkDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic link detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicLinkDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "cyclic_link",
            name = name,
            cycle = self.cycle.join(" -> "),
        )
    }
}

/// A link names an atom id that is not declared.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnresolvedLinkEndpoint<'a> {
    pub link_index: usize,
    pub atom_id: &'a str,
}

impl Display for UnresolvedLinkEndpoint<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Link {} references unknown atom '{}'",
            self.link_index, self.atom_id
        )
    }
}

impl StructuredLog for UnresolvedLinkEndpoint<'_> {
    fn log(&self) {
        tracing::error!(
            link_index = self.link_index,
            atom_id = self.atom_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "unresolved_link",
            name = name,
            link_index = self.link_index,
            atom_id = self.atom_id,
        )
    }
}

/// Two atoms share an id.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateAtomId<'a> {
    pub atom_id: &'a str,
}

impl Display for DuplicateAtomId<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate atom ID: '{}'", self.atom_id)
    }
}

impl StructuredLog for DuplicateAtomId<'_> {
    fn log(&self) {
        tracing::error!(atom_id = self.atom_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "duplicate_atom_id",
            name = name,
            atom_id = self.atom_id,
        )
    }
}

/// An engine option is out of range.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct InvalidEngineOption<'a> {
    pub option: &'a str,
    pub reason: &'a str,
}

impl Display for InvalidEngineOption<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid engine option '{}': {}", self.option, self.reason)
    }
}

impl StructuredLog for InvalidEngineOption<'_> {
    fn log(&self) {
        tracing::error!(option = self.option, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "invalid_engine_option",
            name = name,
            option = self.option,
        )
    }
}

/// Validation pass finished.
///
/// # Log Level
/// `info!` when clean, `error!` when errors were found
pub struct ValidationCompleted {
    pub atom_count: usize,
    pub link_count: usize,
    pub error_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.error_count == 0 {
            write!(
                f,
                "Configuration validation completed successfully: {} atoms, {} links",
                self.atom_count, self.link_count
            )
        } else {
            write!(
                f,
                "Configuration validation failed with {} errors",
                self.error_count
            )
        }
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        if self.error_count == 0 {
            tracing::info!(
                atom_count = self.atom_count,
                link_count = self.link_count,
                "{}", self
            );
        } else {
            tracing::error!(error_count = self.error_count, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "validation",
            name = name,
            atom_count = self.atom_count,
            link_count = self.link_count,
            error_count = self.error_count,
        )
    }
}
