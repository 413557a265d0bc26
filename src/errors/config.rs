// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Structural problems found while validating a graph configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Links form a cycle between atoms
    #[error("Cyclic link detected: {}", .cycle.join(" -> "))]
    CyclicLink {
        /// The cycle path, first atom repeated at the end
        cycle: Vec<String>,
    },
    /// A link names an atom that is not declared
    #[error("Link {link_index} references atom '{atom_id}' which does not exist")]
    UnresolvedLinkEndpoint { link_index: usize, atom_id: String },
    /// Two atoms share an id
    #[error("Duplicate atom ID: '{atom_id}'")]
    DuplicateAtomId { atom_id: String },
    /// An engine option is outside its legal range
    #[error("Invalid engine option '{option}': {reason}")]
    InvalidEngineOption { option: &'static str, reason: String },
}

/// Errors loading a graph configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported config format for '{}' (expected .yaml, .yml or .toml)", .path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("Config validation failed: {}", super::format_all(.0))]
    Invalid(Vec<ValidationError>),
}
