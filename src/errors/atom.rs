// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading an event sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("unsupported event sheet format for '{}' (expected .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("track {track} event {index}: empty message")]
    EmptyMessage { track: usize, index: usize },

    #[error("track {track} tick {tick}: time {seconds}s is earlier than the preceding {previous}s")]
    TimeGoesBackwards {
        track: usize,
        tick: u32,
        seconds: f64,
        previous: f64,
    },
}

/// Setup failures reported by an atom's `initialize` / `post_initialize`.
#[derive(Debug, Error)]
pub enum AtomError {
    #[error("'{key}' argument is required, but not given")]
    MissingOption { key: &'static str },

    #[error("invalid '{key}' argument: {reason}")]
    InvalidOption { key: &'static str, reason: String },

    #[error(transparent)]
    Source(#[from] SheetError),

    #[error("{0}")]
    Setup(String),
}
