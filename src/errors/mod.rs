// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod atom;
mod binding;
mod config;
mod engine;

pub use atom::{AtomError, SheetError};
pub use binding::{BindingError, GraphError};
pub use config::{ConfigError, ValidationError};
pub use engine::{EngineError, RegistryError};

pub(crate) fn format_all(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
