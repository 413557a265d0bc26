// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_MAX_TICKS, DEFAULT_QUEUE_SIZE, DEFAULT_TICK_RATE_HZ};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for an atom graph.
///
/// Declares the engine loop parameters, the atom instances and the links
/// wiring a source channel of one atom into a sink channel of another.
/// Loaded from YAML (`.yaml`, `.yml`) or TOML (`.toml`).
///
/// # Example
/// ```yaml
/// engine:
///   tick_rate_hz: 100
///   max_ticks: 10000
/// atoms:
///   - id: reader
///     atom: midi.file.reader.pipe
///     options:
///       filepath: songs/scale.yaml
///       require.success: true
///   - id: sink
///     atom: midi.null.sink
///     options:
///       require.success: true
/// links:
///   - { from: reader, src_ch: 0, to: sink, sink_ch: 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub atoms: Vec<AtomConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    /// Directory of the file the config came from; relative atom paths resolve
    /// against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Tick loop parameters.
///
/// # Fields
/// * `tick_rate_hz` - Ticks per second; each tick advances time by `1 / tick_rate_hz`
/// * `max_ticks` - Hard stop for the run loop
/// * `queue_size` - Packets a link holds before its producer sees backpressure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineOptions {
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: f64,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_ticks: DEFAULT_MAX_TICKS,
            queue_size: DEFAULT_QUEUE_SIZE,
        }
    }
}

impl EngineOptions {
    /// Seconds per tick.
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }
}

fn default_tick_rate_hz() -> f64 {
    DEFAULT_TICK_RATE_HZ
}

fn default_max_ticks() -> u64 {
    DEFAULT_MAX_TICKS
}

fn default_queue_size() -> usize {
    DEFAULT_QUEUE_SIZE
}

/// One atom instance in the graph.
///
/// # Fields
/// * `id` - Unique identifier for this instance
/// * `atom` - Registered action name selecting the atom kind
/// * `options` - Atom-specific options read during `initialize`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AtomConfig {
    pub id: String,
    pub atom: String,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>,
}

/// A connection from a source channel of `from` into a sink channel of `to`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkConfig {
    pub from: String,
    #[serde(default)]
    pub src_ch: usize,
    pub to: String,
    #[serde(default)]
    pub sink_ch: usize,
}

/// Load a config from a YAML or TOML file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let mut cfg: Config = match ext.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    cfg.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(cfg)
}

/// Load and validate a config file
///
/// Loads the configuration, then checks the link graph for duplicate ids,
/// unknown endpoints and cycles, and the engine options for range.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_graph(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
atoms:
  - id: reader
    atom: midi.file.reader.pipe
    options:
      filepath: song.yaml
      require.success: true
  - id: sink
    atom: midi.null.sink
links:
  - { from: reader, to: sink }
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.engine, EngineOptions::default());
        assert_eq!(cfg.atoms.len(), 2);
        assert_eq!(cfg.atoms[1].atom, "midi.null.sink");
        assert!(cfg.atoms[1].options.is_empty());
        assert_eq!(
            cfg.atoms[0].options.get("require.success"),
            Some(&serde_yaml::Value::Bool(true))
        );
        assert_eq!(cfg.links[0].src_ch, 0);
        assert_eq!(cfg.links[0].sink_ch, 0);
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_temp(
            ".toml",
            r#"
[engine]
tick_rate_hz = 50.0
max_ticks = 200

[[atoms]]
id = "reader"
atom = "midi.file.reader"
options = { filepath = "song.yaml", "drum.ch" = 1 }

[[atoms]]
id = "sink"
atom = "midi.null.sink"

[[links]]
from = "reader"
src_ch = 0
to = "sink"
sink_ch = 0
"#,
        );
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.engine.tick_rate_hz, 50.0);
        assert_eq!(cfg.engine.max_ticks, 200);
        assert_eq!(cfg.engine.queue_size, DEFAULT_QUEUE_SIZE);
        assert_eq!(cfg.engine.tick_dt(), 0.02);
        assert_eq!(
            cfg.atoms[0].options.get("drum.ch").and_then(|v| v.as_i64()),
            Some(1)
        );
        assert_eq!(cfg.base_dir, file.path().parent().unwrap());
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_temp(
            ".yaml",
            r#"
atoms:
  - { id: reader, atom: midi.file.reader.pipe }
  - { id: sink, atom: midi.null.sink }
links:
  - { from: reader, to: sink }
"#,
        );
        assert!(load_and_validate_config(file.path()).is_ok());
    }

    #[test]
    fn test_load_and_validate_cyclic_config() {
        let file = write_temp(
            ".yml",
            r#"
atoms:
  - { id: a, atom: midi.null.sink }
  - { id: b, atom: midi.null.sink }
links:
  - { from: a, to: b }
  - { from: b, to: a }
"#,
        );
        let err = load_and_validate_config(file.path()).unwrap_err();
        match err {
            ConfigError::Invalid(errors) => {
                assert!(matches!(errors[0], crate::errors::ValidationError::CyclicLink { .. }))
            }
            other => panic!("expected validation failure, got {other}"),
        }
    }

    #[test]
    fn test_load_errors() {
        let err = load_config("/no/such/graph.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let file = write_temp(".ini", "atoms = []");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));

        let file = write_temp(".yaml", "atoms: [{ id: 1 }]");
        assert!(matches!(load_config(file.path()).unwrap_err(), ConfigError::Yaml(_)));

        let file = write_temp(".toml", "[[atoms]]\nid = ");
        assert!(matches!(load_config(file.path()).unwrap_err(), ConfigError::Toml(_)));
    }
}
