use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::{EngineHandle, TransportClock};

/// Configuration view and engine services handed to an atom's `initialize`.
///
/// Lookups are typed and lenient: a value of the wrong shape falls back to the
/// default and logs a warning.
#[derive(Debug, Clone)]
pub struct WorldState {
    atom_id: String,
    slot: usize,
    options: HashMap<String, Value>,
    base_dir: PathBuf,
    engine: EngineHandle,
    transport: TransportClock,
}

impl WorldState {
    pub fn new(
        atom_id: impl Into<String>,
        slot: usize,
        options: HashMap<String, Value>,
        engine: EngineHandle,
        transport: TransportClock,
    ) -> Self {
        Self {
            atom_id: atom_id.into(),
            slot,
            options,
            base_dir: PathBuf::new(),
            engine,
            transport,
        }
    }

    /// Directory relative paths are resolved against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn atom_id(&self) -> &str {
        &self.atom_id
    }

    /// Index of this atom in the engine, used for update-list registration.
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn transport(&self) -> &TransportClock {
        &self.transport
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.options.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => {
                self.warn_shape(key, "string", other);
                None
            }
        }
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.options.get(key) {
            None => default,
            Some(Value::Number(n)) if n.as_i64().is_some() => n.as_i64().unwrap_or(default),
            Some(Value::String(s)) if s.trim().parse::<i64>().is_ok() => {
                s.trim().parse().unwrap_or(default)
            }
            Some(other) => {
                self.warn_shape(key, "integer", other);
                default
            }
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.options.get(key) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) if n.as_i64().is_some() => n.as_i64() != Some(0),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => true,
                "false" | "no" | "off" | "0" => false,
                _ => {
                    self.warn_shape(key, "bool", &Value::String(s.clone()));
                    default
                }
            },
            Some(other) => {
                self.warn_shape(key, "bool", other);
                default
            }
        }
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.options.get(key) {
            None => default,
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) if s.trim().parse::<f64>().is_ok() => {
                s.trim().parse().unwrap_or(default)
            }
            Some(other) => {
                self.warn_shape(key, "number", other);
                default
            }
        }
    }

    /// Absolute paths pass through; relative ones join the base directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn warn_shape(&self, key: &str, expected: &str, got: &Value) {
        tracing::warn!(
            atom_id = %self.atom_id,
            key,
            expected,
            "option '{}' is not a {}: {:?}, using default",
            key,
            expected,
            got
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(yaml: &str) -> WorldState {
        let options: HashMap<String, Value> = serde_yaml::from_str(yaml).unwrap();
        WorldState::new("a", 0, options, EngineHandle::new(), TransportClock::new())
    }

    #[test]
    fn test_typed_lookups() {
        let ws = world(
            r#"
filepath: song.yaml
drum.ch: 1
close_machine: true
require.success: "yes"
rate: 1.5
"#,
        );
        assert_eq!(ws.get_string("filepath").as_deref(), Some("song.yaml"));
        assert_eq!(ws.get_string("missing"), None);
        assert_eq!(ws.get_int("drum.ch", -1), 1);
        assert_eq!(ws.get_int("missing", -1), -1);
        assert!(ws.get_bool("close_machine", false));
        assert!(ws.get_bool("require.success", false));
        assert!(!ws.get_bool("missing", false));
        assert_eq!(ws.get_f64("rate", 0.0), 1.5);
        assert!(ws.contains("rate"));
    }

    #[test]
    fn test_wrong_shapes_fall_back_to_default() {
        let ws = world(
            r#"
drum.ch: [1, 2]
close_machine: maybe
"#,
        );
        assert_eq!(ws.get_int("drum.ch", -1), -1);
        assert!(ws.get_bool("close_machine", true));
        assert_eq!(ws.get_string("drum.ch"), None);
    }

    #[test]
    fn test_numeric_strings() {
        let ws = world("warmup.ticks: \"3\"\nrate: \"0.5\"\n");
        assert_eq!(ws.get_int("warmup.ticks", 1), 3);
        assert_eq!(ws.get_f64("rate", 1.0), 0.5);
    }

    #[test]
    fn test_resolve_path() {
        let ws = world("{}").with_base_dir("/graphs");
        assert_eq!(ws.resolve_path("songs/a.yaml"), PathBuf::from("/graphs/songs/a.yaml"));
        assert_eq!(ws.resolve_path("/abs/a.yaml"), PathBuf::from("/abs/a.yaml"));
    }
}
