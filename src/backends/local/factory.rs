use crate::config::AtomRegistry;
use crate::errors::RegistryError;
use crate::types::NodeType;

use super::atoms::{AtomNode, MidiFileReaderAtom, MidiNullAtom};

/// Factory for the built-in (in-process) atoms.
pub struct LocalAtomFactory;

impl LocalAtomFactory {
    /// Installs every built-in atom kind:
    /// - "midi.file.reader.pipe" -> MidiFileReaderAtom, one MIDI output
    /// - "midi.file.reader" -> MidiFileReaderAtom, main plus one side output
    /// - "midi.file.reader16" -> MidiFileReaderAtom, main plus fifteen side outputs
    /// - "midi.null.sink" -> MidiNullAtom
    pub fn register_builtin(registry: &mut AtomRegistry) -> Result<(), RegistryError> {
        registry.register(
            MidiFileReaderAtom::PIPE,
            MidiFileReaderAtom::pipe_type(),
            create_reader,
        )?;
        registry.register(
            MidiFileReaderAtom::DUAL,
            MidiFileReaderAtom::dual_type(),
            create_reader,
        )?;
        registry.register(
            MidiFileReaderAtom::MULTI,
            MidiFileReaderAtom::multi_type(),
            create_reader,
        )?;
        registry.register(MidiNullAtom::ACTION, MidiNullAtom::node_type(), create_null)?;
        Ok(())
    }

    /// A registry holding just the built-in atoms.
    pub fn builtin_registry() -> Result<AtomRegistry, RegistryError> {
        let mut registry = AtomRegistry::new();
        Self::register_builtin(&mut registry)?;
        Ok(registry)
    }

    /// List all built-in action names
    pub fn list_available_actions() -> Vec<&'static str> {
        vec![
            MidiFileReaderAtom::PIPE,
            MidiFileReaderAtom::DUAL,
            MidiFileReaderAtom::MULTI,
            MidiNullAtom::ACTION,
        ]
    }

    /// Check if an action is built in
    pub fn is_action_available(action: &str) -> bool {
        Self::list_available_actions().contains(&action)
    }
}

fn create_reader(node_type: NodeType) -> AtomNode {
    MidiFileReaderAtom::new(node_type).into()
}

fn create_null(node_type: NodeType) -> AtomNode {
    MidiNullAtom::new(node_type).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Atom;
    use crate::types::{ChannelType, Role};

    #[test]
    fn test_builtin_table() {
        struct TestCase {
            action: &'static str,
            sink: Vec<(ChannelType, bool)>,
            source_len: usize,
            source_0: ChannelType,
        }

        let test_cases = vec![
            TestCase {
                action: "midi.file.reader.pipe",
                sink: vec![(ChannelType::CENTER_ORDER, false)],
                source_len: 1,
                source_0: ChannelType::CENTER_MIDI,
            },
            TestCase {
                action: "midi.file.reader",
                sink: vec![(ChannelType::CENTER_ORDER, false)],
                source_len: 2,
                source_0: ChannelType::CENTER_MIDI,
            },
            TestCase {
                action: "midi.file.reader16",
                sink: vec![(ChannelType::CENTER_ORDER, false)],
                source_len: 16,
                source_0: ChannelType::CENTER_MIDI,
            },
            TestCase {
                action: "midi.null.sink",
                sink: vec![(ChannelType::CENTER_MIDI, false)],
                source_len: 1,
                source_0: ChannelType::CENTER_RECEIPT,
            },
        ];

        let registry = LocalAtomFactory::builtin_registry().unwrap();
        assert_eq!(registry.len(), test_cases.len());

        for case in test_cases {
            let t = registry
                .node_type(case.action)
                .unwrap_or_else(|| panic!("missing {}", case.action));
            assert_eq!(t.role, Role::Pipe, "action: {}", case.action);
            let sink: Vec<(ChannelType, bool)> =
                t.sink().iter().map(|s| (s.ty, s.optional)).collect();
            assert_eq!(sink, case.sink, "action: {}", case.action);
            assert_eq!(t.source().len(), case.source_len, "action: {}", case.action);
            assert_eq!(t.source()[0].ty, case.source_0, "action: {}", case.action);
            assert!(!t.is_source_channel_optional(0));

            let atom = registry.create(case.action).unwrap();
            assert_eq!(atom.name(), case.action);
            assert_eq!(&atom.atom_type(), t);
        }
    }

    #[test]
    fn test_register_twice_fails() {
        let mut registry = LocalAtomFactory::builtin_registry().unwrap();
        let err = LocalAtomFactory::register_builtin(&mut registry).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateAction { .. }));
    }

    #[test]
    fn test_is_action_available() {
        assert!(LocalAtomFactory::is_action_available("midi.null.sink"));
        assert!(!LocalAtomFactory::is_action_available("reverse_text"));
        let registry = LocalAtomFactory::builtin_registry().unwrap();
        let mut listed = LocalAtomFactory::list_available_actions();
        listed.sort_unstable();
        assert_eq!(registry.actions(), listed);
    }
}
