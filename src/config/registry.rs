use std::collections::{HashMap, HashSet};

use crate::backends::local::AtomNode;
use crate::errors::RegistryError;
use crate::types::NodeType;

/// Builds a fresh atom instance for a registered node type.
pub type AtomConstructor = fn(NodeType) -> AtomNode;

/// One registered atom kind.
#[derive(Debug, Clone)]
pub struct AtomRegistration {
    pub action: String,
    pub node_type: NodeType,
    constructor: AtomConstructor,
}

impl AtomRegistration {
    pub fn create(&self) -> AtomNode {
        (self.constructor)(self.node_type.clone())
    }
}

/// Action name → node type and constructor.
///
/// Passed explicitly to whatever needs to instantiate atoms; there is no
/// process-wide instance.
#[derive(Debug, Default)]
pub struct AtomRegistry {
    entries: HashMap<String, AtomRegistration>,
    signatures: HashSet<NodeType>,
}

impl AtomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects invalid node types and actions that are already taken.
    pub fn register(
        &mut self,
        action: &str,
        node_type: NodeType,
        constructor: AtomConstructor,
    ) -> Result<(), RegistryError> {
        if !node_type.is_valid() {
            return Err(RegistryError::InvalidNodeType {
                action: action.to_string(),
                node_type: node_type.to_string(),
            });
        }
        if self.entries.contains_key(action) {
            return Err(RegistryError::DuplicateAction {
                action: action.to_string(),
            });
        }

        tracing::debug!(action, node_type = %node_type, "registered atom");
        self.signatures.insert(node_type.clone());
        self.entries.insert(
            action.to_string(),
            AtomRegistration {
                action: action.to_string(),
                node_type,
                constructor,
            },
        );
        Ok(())
    }

    pub fn get(&self, action: &str) -> Option<&AtomRegistration> {
        self.entries.get(action)
    }

    pub fn node_type(&self, action: &str) -> Option<&NodeType> {
        self.entries.get(action).map(|r| &r.node_type)
    }

    pub fn create(&self, action: &str) -> Option<AtomNode> {
        self.entries.get(action).map(AtomRegistration::create)
    }

    /// Whether this exact signature has already been validated and registered.
    pub fn is_known_signature(&self, node_type: &NodeType) -> bool {
        self.signatures.contains(node_type)
    }

    /// Registered action names, sorted.
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
