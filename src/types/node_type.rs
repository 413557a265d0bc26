// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use super::channel::{ChannelTuple, ChannelType};
use super::classifiers::Role;

/// Complete sink/source signature of a node type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeInterfaceType {
    pub sink: ChannelTuple,
    pub source: ChannelTuple,
}

impl NodeInterfaceType {
    pub fn new(sink: ChannelTuple, source: ChannelTuple) -> Self {
        Self { sink, source }
    }

    pub fn add_sink(&mut self, ty: ChannelType, optional: bool) {
        self.sink.push(ty, optional);
    }

    pub fn add_source(&mut self, ty: ChannelType, optional: bool) {
        self.source.push(ty, optional);
    }

    pub fn is_valid(&self) -> bool {
        self.sink.is_valid() && self.source.is_valid()
    }
}

impl fmt::Display for NodeInterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(sink{}, src{})", self.sink, self.source)
    }
}

/// Opaque tag naming the concrete node implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubKind(&'static str);

impl SubKind {
    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A node's declared type: interface signature, role and implementation tag.
///
/// Equality and hashing are structural, so a `NodeType` can key a map of
/// already-validated signatures.
///
/// # Example
/// ```
/// use atomflow::types::{ChannelType, NodeType, Role, SubKind};
///
/// let mut t = NodeType::new(SubKind::new("midi.null.sink"), Role::Pipe);
/// t.add_in(ChannelType::CENTER_MIDI, false);
/// t.add_out(ChannelType::CENTER_RECEIPT, false);
/// assert!(t.is_valid());
/// assert!(!t.is_sink_channel_optional(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeType {
    pub iface: NodeInterfaceType,
    pub sub: Option<SubKind>,
    pub role: Role,
}

impl NodeType {
    pub fn new(sub: SubKind, role: Role) -> Self {
        Self {
            iface: NodeInterfaceType::default(),
            sub: Some(sub),
            role,
        }
    }

    pub fn with_iface(sub: SubKind, role: Role, sink: ChannelTuple, source: ChannelTuple) -> Self {
        Self {
            iface: NodeInterfaceType::new(sink, source),
            sub: Some(sub),
            role,
        }
    }

    pub fn add_in(&mut self, ty: ChannelType, optional: bool) {
        self.iface.add_sink(ty, optional);
    }

    pub fn add_out(&mut self, ty: ChannelType, optional: bool) {
        self.iface.add_source(ty, optional);
    }

    pub fn sink(&self) -> &ChannelTuple {
        &self.iface.sink
    }

    pub fn source(&self) -> &ChannelTuple {
        &self.iface.source
    }

    pub fn is_valid(&self) -> bool {
        self.iface.is_valid() && self.sub.is_some() && self.role.is_valid()
    }

    pub fn is_role_driver(&self) -> bool {
        self.role == Role::Driver
    }

    pub fn is_role_customer(&self) -> bool {
        self.role == Role::Customer
    }

    pub fn is_role_pipe(&self) -> bool {
        self.role == Role::Pipe
    }

    /// Panics if `ch` is not a sink channel of this type.
    pub fn is_sink_channel_optional(&self, ch: usize) -> bool {
        assert!(
            ch < self.iface.sink.len(),
            "sink channel {} out of range for {}",
            ch,
            self
        );
        self.iface.sink[ch].optional
    }

    /// Panics if `ch` is not a source channel of this type.
    pub fn is_source_channel_optional(&self, ch: usize) -> bool {
        assert!(
            ch < self.iface.source.len(),
            "source channel {} out of range for {}",
            ch,
            self
        );
        self.iface.source[ch].optional
    }

    pub fn sink_channel_optional(&self, ch: usize) -> Option<bool> {
        self.iface.sink.get(ch).map(|spec| spec.optional)
    }

    pub fn source_channel_optional(&self, ch: usize) -> Option<bool> {
        self.iface.source.get(ch).map(|spec| spec.optional)
    }

    /// First sink channel carrying `ty`.
    pub fn find_sink(&self, ty: ChannelType) -> Option<usize> {
        self.iface.sink.iter().position(|spec| spec.ty == ty)
    }

    /// First source channel carrying `ty`.
    pub fn find_source(&self, ty: ChannelType) -> Option<usize> {
        self.iface.source.iter().position(|spec| spec.ty == ty)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sub = self.sub.map(|s| s.as_str()).unwrap_or("unset");
        write!(f, "{}-{}-{}", sub, self.role, self.iface)
    }
}
