// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-instance realization of a [`NodeType`]: which remote connection each
//! sink/source channel is wired to.
//!
//! Channel 0 on either side is the *primary* link. The scheduler owns it (it
//! carries the tick's order/receipt token), so it is never required to be bound
//! here: [`ConnectionBinding::is_complete`] checks channels `1..` only and
//! [`ConnectionBinding::sink_mask`] always reports the primary sink as active.
//! Callers that do route data through channel 0 check it explicitly with
//! [`ConnectionBinding::is_primary_sink_bound`] / [`ConnectionBinding::is_primary_source_bound`].

use std::fmt;

use crate::errors::BindingError;

use super::node_type::NodeType;

/// Identifier of one graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(pub u32);

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One bound (or unbound) endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionLink {
    pub conn: Option<ConnId>,
    pub local: usize,
    pub other: usize,
}

impl ConnectionLink {
    pub fn is_bound(&self) -> bool {
        self.conn.is_some()
    }
}

/// Connection state of one node instance.
#[derive(Debug, Clone, Default)]
pub struct ConnectionBinding {
    node_type: Option<NodeType>,
    sink: Vec<ConnectionLink>,
    source: Vec<ConnectionLink>,
}

impl ConnectionBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding realized against `node_type` straight away.
    pub fn for_type(node_type: &NodeType) -> Self {
        let mut binding = Self::new();
        binding.realize(node_type);
        binding
    }

    /// Adopt `node_type` and size the link vectors to its tuples.
    ///
    /// Realizing again with the same type is a no-op. Panics if the binding is
    /// already realized against a different type.
    pub fn realize(&mut self, node_type: &NodeType) {
        match &self.node_type {
            None => {
                self.sink.clear();
                self.sink
                    .resize(node_type.sink().len(), ConnectionLink::default());
                self.source.clear();
                self.source
                    .resize(node_type.source().len(), ConnectionLink::default());
                self.node_type = Some(node_type.clone());
            }
            Some(existing) => {
                assert!(
                    existing == node_type,
                    "binding realized as {} cannot be re-realized as {}",
                    existing,
                    node_type
                );
            }
        }
    }

    pub fn is_realized(&self) -> bool {
        self.node_type.is_some()
    }

    pub fn node_type(&self) -> Option<&NodeType> {
        self.node_type.as_ref()
    }

    pub fn sink_links(&self) -> &[ConnectionLink] {
        &self.sink
    }

    pub fn source_links(&self) -> &[ConnectionLink] {
        &self.source
    }

    /// Record that local source channel `src_ch` feeds `sink_ch` of the remote end of `conn`.
    ///
    /// Panics if `src_ch` is not a source channel of the realized type.
    pub fn set_source(&mut self, conn: ConnId, src_ch: usize, sink_ch: usize) {
        assert!(
            src_ch < self.source.len(),
            "source channel {} out of range ({} channels)",
            src_ch,
            self.source.len()
        );
        self.source[src_ch] = ConnectionLink {
            conn: Some(conn),
            local: src_ch,
            other: sink_ch,
        };
    }

    /// Record that local sink channel `sink_ch` is fed by `src_ch` of the remote end of `conn`.
    ///
    /// Panics if `sink_ch` is not a sink channel of the realized type.
    pub fn set_sink(&mut self, conn: ConnId, sink_ch: usize, src_ch: usize) {
        assert!(
            sink_ch < self.sink.len(),
            "sink channel {} out of range ({} channels)",
            sink_ch,
            self.sink.len()
        );
        self.sink[sink_ch] = ConnectionLink {
            conn: Some(conn),
            local: sink_ch,
            other: src_ch,
        };
    }

    pub fn try_set_source(
        &mut self,
        conn: ConnId,
        src_ch: usize,
        sink_ch: usize,
    ) -> Result<(), BindingError> {
        if !self.is_realized() {
            return Err(BindingError::NotRealized);
        }
        if src_ch >= self.source.len() {
            return Err(BindingError::SourceChannelOutOfRange {
                channel: src_ch,
                count: self.source.len(),
            });
        }
        self.set_source(conn, src_ch, sink_ch);
        Ok(())
    }

    pub fn try_set_sink(
        &mut self,
        conn: ConnId,
        sink_ch: usize,
        src_ch: usize,
    ) -> Result<(), BindingError> {
        if !self.is_realized() {
            return Err(BindingError::NotRealized);
        }
        if sink_ch >= self.sink.len() {
            return Err(BindingError::SinkChannelOutOfRange {
                channel: sink_ch,
                count: self.sink.len(),
            });
        }
        self.set_sink(conn, sink_ch, src_ch);
        Ok(())
    }

    /// True when every non-primary channel is either bound or declared optional.
    ///
    /// An unrealized binding is never complete.
    pub fn is_complete(&self) -> bool {
        let Some(node_type) = &self.node_type else {
            return false;
        };
        let sink_type = node_type.sink();
        let source_type = node_type.source();
        assert_eq!(self.sink.len(), sink_type.len());
        assert_eq!(self.source.len(), source_type.len());

        let sinks_ok = self
            .sink
            .iter()
            .zip(sink_type.iter())
            .skip(1)
            .all(|(link, spec)| link.is_bound() || spec.optional);
        let sources_ok = self
            .source
            .iter()
            .zip(source_type.iter())
            .skip(1)
            .all(|(link, spec)| link.is_bound() || spec.optional);
        sinks_ok && sources_ok
    }

    pub fn is_primary_sink_bound(&self) -> bool {
        self.sink.first().is_some_and(ConnectionLink::is_bound)
    }

    pub fn is_primary_source_bound(&self) -> bool {
        self.source.first().is_some_and(ConnectionLink::is_bound)
    }

    /// Bit `i` set when sink `i` has live upstream data. Bit 0 is always set.
    pub fn sink_mask(&self) -> u32 {
        let mut mask = 1;
        for (i, link) in self.sink.iter().enumerate().take(32) {
            if link.is_bound() {
                mask |= 1 << i;
            }
        }
        mask
    }

    pub fn bound_source_count(&self) -> usize {
        self.source.iter().filter(|link| link.is_bound()).count()
    }

    pub fn bound_sink_count(&self) -> usize {
        self.sink.iter().filter(|link| link.is_bound()).count()
    }

    /// True when the two instances are directly adjacent: one of our sinks shares a
    /// connection with one of `other`'s sources, or the reverse. Unbound links never match.
    pub fn has_common_connection(&self, other: &ConnectionBinding) -> bool {
        fn shares(a: &[ConnectionLink], b: &[ConnectionLink]) -> bool {
            a.iter()
                .filter_map(|link| link.conn)
                .any(|conn| b.iter().any(|link| link.conn == Some(conn)))
        }
        shares(&self.sink, &other.source) || shares(&self.source, &other.sink)
    }
}
