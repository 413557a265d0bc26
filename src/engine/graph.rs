// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use crate::backends::local::AtomNode;
use crate::config::{validate_graph, AtomRegistry, Config, EngineOptions, LinkConfig};
use crate::errors::{GraphError, ValidationError};
use crate::observability::messages::engine::GraphBuilt;
use crate::observability::messages::StructuredLog;
use crate::packet::Packet;
use crate::types::{ChannelType, ConnId, ConnectionBinding};

/// One atom instance with its wiring.
#[derive(Debug)]
pub struct GraphNode {
    pub id: String,
    pub action: String,
    pub atom: AtomNode,
    pub binding: ConnectionBinding,
    pub options: HashMap<String, serde_yaml::Value>,
}

/// A bound connection and the packets waiting on it.
#[derive(Debug)]
pub struct GraphLink {
    pub conn: ConnId,
    pub from: usize,
    pub src_ch: usize,
    pub to: usize,
    pub sink_ch: usize,
    pub channel_type: ChannelType,
    pub queue: VecDeque<Packet>,
}

/// Atoms instantiated from a config, wired channel to channel and ordered so
/// every producer comes before its consumers.
///
/// Channel 0 on either side is the primary channel and belongs to the
/// scheduler: it may be wired like any other, but an unwired primary channel
/// does not make a node incomplete and primary sinks always count as active.
/// Every other non-optional channel must be wired.
#[derive(Debug)]
pub struct Graph {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) links: Vec<GraphLink>,
    pub(crate) order: Vec<usize>,
    pub(crate) options: EngineOptions,
    pub(crate) base_dir: PathBuf,
}

impl Graph {
    /// Validates `config`, creates each atom through `registry` and wires every
    /// link with a fresh connection id.
    pub fn build(config: &Config, registry: &AtomRegistry) -> Result<Self, GraphError> {
        validate_graph(config).map_err(GraphError::Validation)?;

        let mut nodes = Vec::with_capacity(config.atoms.len());
        for atom in &config.atoms {
            let registration =
                registry
                    .get(&atom.atom)
                    .ok_or_else(|| GraphError::UnknownAction {
                        atom_id: atom.id.clone(),
                        action: atom.atom.clone(),
                    })?;
            nodes.push(GraphNode {
                id: atom.id.clone(),
                action: atom.atom.clone(),
                atom: registration.create(),
                binding: ConnectionBinding::for_type(&registration.node_type),
                options: atom.options.clone(),
            });
        }

        // Node `i` is built from `config.atoms[i]`.
        let index: HashMap<&str, usize> = config
            .atoms
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.as_str(), i))
            .collect();

        let mut links = Vec::with_capacity(config.links.len());
        for (i, link) in config.links.iter().enumerate() {
            let conn = ConnId(i as u32);
            let from = lookup(&index, i, &link.from)?;
            let to = lookup(&index, i, &link.to)?;
            let channel_type = wire(&mut nodes, conn, from, to, link)?;
            links.push(GraphLink {
                conn,
                from,
                src_ch: link.src_ch,
                to,
                sink_ch: link.sink_ch,
                channel_type,
                queue: VecDeque::new(),
            });
        }

        for node in &nodes {
            if !node.binding.is_complete() {
                return Err(GraphError::Incomplete {
                    atom_id: node.id.clone(),
                    node_type: node.atom_type_name(),
                });
            }
        }

        let order = topological_order(&nodes, &links)?;

        GraphBuilt {
            atom_count: nodes.len(),
            link_count: links.len(),
        }
        .log();

        Ok(Self {
            nodes,
            links,
            order,
            options: config.engine.clone(),
            base_dir: config.base_dir.clone(),
        })
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Node indices, producers first.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Whether two nodes share a connection, in either direction.
    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => a.binding.has_common_connection(&b.binding),
            _ => false,
        }
    }
}

impl GraphNode {
    fn atom_type_name(&self) -> String {
        self.binding
            .node_type()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

fn lookup(index: &HashMap<&str, usize>, link_index: usize, id: &str) -> Result<usize, GraphError> {
    index.get(id).copied().ok_or_else(|| {
        GraphError::Validation(vec![ValidationError::UnresolvedLinkEndpoint {
            link_index,
            atom_id: id.to_string(),
        }])
    })
}

/// Type-checks one link and records it on both bindings.
fn wire(
    nodes: &mut [GraphNode],
    conn: ConnId,
    from: usize,
    to: usize,
    link: &LinkConfig,
) -> Result<ChannelType, GraphError> {
    let out_of_range = |node: &GraphNode, side: &'static str, channel: usize, count: usize| {
        GraphError::ChannelOutOfRange {
            conn,
            atom_id: node.id.clone(),
            side,
            channel,
            count,
        }
    };

    let source_links = nodes[from].binding.source_links();
    let source_spec = nodes[from]
        .binding
        .node_type()
        .and_then(|t| t.source().get(link.src_ch))
        .copied()
        .ok_or_else(|| out_of_range(&nodes[from], "source", link.src_ch, source_links.len()))?;

    let sink_links = nodes[to].binding.sink_links();
    let sink_spec = nodes[to]
        .binding
        .node_type()
        .and_then(|t| t.sink().get(link.sink_ch))
        .copied()
        .ok_or_else(|| out_of_range(&nodes[to], "sink", link.sink_ch, sink_links.len()))?;

    if source_spec.ty != sink_spec.ty {
        return Err(GraphError::ChannelTypeMismatch {
            conn,
            from: nodes[from].id.clone(),
            source_type: source_spec.ty,
            to: nodes[to].id.clone(),
            sink_type: sink_spec.ty,
        });
    }
    if source_links[link.src_ch].is_bound() {
        return Err(GraphError::SourceAlreadyBound {
            conn,
            atom_id: nodes[from].id.clone(),
            channel: link.src_ch,
        });
    }
    if sink_links[link.sink_ch].is_bound() {
        return Err(GraphError::SinkAlreadyBound {
            conn,
            atom_id: nodes[to].id.clone(),
            channel: link.sink_ch,
        });
    }

    nodes[from].binding.try_set_source(conn, link.src_ch, link.sink_ch)?;
    nodes[to].binding.try_set_sink(conn, link.sink_ch, link.src_ch)?;
    Ok(source_spec.ty)
}

/// Kahn's algorithm over the link graph; ties keep config order.
fn topological_order(nodes: &[GraphNode], links: &[GraphLink]) -> Result<Vec<usize>, GraphError> {
    let mut in_degree = vec![0usize; nodes.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for link in links {
        in_degree[link.to] += 1;
        dependents[link.from].push(link.to);
    }

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in &dependents[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() != nodes.len() {
        let cycle = (0..nodes.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| nodes[i].id.clone())
            .collect();
        return Err(GraphError::Validation(vec![ValidationError::CyclicLink { cycle }]));
    }
    Ok(order)
}
