use std::sync::Arc;

use serde::Serialize;

use crate::backends::local::AtomNode;
use crate::errors::EngineError;
use crate::observability::messages::engine::{
    EngineStarted, EngineStopped, RecvRejected, SendRejected,
};
use crate::observability::messages::StructuredLog;
use crate::packet::{PacketIo, PacketValue, RealtimeSourceConfig};
use crate::traits::Atom;
use crate::types::ConnectionBinding;
use crate::world::{EngineHandle, TransportClock, WorldState};

use super::graph::{Graph, GraphLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Idle,
    Running,
    Stopped,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub ticks: u64,
    pub transport_secs: f64,
    /// An atom asked the engine to stop, as opposed to running out of ticks.
    pub finished: bool,
    pub failure: Option<String>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Single-threaded tick driver over a built [`Graph`].
///
/// ## Tick Strategy
///
/// Each tick advances the transport clock by `dt`, then visits nodes in
/// producer-first order. For every node:
/// 1. `update(dt)` if the atom registered itself in the update list
/// 2. `is_ready` against the node's sink mask and the fill level of its outgoing links
/// 3. queued packets are delivered to `recv`, lowest sink channel first
/// 4. `send` is called per source channel, highest first, so channel 0 goes last
///
/// Non-empty packets are queued on the link and reach the consumer later in the
/// same tick. Channel 0 is always offered to `send`; its packet is dropped when
/// nothing is wired to it. A link holding `queue_size` packets marks its source
/// channel full.
///
/// ## Lifecycle
///
/// `start` initializes atoms in order and post-initializes them with their
/// bindings. `stop` uninitializes every atom exactly once, in reverse order, and
/// also runs on drop.
pub struct Engine {
    graph: Graph,
    handle: EngineHandle,
    transport: TransportClock,
    state: EngineState,
    ticks: u64,
}

impl Engine {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            handle: EngineHandle::new(),
            transport: TransportClock::new(),
            state: EngineState::Idle,
            ticks: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn handle(&self) -> &EngineHandle {
        &self.handle
    }

    pub fn transport(&self) -> &TransportClock {
        &self.transport
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn atom(&self, id: &str) -> Option<&AtomNode> {
        self.graph.node(id).map(|n| &n.atom)
    }

    /// Started, not stopped, and no atom has cleared the running flag.
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running && self.handle.is_running()
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != EngineState::Idle {
            return Err(EngineError::AlreadyStarted);
        }

        let order = self.graph.order.clone();
        for (pos, &idx) in order.iter().enumerate() {
            let node = &mut self.graph.nodes[idx];
            let ws = WorldState::new(
                node.id.clone(),
                idx,
                node.options.clone(),
                self.handle.clone(),
                self.transport.clone(),
            )
            .with_base_dir(self.graph.base_dir.clone());

            if let Err(source) = node.atom.initialize(&ws) {
                let atom_id = node.id.clone();
                self.uninitialize(&order[..pos]);
                self.state = EngineState::Stopped;
                return Err(EngineError::AtomInitialize { atom_id, source });
            }
        }

        for &idx in &order {
            let node = &mut self.graph.nodes[idx];
            if let Err(source) = node.atom.post_initialize(&node.binding) {
                let atom_id = node.id.clone();
                self.uninitialize(&order);
                self.state = EngineState::Stopped;
                return Err(EngineError::AtomPostInitialize { atom_id, source });
            }
        }

        self.state = EngineState::Running;
        EngineStarted {
            atom_count: self.graph.nodes.len(),
            link_count: self.graph.links.len(),
            tick_rate_hz: self.graph.options.tick_rate_hz,
        }
        .log();
        Ok(())
    }

    /// Runs one tick. Returns whether the engine should keep going.
    pub fn tick(&mut self, dt: f64) -> Result<bool, EngineError> {
        if self.state != EngineState::Running {
            return Err(EngineError::NotStarted);
        }

        let cfg = RealtimeSourceConfig {
            tick: self.ticks,
            time: self.transport.get(),
            dt,
        };
        self.transport.advance(dt);

        let queue_size = self.graph.options.queue_size;
        let Graph {
            nodes,
            links,
            order,
            ..
        } = &mut self.graph;
        for &idx in order.iter() {
            let node = &mut nodes[idx];
            if self.handle.is_in_update_list(idx) {
                node.atom.update(dt);
            }

            let io = PacketIo {
                active_sink_mask: node.binding.sink_mask(),
                full_src_mask: full_src_mask(&node.binding, links, queue_size),
            };
            if !node.atom.is_ready(&io) {
                continue;
            }

            for (sink_ch, link) in node.binding.sink_links().iter().enumerate() {
                let Some(conn) = link.conn else {
                    continue;
                };
                while let Some(packet) = links[conn.0 as usize].queue.pop_front() {
                    if !node.atom.recv(sink_ch, &packet) {
                        RecvRejected {
                            atom_id: &node.id,
                            sink_ch,
                        }
                        .log();
                    }
                }
            }

            let Some(node_type) = node.binding.node_type() else {
                continue;
            };
            for (src_ch, spec) in node_type.source().iter().enumerate().rev() {
                let conn = node.binding.source_links()[src_ch].conn;
                if conn.is_none() && src_ch != 0 {
                    continue;
                }
                let mut out = PacketValue::new(spec.ty.into());
                if !node.atom.send(&cfg, &mut out, src_ch) {
                    SendRejected {
                        atom_id: &node.id,
                        src_ch,
                        channel_type: spec.ty,
                    }
                    .log();
                    continue;
                }
                if let Some(conn) = conn {
                    if !out.is_empty() {
                        links[conn.0 as usize].queue.push_back(Arc::new(out));
                    }
                }
            }
        }

        self.ticks += 1;
        Ok(self.handle.is_running())
    }

    /// Starts if needed, ticks at the configured rate until an atom stops the
    /// engine or `max_ticks` is reached, then stops.
    pub fn run(&mut self) -> Result<RunReport, EngineError> {
        if self.state == EngineState::Idle {
            self.start()?;
        }
        let dt = self.graph.options.tick_dt();
        let max_ticks = self.graph.options.max_ticks;
        while self.ticks < max_ticks && self.tick(dt)? {}
        self.stop();
        Ok(self.report())
    }

    /// Uninitializes every atom. Later calls do nothing.
    pub fn stop(&mut self) {
        if self.state != EngineState::Running {
            return;
        }
        let order = self.graph.order.clone();
        self.uninitialize(&order);
        self.state = EngineState::Stopped;

        let failure = self.handle.failure();
        EngineStopped {
            ticks: self.ticks,
            transport_secs: self.transport.get(),
            failure: failure.as_deref(),
        }
        .log();
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            ticks: self.ticks,
            transport_secs: self.transport.get(),
            finished: !self.handle.is_running(),
            failure: self.handle.failure(),
        }
    }

    fn uninitialize(&mut self, order: &[usize]) {
        for &idx in order.iter().rev() {
            self.graph.nodes[idx].atom.uninitialize();
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn full_src_mask(binding: &ConnectionBinding, links: &[GraphLink], queue_size: usize) -> u32 {
    binding
        .source_links()
        .iter()
        .enumerate()
        .take(32)
        .filter_map(|(ch, link)| link.conn.map(|conn| (ch, conn)))
        .filter(|(_, conn)| links[conn.0 as usize].queue.len() >= queue_size)
        .fold(0, |mask, (ch, _)| mask | 1 << ch)
}
