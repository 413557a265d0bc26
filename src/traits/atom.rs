use crate::errors::AtomError;
use crate::packet::{Packet, PacketIo, PacketValue, RealtimeSourceConfig};
use crate::types::{ConnectionBinding, NodeType};
use crate::world::WorldState;

/// Per-tick execution protocol of a graph node.
///
/// The engine drives every instance through the same lifecycle:
///
/// ```text
/// initialize ─→ post_initialize ─→ [ update → is_ready → recv* → send* ]* ─→ uninitialize
/// ```
///
/// `initialize` runs for every node before any `post_initialize`, which in turn
/// completes before the first `update`. `update`, `recv` and `send` are on the
/// hot path and must not block.
pub trait Atom: Send {
    /// Action name the atom was registered under.
    fn name(&self) -> &'static str;

    /// Declared interface of this atom kind.
    fn atom_type(&self) -> NodeType;

    /// Reads options and performs one-time setup. An `Err` aborts this node's
    /// startup; the message is also kept for [`Atom::last_error`].
    fn initialize(&mut self, ws: &WorldState) -> Result<(), AtomError>;

    /// Runs once every node is initialized, with this node's final wiring.
    fn post_initialize(&mut self, _binding: &ConnectionBinding) -> Result<(), AtomError> {
        Ok(())
    }

    /// Releases whatever `initialize` acquired. Called exactly once.
    fn uninitialize(&mut self);

    /// Advances internal time. Only called while registered for updates.
    fn update(&mut self, _dt: f64) {}

    /// Must return `true` before `recv`/`send` are called this tick.
    fn is_ready(&self, io: &PacketIo) -> bool;

    /// Accepts one inbound packet. `false` rejects it.
    fn recv(&mut self, sink_ch: usize, packet: &Packet) -> bool;

    /// Fills `out` for source channel `src_ch`. `false` when the declared
    /// format of `out` is not something this atom produces.
    fn send(&mut self, cfg: &RealtimeSourceConfig, out: &mut PacketValue, src_ch: usize) -> bool;

    fn last_error(&self) -> Option<&str> {
        None
    }
}
