use crate::errors::AtomError;
use crate::observability::messages::atom::{EventsReceived, StreamVerified};
use crate::observability::messages::StructuredLog;
use crate::packet::{Packet, PacketIo, PacketValue, RealtimeSourceConfig};
use crate::traits::Atom;
use crate::types::{ChannelType, NodeType, Role, SubKind};
use crate::world::{EngineHandle, WorldState};

/// Consumes a MIDI stream, counting events, and checks the final status
/// against what actually arrived.
#[derive(Debug)]
pub struct MidiNullAtom {
    node_type: NodeType,
    atom_id: String,
    engine: Option<EngineHandle>,
    verbose: bool,
    require_success: bool,
    final_status_seen: bool,
    received_event_count: u64,
}

impl MidiNullAtom {
    pub const ACTION: &'static str = "midi.null.sink";

    pub fn node_type() -> NodeType {
        let mut t = NodeType::new(SubKind::new(Self::ACTION), Role::Pipe);
        t.add_in(ChannelType::CENTER_MIDI, false);
        t.add_out(ChannelType::CENTER_RECEIPT, false);
        t
    }

    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            atom_id: String::new(),
            engine: None,
            verbose: false,
            require_success: false,
            final_status_seen: false,
            received_event_count: 0,
        }
    }

    pub fn received_event_count(&self) -> u64 {
        self.received_event_count
    }

    pub fn is_final_status_seen(&self) -> bool {
        self.final_status_seen
    }
}

impl Atom for MidiNullAtom {
    fn name(&self) -> &'static str {
        Self::ACTION
    }

    fn atom_type(&self) -> NodeType {
        self.node_type.clone()
    }

    fn initialize(&mut self, ws: &WorldState) -> Result<(), AtomError> {
        self.atom_id = ws.atom_id().to_string();
        self.engine = Some(ws.engine().clone());
        self.verbose = ws.get_bool("verbose", false);
        self.require_success = ws.get_bool("require.success", false);
        self.final_status_seen = false;
        self.received_event_count = 0;
        Ok(())
    }

    fn uninitialize(&mut self) {
        self.engine = None;
    }

    fn is_ready(&self, _io: &PacketIo) -> bool {
        true
    }

    fn recv(&mut self, sink_ch: usize, packet: &Packet) -> bool {
        if let Some(status) = packet.status() {
            let ok = status.eof && status.success && status.event_count == self.received_event_count;
            self.final_status_seen = true;

            if self.require_success {
                let msg = StreamVerified {
                    atom_id: &self.atom_id,
                    expected: status.event_count,
                    received: self.received_event_count,
                    ok,
                };
                msg.log();
                if let Some(engine) = &self.engine {
                    if !ok {
                        engine.set_failed(format!(
                            "failure: expected {} events, received {}",
                            status.event_count, self.received_event_count
                        ));
                    }
                    engine.set_not_running();
                }
            }
            return ok || !self.require_success;
        }

        let events = packet.midi_events();
        self.received_event_count += events.len() as u64;

        if self.verbose {
            EventsReceived {
                atom_id: &self.atom_id,
                sink_ch,
                count: events.len(),
            }
            .log();
            for ev in events {
                tracing::debug!(atom_id = %self.atom_id, track = ev.track, "track {}: {}", ev.track, ev);
            }
        }
        true
    }

    fn send(&mut self, _cfg: &RealtimeSourceConfig, _out: &mut PacketValue, _src_ch: usize) -> bool {
        true
    }
}
