// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed node interface system.
//!
//! Value types describing what flows on a channel (`ChannelType`), the full
//! sink/source shape of a node kind (`NodeType`), and the per-instance record of
//! how those channels are wired (`ConnectionBinding`).
//!
//! ```text
//! ValueKind × DeviceKind → ChannelType → ChannelTuple ─┐
//!                                                      ├→ NodeInterfaceType → NodeType
//!                                     Role, SubKind ───┘                        │
//!                                                        ConnectionBinding ←───┘
//! ```

mod binding;
mod channel;
mod classifiers;
mod node_type;

pub use binding::{ConnId, ConnectionBinding, ConnectionLink};
pub use channel::{ChannelSpec, ChannelTuple, ChannelType};
pub use classifiers::{DeviceKind, Role, ValueKind};
pub use node_type::{NodeInterfaceType, NodeType, SubKind};
