//! Closed classifier enumerations for channel payloads, execution contexts and node roles.

use std::fmt;

/// What kind of payload flows on a channel.
///
/// `Invalid` is the unassigned sentinel; it never appears on a live channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ValueKind {
    #[default]
    Invalid,
    Audio,
    Video,
    Volume,
    Midi,
    Event,
    Data,
    Order,
    Receipt,
    FrameBuffer,
    Program,
}

impl ValueKind {
    /// Number of non-sentinel kinds.
    pub const COUNT: u32 = 10;

    pub const ALL: [ValueKind; 10] = [
        ValueKind::Audio,
        ValueKind::Video,
        ValueKind::Volume,
        ValueKind::Midi,
        ValueKind::Event,
        ValueKind::Data,
        ValueKind::Order,
        ValueKind::Receipt,
        ValueKind::FrameBuffer,
        ValueKind::Program,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Invalid => "invalid",
            ValueKind::Audio => "audio",
            ValueKind::Video => "video",
            ValueKind::Volume => "volume",
            ValueKind::Midi => "midi",
            ValueKind::Event => "event",
            ValueKind::Data => "data",
            ValueKind::Order => "order",
            ValueKind::Receipt => "receipt",
            ValueKind::FrameBuffer => "framebuffer",
            ValueKind::Program => "program",
        }
    }

    pub fn is_valid(self) -> bool {
        self != ValueKind::Invalid
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Execution context a channel's payload lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum DeviceKind {
    #[default]
    Invalid,
    /// Host CPU memory.
    Center,
    Net,
    Ogl,
    Dx,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 4] = [
        DeviceKind::Center,
        DeviceKind::Net,
        DeviceKind::Ogl,
        DeviceKind::Dx,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DeviceKind::Invalid => "invalid",
            DeviceKind::Center => "center",
            DeviceKind::Net => "net",
            DeviceKind::Ogl => "ogl",
            DeviceKind::Dx => "dx",
        }
    }

    pub fn is_valid(self) -> bool {
        self != DeviceKind::Invalid
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role a node plays in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Invalid,
    Driver,
    Customer,
    Pipe,
    DriverPipe,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Invalid => "invalid",
            Role::Driver => "driver",
            Role::Customer => "customer",
            Role::Pipe => "pipe",
            Role::DriverPipe => "driver_pipe",
        }
    }

    pub fn is_valid(self) -> bool {
        self != Role::Invalid
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
