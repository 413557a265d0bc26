// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::ops::Index;

use super::classifiers::{DeviceKind, ValueKind};

/// Atomic type of one channel: a (value kind, device kind) pair.
///
/// # Example
/// ```
/// use atomflow::types::{ChannelType, DeviceKind, ValueKind};
///
/// let vd = ChannelType::new(ValueKind::Midi, DeviceKind::Center);
/// assert!(vd.is_valid());
/// assert_eq!(vd.name(), "center.midi");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelType {
    pub value: ValueKind,
    pub device: DeviceKind,
}

impl ChannelType {
    pub const CENTER_MIDI: ChannelType = ChannelType::new(ValueKind::Midi, DeviceKind::Center);
    pub const CENTER_ORDER: ChannelType = ChannelType::new(ValueKind::Order, DeviceKind::Center);
    pub const CENTER_RECEIPT: ChannelType =
        ChannelType::new(ValueKind::Receipt, DeviceKind::Center);
    pub const CENTER_AUDIO: ChannelType = ChannelType::new(ValueKind::Audio, DeviceKind::Center);

    pub const fn new(value: ValueKind, device: DeviceKind) -> Self {
        Self { value, device }
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_valid() && self.device.is_valid()
    }

    /// `"{device}.{value}"`, lower-case.
    pub fn name(&self) -> String {
        format!("{}.{}", self.device.name(), self.value.name())
    }

    /// Dense numeric key, unique per (device, value) pair.
    pub fn key(&self) -> u32 {
        self.device as u32 * (ValueKind::COUNT + 1) + self.value as u32
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.device, self.value)
    }
}

/// One declared channel within a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelSpec {
    pub ty: ChannelType,
    pub optional: bool,
}

impl ChannelSpec {
    pub fn new(ty: ChannelType, optional: bool) -> Self {
        Self { ty, optional }
    }

    pub fn is_valid(&self) -> bool {
        self.ty.is_valid()
    }
}

impl fmt::Display for ChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if self.optional {
            write!(f, " optional")?;
        }
        Ok(())
    }
}

/// Ordered sink-side or source-side shape of a node. The channel index is the position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ChannelTuple {
    channels: Vec<ChannelSpec>,
}

impl ChannelTuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tuple holding a single mandatory channel.
    pub fn single(ty: ChannelType) -> Self {
        let mut tuple = Self::new();
        tuple.push(ty, false);
        tuple
    }

    pub fn push(&mut self, ty: ChannelType, optional: bool) -> &mut Self {
        self.channels.push(ChannelSpec::new(ty, optional));
        self
    }

    /// Builder form of [`ChannelTuple::push`].
    pub fn with(mut self, ty: ChannelType, optional: bool) -> Self {
        self.push(ty, optional);
        self
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChannelSpec> {
        self.channels.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChannelSpec> {
        self.channels.iter()
    }

    /// An empty tuple is valid: zero channels is a legal shape.
    pub fn is_valid(&self) -> bool {
        self.channels.iter().all(ChannelSpec::is_valid)
    }

    pub fn clear(&mut self) {
        self.channels.clear();
    }
}

impl Index<usize> for ChannelTuple {
    type Output = ChannelSpec;

    fn index(&self, index: usize) -> &ChannelSpec {
        &self.channels[index]
    }
}

impl fmt::Display for ChannelTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.channels.len())?;
        for ch in &self.channels {
            write!(f, ", {}", ch)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_type_validity_table() {
        for value in ValueKind::ALL {
            for device in DeviceKind::ALL {
                assert!(ChannelType::new(value, device).is_valid());
                assert!(!ChannelType::new(ValueKind::Invalid, device).is_valid());
                assert!(!ChannelType::new(value, DeviceKind::Invalid).is_valid());
            }
        }
        assert!(!ChannelType::default().is_valid());
    }

    #[test]
    fn test_channel_type_name() {
        assert_eq!(ChannelType::CENTER_MIDI.name(), "center.midi");
        assert_eq!(
            ChannelType::new(ValueKind::FrameBuffer, DeviceKind::Ogl).name(),
            "ogl.framebuffer"
        );
        let name = ChannelType::new(ValueKind::Program, DeviceKind::Dx).name();
        assert_eq!(name, name.to_lowercase());
        assert_eq!(ChannelType::CENTER_MIDI.to_string(), ChannelType::CENTER_MIDI.name());
    }

    #[test]
    fn test_channel_type_keys_are_unique() {
        let mut keys = std::collections::HashSet::new();
        for value in ValueKind::ALL {
            for device in DeviceKind::ALL {
                assert!(keys.insert(ChannelType::new(value, device).key()));
            }
        }
    }

    #[test]
    fn test_empty_tuple_is_valid() {
        let tuple = ChannelTuple::new();
        assert!(tuple.is_valid());
        assert!(tuple.is_empty());
    }

    #[test]
    fn test_tuple_validity_requires_every_channel_valid() {
        let mut tuple = ChannelTuple::single(ChannelType::CENTER_MIDI);
        tuple.push(ChannelType::CENTER_MIDI, true);
        assert!(tuple.is_valid());
        assert_eq!(tuple.len(), 2);
        assert!(tuple[1].optional);

        tuple.push(ChannelType::new(ValueKind::Midi, DeviceKind::Invalid), false);
        assert!(!tuple.is_valid());
    }

    #[test]
    fn test_tuple_order_matters_for_equality() {
        let a = ChannelTuple::new()
            .with(ChannelType::CENTER_MIDI, false)
            .with(ChannelType::CENTER_AUDIO, false);
        let b = ChannelTuple::new()
            .with(ChannelType::CENTER_AUDIO, false)
            .with(ChannelType::CENTER_MIDI, false);
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_tuple_display() {
        let tuple = ChannelTuple::new()
            .with(ChannelType::CENTER_RECEIPT, false)
            .with(ChannelType::CENTER_MIDI, true);
        assert_eq!(tuple.to_string(), "(2, center.receipt, center.midi optional)");
        assert!(tuple.get(2).is_none());
    }

    #[test]
    fn test_tuple_iterates_from_the_last_channel() {
        let tuple = ChannelTuple::new()
            .with(ChannelType::CENTER_MIDI, false)
            .with(ChannelType::CENTER_AUDIO, true)
            .with(ChannelType::CENTER_RECEIPT, true);
        let reversed: Vec<(usize, ChannelType)> = tuple
            .iter()
            .enumerate()
            .rev()
            .map(|(i, spec)| (i, spec.ty))
            .collect();
        assert_eq!(
            reversed,
            vec![
                (2, ChannelType::CENTER_RECEIPT),
                (1, ChannelType::CENTER_AUDIO),
                (0, ChannelType::CENTER_MIDI),
            ]
        );
        assert_eq!(tuple.iter().len(), 3);
    }
}
