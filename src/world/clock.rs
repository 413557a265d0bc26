// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared transport time in seconds.
///
/// The engine is the only writer; atoms hold clones and read it. Stored as the
/// bit pattern of an `f64` so reads never lock.
#[derive(Debug, Clone, Default)]
pub struct TransportClock {
    bits: Arc<AtomicU64>,
}

impl TransportClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::Release);
    }

    /// Returns the new time.
    pub fn advance(&self, dt: f64) -> f64 {
        let now = self.get() + dt;
        self.set(now);
        now
    }
}
