// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Shared {
    running: AtomicBool,
    failure: Mutex<Option<String>>,
    update_list: Mutex<BTreeSet<usize>>,
}

/// Back channel from atoms to the engine driving them.
///
/// Atoms address themselves by slot, the index the engine gave them in
/// [`WorldState`](super::WorldState).
#[derive(Debug, Clone)]
pub struct EngineHandle {
    shared: Arc<Shared>,
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl EngineHandle {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                running: AtomicBool::new(true),
                failure: Mutex::new(None),
                update_list: Mutex::new(BTreeSet::new()),
            }),
        }
    }

    pub fn add_to_update_list(&self, slot: usize) {
        lock(&self.shared.update_list).insert(slot);
    }

    pub fn remove_from_update_list(&self, slot: usize) {
        lock(&self.shared.update_list).remove(&slot);
    }

    pub fn is_in_update_list(&self, slot: usize) -> bool {
        lock(&self.shared.update_list).contains(&slot)
    }

    /// Asks the engine to stop after the current tick.
    pub fn set_not_running(&self) {
        self.shared.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Records a graph-level failure. The first message wins.
    pub fn set_failed(&self, msg: impl Into<String>) {
        let mut failure = lock(&self.shared.failure);
        if failure.is_none() {
            *failure = Some(msg.into());
        }
    }

    pub fn failure(&self) -> Option<String> {
        lock(&self.shared.failure).clone()
    }
}
