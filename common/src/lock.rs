// Single-flight guard around task execution

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

/// Single-slot guard serializing update-and-publish executions.
///
/// The counter file and the git working tree are process-wide shared state;
/// a fire that overlaps a still-running execution must be skipped, never
/// interleaved or queued.
#[derive(Clone)]
pub struct ExecutionSlot {
    semaphore: Arc<Semaphore>,
}

/// Held for the duration of one execution; releases the slot on drop.
pub struct SlotGuard {
    _permit: OwnedSemaphorePermit,
}

impl ExecutionSlot {
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }

    /// Non-blocking acquire. Returns `None` while a previous execution still
    /// holds the slot.
    pub fn try_acquire(&self) -> Option<SlotGuard> {
        match self.semaphore.clone().try_acquire_owned() {
            Ok(permit) => Some(SlotGuard { _permit: permit }),
            Err(TryAcquireError::NoPermits) => None,
            Err(TryAcquireError::Closed) => None,
        }
    }
}

impl Default for ExecutionSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_exclusive_while_held() {
        let slot = ExecutionSlot::new();
        let guard = slot.try_acquire();
        assert!(guard.is_some());
        assert!(slot.try_acquire().is_none());
        drop(guard);
    }

    #[test]
    fn test_slot_is_reusable_after_release() {
        let slot = ExecutionSlot::new();
        {
            let _guard = slot.try_acquire().unwrap();
        }
        assert!(slot.try_acquire().is_some());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let slot = ExecutionSlot::new();
        let clone = slot.clone();
        let _guard = slot.try_acquire().unwrap();
        assert!(clone.try_acquire().is_none());
    }
}
