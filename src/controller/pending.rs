use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::actions::ActionCommand;

/// Unbounded FIFO of actions waiting for the model.
///
/// Many producers (view threads) push; one consumer (the model) takes the
/// whole backlog at once.
pub(super) struct PendingActions {
    queue: Mutex<VecDeque<ActionCommand>>,
    draining: AtomicBool,
    warn_at: Option<usize>,
    warned: AtomicBool,
}

/// Marks a drain in progress; released on drop.
pub(super) struct DrainGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl PendingActions {
    pub fn new(warn_at: Option<usize>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
            warn_at,
            warned: AtomicBool::new(false),
        }
    }

    /// Appends `action` and returns the buffer length after the push.
    pub fn push(&self, action: ActionCommand) -> usize {
        let len = {
            let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            queue.push_back(action);
            queue.len()
        };

        if let Some(limit) = self.warn_at {
            if len >= limit && !self.warned.swap(true, Ordering::AcqRel) {
                tracing::warn!(pending = len, limit, "action buffer is growing; is the model draining?");
            }
        }
        len
    }

    /// Removes and returns everything currently buffered, oldest first.
    pub fn take_all(&self) -> VecDeque<ActionCommand> {
        let batch = std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner));
        self.warned.store(false, Ordering::Release);
        batch
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Claims the drain slot, or `None` if another drain holds it.
    pub fn try_begin_drain(&self) -> Option<DrainGuard<'_>> {
        self.draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| DrainGuard {
                flag: &self.draining,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Value;

    fn action(n: i32) -> ActionCommand {
        ActionCommand::new("n", n).unwrap()
    }

    #[test]
    fn test_take_all_is_fifo_and_empties() {
        let p = PendingActions::new(None);
        assert_eq!(p.push(action(1)), 1);
        assert_eq!(p.push(action(2)), 2);

        let batch: Vec<_> = p.take_all().into_iter().map(|a| a.value().clone()).collect();
        assert_eq!(batch, vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn test_drain_slot_is_exclusive() {
        let p = PendingActions::new(None);
        let guard = p.try_begin_drain().expect("first");
        assert!(p.try_begin_drain().is_none());
        drop(guard);
        assert!(p.try_begin_drain().is_some());
    }

    #[test]
    fn test_warning_rearms_after_drain() {
        let p = PendingActions::new(Some(2));
        p.push(action(1));
        p.push(action(2));
        assert!(p.warned.load(Ordering::Acquire));
        p.take_all();
        assert!(!p.warned.load(Ordering::Acquire));
    }
}
