//! Round-robin slot selection for the producer.

use std::sync::Arc;

use crate::slot::SharedTextureSlot;

/// Cycles through slot indices so consecutive frames land in different
/// slots while consumers read the previous ones.
#[derive(Debug, Clone)]
pub struct SlotCursor {
    count: usize,
    next: usize,
}

impl SlotCursor {
    /// Create a cursor over `count` slots.
    pub fn new(count: usize) -> Self {
        Self { count, next: 0 }
    }

    /// Take the next index. `None` when there are no slots.
    pub fn next_index(&mut self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let index = self.next;
        self.next = (self.next + 1) % self.count;
        Some(index)
    }

    /// Take the next index whose slot is not locked, trying each slot once.
    ///
    /// Indices wrap at `slots.len()`, whatever count the cursor was built
    /// with. Returns `None` if every slot is locked; the caller drops the
    /// frame.
    pub fn next_unlocked<T: Clone>(
        &mut self,
        slots: &[Arc<SharedTextureSlot<T>>],
    ) -> Option<usize> {
        let len = slots.len();
        for _ in 0..len {
            let index = self.next % len;
            self.next = (index + 1) % len;
            if !slots[index].is_locked() {
                return Some(index);
            }
        }
        None
    }

    /// Restart from slot 0.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
