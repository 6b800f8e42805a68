//! Undo is a bounded stack of full buffer snapshots.
//! Snapshots are independent copies, so mutating the live buffer never changes them.
//! The image as it was loaded is kept outside the stack and is never evicted.

use std::collections::VecDeque;

use crate::PixelBuffer;

pub const HISTORY_LIMIT: usize = 15;

pub struct UndoHistory {
    snapshots: VecDeque<PixelBuffer>,
    original: PixelBuffer,
}

impl UndoHistory {
    pub fn new(original: PixelBuffer) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(HISTORY_LIMIT),
            original,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// Copies `buffer` onto the stack, evicting the oldest snapshot when full.
    pub fn snapshot(&mut self, buffer: &PixelBuffer) {
        if self.snapshots.len() == HISTORY_LIMIT {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(buffer.clone());
    }

    pub fn pop(&mut self) -> Option<PixelBuffer> {
        self.snapshots.pop_back()
    }

    /// Restores the most recent snapshot into `buffer`. Returns false on an empty history.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> bool {
        match self.pop() {
            Some(previous) => {
                *buffer = previous;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self, buffer: &mut PixelBuffer) {
        self.snapshots.clear();
        buffer.clone_from(&self.original);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorSample;

    fn buffer_with_red(r: u8) -> PixelBuffer {
        PixelBuffer::from_raw(1, 1, vec![r, 0, 0, 255]).unwrap()
    }

    #[test]
    fn undo_empty_returns_none() {
        let mut history = UndoHistory::new(buffer_with_red(0));
        assert_eq!(None, history.pop());

        let mut live = buffer_with_red(7);
        assert!(!history.undo(&mut live));
        assert_eq!(live, buffer_with_red(7));
    }

    #[test]
    fn pop_is_lifo() {
        let mut history = UndoHistory::new(buffer_with_red(0));
        history.snapshot(&buffer_with_red(1));
        history.snapshot(&buffer_with_red(2));
        assert_eq!(history.pop(), Some(buffer_with_red(2)));
        assert_eq!(history.pop(), Some(buffer_with_red(1)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut history = UndoHistory::new(buffer_with_red(0));
        for i in 1..=20 {
            history.snapshot(&buffer_with_red(i));
            assert!(history.len() <= HISTORY_LIMIT);
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        let restored = std::iter::from_fn(|| history.pop())
            .map(|b| b.get(0, 0).r)
            .collect::<Vec<_>>();
        assert_eq!(restored, (6..=20).rev().collect::<Vec<_>>());
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut history = UndoHistory::new(buffer_with_red(0));
        let mut live = buffer_with_red(5);
        history.snapshot(&live);
        live.set(0, 0, ColorSample::new(9, 9, 9, 0));
        assert_eq!(history.pop(), Some(buffer_with_red(5)));
    }

    #[test]
    fn reset_restores_original_and_clears() {
        let mut history = UndoHistory::new(buffer_with_red(0));
        let mut live = buffer_with_red(3);
        history.snapshot(&buffer_with_red(1));
        history.snapshot(&buffer_with_red(2));
        history.reset(&mut live);
        assert_eq!(live, buffer_with_red(0));
        assert!(history.is_empty());
        assert!(!history.undo(&mut live));
    }

    #[test]
    fn original_survives_eviction() {
        let mut history = UndoHistory::new(buffer_with_red(42));
        for i in 0..30 {
            history.snapshot(&buffer_with_red(i));
        }
        assert_eq!(history.original(), &buffer_with_red(42));
    }
}
