//! Non-blocking byte FIFOs crossing the core boundary.

use std::collections::VecDeque;

/// FIFO of raw bytes at the core boundary.
///
/// The core is the single consumer of the transmit queue and the single
/// producer to the receive queue. It never blocks on either: availability is
/// polled every cycle and the cycle completes regardless of queue state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ByteQueue {
    bytes: VecDeque<u8>,
    capacity: Option<usize>,
}

impl Default for ByteQueue {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl ByteQueue {
    /// Creates a queue with no capacity limit (the functional-model default).
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            bytes: VecDeque::new(),
            capacity: None,
        }
    }

    /// Creates a queue that rejects pushes once `capacity` bytes are pending.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            bytes: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Appends a byte, returning whether it was accepted.
    ///
    /// A full bounded queue rejects the byte; the caller decides whether that
    /// means dropping data or retrying on a later cycle.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.bytes.push_back(byte);
        true
    }

    /// Removes and returns the oldest pending byte.
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    /// Number of pending bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true when no bytes are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true when a bounded queue has no remaining room.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.bytes.len() >= capacity)
    }

    /// Configured capacity, or `None` when unbounded.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Discards all pending bytes, keeping the capacity setting.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Iterates pending bytes in dequeue order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::ByteQueue;

    #[test]
    fn unbounded_queue_preserves_fifo_order() {
        let mut queue = ByteQueue::unbounded();
        assert!(queue.is_empty());
        assert!(!queue.is_full());

        assert!(queue.push(0x11));
        assert!(queue.push(0x22));
        assert!(queue.push(0x33));
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pop(), Some(0x11));
        assert_eq!(queue.pop(), Some(0x22));
        assert_eq!(queue.pop(), Some(0x33));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn bounded_queue_rejects_pushes_when_full() {
        let mut queue = ByteQueue::bounded(2);
        assert!(queue.push(0xAA));
        assert!(queue.push(0xBB));
        assert!(queue.is_full());
        assert!(!queue.push(0xCC));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop(), Some(0xAA));
        assert!(!queue.is_full());
        assert!(queue.push(0xCC));
    }

    #[test]
    fn zero_capacity_queue_is_always_full() {
        let mut queue = ByteQueue::bounded(0);
        assert!(queue.is_full());
        assert!(!queue.push(0x55));
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_keeps_capacity_setting() {
        let mut queue = ByteQueue::bounded(1);
        assert!(queue.push(0x01));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), Some(1));
        assert!(queue.push(0x02));
        assert!(queue.is_full());
    }

    #[test]
    fn iter_reports_dequeue_order_without_consuming() {
        let mut queue = ByteQueue::unbounded();
        assert!(queue.push(1));
        assert!(queue.push(2));
        let seen: Vec<u8> = queue.iter().collect();
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(queue.len(), 2);
    }
}
