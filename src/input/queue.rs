//! Interrupt-safe input event FIFO.
//!
//! Producers run in the scan-timer context, the consumer is the main
//! loop. Both sides take a short `critical_section` around every
//! operation; each operation is O(1) and never blocks.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use super::InputEvent;
use crate::config::EVENT_QUEUE_CAPACITY;

pub struct EventQueue<const N: usize = EVENT_QUEUE_CAPACITY> {
    inner: Mutex<RefCell<Deque<InputEvent, N>>>,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Append an event. When the queue is full the new event is dropped
    /// and `false` is returned.
    pub fn push(&self, event: InputEvent) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).push_back(event).is_ok())
    }

    /// Remove the oldest event.
    pub fn pop(&self) -> Option<InputEvent> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every pending event.
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).clear());
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}
