// ifq.rs
//
// Instruction Fetch Queue (§3): a bounded FIFO between fetch and dispatch.
// Holds program-order indices, not instruction content, since the trace
// owns the decoded instructions.

use std::collections::VecDeque;

pub struct InstructionFetchQueue {
    capacity: usize,
    slots: VecDeque<usize>,
}

impl InstructionFetchQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: VecDeque::with_capacity(capacity),
        }
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn front(&self) -> Option<usize> {
        self.slots.front().copied()
    }

    pub fn push_back(&mut self, instr_index: usize) {
        debug_assert!(!self.is_full(), "fetch must not push into a full IFQ");
        self.slots.push_back(instr_index);
    }

    pub fn pop_front(&mut self) -> Option<usize> {
        self.slots.pop_front()
    }
}
