//! Tick-keyed event scheduler
//!
//! Session timers (spawn cadence, laser phases) are one-shot entries in a
//! min-heap ordered by due tick, then by insertion order. Repeating timers
//! are re-armed by whoever handles the event.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Timed session events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    SpawnMeteorite,
    SpawnDebris,
    /// Laser telegraph begins
    LaserWarning,
    /// Telegraph over, beam is lethal
    LaserFire,
    /// Lethal window over
    LaserCooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    due: u64,
    seq: u64,
    event: TimerEvent,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, earliest entry must pop first
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` at tick `due`
    pub fn schedule_at(&mut self, due: u64, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { due, seq, event });
    }

    /// Fire `event` `delay` ticks after `now`
    pub fn schedule_in(&mut self, now: u64, delay: u64, event: TimerEvent) {
        self.schedule_at(now + delay, event);
    }

    /// Next event due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Option<TimerEvent> {
        if self.queue.peek()?.due > now {
            return None;
        }
        self.queue.pop().map(|s| s.event)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_pending(&self, event: TimerEvent) -> bool {
        self.queue.iter().any(|s| s.event == event)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
