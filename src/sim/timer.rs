//! One-shot timers on the simulation thread
//!
//! Deferred work is a typed value held until its delay has elapsed, then
//! handed back to the caller in the order it came due. Delays are converted
//! to whole fixed ticks when scheduled, so a 2 s timer fires on exactly the
//! 100th tick. There is no cancel: a queued item always fires unless the whole
//! queue is dropped with the level.

use crate::consts::SIM_DT;
use crate::platform::Scheduler;
use crate::sim::TransitionKind;

/// Number of fixed ticks covering `seconds` (negative or NaN delays are zero)
pub fn seconds_to_ticks(seconds: f32) -> u32 {
    (seconds.max(0.0) / SIM_DT).round() as u32
}

#[derive(Debug, Clone)]
struct Pending<T> {
    remaining_ticks: u32,
    /// Insertion order, breaks ties between timers due on the same tick
    seq: u64,
    item: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    pending: Vec<Pending<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `item` to come due after `seconds`. A zero delay fires on the next tick.
    pub fn schedule(&mut self, seconds: f32, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            remaining_ticks: seconds_to_ticks(seconds),
            seq,
            item,
        });
    }

    /// Advance one fixed tick and return everything that came due
    pub fn tick(&mut self) -> Vec<T> {
        for timer in &mut self.pending {
            timer.remaining_ticks = timer.remaining_ticks.saturating_sub(1);
        }

        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|timer| timer.remaining_ticks == 0);
        self.pending = waiting;

        due.sort_by_key(|timer| timer.seq);
        due.into_iter().map(|timer| timer.item).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Ticks until the next timer fires
    pub fn next_due_ticks(&self) -> Option<u32> {
        self.pending.iter().map(|timer| timer.remaining_ticks).min()
    }

    /// Drop everything (level unload)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Scheduler for TimerQueue<TransitionKind> {
    fn after(&mut self, seconds: f32, kind: TransitionKind) {
        self.schedule(seconds, kind);
    }
}
