//! Cooperative timer queue
//!
//! The only source of deferred execution in this crate. Nothing runs in
//! the background: time moves when the owner calls [`Timers::advance`],
//! which fires every due timer in deadline order. Callbacks run outside
//! the queue borrow, so they may schedule or cancel further timers.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier for an armed timer
pub type TimerId = u64;

type TimerFn = Box<dyn FnOnce()>;

struct Entry {
    deadline_ms: u64,
    id: TimerId,
    callback: TimerFn,
}

#[derive(Default)]
struct Queue {
    now_ms: u64,
    next_id: TimerId,
    armed: Vec<Entry>,
}

/// Handle to a shared cooperative timer queue
///
/// Cloning produces another handle to the same queue, so a whole graph of
/// debouncers and observables can share one clock.
#[derive(Clone, Default)]
pub struct Timers {
    queue: Rc<RefCell<Queue>>,
}

impl Timers {
    /// Create a new queue at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    /// Number of armed timers
    pub fn armed(&self) -> usize {
        self.queue.borrow().armed.len()
    }

    /// Arm a timer `delay_ms` from now
    ///
    /// A zero delay does not run `callback` synchronously; it fires on the
    /// next [`advance`](Timers::advance) call, even `advance(0)`.
    pub fn schedule(&self, delay_ms: u64, callback: impl FnOnce() + 'static) -> TimerId {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let deadline_ms = queue.now_ms + delay_ms;
        queue.armed.push(Entry {
            deadline_ms,
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Disarm a timer
    ///
    /// Returns false if it already fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.armed.len();
        queue.armed.retain(|entry| entry.id != id);
        queue.armed.len() != before
    }

    /// Move time forward by `delta_ms` and fire every timer that comes due
    ///
    /// Timers fire in deadline order, FIFO among equal deadlines. The
    /// queue time steps to each deadline as it fires, so a timer scheduled
    /// by a callback fires within the same call when its deadline still
    /// falls inside the window.
    pub fn advance(&self, delta_ms: u64) {
        let target_ms = self.queue.borrow().now_ms + delta_ms;
        loop {
            let callback = {
                let mut queue = self.queue.borrow_mut();
                let next = queue
                    .armed
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.deadline_ms <= target_ms)
                    .min_by_key(|(_, entry)| (entry.deadline_ms, entry.id))
                    .map(|(index, _)| index);
                match next {
                    Some(index) => {
                        let entry = queue.armed.swap_remove(index);
                        queue.now_ms = queue.now_ms.max(entry.deadline_ms);
                        Some(entry.callback)
                    }
                    None => {
                        queue.now_ms = target_ms;
                        None
                    }
                }
            };
            match callback {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    /// Fire timers already due without moving time
    pub fn tick(&self) {
        self.advance(0);
    }
}
