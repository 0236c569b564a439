//! Temporal coalescing of repeated calls
//!
//! A [`Debouncer`] wraps a single-argument callback so that bursts of
//! calls within a wait window collapse into one invocation:
//!
//! - Trailing edge (default): each call records the latest argument and
//!   resets the window; the callback fires once, a full window after the
//!   last call of the burst, with that last argument.
//! - Leading edge: the first call of a burst fires immediately and opens
//!   the window; calls while it is open are suppressed entirely — no
//!   invocation, no argument update, no window reset.
//!
//! Pending state is private to each debouncer; wrapping two callbacks
//! never shares a window.

use crate::config::{DebounceConfig, Edge};
use crate::time::{TimerId, Timers};
use std::cell::RefCell;
use std::rc::Rc;

struct Pending<T> {
    timer: Option<TimerId>,
    last_arg: Option<T>,
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Self {
            timer: None,
            last_arg: None,
        }
    }
}

/// A debounced single-argument callback
///
/// Dropping the debouncer disarms any pending timer, so a trailing
/// delivery still in flight is discarded rather than fired late.
pub struct Debouncer<T> {
    timers: Timers,
    config: DebounceConfig,
    callback: Rc<RefCell<dyn FnMut(T)>>,
    pending: Rc<RefCell<Pending<T>>>,
}

impl<T: 'static> Debouncer<T> {
    /// Wrap `callback` with the given window over the shared timer queue
    pub fn new(timers: Timers, config: DebounceConfig, callback: impl FnMut(T) + 'static) -> Self {
        Self {
            timers,
            config,
            callback: Rc::new(RefCell::new(callback)),
            pending: Rc::new(RefCell::new(Pending::default())),
        }
    }

    /// The configured window
    pub fn config(&self) -> DebounceConfig {
        self.config
    }

    /// Whether a window is currently open
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().timer.is_some()
    }

    /// Feed one call into the debouncer
    pub fn call(&self, arg: T) {
        match self.config.edge {
            Edge::Trailing => self.call_trailing(arg),
            Edge::Leading => self.call_leading(arg),
        }
    }

    fn call_trailing(&self, arg: T) {
        {
            let mut pending = self.pending.borrow_mut();
            pending.last_arg = Some(arg);
            if let Some(timer) = pending.timer.take() {
                self.timers.cancel(timer);
            }
        }

        let callback = Rc::downgrade(&self.callback);
        let pending = Rc::downgrade(&self.pending);
        let timer = self.timers.schedule(self.config.wait_ms, move || {
            let (Some(callback), Some(pending)) = (callback.upgrade(), pending.upgrade()) else {
                return;
            };
            let arg = {
                let mut pending = pending.borrow_mut();
                pending.timer = None;
                pending.last_arg.take()
            };
            if let Some(arg) = arg {
                (&mut *callback.borrow_mut())(arg);
            }
        });
        self.pending.borrow_mut().timer = Some(timer);
    }

    fn call_leading(&self, arg: T) {
        if self.pending.borrow().timer.is_some() {
            return;
        }

        // The timer only closes the window; it never re-invokes.
        let pending = Rc::downgrade(&self.pending);
        let timer = self.timers.schedule(self.config.wait_ms, move || {
            if let Some(pending) = pending.upgrade() {
                pending.borrow_mut().timer = None;
            }
        });
        self.pending.borrow_mut().timer = Some(timer);

        (&mut *self.callback.borrow_mut())(arg);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.borrow_mut().timer.take() {
            self.timers.cancel(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collected<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
        let seen: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let seen = Rc::clone(&seen);
            move |arg: T| seen.borrow_mut().push(arg)
        };
        (seen, sink)
    }

    /// Five calls at 10ms intervals against a 100ms trailing window: one
    /// invocation, a full window after the last call, with its argument.
    #[test]
    fn test_trailing_coalesces_burst() {
        let timers = Timers::new();
        let (seen, sink) = collected();
        let debouncer = Debouncer::new(timers.clone(), DebounceConfig::trailing(100), sink);

        for i in 0..5u32 {
            debouncer.call(i);
            timers.advance(10);
        }
        assert!(seen.borrow().is_empty());

        // Last call landed at t=40; its window closes at t=140
        timers.advance(89);
        assert!(seen.borrow().is_empty());

        timers.advance(1);
        assert_eq!(*seen.borrow(), vec![4]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_trailing_each_call_resets_window() {
        let timers = Timers::new();
        let (seen, sink) = collected();
        let debouncer = Debouncer::new(timers.clone(), DebounceConfig::trailing(100), sink);

        debouncer.call(1u32);
        timers.advance(99);
        debouncer.call(2);
        timers.advance(99);
        assert!(seen.borrow().is_empty());

        timers.advance(1);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    /// Leading edge fires on the first call, suppresses while the window
    /// is open, and fires again once it has expired.
    #[test]
    fn test_leading_fires_first_then_suppresses() {
        let timers = Timers::new();
        let (seen, sink) = collected();
        let debouncer = Debouncer::new(timers.clone(), DebounceConfig::leading(100), sink);

        debouncer.call(1u32);
        assert_eq!(*seen.borrow(), vec![1]);

        timers.advance(50);
        debouncer.call(2);
        assert_eq!(*seen.borrow(), vec![1]);

        // Suppressed calls do not reset the window: it still closes at t=100
        timers.advance(50);
        debouncer.call(3);
        assert_eq!(*seen.borrow(), vec![1, 3]);
    }

    #[test]
    fn test_zero_wait_still_defers_trailing() {
        let timers = Timers::new();
        let (seen, sink) = collected();
        let debouncer = Debouncer::new(timers.clone(), DebounceConfig::trailing(0), sink);

        debouncer.call(7u32);
        assert!(seen.borrow().is_empty());

        timers.tick();
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_debouncers_keep_independent_state() {
        let timers = Timers::new();
        let (seen_a, sink_a) = collected();
        let (seen_b, sink_b) = collected();
        let a = Debouncer::new(timers.clone(), DebounceConfig::trailing(100), sink_a);
        let b = Debouncer::new(timers.clone(), DebounceConfig::trailing(100), sink_b);

        a.call(1u32);
        timers.advance(50);
        b.call(2u32);

        // a's window closes at t=100, b's at t=150
        timers.advance(50);
        assert_eq!(*seen_a.borrow(), vec![1]);
        assert!(seen_b.borrow().is_empty());

        timers.advance(50);
        assert_eq!(*seen_b.borrow(), vec![2]);
    }

    #[test]
    fn test_drop_disarms_pending_timer() {
        let timers = Timers::new();
        let (seen, sink) = collected::<u32>();
        let debouncer = Debouncer::new(timers.clone(), DebounceConfig::trailing(100), sink);

        debouncer.call(1);
        assert_eq!(timers.armed(), 1);

        drop(debouncer);
        assert_eq!(timers.armed(), 0);

        timers.advance(200);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_leading_window_closes_without_reinvoking() {
        let timers = Timers::new();
        let (seen, sink) = collected();
        let debouncer = Debouncer::new(timers.clone(), DebounceConfig::leading(100), sink);

        debouncer.call(1u32);
        assert!(debouncer.is_pending());

        timers.advance(100);
        assert!(!debouncer.is_pending());
        assert_eq!(*seen.borrow(), vec![1]);
    }
}
