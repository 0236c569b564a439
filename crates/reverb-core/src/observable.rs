//! Single-reaction observable with a capability-restricted consumer view
//!
//! An [`Observable`] holds one reaction callback, a handle to an
//! externally owned event log, and its debounce state, all in one
//! explicit state struct. [`expose`](Observable::expose) returns a
//! [`Handle`] — the restricted view consumers register through
//! (`react`, `debounce`, `reject`, `first`). Delivery entry points
//! (`update`, `notify`, `reject(data)`) stay on the observable itself,
//! so producers and consumers see asymmetric surfaces.
//!
//! Reactions are invoked with the exposed handle as an explicit receiver
//! argument, so a reaction body can chain further calls on its own
//! observable.

use crate::config::{DebounceConfig, Settings};
use crate::debounce::Debouncer;
use crate::diag::{Diagnostics, NullDiagnostics};
use crate::error::{Error, Result};
use crate::event::{EventFactory, EventLog};
use crate::identity::ObservableId;
use crate::time::Timers;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type ReactionFn<E> = Rc<RefCell<dyn FnMut(&Handle<E>, E)>>;

/// Internal mutable state, shared between the observable and its handles
struct State<E> {
    id: ObservableId,
    settings: Settings,
    events: EventLog<E>,
    timers: Timers,
    diagnostics: Rc<dyn Diagnostics>,
    factory: Option<Box<dyn EventFactory<E>>>,
    /// Single-slot reaction registry: first write wins
    reaction: Option<ReactionFn<E>>,
    /// Deprecated rejection slot: last write wins
    rejection: Option<ReactionFn<E>>,
    /// Recorded window; present once debouncing has been requested
    debounce: Option<DebounceConfig>,
    /// Live wrapper; built when a reaction exists and debouncing is on
    debouncer: Option<Rc<Debouncer<E>>>,
}

/// The single-reaction notifier primitive
///
/// Constructed through [`Observable::new`] and friends (or a
/// [`Registry`](crate::Registry)); mutated only through its own methods
/// and its exposed [`Handle`].
pub struct Observable<E> {
    state: Rc<RefCell<State<E>>>,
}

/// The capability-restricted consumer view of an observable
///
/// Handles only register callbacks and read the event log; they cannot
/// deliver events. Every registration method returns the handle again,
/// so calls chain. Handles compare equal when they view the same
/// observable.
pub struct Handle<E> {
    state: Rc<RefCell<State<E>>>,
}

impl<E> Clone for Handle<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E> PartialEq for Handle<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<E> Eq for Handle<E> {}

impl<E> fmt::Debug for Handle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.state.borrow().id)
    }
}

impl<E> fmt::Debug for Observable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Observable")
            .field("id", &state.id)
            .field("reaction_set", &state.reaction.is_some())
            .field("debounce", &state.debounce)
            .finish()
    }
}

impl<E: Clone + 'static> Observable<E> {
    /// Create an observable without an event factory
    ///
    /// Errors when `settings.first` is set, since first-event synthesis
    /// needs a factory; use [`with_factory`](Observable::with_factory).
    pub fn new(
        id: ObservableId,
        events: EventLog<E>,
        settings: Settings,
        timers: Timers,
    ) -> Result<Self> {
        Self::with_collaborators(id, events, settings, timers, None, Rc::new(NullDiagnostics))
    }

    /// Create an observable with an event factory for first-event synthesis
    pub fn with_factory(
        id: ObservableId,
        events: EventLog<E>,
        settings: Settings,
        timers: Timers,
        factory: impl EventFactory<E> + 'static,
    ) -> Result<Self> {
        Self::with_collaborators(
            id,
            events,
            settings,
            timers,
            Some(Box::new(factory)),
            Rc::new(NullDiagnostics),
        )
    }

    /// Create an observable with explicit collaborators
    pub fn with_collaborators(
        id: ObservableId,
        events: EventLog<E>,
        settings: Settings,
        timers: Timers,
        factory: Option<Box<dyn EventFactory<E>>>,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Result<Self> {
        if settings.first && factory.is_none() {
            return Err(Error::MissingEventFactory(id));
        }
        Ok(Self {
            state: Rc::new(RefCell::new(State {
                id,
                settings,
                events,
                timers,
                diagnostics,
                factory,
                reaction: None,
                rejection: None,
                debounce: settings.debounce,
                debouncer: None,
            })),
        })
    }

    /// This observable's identifier
    pub fn id(&self) -> ObservableId {
        self.state.borrow().id
    }

    /// The settings this observable was constructed with
    pub fn settings(&self) -> Settings {
        self.state.borrow().settings
    }

    /// The restricted view handed to consumers
    ///
    /// Idempotent: repeated calls return handles over the same shared
    /// state, and handles compare equal via [`PartialEq`].
    pub fn expose(&self) -> Handle<E> {
        Handle {
            state: Rc::clone(&self.state),
        }
    }

    /// Deliver an event to the reaction, if one is registered
    ///
    /// Dropped silently when no reaction has been registered; events are
    /// not buffered. With debouncing active, delivery follows the
    /// configured window instead of happening synchronously.
    pub fn update(&self, event: E) {
        dispatch(&self.state, event);
    }

    /// Alias for [`update`](Observable::update)
    pub fn notify(&self, event: E) {
        self.update(event);
    }

    /// Deliver data to the rejection callback, if one is registered
    pub fn reject(&self, data: E) {
        let rejection = self.state.borrow().rejection.clone();
        if let Some(rejection) = rejection {
            let handle = Handle {
                state: Rc::clone(&self.state),
            };
            (&mut *rejection.borrow_mut())(&handle, data);
        }
    }
}

impl<E: Clone + 'static> Handle<E> {
    /// The identifier of the observable behind this handle
    pub fn id(&self) -> ObservableId {
        self.state.borrow().id
    }

    /// Register the reaction callback
    ///
    /// First write wins: once a reaction is registered, later calls are
    /// no-ops and do not replace it. When debouncing was requested before
    /// registration, the reaction is wrapped now; when `settings.first`
    /// is set, a fresh event is synthesized and delivered through the
    /// normal update path. Always returns the handle, so callers cannot
    /// tell from the return value whether the store happened.
    pub fn react(&self, reaction: impl FnMut(&Handle<E>, E) + 'static) -> &Self {
        let synthesized = {
            let mut state = self.state.borrow_mut();
            if state.reaction.is_some() {
                return self;
            }
            state.reaction = Some(Rc::new(RefCell::new(reaction)));
            if let Some(config) = state.debounce {
                let timers = state.timers.clone();
                state.debouncer = Some(make_debouncer(&self.state, timers, config));
            }
            if state.settings.first {
                state.factory.as_mut().map(|factory| factory.make())
            } else {
                None
            }
        };
        if let Some(event) = synthesized {
            dispatch(&self.state, event);
        }
        self
    }

    /// Enable debouncing with the given wait window
    ///
    /// Before a reaction is registered this only records the window;
    /// wrapping happens at registration time. With a reaction already
    /// set, it is re-wrapped in place around the current reaction slot —
    /// wrappers never stack — and a window already in flight is
    /// discarded. The edge policy comes from the settings' debounce
    /// configuration and defaults to trailing.
    pub fn debounce(&self, wait_ms: u64) -> &Self {
        let mut state = self.state.borrow_mut();
        let edge = state.debounce.map(|config| config.edge).unwrap_or_default();
        let config = DebounceConfig { wait_ms, edge };
        state.debounce = Some(config);
        if state.reaction.is_some() {
            let timers = state.timers.clone();
            state.debouncer = Some(make_debouncer(&self.state, timers, config));
        }
        drop(state);
        self
    }

    /// Register the rejection callback
    ///
    /// Deprecated path kept for older consumers; registering emits a
    /// warning through the diagnostics collaborator. Unlike
    /// [`react`](Handle::react), a later registration replaces the
    /// earlier one.
    pub fn reject(&self, rejection: impl FnMut(&Handle<E>, E) + 'static) -> &Self {
        let mut state = self.state.borrow_mut();
        state
            .diagnostics
            .warn(&format!("{}: reject() is deprecated, use react()", state.id));
        state.rejection = Some(Rc::new(RefCell::new(rejection)));
        drop(state);
        self
    }

    /// The first recorded event, if the log is non-empty
    ///
    /// Pure read; never mutates the log.
    pub fn first(&self) -> Option<E> {
        self.state.borrow().events.first()
    }
}

/// Route an event through the debouncer when one is active, otherwise
/// straight to the reaction
///
/// Both borrows are released before any callback runs, so reactions may
/// re-enter the handle.
fn dispatch<E: Clone + 'static>(state: &Rc<RefCell<State<E>>>, event: E) {
    let (debouncer, reaction) = {
        let state_ref = state.borrow();
        (state_ref.debouncer.clone(), state_ref.reaction.clone())
    };
    if let Some(debouncer) = debouncer {
        debouncer.call(event);
    } else if let Some(reaction) = reaction {
        let handle = Handle {
            state: Rc::clone(state),
        };
        (&mut *reaction.borrow_mut())(&handle, event);
    }
}

/// Build the debounced delivery path around the reaction slot
///
/// The wrapper reads the current reaction at fire time rather than
/// capturing it, so re-registration rules stay with the slot itself.
/// Holding the state weakly keeps the observable collectible while a
/// timer is armed.
fn make_debouncer<E: Clone + 'static>(
    state: &Rc<RefCell<State<E>>>,
    timers: Timers,
    config: DebounceConfig,
) -> Rc<Debouncer<E>> {
    let weak = Rc::downgrade(state);
    Rc::new(Debouncer::new(timers, config, move |event: E| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let reaction = state.borrow().reaction.clone();
        if let Some(reaction) = reaction {
            let handle = Handle {
                state: Rc::clone(&state),
            };
            (&mut *reaction.borrow_mut())(&handle, event);
        }
    }))
}
