//! Observable registry
//!
//! The id-tracked construction entry point. Assigns monotonically
//! increasing ids, stores observables in insertion order, and routes
//! producer-side deliveries to a single observable by id. Routing is
//! point-to-point; the registry never fans an event out to more than
//! one observable.

use crate::config::Settings;
use crate::diag::{Diagnostics, NullDiagnostics};
use crate::error::{Error, Result};
use crate::event::{EventFactory, EventLog};
use crate::identity::ObservableId;
use crate::observable::{Handle, Observable};
use crate::time::Timers;
use indexmap::IndexMap;
use std::rc::Rc;

/// Storage for the observables created against one timer queue
pub struct Registry<E> {
    observables: IndexMap<ObservableId, Observable<E>>,
    next_id: u64,
    timers: Timers,
    diagnostics: Rc<dyn Diagnostics>,
}

impl<E: Clone + 'static> Registry<E> {
    /// Create an empty registry over the given timer queue
    pub fn new(timers: Timers) -> Self {
        Self::with_diagnostics(timers, Rc::new(NullDiagnostics))
    }

    /// Create a registry that hands the given diagnostics sink to every
    /// observable it creates
    pub fn with_diagnostics(timers: Timers, diagnostics: Rc<dyn Diagnostics>) -> Self {
        Self {
            observables: IndexMap::new(),
            next_id: 0,
            timers,
            diagnostics,
        }
    }

    /// Create a new observable over `events` and add it to the registry
    pub fn create(&mut self, events: EventLog<E>, settings: Settings) -> Result<&Observable<E>> {
        self.insert(events, settings, None)
    }

    /// Create a new observable with an event factory for first-event
    /// synthesis
    pub fn create_with_factory(
        &mut self,
        events: EventLog<E>,
        settings: Settings,
        factory: impl EventFactory<E> + 'static,
    ) -> Result<&Observable<E>> {
        self.insert(events, settings, Some(Box::new(factory)))
    }

    fn insert(
        &mut self,
        events: EventLog<E>,
        settings: Settings,
        factory: Option<Box<dyn EventFactory<E>>>,
    ) -> Result<&Observable<E>> {
        let id = ObservableId::new(self.next_id);
        let observable = Observable::with_collaborators(
            id,
            events,
            settings,
            self.timers.clone(),
            factory,
            Rc::clone(&self.diagnostics),
        )?;
        self.next_id += 1;
        self.observables.insert(id, observable);
        Ok(&self.observables[&id])
    }

    /// Get an observable by id
    pub fn get(&self, id: ObservableId) -> Option<&Observable<E>> {
        self.observables.get(&id)
    }

    /// Expose the consumer-side handle for `id`
    pub fn expose(&self, id: ObservableId) -> Result<Handle<E>> {
        self.get(id)
            .map(|observable| observable.expose())
            .ok_or(Error::ObservableNotFound(id))
    }

    /// Route an event to the observable with the given id
    pub fn update(&self, id: ObservableId, event: E) -> Result<()> {
        let observable = self.get(id).ok_or(Error::ObservableNotFound(id))?;
        observable.update(event);
        Ok(())
    }

    /// Alias for [`update`](Registry::update)
    pub fn notify(&self, id: ObservableId, event: E) -> Result<()> {
        self.update(id, event)
    }

    /// Route data to the rejection callback of the observable with the
    /// given id
    pub fn reject(&self, id: ObservableId, data: E) -> Result<()> {
        let observable = self.get(id).ok_or(Error::ObservableNotFound(id))?;
        observable.reject(data);
        Ok(())
    }

    /// Remove an observable, dropping any pending debounce window
    pub fn remove(&mut self, id: ObservableId) -> Option<Observable<E>> {
        self.observables.shift_remove(&id)
    }

    /// All live observable ids, in creation order
    pub fn ids(&self) -> impl Iterator<Item = ObservableId> + '_ {
        self.observables.keys().copied()
    }

    /// Number of live observables
    pub fn len(&self) -> usize {
        self.observables.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.observables.is_empty()
    }

    /// The timer queue shared by this registry's observables
    pub fn timers(&self) -> &Timers {
        &self.timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_ids_assigned_in_order() {
        let mut registry: Registry<u32> = Registry::new(Timers::new());

        let a = registry.create(EventLog::new(), Settings::new()).unwrap().id();
        let b = registry.create(EventLog::new(), Settings::new()).unwrap().id();

        assert_eq!(a, ObservableId::new(0));
        assert_eq!(b, ObservableId::new(1));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_routes_to_single_observable() {
        let mut registry: Registry<u32> = Registry::new(Timers::new());
        let a = registry.create(EventLog::new(), Settings::new()).unwrap().id();
        let b = registry.create(EventLog::new(), Settings::new()).unwrap().id();

        let seen_a: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_b: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let seen_a = Rc::clone(&seen_a);
            registry
                .expose(a)
                .unwrap()
                .react(move |_, event| seen_a.borrow_mut().push(event));
        }
        {
            let seen_b = Rc::clone(&seen_b);
            registry
                .expose(b)
                .unwrap()
                .react(move |_, event| seen_b.borrow_mut().push(event));
        }

        registry.update(a, 1).unwrap();
        registry.notify(b, 2).unwrap();

        assert_eq!(*seen_a.borrow(), vec![1]);
        assert_eq!(*seen_b.borrow(), vec![2]);
    }

    #[test]
    fn test_unknown_id_errors() {
        let registry: Registry<u32> = Registry::new(Timers::new());
        let missing = ObservableId::new(42);

        assert!(matches!(
            registry.update(missing, 0),
            Err(Error::ObservableNotFound(id)) if id == missing
        ));
        assert!(registry.expose(missing).is_err());
    }

    #[test]
    fn test_remove_frees_id_for_lookup_only() {
        let mut registry: Registry<u32> = Registry::new(Timers::new());
        let id = registry.create(EventLog::new(), Settings::new()).unwrap().id();

        assert!(registry.remove(id).is_some());
        assert!(registry.get(id).is_none());
        assert!(registry.is_empty());

        // Ids are never reused
        let next = registry.create(EventLog::new(), Settings::new()).unwrap().id();
        assert_ne!(next, id);
    }

    #[test]
    fn test_create_with_factory_validates() {
        let mut registry: Registry<u32> = Registry::new(Timers::new());

        let result = registry.create(EventLog::new(), Settings::new().with_first());
        assert!(matches!(result, Err(Error::MissingEventFactory(_))));

        let observable = registry
            .create_with_factory(EventLog::new(), Settings::new().with_first(), || 1u32)
            .unwrap();
        assert!(observable.settings().first);
    }
}
