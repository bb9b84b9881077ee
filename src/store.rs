//! A single-threaded observable container for state that outlives any one
//! render of the picker.
//!
//! The host owns the store and hands it to the picker for every event; the
//! picker creates the value when it opens and removes it when it closes.
//! Listeners are told about every change synchronously, in the order in
//! which they subscribed.  Listeners must not try to reach the store they
//! are subscribed to.
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Change<'a, T> {
    Set(&'a T),
    Removed,
}

type Listener<T> = Box<dyn FnMut(Change<'_, T>)>;

pub(crate) struct Store<T> {
    value: Option<T>,
    listeners: Vec<Listener<T>>,
}

impl<T> Store<T> {
    pub(crate) fn new() -> Store<T> {
        Store {
            value: None,
            listeners: Vec::new(),
        }
    }

    pub(crate) fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub(crate) fn set(&mut self, value: T) {
        let value = self.value.insert(value);
        for listener in &mut self.listeners {
            listener(Change::Set(&*value));
        }
    }

    /// Mutates the stored value in place.  Returns `false` without calling
    /// `f` if there is no value.
    pub(crate) fn update<F: FnOnce(&mut T)>(&mut self, f: F) -> bool {
        let Some(value) = self.value.as_mut() else {
            return false;
        };
        f(value);
        for listener in &mut self.listeners {
            listener(Change::Set(&*value));
        }
        true
    }

    pub(crate) fn remove(&mut self) -> Option<T> {
        let value = self.value.take();
        if value.is_some() {
            for listener in &mut self.listeners {
                listener(Change::Removed);
            }
        }
        value
    }

    /// Registers a listener for the remaining lifetime of the store
    pub(crate) fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(Change<'_, T>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }
}

impl<T> Default for Store<T> {
    fn default() -> Store<T> {
        Store::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
