//! Reduced-motion preference
//!
//! An externally owned boolean exposed as an observable source. The core only
//! reads it and subscribes to changes; the environment bridge (media query on
//! the web, a test harness natively) is the only writer.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(bool)>;

struct Inner {
    reduced: Cell<bool>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

/// Shared handle to the reduced-motion signal. Clones observe the same value.
#[derive(Clone)]
pub struct MotionPreference {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for MotionPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionPreference")
            .field("reduced", &self.inner.reduced.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl Default for MotionPreference {
    fn default() -> Self {
        Self::new(false)
    }
}

impl MotionPreference {
    pub fn new(reduced: bool) -> Self {
        Self {
            inner: Rc::new(Inner {
                reduced: Cell::new(reduced),
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Whether the viewer asked for reduced motion
    pub fn reduced(&self) -> bool {
        self.inner.reduced.get()
    }

    /// Update the value from the environment, notifying subscribers on change
    pub fn set(&self, reduced: bool) {
        if self.inner.reduced.replace(reduced) == reduced {
            return;
        }
        log::info!("Reduced motion preference: {}", reduced);

        // Snapshot so listeners may subscribe/unsubscribe while being notified
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(reduced);
        }
    }

    /// Register `listener` for changes. It stays registered until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            source: Rc::downgrade(&self.inner),
            id,
        }
    }
}

/// Keeps a listener registered; unsubscribes on drop
pub struct Subscription {
    source: Weak<Inner>,
    id: u64,
}

impl Subscription {
    /// Unsubscribe now (same as dropping)
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.source.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Bridge from the `prefers-reduced-motion` media query to a
/// [`MotionPreference`]. Removes its change listener on drop.
#[cfg(target_arch = "wasm32")]
pub struct MediaQueryBridge {
    query: web_sys::MediaQueryList,
    on_change: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MediaQueryListEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl MediaQueryBridge {
    /// Query the initial value and subscribe to changes.
    ///
    /// Returns `None` when there is no window or `matchMedia` fails; the
    /// preference then keeps its current (default) value.
    pub fn attach(preference: &MotionPreference) -> Option<Self> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let window = web_sys::window()?;
        let query = window
            .match_media(crate::consts::REDUCED_MOTION_QUERY)
            .ok()
            .flatten()?;
        preference.set(query.matches());

        let target = preference.clone();
        let on_change = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MediaQueryListEvent| {
            target.set(event.matches());
        });
        if query
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not subscribe to reduced-motion changes");
        }

        Some(Self { query, on_change })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for MediaQueryBridge {
    fn drop(&mut self) {
        use wasm_bindgen::JsCast;
        let _ = self
            .query
            .remove_event_listener_with_callback("change", self.on_change.as_ref().unchecked_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_changes() {
        let pref = MotionPreference::new(false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = pref.subscribe(move |v| sink.borrow_mut().push(v));

        pref.set(true);
        pref.set(true); // unchanged, no notification
        pref.set(false);
        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!pref.reduced());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let pref = MotionPreference::default();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = pref.subscribe(move |_| counter.set(counter.get() + 1));

        pref.set(true);
        sub.cancel();
        pref.set(false);
        pref.set(true);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_clones_share_value() {
        let pref = MotionPreference::new(false);
        let view = pref.clone();
        pref.set(true);
        assert!(view.reduced());
    }

    #[test]
    fn test_subscription_outlives_source() {
        let pref = MotionPreference::new(false);
        let sub = pref.subscribe(|_| {});
        drop(pref);
        drop(sub);
    }
}
