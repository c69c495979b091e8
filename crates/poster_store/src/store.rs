//! Observable store state and subscription handles.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use serde_json::Value;

use crate::key::StoreKey;

type Listener = Rc<dyn Fn(StoreKey, &Value)>;

struct ListenerEntry {
    id: u64,
    callback: Listener,
}

struct StoreInner {
    values: HashMap<StoreKey, Value>,
    listeners: HashMap<StoreKey, Vec<ListenerEntry>>,
    next_listener_id: u64,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            values: StoreKey::ALL
                .into_iter()
                .map(|key| (key, key.default_value()))
                .collect(),
            listeners: HashMap::new(),
            next_listener_id: 1,
        }
    }
}

impl StoreInner {
    fn is_registered(&self, key: StoreKey, id: u64) -> bool {
        self.listeners
            .get(&key)
            .is_some_and(|entries| entries.iter().any(|entry| entry.id == id))
    }

    fn remove_listener(&mut self, key: StoreKey, id: u64) {
        if let Some(entries) = self.listeners.get_mut(&key) {
            entries.retain(|entry| entry.id != id);
            if entries.is_empty() {
                self.listeners.remove(&key);
            }
        }
    }
}

#[derive(Clone, Default)]
/// Shared handle to the poster key/value store.
pub struct PosterStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl std::fmt::Debug for PosterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PosterStore")
            .field("values", &inner.values)
            .field(
                "listeners",
                &inner
                    .listeners
                    .iter()
                    .map(|(key, entries)| (*key, entries.len()))
                    .collect::<HashMap<_, _>>(),
            )
            .finish()
    }
}

impl PosterStore {
    /// Creates a store holding every key's default value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `key`.
    pub fn get(&self, key: StoreKey) -> Value {
        self.inner
            .borrow()
            .values
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    /// Writes `value` under `key` and notifies the key's subscribers before returning.
    pub fn set(&self, key: StoreKey, value: impl Into<Value>) {
        let value = value.into();
        self.inner.borrow_mut().values.insert(key, value.clone());
        self.notify(key, &value);
    }

    /// Overwrites several keys at once. Subscribers are notified per key, in the given order,
    /// after all values are stored.
    pub fn reset<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (StoreKey, Value)>,
    {
        let entries: Vec<(StoreKey, Value)> = entries.into_iter().collect();
        {
            let mut inner = self.inner.borrow_mut();
            for (key, value) in &entries {
                inner.values.insert(*key, value.clone());
            }
        }
        for (key, value) in &entries {
            self.notify(*key, value);
        }
    }

    /// Registers `callback` for writes to `key`.
    ///
    /// The callback stays registered until the returned [`Subscription`] is dropped or
    /// unsubscribed.
    pub fn subscribe<F>(&self, key: StoreKey, callback: F) -> Subscription
    where
        F: Fn(StoreKey, &Value) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id = inner.next_listener_id.saturating_add(1);
        inner.listeners.entry(key).or_default().push(ListenerEntry {
            id,
            callback: Rc::new(callback),
        });
        Subscription {
            store: Rc::downgrade(&self.inner),
            key,
            id,
            active: true,
        }
    }

    /// Number of live callbacks registered for `key`.
    pub fn listener_count(&self, key: StoreKey) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(&key)
            .map_or(0, Vec::len)
    }

    fn notify(&self, key: StoreKey, value: &Value) {
        // Callbacks may write the store or drop subscriptions, so no borrow is held while they
        // run; each one is rechecked right before its call.
        let snapshot: Vec<(u64, Listener)> = self
            .inner
            .borrow()
            .listeners
            .get(&key)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| (entry.id, entry.callback.clone()))
                    .collect()
            })
            .unwrap_or_default();

        for (id, callback) in snapshot {
            if self.inner.borrow().is_registered(key, id) {
                callback(key, value);
            }
        }
    }
}

/// Handle for one registered store callback.
///
/// Dropping the handle unsubscribes. Unsubscribing after the store is gone, or twice, is a no-op.
pub struct Subscription {
    store: Weak<RefCell<StoreInner>>,
    key: StoreKey,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Key this subscription listens to.
    pub fn key(&self) -> StoreKey {
        self.key
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.active
            && self
                .store
                .upgrade()
                .is_some_and(|inner| inner.borrow().is_registered(self.key, self.id))
    }

    /// Releases the callback now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(inner) = self.store.upgrade() {
            inner.borrow_mut().remove_listener(self.key, self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

thread_local! {
    static GLOBAL_POSTER_STORE: PosterStore = PosterStore::new();
}

/// Returns the page-lifetime store instance.
pub fn poster_store() -> PosterStore {
    GLOBAL_POSTER_STORE.with(|store| store.clone())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<(StoreKey, Value)>>>, impl Fn(StoreKey, &Value)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |key: StoreKey, value: &Value| {
            sink.borrow_mut().push((key, value.clone()));
        })
    }

    #[test]
    fn fresh_store_holds_defaults() {
        let store = PosterStore::new();
        assert_eq!(store.get(StoreKey::Name), json!(""));
        assert_eq!(store.get(StoreKey::NameSpacing), json!(0));
        assert_eq!(store.get(StoreKey::Filter), json!(""));
    }

    #[test]
    fn set_notifies_subscribers_before_returning() {
        let store = PosterStore::new();
        let (seen, callback) = recorder();
        let _subscription = store.subscribe(StoreKey::Bounty, callback);

        store.set(StoreKey::Bounty, "3000000000");

        assert_eq!(
            seen.borrow().as_slice(),
            &[(StoreKey::Bounty, json!("3000000000"))]
        );
        assert_eq!(store.get(StoreKey::Bounty), json!("3000000000"));
    }

    #[test]
    fn subscribers_only_hear_their_own_key() {
        let store = PosterStore::new();
        let (seen, callback) = recorder();
        let _subscription = store.subscribe(StoreKey::Name, callback);

        store.set(StoreKey::Shadow, 4);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let store = PosterStore::new();
        let (seen, callback) = recorder();
        let subscription = store.subscribe(StoreKey::Name, callback);
        assert_eq!(store.listener_count(StoreKey::Name), 1);

        drop(subscription);
        store.set(StoreKey::Name, "NAMI");

        assert!(seen.borrow().is_empty());
        assert_eq!(store.listener_count(StoreKey::Name), 0);
    }

    #[test]
    fn unsubscribe_after_store_is_gone_is_noop() {
        let store = PosterStore::new();
        let subscription = store.subscribe(StoreKey::Name, |_, _| {});
        drop(store);
        assert!(!subscription.is_active());
        subscription.unsubscribe();
    }

    #[test]
    fn callbacks_may_write_other_keys_reentrantly() {
        let store = PosterStore::new();
        let writer = store.clone();
        let _mirror = store.subscribe(StoreKey::PhotoUrl, move |_, value| {
            writer.set(StoreKey::AvatarUrl, value.clone());
        });
        let (seen, callback) = recorder();
        let _avatar = store.subscribe(StoreKey::AvatarUrl, callback);

        store.set(StoreKey::PhotoUrl, "blob:1");

        assert_eq!(store.get(StoreKey::AvatarUrl), json!("blob:1"));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn subscription_dropped_mid_notification_is_skipped() {
        let store = PosterStore::new();
        let held = Rc::new(RefCell::new(None::<Subscription>));
        let (seen, callback) = recorder();

        let dropper = held.clone();
        let _first = store.subscribe(StoreKey::Name, move |_, _| {
            dropper.borrow_mut().take();
        });
        *held.borrow_mut() = Some(store.subscribe(StoreKey::Name, callback));

        store.set(StoreKey::Name, "USOPP");

        assert!(seen.borrow().is_empty());
        assert_eq!(store.listener_count(StoreKey::Name), 1);
    }

    #[test]
    fn reset_stores_all_values_then_notifies_in_order() {
        let store = PosterStore::new();
        let observed = Rc::new(RefCell::new(Vec::new()));

        let reader = store.clone();
        let sink = observed.clone();
        let _name = store.subscribe(StoreKey::Name, move |_, _| {
            // Every reset value is already visible when the first key is notified.
            sink.borrow_mut().push(("name", reader.get(StoreKey::Bounty)));
        });
        let sink = observed.clone();
        let _bounty = store.subscribe(StoreKey::Bounty, move |_, value| {
            sink.borrow_mut().push(("bounty", value.clone()));
        });

        store.reset([
            (StoreKey::Name, json!("SANJI")),
            (StoreKey::Bounty, json!("77000000")),
        ]);

        assert_eq!(
            observed.borrow().as_slice(),
            &[("name", json!("77000000")), ("bounty", json!("77000000"))]
        );
    }

    #[test]
    fn global_store_is_shared_per_thread() {
        poster_store().set(StoreKey::Filter, "grayscale(1)");
        assert_eq!(poster_store().get(StoreKey::Filter), json!("grayscale(1)"));
    }
}
