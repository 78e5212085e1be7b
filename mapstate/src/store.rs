//! Owner of the current state snapshot.

use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};

use crate::action::{Action, RawAction};
use crate::config::StateConfig;
use crate::dispatch::Dispatcher;
use crate::error::StateError;
use crate::id::IdSource;
use crate::parser::DatasourceParser;
use crate::state::AppSharedState;

/// Consumer of state changes.
///
/// Any `Fn(&Arc<AppSharedState>)` closure is a subscriber.
pub trait Subscriber: MaybeSend + MaybeSync {
    /// Called with the new snapshot after it became the current state of the store.
    fn state_changed(&self, state: &Arc<AppSharedState>);
}

impl<T> Subscriber for T
where
    T: Fn(&Arc<AppSharedState>) + MaybeSend + MaybeSync,
{
    fn state_changed(&self, state: &Arc<AppSharedState>) {
        self(state)
    }
}

/// Handle of a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the current state and applies actions to it.
///
/// Subscribers are notified only if an action produced a new snapshot. Actions that return the
/// state as is, and failed actions, do not notify anyone.
pub struct Store {
    state: Arc<AppSharedState>,
    dispatcher: Dispatcher,
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    next_subscription: u64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("dispatcher", &self.dispatcher)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Store {
    fn default() -> Self {
        StoreBuilder::default().build()
    }
}

impl Store {
    /// Current state snapshot.
    pub fn state(&self) -> &Arc<AppSharedState> {
        &self.state
    }

    /// Applies the action to the current state.
    ///
    /// On failure the current state stays as it was.
    pub fn dispatch(&mut self, action: Option<Action>) -> Result<&Arc<AppSharedState>, StateError> {
        let result = self.dispatcher.dispatch(&self.state, action);
        self.apply(result)
    }

    /// Converts the action from its wire form and applies it to the current state.
    pub fn dispatch_raw(
        &mut self,
        action: Option<RawAction>,
    ) -> Result<&Arc<AppSharedState>, StateError> {
        let result = self.dispatcher.dispatch_raw(&self.state, action);
        self.apply(result)
    }

    /// Registers a subscriber.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));

        id
    }

    /// Removes a subscriber. Returns false if there was no such subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let count = self.subscribers.len();
        self.subscribers.retain(|(subscription, _)| *subscription != id);

        self.subscribers.len() != count
    }

    fn apply(
        &mut self,
        result: Result<Arc<AppSharedState>, StateError>,
    ) -> Result<&Arc<AppSharedState>, StateError> {
        let new_state = match result {
            Ok(new_state) => new_state,
            Err(err) => {
                log::warn!("Action is rejected: {err}");
                return Err(err);
            }
        };

        if !Arc::ptr_eq(&new_state, &self.state) {
            self.state = new_state;
            log::debug!("Notifying {} subscribers", self.subscribers.len());
            for (_, subscriber) in &self.subscribers {
                subscriber.state_changed(&self.state);
            }
        }

        Ok(&self.state)
    }
}

/// Convenience type to initialize a [`Store`].
///
/// ```no_run
/// use mapstate::{AppSharedState, SequentialIds, StateConfig, StoreBuilder};
///
/// let store = StoreBuilder::default()
///     .with_state(AppSharedState::default())
///     .with_config(StateConfig::default())
///     .with_id_source(SequentialIds::new("selection"))
///     .with_subscriber(|state: &std::sync::Arc<AppSharedState>| {
///         println!("{} maps", state.maps.len())
///     })
///     .build();
/// ```
#[derive(Default)]
pub struct StoreBuilder {
    state: Option<AppSharedState>,
    config: Option<StateConfig>,
    ids: Option<Box<dyn IdSource>>,
    parser: Option<Box<dyn DatasourceParser>>,
    subscribers: Vec<Box<dyn Subscriber>>,
}

impl StoreBuilder {
    /// Sets the initial state. Defaults to an empty state.
    pub fn with_state(mut self, state: AppSharedState) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: StateConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the source of selection keys. Defaults to [`UuidIds`](crate::UuidIds).
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Sets the datasource parser. Defaults to [`LayerTreeParser`](crate::LayerTreeParser).
    pub fn with_parser(mut self, parser: impl DatasourceParser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a subscriber.
    pub fn with_subscriber(mut self, subscriber: impl Subscriber + 'static) -> Self {
        self.subscribers.push(Box::new(subscriber));
        self
    }

    /// Consumes the builder and creates the store.
    pub fn build(self) -> Store {
        let Self {
            state,
            config,
            ids,
            parser,
            subscribers,
        } = self;

        let mut dispatcher = Dispatcher::default();
        if let Some(config) = config {
            dispatcher = dispatcher.with_config(config);
        }
        if let Some(ids) = ids {
            dispatcher = dispatcher.with_boxed_id_source(ids);
        }
        if let Some(parser) = parser {
            dispatcher = dispatcher.with_boxed_parser(parser);
        }

        let subscribers: Vec<_> = subscribers
            .into_iter()
            .enumerate()
            .map(|(index, subscriber)| (SubscriptionId(index as u64), subscriber))
            .collect();

        Store {
            state: state.unwrap_or_default().into_shared(),
            dispatcher,
            next_subscription: subscribers.len() as u64,
            subscribers,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use mapstate_types::{MapSet, MapSetSync, MapView, SingleMap};

    use super::*;
    use crate::action::MapAdd;
    use crate::tests::synced_state;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Arc<AppSharedState>)) {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = {
            let count = count.clone();
            move |_: &Arc<AppSharedState>| {
                count.fetch_add(1, Ordering::Relaxed);
            }
        };
        (count, subscriber)
    }

    fn add_map(key: &str) -> Option<Action> {
        Some(Action::MapAdd(MapAdd {
            map: SingleMap::new(key, MapView::default()),
            map_set_key: None,
        }))
    }

    #[test]
    fn notifies_only_on_change() {
        let (count, subscriber) = counter();
        let mut store = StoreBuilder::default()
            .with_state(synced_state(MapSetSync::default()))
            .with_subscriber(subscriber)
            .build();

        store.dispatch(add_map("m4")).expect("no failure");
        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert!(store.state().maps.contains_key("m4"));

        store.dispatch(add_map("m4")).expect("no failure");
        store.dispatch(None).expect("no failure");
        store
            .dispatch(Some(Action::MapSetAdd(MapSet::new("s1", ["m4"]))))
            .expect("no failure");
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn failed_action_keeps_state() {
        let (count, subscriber) = counter();
        let mut store = StoreBuilder::default()
            .with_state(synced_state(MapSetSync::default()))
            .build();
        store.subscribe(subscriber);
        let before = store.state().clone();

        let result = store.dispatch(Some(Action::MapSetRemove("s1".into()))).map(Arc::clone);
        let after_remove = result.expect("no failure");
        assert!(!Arc::ptr_eq(&before, &after_remove));

        let result = store.dispatch_raw(Some(RawAction {
            kind: "MAP_SET_SYNC_CHANGE".into(),
            payload: Some(serde_json::json!({"key": "s1", "sync": {"zoom": true}})),
        }));
        assert_matches!(result, Err(StateError::MapSetNotFound { .. }));
        assert!(Arc::ptr_eq(store.state(), &after_remove));
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (first_count, first) = counter();
        let (second_count, second) = counter();
        let mut store = Store::default();
        let first = store.subscribe(first);
        store.subscribe(second);

        store.dispatch(add_map("a")).expect("no failure");
        assert!(store.unsubscribe(first));
        assert!(!store.unsubscribe(first));
        store.dispatch(add_map("b")).expect("no failure");

        assert_eq!(first_count.load(Ordering::Relaxed), 1);
        assert_eq!(second_count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn builder_subscribers_get_distinct_ids() {
        let (count, subscriber) = counter();
        let mut store = StoreBuilder::default()
            .with_subscriber(|_: &Arc<AppSharedState>| {})
            .build();
        let id = store.subscribe(subscriber);

        assert_ne!(id, SubscriptionId(0));
        store.dispatch(add_map("a")).expect("no failure");
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }
}
