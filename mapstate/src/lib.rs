//! State engine of a multi-map geospatial viewer.
//!
//! The viewer shows many maps at once. Maps are grouped into map sets whose zoom and center can be
//! kept in lock-step, every map carries its own overrides of the rendering layer catalog, and users
//! can select features per layer.
//!
//! # Main components
//!
//! * [`AppSharedState`] is an immutable snapshot of everything the viewer knows. Collections in it
//!   are [`Collection`](mapstate_types::Collection)s, so a new snapshot shares every untouched
//!   record with the previous one and consumers can find unchanged branches with
//!   [`Arc::ptr_eq`](std::sync::Arc::ptr_eq).
//! * [`Action`]s describe state transitions. [`Dispatcher`] routes every action to the reducer that
//!   produces the next snapshot. A failed action applies nothing.
//! * [`selectors`] are pure functions that derive view-ready values from a snapshot, e.g. the
//!   effective layer list of a map or the synced view of a map set.
//! * [`Store`] owns the current snapshot and notifies [`Subscriber`]s when it changes.
//!
//! ```no_run
//! use mapstate::action::{Action, MapViewChange};
//! use mapstate::StoreBuilder;
//! use mapstate_types::ViewPatch;
//!
//! let mut store = StoreBuilder::default()
//!     .with_subscriber(|state: &std::sync::Arc<mapstate::AppSharedState>| {
//!         println!("{} maps", state.maps.len());
//!     })
//!     .build();
//!
//! let result = store.dispatch(Some(Action::MapViewChange(MapViewChange {
//!     key: "overview".into(),
//!     view_change: ViewPatch::zoom(4.0),
//! })));
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod action;
mod config;
mod dispatch;
pub mod error;
mod helpers;
mod id;
pub mod parser;
mod reducers;
pub mod selectors;
mod state;
mod store;

#[cfg(test)]
mod tests;

pub use action::{Action, RawAction};
pub use config::{StateConfig, DEFAULT_DISTINCT_COLOURS};
pub use dispatch::{dispatch, Dispatcher};
pub use error::StateError;
pub use id::{IdSource, SequentialIds, UuidIds};
pub use parser::{DatasourceParser, LayerTreeParser, ParseError};
pub use state::AppSharedState;
pub use store::{Store, StoreBuilder, Subscriber, SubscriptionId};

pub use mapstate_types;
