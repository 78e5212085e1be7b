//! Plain data records shared by the map state engine.
//!
//! Nothing in this crate has behavior beyond construction, lookup and copy-on-write updates. The
//! records describe:
//!
//! * [`SingleMap`]s and the [`MapSet`]s grouping them,
//! * the [`RenderingLayer`] catalog and per-map [`LayerOverride`]s,
//! * feature [`Selection`]s,
//! * read-only metadata catalogs ([`LayerMetadata`], [`PlaceMetadata`], [`PeriodMetadata`],
//!   [`StyleMetadata`]) and the [`ApplicationNode`].
//!
//! All of them are stored in a [`Collection`], a keyed persistent vector that reuses every
//! untouched record when a new version is produced.

pub mod app_node;
pub mod catalog;
pub mod collection;
pub mod error;
pub mod feature_key;
pub mod layer;
pub mod map;
pub mod selection;
pub mod view;

pub use app_node::{ApplicationNode, LayerTreeNode};
pub use catalog::{
    CatalogEntry, Datasource, DatasourceData, LayerData, LayerMetadata, PeriodData,
    PeriodMetadata, PlaceData, PlaceMetadata, StyleData, StyleMetadata,
};
pub use collection::{Collection, Keyed};
pub use error::TypesError;
pub use feature_key::FeatureKey;
pub use layer::{LayerOverride, RenderingLayer};
pub use map::{MapSet, MapSetMode, MapSetSync, MapSetSyncPatch, SingleMap};
pub use selection::{Selection, SelectionStyle};
pub use view::{MapView, ViewPatch};
