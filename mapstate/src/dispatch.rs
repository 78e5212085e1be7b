//! Routing of actions to reducers.

use std::sync::Arc;

use crate::action::{Action, RawAction};
use crate::config::StateConfig;
use crate::error::StateError;
use crate::id::{IdSource, UuidIds};
use crate::parser::{DatasourceParser, LayerTreeParser};
use crate::reducers::{self, ReducerContext};
use crate::state::AppSharedState;

/// Applies actions to state snapshots.
///
/// The dispatcher holds no state itself, only the collaborators used by reducers: the identifier
/// source for lazily minted selection keys, the datasource parser and the default selection style.
///
/// ```no_run
/// use mapstate::action::{Action, MapViewChange};
/// use mapstate::{AppSharedState, Dispatcher, SequentialIds};
/// use mapstate_types::ViewPatch;
///
/// let dispatcher = Dispatcher::default().with_id_source(SequentialIds::new("selection"));
/// let state = AppSharedState::default().into_shared();
///
/// let result = dispatcher.dispatch(
///     &state,
///     Some(Action::MapViewChange(MapViewChange {
///         key: "m1".into(),
///         view_change: ViewPatch::zoom(5.0),
///     })),
/// );
/// assert!(result.is_err());
/// ```
pub struct Dispatcher {
    ids: Box<dyn IdSource>,
    parser: Box<dyn DatasourceParser>,
    config: StateConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            ids: Box::new(UuidIds),
            parser: Box::new(LayerTreeParser),
            config: StateConfig::default(),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Sets the source of selection keys. Defaults to [`UuidIds`].
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Sets the datasource parser. Defaults to [`LayerTreeParser`].
    pub fn with_parser(mut self, parser: impl DatasourceParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub(crate) fn with_boxed_id_source(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub(crate) fn with_boxed_parser(mut self, parser: Box<dyn DatasourceParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: StateConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration used by the dispatcher.
    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    /// Applies the action to the state and returns the new state.
    ///
    /// `None` returns the given state itself. If the action fails, nothing is applied and the given
    /// state stays valid.
    pub fn dispatch(
        &self,
        state: &Arc<AppSharedState>,
        action: Option<Action>,
    ) -> Result<Arc<AppSharedState>, StateError> {
        let Some(action) = action else {
            return Ok(state.clone());
        };

        log::debug!("Dispatching {} action", action.name());

        let ctx = ReducerContext {
            ids: self.ids.as_ref(),
            parser: self.parser.as_ref(),
            config: &self.config,
        };

        match action {
            Action::MapViewChange(payload) => reducers::map_view_change(state, payload),
            Action::MapLayerActiveChange(payload) => reducers::layer_active_change(state, payload),
            Action::MapLayerOpacityChange(payload) => {
                reducers::layer_opacity_change(state, payload)
            }
            Action::MapLayerInteractivityChange(payload) => {
                reducers::layer_interactivity_change(state, payload)
            }
            Action::MapLayerAdd(payload) => reducers::layer_add(state, payload),
            Action::MapLayerRemove(payload) => reducers::layer_remove(state, payload),
            Action::RenderingLayerActiveChange(payload) => {
                reducers::rendering_layer_active_change(state, payload)
            }
            Action::MapLayerSetFeatureKey(payload) => {
                reducers::set_feature_key(state, payload, &ctx)
            }
            Action::MapLayerAddFeatureKey(payload) => {
                reducers::add_feature_key(state, payload, &ctx)
            }
            Action::MapLayerRemoveFeatureKey(payload) => {
                reducers::remove_feature_key(state, payload)
            }
            Action::MapLayerActiveFeatureChange(payload) => {
                reducers::active_feature_change(state, payload)
            }
            Action::MapSetAdd(map_set) => reducers::map_set_add(state, map_set),
            Action::MapSetRemove(key) => reducers::map_set_remove(state, key),
            Action::MapAdd(payload) => reducers::map_add(state, payload),
            Action::MapSetRemoveMap(payload) => reducers::map_set_remove_map(state, payload),
            Action::MapSetAddMap(payload) => reducers::map_set_add_map(state, payload),
            Action::MapsRemove(keys) => reducers::maps_remove(state, keys),
            Action::MapSetViewChange(payload) => reducers::map_set_view_change(state, payload),
            Action::MapSetSyncChange(payload) => reducers::map_set_sync_change(state, payload),
            Action::MapSetModeChange(payload) => reducers::map_set_mode_change(state, payload),
            Action::GlobalStateUpdate(payload) => reducers::global_state_update(state, payload),
            Action::FetchSources(records) => reducers::fetch_sources(state, records, &ctx),
            Action::AppNodeUpdate(app_node) => reducers::app_node_update(state, app_node),
            Action::FetchLayers(items) => reducers::fetch_layers(state, items),
            Action::FetchPlaces(items) => reducers::fetch_places(state, items),
            Action::FetchPeriods(items) => reducers::fetch_periods(state, items),
            Action::FetchStyles(items) => reducers::fetch_styles(state, items),
        }
    }

    /// Converts the action from its wire form and applies it. See [`Dispatcher::dispatch`].
    pub fn dispatch_raw(
        &self,
        state: &Arc<AppSharedState>,
        action: Option<RawAction>,
    ) -> Result<Arc<AppSharedState>, StateError> {
        let action = action.map(Action::try_from).transpose()?;
        self.dispatch(state, action)
    }
}

/// Applies the action with a default [`Dispatcher`].
pub fn dispatch(
    state: &Arc<AppSharedState>,
    action: Option<Action>,
) -> Result<Arc<AppSharedState>, StateError> {
    Dispatcher::default().dispatch(state, action)
}
