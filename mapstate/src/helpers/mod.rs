//! Utilities shared by the feature selection reducers.

mod feature_keys;
mod selection_key;

pub(crate) use feature_keys::{
    new_selection, with_feature_added, with_feature_removed, with_only_feature,
};
pub(crate) use selection_key::{ensure_selection_key, existing_selection_key, SelectionKey};
