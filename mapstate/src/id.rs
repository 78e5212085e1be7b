//! Generation of identifiers for lazily created records.

use std::sync::atomic::{AtomicUsize, Ordering};

use maybe_sync::{MaybeSend, MaybeSync};

/// Source of unique identifiers. Used to mint a selection key the first time a feature is selected
/// on a layer.
pub trait IdSource: MaybeSend + MaybeSync {
    /// Returns a new identifier, different from all the previously returned ones.
    fn mint_id(&self) -> String;
}

impl<T: Fn() -> String> IdSource for T
where
    T: MaybeSync + MaybeSend,
{
    fn mint_id(&self) -> String {
        self()
    }
}

/// Mints random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn mint_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Mints `{prefix}-{n}` identifiers with `n` starting from 1. Deterministic, intended for tests
/// and replays.
#[derive(Debug, Default)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicUsize,
}

impl SequentialIds {
    /// Creates a new source with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicUsize::new(0),
        }
    }
}

impl IdSource for SequentialIds {
    fn mint_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_uuid_shaped() {
        let id = UuidIds.mint_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_ne!(id, UuidIds.mint_id());
    }

    #[test]
    fn sequential_ids_count_from_one() {
        let ids = SequentialIds::new("sel");
        assert_eq!(ids.mint_id(), "sel-1");
        assert_eq!(ids.mint_id(), "sel-2");
    }

    #[test]
    fn closures_are_id_sources() {
        let source = || "fixed".to_string();
        assert_eq!(source.mint_id(), "fixed");
    }
}
