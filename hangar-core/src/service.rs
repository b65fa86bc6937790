//! Ship catalog operations over an injected store.

use std::sync::Arc;

use crate::domain::{Ship, ShipDraft, ShipId, ShipUpdate};
use crate::error::{HangarError, Result};
use crate::filter::ShipFilter;
use crate::query::{ShipQuery, count_matching, run_query};
use crate::rating;
use crate::store::ShipStore;

/// Catalog operations exposed to the boundary layer.
///
/// The service keeps no state of its own between calls, so clones can be
/// shared freely across request handlers.
#[derive(Clone)]
pub struct ShipService {
    store: Arc<dyn ShipStore + Send + Sync>,
}

impl ShipService {
    /// Create a service backed by `store`.
    pub fn new(store: Arc<dyn ShipStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// One page of ships matching `query`.
    pub fn list(&self, query: &ShipQuery) -> Result<Vec<Ship>> {
        Ok(run_query(self.store.all()?, query))
    }

    /// Number of ships matching `filter`.
    pub fn count(&self, filter: &ShipFilter) -> Result<usize> {
        Ok(count_matching(&self.store.all()?, filter))
    }

    /// Fetch a ship by identifier.
    pub fn get(&self, id: ShipId) -> Result<Ship> {
        self.store.get(id)?.ok_or(HangarError::NotFound(id))
    }

    /// Rate and persist a new ship.
    pub fn create(&self, draft: ShipDraft) -> Result<Ship> {
        draft.check()?;
        self.store.insert(draft.into_new_ship())
    }

    /// Overlay `update` onto the stored ship, re-rate it and persist it.
    pub fn update(&self, id: ShipId, update: ShipUpdate) -> Result<Ship> {
        update.check()?;
        let mut ship = self.get(id)?;
        update.apply_to(&mut ship);
        rating::rate(&mut ship);
        self.store.replace(&ship)?;
        Ok(ship)
    }

    /// Permanently remove a ship.
    pub fn delete(&self, id: ShipId) -> Result<()> {
        self.get(id)?;
        self.store.delete(id)
    }
}
