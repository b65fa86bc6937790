//! Ship storage abstractions.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::domain::{NewShip, Ship, ShipId};
use crate::error::{HangarError, Result};

/// Keyed persistent collection of ships.
#[cfg_attr(test, mockall::automock)]
pub trait ShipStore {
    /// Every ship, ordered by ascending identifier.
    fn all(&self) -> Result<Vec<Ship>>;
    /// The ship with `id`, if any.
    fn get(&self, id: ShipId) -> Result<Option<Ship>>;
    /// Persist a new ship and return it with its assigned identifier.
    fn insert(&self, ship: NewShip) -> Result<Ship>;
    /// Overwrite the stored ship that has `ship.id`.
    fn replace(&self, ship: &Ship) -> Result<()>;
    /// Remove the ship with `id`.
    fn delete(&self, id: ShipId) -> Result<()>;
}

#[derive(Debug)]
struct MemoryState {
    next_id: ShipId,
    ships: BTreeMap<ShipId, Ship>,
}

/// In-process ship store backed by a `BTreeMap`.
#[derive(Debug)]
pub struct MemoryShipStore {
    state: RwLock<MemoryState>,
}

impl Default for MemoryShipStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryShipStore {
    /// Create an empty store. Identifiers start at 1.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_id: 1,
                ships: BTreeMap::new(),
            }),
        }
    }

    /// Create a store holding `ships`, keeping their identifiers.
    pub fn with_ships(ships: impl IntoIterator<Item = Ship>) -> Self {
        let ships: BTreeMap<ShipId, Ship> = ships.into_iter().map(|ship| (ship.id, ship)).collect();
        let next_id = ships.keys().next_back().map_or(1, |last| last + 1);
        Self {
            state: RwLock::new(MemoryState { next_id, ships }),
        }
    }
}

fn poisoned<T>(_: T) -> HangarError {
    HangarError::Store("ship store lock poisoned".to_string())
}

impl ShipStore for MemoryShipStore {
    fn all(&self) -> Result<Vec<Ship>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.ships.values().cloned().collect())
    }

    fn get(&self, id: ShipId) -> Result<Option<Ship>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.ships.get(&id).cloned())
    }

    fn insert(&self, ship: NewShip) -> Result<Ship> {
        let mut state = self.state.write().map_err(poisoned)?;
        let id = state.next_id;
        state.next_id += 1;
        let ship = ship.with_id(id);
        state.ships.insert(id, ship.clone());
        Ok(ship)
    }

    fn replace(&self, ship: &Ship) -> Result<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        match state.ships.get_mut(&ship.id) {
            Some(stored) => {
                *stored = ship.clone();
                Ok(())
            }
            None => Err(HangarError::NotFound(ship.id)),
        }
    }

    fn delete(&self, id: ShipId) -> Result<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .ships
            .remove(&id)
            .map(|_| ())
            .ok_or(HangarError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryShipStore, ShipStore};
    use crate::domain::{NewShip, ShipType};
    use crate::error::HangarError;
    use chrono::{TimeZone, Utc};

    fn new_ship(name: &str) -> NewShip {
        NewShip {
            name: name.to_string(),
            planet: "Mars".to_string(),
            ship_type: ShipType::Transport,
            prod_date: Utc.with_ymd_and_hms(2990, 1, 10, 0, 0, 0).unwrap(),
            is_used: false,
            speed: 0.4,
            crew_size: 12,
            rating: 1.07,
        }
    }

    #[test]
    fn insert_assigns_increasing_identifiers() {
        let store = MemoryShipStore::new();
        let first = store.insert(new_ship("A")).expect("insert");
        let second = store.insert(new_ship("B")).expect("insert");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(2).expect("get"), Some(second));
    }

    #[test]
    fn seeded_store_continues_after_highest_identifier() {
        let seeded = vec![new_ship("A").with_id(9), new_ship("B").with_id(4)];
        let store = MemoryShipStore::with_ships(seeded);
        let ids: Vec<_> = store.all().expect("all").iter().map(|ship| ship.id).collect();
        assert_eq!(ids, vec![4, 9]);
        assert_eq!(store.insert(new_ship("C")).expect("insert").id, 10);
    }

    #[test]
    fn replace_overwrites_existing_ship() {
        let store = MemoryShipStore::new();
        let mut ship = store.insert(new_ship("A")).expect("insert");
        ship.name = "Renamed".to_string();
        store.replace(&ship).expect("replace");
        assert_eq!(store.get(ship.id).expect("get").map(|s| s.name), Some("Renamed".to_string()));
    }

    #[test]
    fn replace_and_delete_report_missing_ships() {
        let store = MemoryShipStore::new();
        let ghost = new_ship("Ghost").with_id(77);
        assert_eq!(store.replace(&ghost), Err(HangarError::NotFound(77)));
        assert_eq!(store.delete(77), Err(HangarError::NotFound(77)));
    }

    #[test]
    fn delete_removes_ship() {
        let store = MemoryShipStore::new();
        let ship = store.insert(new_ship("A")).expect("insert");
        store.delete(ship.id).expect("delete");
        assert_eq!(store.get(ship.id).expect("get"), None);
        assert!(store.all().expect("all").is_empty());
    }
}
