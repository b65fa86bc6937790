//! PostgreSQL-backed ship store.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use hangar_core::{HangarError, NewShip, Result, Ship, ShipId, ShipStore};

use crate::db::DbPool;
use crate::models::{NewShipRecord, ShipRecord};
use crate::schema::ships;

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

/// Ship store backed by the `ships` table.
#[derive(Clone)]
pub struct PgShipStore {
    pool: DbPool,
}

impl PgShipStore {
    /// Create a store that draws connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PgPooled> {
        self.pool.get().map_err(HangarError::store)
    }
}

impl ShipStore for PgShipStore {
    fn all(&self) -> Result<Vec<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .order(ships::id.asc())
            .select(ShipRecord::as_select())
            .load::<ShipRecord>(&mut conn)
            .map_err(HangarError::store)?
            .into_iter()
            .map(Ship::try_from)
            .collect()
    }

    fn get(&self, id: ShipId) -> Result<Option<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .find(id)
            .select(ShipRecord::as_select())
            .first::<ShipRecord>(&mut conn)
            .optional()
            .map_err(HangarError::store)?
            .map(Ship::try_from)
            .transpose()
    }

    fn insert(&self, ship: NewShip) -> Result<Ship> {
        let mut conn = self.conn()?;
        let record = diesel::insert_into(ships::table)
            .values(&NewShipRecord::from(ship))
            .returning(ShipRecord::as_returning())
            .get_result::<ShipRecord>(&mut conn)
            .map_err(HangarError::store)?;
        Ship::try_from(record)
    }

    fn replace(&self, ship: &Ship) -> Result<()> {
        let mut conn = self.conn()?;
        let updated = diesel::update(ships::table.find(ship.id))
            .set(&ShipRecord::from(ship))
            .execute(&mut conn)
            .map_err(HangarError::store)?;
        if updated == 0 {
            return Err(HangarError::NotFound(ship.id));
        }
        Ok(())
    }

    fn delete(&self, id: ShipId) -> Result<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(ships::table.find(id))
            .execute(&mut conn)
            .map_err(HangarError::store)?;
        if deleted == 0 {
            return Err(HangarError::NotFound(id));
        }
        Ok(())
    }
}
