//! Database models for Hangar server.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use hangar_core::{HangarError, NewShip, Ship};

use crate::schema::ships;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable, AsChangeset)]
#[diesel(table_name = ships)]
/// Ship database record.
pub struct ShipRecord {
    /// Ship identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship type label.
    pub ship_type: String,
    /// Production timestamp (UTC).
    pub prod_date: NaiveDateTime,
    /// Used status.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ships)]
/// Insertable ship record.
pub struct NewShipRecord {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship type label.
    pub ship_type: String,
    /// Production timestamp (UTC).
    pub prod_date: NaiveDateTime,
    /// Used status.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl TryFrom<ShipRecord> for Ship {
    type Error = HangarError;

    fn try_from(record: ShipRecord) -> Result<Self, Self::Error> {
        Ok(Ship {
            id: record.id,
            name: record.name,
            planet: record.planet,
            ship_type: record
                .ship_type
                .parse()
                .map_err(|_| HangarError::Store(format!("invalid ship type {}", record.ship_type)))?,
            prod_date: record.prod_date.and_utc(),
            is_used: record.is_used,
            speed: record.speed,
            crew_size: record.crew_size,
            rating: record.rating,
        })
    }
}

impl From<&Ship> for ShipRecord {
    fn from(ship: &Ship) -> Self {
        Self {
            id: ship.id,
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date.naive_utc(),
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

impl From<NewShip> for NewShipRecord {
    fn from(ship: NewShip) -> Self {
        Self {
            name: ship.name,
            planet: ship.planet,
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date.naive_utc(),
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewShipRecord, ShipRecord};
    use chrono::{TimeZone, Utc};
    use hangar_core::{HangarError, NewShip, Ship, ShipType};

    fn ship() -> Ship {
        Ship {
            id: 12,
            name: "Orion".to_string(),
            planet: "Mars".to_string(),
            ship_type: ShipType::Merchant,
            prod_date: Utc.with_ymd_and_hms(2990, 4, 2, 8, 30, 0).unwrap(),
            is_used: true,
            speed: 0.7,
            crew_size: 80,
            rating: 0.93,
        }
    }

    #[test]
    fn record_converts_back_to_ship() {
        let record = ShipRecord::from(&ship());
        assert_eq!(record.ship_type, "MERCHANT");
        let restored = Ship::try_from(record).expect("convert");
        assert_eq!(restored, ship());
    }

    #[test]
    fn unknown_ship_type_is_a_store_error() {
        let mut record = ShipRecord::from(&ship());
        record.ship_type = "YACHT".to_string();
        assert!(matches!(Ship::try_from(record), Err(HangarError::Store(_))));
    }

    #[test]
    fn new_record_keeps_fields() {
        let new_ship = NewShip {
            name: "Falcon".to_string(),
            planet: "Venus".to_string(),
            ship_type: ShipType::Transport,
            prod_date: Utc.with_ymd_and_hms(3001, 1, 1, 0, 0, 0).unwrap(),
            is_used: false,
            speed: 0.3,
            crew_size: 4,
            rating: 1.26,
        };
        let record = NewShipRecord::from(new_ship.clone());
        assert_eq!(record.ship_type, "TRANSPORT");
        assert_eq!(record.prod_date, new_ship.prod_date.naive_utc());
        assert_eq!(record.rating, 1.26);
    }
}
