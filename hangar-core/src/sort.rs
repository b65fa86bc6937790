//! Ship ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Ship;
use crate::error::{HangarError, Result};

/// Sort key for ship listings. All keys sort ascending.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipOrder {
    /// By identifier.
    Id,
    /// By speed.
    Speed,
    /// By production date.
    Date,
    /// By rating.
    Rating,
}

impl ShipOrder {
    /// Every sort key, in declaration order.
    pub const ALL: [ShipOrder; 4] = [
        ShipOrder::Id,
        ShipOrder::Speed,
        ShipOrder::Date,
        ShipOrder::Rating,
    ];

    /// Wire label for the sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipOrder::Id => "ID",
            ShipOrder::Speed => "SPEED",
            ShipOrder::Date => "DATE",
            ShipOrder::Rating => "RATING",
        }
    }

    /// Name of the ship field the key sorts on.
    pub fn field_name(&self) -> &'static str {
        match self {
            ShipOrder::Id => "id",
            ShipOrder::Speed => "speed",
            ShipOrder::Date => "prodDate",
            ShipOrder::Rating => "rating",
        }
    }

    /// Compare two ships on this key.
    pub fn compare(&self, left: &Ship, right: &Ship) -> Ordering {
        match self {
            ShipOrder::Id => left.id.cmp(&right.id),
            ShipOrder::Speed => left.speed.total_cmp(&right.speed),
            ShipOrder::Date => left.prod_date.cmp(&right.prod_date),
            ShipOrder::Rating => left.rating.total_cmp(&right.rating),
        }
    }
}

impl fmt::Display for ShipOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipOrder {
    type Err = HangarError;

    fn from_str(value: &str) -> Result<Self> {
        let label = value.trim();
        ShipOrder::ALL
            .into_iter()
            .find(|order| {
                order.as_str().eq_ignore_ascii_case(label)
                    || order.field_name().eq_ignore_ascii_case(label)
            })
            .ok_or_else(|| HangarError::precondition(format!("unknown ship order: {value}")))
    }
}

/// Sort ships in place. `None` leaves the order untouched; ties keep their order.
pub fn sort_ships(ships: &mut [Ship], order: Option<ShipOrder>) {
    if let Some(order) = order {
        ships.sort_by(|left, right| order.compare(left, right));
    }
}
