//! Domain entities for Hangar.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{HangarError, Result};
use crate::rating::{self, CURRENT_YEAR};

/// Store-assigned ship identifier.
pub type ShipId = i64;

/// Category of a ship.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    /// Cargo and passenger transport.
    Transport,
    /// Armed vessel.
    Military,
    /// Trading vessel.
    Merchant,
}

impl ShipType {
    /// Every ship type, in declaration order.
    pub const ALL: [ShipType; 3] = [ShipType::Transport, ShipType::Military, ShipType::Merchant];

    /// Wire label for the ship type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = HangarError;

    fn from_str(value: &str) -> Result<Self> {
        let label = value.trim();
        ShipType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| HangarError::precondition(format!("unknown ship type: {value}")))
    }
}

/// A ship record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Store-assigned identifier.
    pub id: ShipId,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production timestamp, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub prod_date: DateTime<Utc>,
    /// Whether the ship has had previous owners.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
    /// Derived rating, recomputed on every write.
    pub rating: f64,
}

/// Client-supplied fields for creating a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipDraft {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production timestamp, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub prod_date: DateTime<Utc>,
    /// Used status; `false` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// Cruising speed.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
}

impl ShipDraft {
    /// Reject drafts that break the entity invariants.
    pub fn check(&self) -> Result<()> {
        check_text("name", &self.name)?;
        check_text("planet", &self.planet)?;
        check_speed(self.speed)?;
        check_crew_size(self.crew_size)?;
        check_prod_date(&self.prod_date)
    }

    /// Resolve defaults and derive the rating for insertion.
    pub fn into_new_ship(self) -> NewShip {
        let is_used = self.is_used.unwrap_or(false);
        let rating = rating::compute_rating(
            self.speed,
            is_used,
            rating::production_year(&self.prod_date),
        );
        NewShip {
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating,
        }
    }
}

/// A fully-resolved ship that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production timestamp.
    pub prod_date: DateTime<Utc>,
    /// Used status.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl NewShip {
    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: ShipId) -> Ship {
        Ship {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}

/// Partial update request. An absent field leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New home planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// New ship category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    /// New production timestamp, epoch milliseconds on the wire.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// New used status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// New cruising speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// New crew size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<i32>,
}

impl ShipUpdate {
    /// Reject present fields that break the entity invariants.
    pub fn check(&self) -> Result<()> {
        if let Some(name) = &self.name {
            check_text("name", name)?;
        }
        if let Some(planet) = &self.planet {
            check_text("planet", planet)?;
        }
        if let Some(speed) = self.speed {
            check_speed(speed)?;
        }
        if let Some(crew_size) = self.crew_size {
            check_crew_size(crew_size)?;
        }
        if let Some(prod_date) = &self.prod_date {
            check_prod_date(prod_date)?;
        }
        Ok(())
    }

    /// Overlay the present fields onto `ship`. The rating is not touched.
    pub fn apply_to(self, ship: &mut Ship) {
        if let Some(name) = self.name {
            ship.name = name;
        }
        if let Some(planet) = self.planet {
            ship.planet = planet;
        }
        if let Some(ship_type) = self.ship_type {
            ship.ship_type = ship_type;
        }
        if let Some(prod_date) = self.prod_date {
            ship.prod_date = prod_date;
        }
        if let Some(is_used) = self.is_used {
            ship.is_used = is_used;
        }
        if let Some(speed) = self.speed {
            ship.speed = speed;
        }
        if let Some(crew_size) = self.crew_size {
            ship.crew_size = crew_size;
        }
    }
}

fn check_text(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(HangarError::precondition(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_speed(speed: f64) -> Result<()> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(HangarError::precondition(format!(
            "speed must be a positive number, got {speed}"
        )));
    }
    Ok(())
}

fn check_crew_size(crew_size: i32) -> Result<()> {
    if crew_size <= 0 {
        return Err(HangarError::precondition(format!(
            "crew size must be positive, got {crew_size}"
        )));
    }
    Ok(())
}

fn check_prod_date(prod_date: &DateTime<Utc>) -> Result<()> {
    let year = rating::production_year(prod_date);
    if year > CURRENT_YEAR {
        return Err(HangarError::precondition(format!(
            "production year {year} is after {CURRENT_YEAR}"
        )));
    }
    Ok(())
}
