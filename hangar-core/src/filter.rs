//! Ship filtering.

use chrono::{DateTime, Utc};

use crate::domain::{Ship, ShipType};

/// A single filter constraint on a ship.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Name contains the substring (case-sensitive).
    NameContains(String),
    /// Planet contains the substring (case-sensitive).
    PlanetContains(String),
    /// Ship type equals the value.
    ShipType(ShipType),
    /// Produced strictly after the timestamp.
    After(DateTime<Utc>),
    /// Produced strictly before the timestamp.
    Before(DateTime<Utc>),
    /// Used status equals the value.
    IsUsed(bool),
    /// Speed is at least the value.
    MinSpeed(f64),
    /// Speed is at most the value.
    MaxSpeed(f64),
    /// Crew size is at least the value.
    MinCrewSize(i32),
    /// Crew size is at most the value.
    MaxCrewSize(i32),
    /// Rating is at least the value.
    MinRating(f64),
    /// Rating is at most the value.
    MaxRating(f64),
}

impl Criterion {
    /// Whether `ship` satisfies this criterion.
    pub fn matches(&self, ship: &Ship) -> bool {
        match self {
            Criterion::NameContains(name) => ship.name.contains(name.as_str()),
            Criterion::PlanetContains(planet) => ship.planet.contains(planet.as_str()),
            Criterion::ShipType(ship_type) => ship.ship_type == *ship_type,
            Criterion::After(after) => ship.prod_date > *after,
            Criterion::Before(before) => ship.prod_date < *before,
            Criterion::IsUsed(is_used) => ship.is_used == *is_used,
            Criterion::MinSpeed(min) => ship.speed >= *min,
            Criterion::MaxSpeed(max) => ship.speed <= *max,
            Criterion::MinCrewSize(min) => ship.crew_size >= *min,
            Criterion::MaxCrewSize(max) => ship.crew_size <= *max,
            Criterion::MinRating(min) => ship.rating >= *min,
            Criterion::MaxRating(max) => ship.rating <= *max,
        }
    }
}

/// Optional constraints for a ship query. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    /// Name substring.
    pub name: Option<String>,
    /// Planet substring.
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Exclusive lower bound on production date.
    pub after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on production date.
    pub before: Option<DateTime<Utc>>,
    /// Exact used status.
    pub is_used: Option<bool>,
    /// Inclusive lower bound on speed.
    pub min_speed: Option<f64>,
    /// Inclusive upper bound on speed.
    pub max_speed: Option<f64>,
    /// Inclusive lower bound on crew size.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper bound on crew size.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower bound on rating.
    pub min_rating: Option<f64>,
    /// Inclusive upper bound on rating.
    pub max_rating: Option<f64>,
}

impl ShipFilter {
    /// Set the field that corresponds to `criterion`.
    pub fn with(mut self, criterion: Criterion) -> Self {
        match criterion {
            Criterion::NameContains(name) => self.name = Some(name),
            Criterion::PlanetContains(planet) => self.planet = Some(planet),
            Criterion::ShipType(ship_type) => self.ship_type = Some(ship_type),
            Criterion::After(after) => self.after = Some(after),
            Criterion::Before(before) => self.before = Some(before),
            Criterion::IsUsed(is_used) => self.is_used = Some(is_used),
            Criterion::MinSpeed(min) => self.min_speed = Some(min),
            Criterion::MaxSpeed(max) => self.max_speed = Some(max),
            Criterion::MinCrewSize(min) => self.min_crew_size = Some(min),
            Criterion::MaxCrewSize(max) => self.max_crew_size = Some(max),
            Criterion::MinRating(min) => self.min_rating = Some(min),
            Criterion::MaxRating(max) => self.max_rating = Some(max),
        }
        self
    }

    /// The active criteria, one per present field.
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::new();
        if let Some(name) = &self.name {
            criteria.push(Criterion::NameContains(name.clone()));
        }
        if let Some(planet) = &self.planet {
            criteria.push(Criterion::PlanetContains(planet.clone()));
        }
        if let Some(ship_type) = self.ship_type {
            criteria.push(Criterion::ShipType(ship_type));
        }
        if let Some(after) = self.after {
            criteria.push(Criterion::After(after));
        }
        if let Some(before) = self.before {
            criteria.push(Criterion::Before(before));
        }
        if let Some(is_used) = self.is_used {
            criteria.push(Criterion::IsUsed(is_used));
        }
        if let Some(min) = self.min_speed {
            criteria.push(Criterion::MinSpeed(min));
        }
        if let Some(max) = self.max_speed {
            criteria.push(Criterion::MaxSpeed(max));
        }
        if let Some(min) = self.min_crew_size {
            criteria.push(Criterion::MinCrewSize(min));
        }
        if let Some(max) = self.max_crew_size {
            criteria.push(Criterion::MaxCrewSize(max));
        }
        if let Some(min) = self.min_rating {
            criteria.push(Criterion::MinRating(min));
        }
        if let Some(max) = self.max_rating {
            criteria.push(Criterion::MaxRating(max));
        }
        criteria
    }

    /// Whether `ship` satisfies every active criterion.
    pub fn matches(&self, ship: &Ship) -> bool {
        self.criteria().iter().all(|criterion| criterion.matches(ship))
    }

    /// Keep the matching ships, preserving their order.
    pub fn apply(&self, ships: Vec<Ship>) -> Vec<Ship> {
        let criteria = self.criteria();
        if criteria.is_empty() {
            return ships;
        }
        ships
            .into_iter()
            .filter(|ship| criteria.iter().all(|criterion| criterion.matches(ship)))
            .collect()
    }
}

impl FromIterator<Criterion> for ShipFilter {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ShipFilter::default(), |filter, criterion| filter.with(criterion))
    }
}
