#![deny(missing_docs)]
//! Hangar core library.
//!
//! This crate contains the ship domain types, the rating rule and the
//! filter/sort/page pipeline behind the Hangar catalog service.

pub mod domain;
pub mod error;
pub mod filter;
pub mod page;
pub mod query;
pub mod rating;
pub mod service;
pub mod sort;
pub mod store;

pub use domain::{NewShip, Ship, ShipDraft, ShipId, ShipType, ShipUpdate};
pub use error::{HangarError, Result};
pub use filter::{Criterion, ShipFilter};
pub use page::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest};
pub use query::{ShipQuery, count_matching, run_query};
pub use rating::{
    CURRENT_YEAR, compute_rating, production_year, round_half_up, round_half_up_exact,
};
pub use service::ShipService;
pub use sort::{ShipOrder, sort_ships};
pub use store::{MemoryShipStore, ShipStore};
