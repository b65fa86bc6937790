//! Read-side query pipeline: filter, then sort, then page.

use crate::domain::Ship;
use crate::filter::ShipFilter;
use crate::page::PageRequest;
use crate::sort::{ShipOrder, sort_ships};

/// A complete listing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipQuery {
    /// Constraints every returned ship satisfies.
    pub filter: ShipFilter,
    /// Optional sort key; `None` keeps store order.
    pub order: Option<ShipOrder>,
    /// Page to return.
    pub page: PageRequest,
}

/// Run `query` over a materialized collection.
pub fn run_query(ships: Vec<Ship>, query: &ShipQuery) -> Vec<Ship> {
    let mut matching = query.filter.apply(ships);
    sort_ships(&mut matching, query.order);
    query.page.slice(matching)
}

/// Number of ships that satisfy `filter`, ignoring order and paging.
pub fn count_matching(ships: &[Ship], filter: &ShipFilter) -> usize {
    let criteria = filter.criteria();
    ships
        .iter()
        .filter(|ship| criteria.iter().all(|criterion| criterion.matches(ship)))
        .count()
}
