//! Request validation performed before ships reach the catalog.

use chrono::{DateTime, Utc};
use hangar_core::{
    CURRENT_YEAR, ShipDraft, ShipId, ShipType, ShipUpdate, production_year, round_half_up_exact,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of a ship or planet name, in UTF-16 code units.
pub const MAX_TEXT_LEN: usize = 50;
/// Smallest accepted speed after rounding.
pub const MIN_SPEED: f64 = 0.01;
/// Largest accepted speed after rounding.
pub const MAX_SPEED: f64 = 0.99;
/// Largest accepted crew size.
pub const MAX_CREW_SIZE: i32 = 9_999;
/// Earliest accepted production year.
pub const MIN_PRODUCTION_YEAR: i32 = 2800;

/// Request payload for creating a ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipRequest {
    /// Ship name.
    pub name: Option<String>,
    /// Home planet.
    pub planet: Option<String>,
    /// Ship category.
    pub ship_type: Option<ShipType>,
    /// Production timestamp in epoch milliseconds.
    pub prod_date: Option<i64>,
    /// Used status; defaults to `false`.
    pub is_used: Option<bool>,
    /// Cruising speed.
    pub speed: Option<f64>,
    /// Number of crew members.
    pub crew_size: Option<i32>,
}

/// Parse a ship identifier from a path segment.
pub fn parse_ship_id(raw: &str) -> Result<ShipId, String> {
    match raw.trim().parse::<ShipId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("invalid ship id: {raw}")),
    }
}

/// Convert epoch milliseconds into a timestamp.
pub fn timestamp_from_millis(field: &str, millis: i64) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| format!("{field} is out of range"))
}

/// Validate a create request and turn it into a draft.
pub fn validate_create(request: CreateShipRequest) -> Result<ShipDraft, String> {
    let name = required("name", request.name)?;
    let planet = required("planet", request.planet)?;
    let ship_type = required("shipType", request.ship_type)?;
    let prod_date = required("prodDate", request.prod_date)?;
    let speed = required("speed", request.speed)?;
    let crew_size = required("crewSize", request.crew_size)?;

    check_text("name", &name)?;
    check_text("planet", &planet)?;
    let prod_date = check_prod_date(prod_date)?;
    check_speed(speed)?;
    check_crew_size(crew_size)?;

    Ok(ShipDraft {
        name,
        planet,
        ship_type,
        prod_date,
        is_used: request.is_used,
        speed,
        crew_size,
    })
}

/// Validate the fields present in an update request.
pub fn validate_update(update: &ShipUpdate) -> Result<(), String> {
    if let Some(name) = &update.name {
        check_text("name", name)?;
    }
    if let Some(planet) = &update.planet {
        check_text("planet", planet)?;
    }
    if let Some(prod_date) = &update.prod_date {
        check_prod_date(prod_date.timestamp_millis())?;
    }
    if let Some(speed) = update.speed {
        check_speed(speed)?;
    }
    if let Some(crew_size) = update.crew_size {
        check_crew_size(crew_size)?;
    }
    Ok(())
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, String> {
    value.ok_or_else(|| format!("{field} is required"))
}

fn check_text(field: &str, value: &str) -> Result<(), String> {
    let len = value.encode_utf16().count();
    if len == 0 || len > MAX_TEXT_LEN {
        return Err(format!("{field} must be 1 to {MAX_TEXT_LEN} characters"));
    }
    Ok(())
}

fn check_speed(speed: f64) -> Result<(), String> {
    let rounded = round_half_up_exact(speed, 2);
    if !(MIN_SPEED..=MAX_SPEED).contains(&rounded) {
        return Err(format!("speed must be between {MIN_SPEED} and {MAX_SPEED}"));
    }
    Ok(())
}

fn check_crew_size(crew_size: i32) -> Result<(), String> {
    if !(1..=MAX_CREW_SIZE).contains(&crew_size) {
        return Err(format!("crewSize must be between 1 and {MAX_CREW_SIZE}"));
    }
    Ok(())
}

fn check_prod_date(millis: i64) -> Result<DateTime<Utc>, String> {
    if millis < 0 {
        return Err("prodDate must not be negative".to_string());
    }
    let prod_date = timestamp_from_millis("prodDate", millis)?;
    let year = production_year(&prod_date);
    if !(MIN_PRODUCTION_YEAR..=CURRENT_YEAR).contains(&year) {
        return Err(format!(
            "prodDate year must be between {MIN_PRODUCTION_YEAR} and {CURRENT_YEAR}"
        ));
    }
    Ok(prod_date)
}

#[cfg(test)]
mod tests {
    use super::{CreateShipRequest, parse_ship_id, validate_create, validate_update};
    use chrono::{TimeZone, Utc};
    use hangar_core::{ShipType, ShipUpdate};

    fn millis(year: i32) -> i64 {
        Utc.with_ymd_and_hms(year, 7, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn request() -> CreateShipRequest {
        CreateShipRequest {
            name: Some("Orion".to_string()),
            planet: Some("Mars".to_string()),
            ship_type: Some(ShipType::Military),
            prod_date: Some(millis(2995)),
            is_used: None,
            speed: Some(0.82),
            crew_size: Some(617),
        }
    }

    #[test]
    fn valid_request_becomes_draft() {
        let draft = validate_create(request()).expect("valid");
        assert_eq!(draft.name, "Orion");
        assert_eq!(draft.prod_date.timestamp_millis(), millis(2995));
        assert_eq!(draft.is_used, None);
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let mut missing = request();
        missing.crew_size = None;
        let err = validate_create(missing).expect_err("missing crew");
        assert_eq!(err, "crewSize is required");
    }

    #[test]
    fn text_length_is_bounded() {
        let mut empty = request();
        empty.planet = Some(String::new());
        assert!(validate_create(empty).is_err());

        let mut long = request();
        long.name = Some("x".repeat(51));
        assert!(validate_create(long).is_err());

        let mut limit = request();
        limit.name = Some("x".repeat(50));
        assert!(validate_create(limit).is_ok());

        // Each rocket is two UTF-16 code units.
        let mut wide_limit = request();
        wide_limit.planet = Some("\u{1F680}".repeat(25));
        assert!(validate_create(wide_limit).is_ok());

        let mut wide_long = request();
        wide_long.planet = Some("\u{1F680}".repeat(26));
        assert!(validate_create(wide_long).is_err());
    }

    #[test]
    fn speed_is_checked_after_rounding() {
        let cases = [
            (0.005, true),
            (0.004, false),
            (0.99, true),
            (0.994, true),
            (0.995, true),
            (0.9951, false),
            (1.5, false),
        ];
        for (speed, ok) in cases {
            let mut candidate = request();
            candidate.speed = Some(speed);
            assert_eq!(validate_create(candidate).is_ok(), ok, "speed {speed}");
        }
    }

    #[test]
    fn crew_size_and_year_are_bounded() {
        let mut no_crew = request();
        no_crew.crew_size = Some(0);
        assert!(validate_create(no_crew).is_err());

        let mut big_crew = request();
        big_crew.crew_size = Some(10_000);
        assert!(validate_create(big_crew).is_err());

        let mut too_old = request();
        too_old.prod_date = Some(millis(2799));
        assert!(validate_create(too_old).is_err());

        let mut too_new = request();
        too_new.prod_date = Some(millis(3020));
        assert!(validate_create(too_new).is_err());

        let mut negative = request();
        negative.prod_date = Some(-1);
        assert!(validate_create(negative).is_err());
    }

    #[test]
    fn update_checks_present_fields_only() {
        assert!(validate_update(&ShipUpdate::default()).is_ok());

        let bad_speed = ShipUpdate {
            speed: Some(2.0),
            ..ShipUpdate::default()
        };
        assert!(validate_update(&bad_speed).is_err());

        let good = ShipUpdate {
            name: Some("Renamed".to_string()),
            prod_date: Some(Utc.with_ymd_and_hms(2900, 5, 5, 0, 0, 0).unwrap()),
            ..ShipUpdate::default()
        };
        assert!(validate_update(&good).is_ok());
    }

    #[test]
    fn ship_ids_must_be_positive_integers() {
        assert_eq!(parse_ship_id("17"), Ok(17));
        assert!(parse_ship_id("0").is_err());
        assert!(parse_ship_id("-4").is_err());
        assert!(parse_ship_id("abc").is_err());
    }
}
