//! Ship rating calculation.
//!
//! A rating is derived from speed, used status and production year. Every
//! write path recomputes it, so it never drifts from the fields it depends on.

use chrono::{DateTime, Datelike, Local, Utc};

use crate::domain::Ship;

/// Reference "present" year for the rating formula.
pub const CURRENT_YEAR: i32 = 3019;

/// Compute a rating rounded half-up to two decimals.
pub fn compute_rating(speed: f64, is_used: bool, production_year: i32) -> f64 {
    let k = if is_used { 0.5 } else { 1.0 };
    let age = f64::from(CURRENT_YEAR - production_year + 1);
    round_half_up(speed * k * 80.0 / age, 2)
}

/// Local calendar year of a production timestamp.
pub fn production_year(prod_date: &DateTime<Utc>) -> i32 {
    prod_date.with_timezone(&Local).year()
}

/// Recompute `ship.rating` from its current fields.
pub fn rate(ship: &mut Ship) {
    ship.rating = compute_rating(ship.speed, ship.is_used, production_year(&ship.prod_date));
}

/// Round to `scale` decimals, ties away from zero.
///
/// Rounding works on the shortest decimal form of `value`, so `1.005`
/// becomes `1.01` even though its binary value sits just below the tie.
pub fn round_half_up(value: f64, scale: usize) -> f64 {
    round_digits(value, &value.abs().to_string(), scale)
}

/// Round to `scale` decimals, ties away from zero, on the exact binary value.
///
/// `0.995` is stored as `0.99499999...`, so it becomes `0.99` here while
/// [`round_half_up`] gives `1.0`.
pub fn round_half_up_exact(value: f64, scale: usize) -> f64 {
    // 60 digits cover the full expansion of any f64 at or above 2^-60.
    round_digits(value, &format!("{:.60}", value.abs()), scale)
}

fn round_digits(value: f64, repr: &str, scale: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Some((whole, fraction)) = repr.split_once('.') else {
        return value;
    };
    if fraction.len() <= scale {
        return value;
    }
    let Ok(mut units) = format!("{whole}{}", &fraction[..scale]).parse::<u64>() else {
        return value;
    };
    if fraction.as_bytes()[scale] >= b'5' {
        units += 1;
    }
    let divisor = 10u64.pow(scale as u32);
    let text = format!(
        "{}.{:0width$}",
        units / divisor,
        units % divisor,
        width = scale
    );
    let rounded = text.parse::<f64>().unwrap_or(value.abs());
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}
