//! Solar-term event search.
//!
//! A solar term is the instant the Sun's apparent longitude crosses a
//! multiple of 15°. The jie (odd multiples, 315°, 345°, 15°, ...) bound the
//! pillar months; the zhongqi (multiples of 30°) decide lunar leap months.
//! Crossings are found by Newton iteration on the longitude residual.

use chrono::NaiveDate;

use super::astro::{
    apparent_solar_longitude, jd_from_datetime, jd_utc_to_jde, jd_utc_to_local_date,
    jde_to_jd_utc, normalize_360, normalize_pm180,
};

/// Mean solar motion in degrees per day, the Newton step divisor.
const MEAN_MOTION: f64 = 0.985_647;

/// Longitude of lichun, the start of the pillar year and of the 寅 month.
pub const LICHUN_DEG: f64 = 315.0;

/// Longitude of the winter solstice, the anchor of lunar month numbering.
pub const WINTER_SOLSTICE_DEG: f64 = 270.0;

/// Refines a crossing of `target_deg` starting from `jde_guess`.
/// Converges to well under a second within a handful of iterations.
fn refine_crossing(jde_guess: f64, target_deg: f64) -> f64 {
    let mut jde = jde_guess;
    for _ in 0..10 {
        let delta = normalize_pm180(target_deg - apparent_solar_longitude(jde));
        jde += delta / MEAN_MOTION;
        if delta.abs() < 1e-7 {
            break;
        }
    }
    jde
}

/// JDE of the Sun crossing `target_deg` within calendar year `year`.
pub fn sun_crossing_jde(year: i32, target_deg: f64) -> f64 {
    // Seed from the mean longitude at the start of the year.
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let jd0 = jd_from_datetime(jan1);
    let days = normalize_360(target_deg - 280.46) / MEAN_MOTION;
    refine_crossing(jd0 + days, target_deg)
}

/// Local civil date of the Sun crossing `target_deg` in `year`.
pub fn sun_crossing_local_date(year: i32, target_deg: f64, tz_hours: f64) -> NaiveDate {
    jd_utc_to_local_date(jde_to_jd_utc(sun_crossing_jde(year, target_deg)), tz_hours)
}

/// The last jie at or before the instant `jd_utc`, as `(jde, month_index)`
/// where month index 0 is the 寅 month opened by lichun.
pub fn jie_before(jd_utc: f64) -> (f64, u8) {
    let jde = jd_utc_to_jde(jd_utc);
    let lon = apparent_solar_longitude(jde);
    // Jie sit at λ ≡ 15 (mod 30); take the last one at or below λ.
    let target = normalize_360(((lon - 15.0) / 30.0).floor() * 30.0 + 15.0);
    let crossing = refine_crossing(jde, target);
    let month_index = (normalize_360(target - LICHUN_DEG) / 30.0).round() as u8 % 12;
    (crossing, month_index)
}

/// Whether a lunar month spanning `[start, next_start)` in local civil dates
/// contains a zhongqi. Drives the leap-month rule.
pub fn month_has_major_term(start: NaiveDate, next_start: NaiveDate, tz_hours: f64) -> bool {
    let start_jd_utc =
        jd_from_datetime(start.and_hms_opt(0, 0, 0).unwrap()) - tz_hours / 24.0;
    let jde = jd_utc_to_jde(start_jd_utc);
    let lon = apparent_solar_longitude(jde);
    // First zhongqi at or after the month opens.
    let mut target = normalize_360((lon / 30.0).floor() * 30.0 + 30.0);
    if normalize_pm180(lon - normalize_360((lon / 30.0).floor() * 30.0)).abs() < 1e-9 {
        target = lon; // month opens exactly on a zhongqi
    }
    let crossing = refine_crossing(jde + normalize_360(target - lon) / MEAN_MOTION, target);
    let date = jd_utc_to_local_date(jde_to_jd_utc(crossing), tz_hours);
    date >= start && date < next_start
}

/// JDE of lichun for pillar year `year`.
pub fn lichun_jde(year: i32) -> f64 {
    sun_crossing_jde(year, LICHUN_DEG)
}
