//! Lunisolar month bookkeeping and lunar-to-solar conversion.
//!
//! Month numbering follows the standard convention: within a suì (the span
//! from one winter solstice to the next) the lunation containing the solstice
//! is month 11. A suì of 13 lunations is a leap suì, and its first lunation
//! without a zhongqi becomes the leap month, repeating the previous number.

use chrono::{Duration, NaiveDate};

use super::astro::{jd_from_datetime, jde_to_jd_utc, jd_utc_to_local_date, new_moon_jde};
use super::pillars::{MAX_YEAR, MIN_YEAR};
use super::solar_terms::{month_has_major_term, sun_crossing_local_date, WINTER_SOLSTICE_DEG};
use super::SajuError;

/// One numbered lunar month with its civil start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarMonth {
    pub number: u8,
    pub is_leap: bool,
    pub start: NaiveDate,
    pub days: u8,
}

/// Local civil date on which lunation `k` begins.
fn month_start(k: i32, tz_hours: f64) -> NaiveDate {
    jd_utc_to_local_date(jde_to_jd_utc(new_moon_jde(k)), tz_hours)
}

/// Lunation whose month contains the local date `date`.
fn lunation_containing(date: NaiveDate, tz_hours: f64) -> i32 {
    let jd = jd_from_datetime(date.and_hms_opt(12, 0, 0).unwrap()) - tz_hours / 24.0;
    let mut k = super::astro::lunation_before(jd);
    while month_start(k + 1, tz_hours) <= date {
        k += 1;
    }
    while month_start(k, tz_hours) > date {
        k -= 1;
    }
    k
}

/// Numbered months of the suì opening at the winter solstice of December
/// `solstice_year`, from month 11 up to (not including) the next month 11.
fn sui_months(solstice_year: i32, tz_hours: f64) -> Vec<LunarMonth> {
    let ws_a = sun_crossing_local_date(solstice_year, WINTER_SOLSTICE_DEG, tz_hours);
    let ws_b = sun_crossing_local_date(solstice_year + 1, WINTER_SOLSTICE_DEG, tz_hours);

    let k_a = lunation_containing(ws_a, tz_hours);
    let k_b = lunation_containing(ws_b, tz_hours);
    let count = (k_b - k_a) as usize;

    let starts: Vec<NaiveDate> = (0..=count as i32)
        .map(|i| month_start(k_a + i, tz_hours))
        .collect();

    // In a 13-lunation suì the first month without a zhongqi is the leap.
    let leap_slot = if count == 13 {
        (1..count).find(|&i| !month_has_major_term(starts[i], starts[i + 1], tz_hours))
    } else {
        None
    };

    let mut months = Vec::with_capacity(count);
    let mut number: u8 = 11;
    for i in 0..count {
        let is_leap = leap_slot == Some(i);
        if i > 0 && !is_leap {
            number = number % 12 + 1;
        }
        months.push(LunarMonth {
            number,
            is_leap,
            start: starts[i],
            days: (starts[i + 1] - starts[i]).num_days() as u8,
        });
    }
    months
}

/// The months of lunar year `year`, from its month 1 through month 12
/// (with a leap month inserted where one falls).
pub fn lunar_year_months(year: i32, tz_hours: f64) -> Vec<LunarMonth> {
    let mut all = sui_months(year - 1, tz_hours);
    all.extend(sui_months(year, tz_hours));

    let first = all
        .iter()
        .position(|m| m.number == 1 && !m.is_leap)
        .expect("suì always contains a month 1");
    let next = first
        + 1
        + all[first + 1..]
            .iter()
            .position(|m| m.number == 1 && !m.is_leap)
            .expect("following suì always contains a month 1");

    all[first..next].to_vec()
}

/// Leap month number of a lunar year, if it has one.
#[allow(dead_code)]
pub fn leap_month(year: i32, tz_hours: f64) -> Option<u8> {
    lunar_year_months(year, tz_hours)
        .iter()
        .find(|m| m.is_leap)
        .map(|m| m.number)
}

/// Converts a lunar calendar date to the solar civil date it falls on.
/// Years outside the supported range are rejected before any month math,
/// so conversion never extrapolates past the trusted fits.
pub fn lunar_to_solar(
    year: i32,
    month: u8,
    day: u8,
    is_leap: bool,
    tz_hours: f64,
) -> Result<NaiveDate, SajuError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(SajuError::OutOfRange { year });
    }
    if !(1..=12).contains(&month) || day == 0 {
        return Err(SajuError::InvalidLunarDate { year, month, day });
    }
    let months = lunar_year_months(year, tz_hours);
    let found = months
        .iter()
        .find(|m| m.number == month && m.is_leap == is_leap)
        .ok_or(SajuError::InvalidLunarDate { year, month, day })?;
    if day > found.days {
        return Err(SajuError::InvalidLunarDate { year, month, day });
    }
    Ok(found.start + Duration::days(i64::from(day) - 1))
}
