//! Low-precision solar and lunar theory backing the calendar conversions.
//!
//! Julian-date plumbing sits on top of `chrono`; the solar longitude and
//! lunation series are the standard short Meeus forms, which hold to a few
//! arc-seconds / a couple of minutes over 1900-2100. That is more than enough
//! to place calendar events on the right civil day, which is all the pillar
//! and lunar-month logic ever asks of this module.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// JD of the chrono proleptic-Gregorian epoch offset: JD(noon) = days-from-CE + this.
const JD_CE_OFFSET: i64 = 1_721_425;

/// JD of 2000-01-01 12:00 TT, the anchor for fractional conversions.
pub const J2000: f64 = 2_451_545.0;

/// Mean synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530_588_861;

/// Julian day number of a civil date (the JD at noon of that date).
pub fn jdn(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JD_CE_OFFSET
}

/// Fractional Julian date of a civil date-time (same timescale as the input).
pub fn jd_from_datetime(dt: NaiveDateTime) -> f64 {
    let day = jdn(dt.date()) as f64;
    let secs = f64::from(dt.num_seconds_from_midnight());
    day + (secs - 43_200.0) / 86_400.0
}

/// Inverse of [`jd_from_datetime`], rounded to the nearest second.
pub fn jd_to_datetime(jd: f64) -> NaiveDateTime {
    let anchor = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let secs = ((jd - J2000) * 86_400.0).round() as i64;
    anchor + Duration::seconds(secs)
}

/// Civil date at a fixed UTC offset for an instant given as UTC JD.
pub fn jd_utc_to_local_date(jd_utc: f64, tz_hours: f64) -> NaiveDate {
    jd_to_datetime(jd_utc + tz_hours / 24.0).date()
}

/// ΔT = TT − UTC in seconds, piecewise polynomial fit (Espenak & Meeus),
/// valid for 1900-2100.
pub fn delta_t_seconds(year: f64) -> f64 {
    if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t * t + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t * t + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t * t
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    }
}

/// Converts a dynamical-time JD (JDE) to UTC JD.
pub fn jde_to_jd_utc(jde: f64) -> f64 {
    // Year only drives the ΔT fit; the civil year of the TT instant is fine.
    let year = f64::from(jd_to_datetime(jde).year());
    jde - delta_t_seconds(year) / 86_400.0
}

/// Converts a UTC JD to dynamical time.
pub fn jd_utc_to_jde(jd_utc: f64) -> f64 {
    let year = f64::from(jd_to_datetime(jd_utc).year());
    jd_utc + delta_t_seconds(year) / 86_400.0
}

/// Normalizes an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Normalizes an angle to (-180, 180].
pub fn normalize_pm180(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Apparent geocentric longitude of the Sun in degrees for a JDE instant.
pub fn apparent_solar_longitude(jde: f64) -> f64 {
    let t = (jde - J2000) / 36_525.0;

    let l0 = 280.46646 + 36_000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35_999.05029 * t - 0.0001537 * t * t;
    let m_rad = normalize_360(m).to_radians();

    // Equation of center.
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();

    let true_longitude = l0 + c;

    // Nutation and aberration down to apparent longitude.
    let omega = 125.04 - 1934.136 * t;
    let apparent = true_longitude - 0.00569 - 0.00478 * omega.to_radians().sin();

    normalize_360(apparent)
}

/// Instant of new moon number `k` (k = 0 is the first lunation of 2000)
/// as JDE. Principal periodic terms of the Meeus lunation series.
pub fn new_moon_jde(k: i32) -> f64 {
    let kf = f64::from(k);
    let t = kf / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = 2_451_550.097_66 + SYNODIC_MONTH * kf + 0.000_154_37 * t2
        - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    // Sun mean anomaly, Moon mean anomaly, argument of latitude, node.
    let m = (2.5534 + 29.105_356_70 * kf - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.5643 + 385.816_935_28 * kf + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.7108 + 390.670_502_84 * kf - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let omega = (124.7746 - 1.563_755_88 * kf + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let corr = -0.40720 * mp.sin()
        + 0.17241 * e * m.sin()
        + 0.01608 * (2.0 * mp).sin()
        + 0.01039 * (2.0 * f).sin()
        + 0.00739 * e * (mp - m).sin()
        - 0.00514 * e * (mp + m).sin()
        + 0.00208 * e * e * (2.0 * m).sin()
        - 0.00111 * (mp - 2.0 * f).sin()
        - 0.00057 * (mp + 2.0 * f).sin()
        + 0.00056 * e * (2.0 * mp + m).sin()
        - 0.00042 * (3.0 * mp).sin()
        + 0.00042 * e * (m + 2.0 * f).sin()
        + 0.00038 * e * (m - 2.0 * f).sin()
        - 0.00024 * e * (2.0 * mp - m).sin()
        - 0.00017 * omega.sin()
        - 0.00007 * (mp + 2.0 * m).sin();

    mean + corr
}

/// Approximate lunation number whose new moon falls at or before `jd`.
pub fn lunation_before(jd: f64) -> i32 {
    let mut k = ((jd - 2_451_550.097_66) / SYNODIC_MONTH).floor() as i32;
    while new_moon_jde(k + 1) <= jd {
        k += 1;
    }
    while new_moon_jde(k) > jd {
        k -= 1;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jdn_anchor_j2000() {
        let d = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(jdn(d), 2_451_545);
    }

    #[test]
    fn test_jd_datetime_round_trip() {
        let dt = NaiveDate::from_ymd_opt(1987, 6, 19)
            .unwrap()
            .and_hms_opt(21, 35, 40)
            .unwrap();
        let jd = jd_from_datetime(dt);
        assert_eq!(jd_to_datetime(jd), dt);
    }

    #[test]
    fn test_delta_t_near_2000() {
        // ΔT was about 64 s at the epoch.
        let dt = delta_t_seconds(2000.0);
        assert!((dt - 63.9).abs() < 1.0, "ΔT(2000) = {dt}");
    }

    #[test]
    fn test_first_new_moon_of_2000() {
        // 2000-01-06 18:14 UTC.
        let jde = new_moon_jde(0);
        let utc = jd_to_datetime(jde_to_jd_utc(jde));
        assert_eq!(utc.date(), NaiveDate::from_ymd_opt(2000, 1, 6).unwrap());
        assert_eq!(utc.hour(), 18);
    }

    #[test]
    fn test_solar_longitude_at_march_equinox() {
        // Equinox 2000: March 20, 07:35 UTC; apparent longitude crosses 0°.
        let dt = NaiveDate::from_ymd_opt(2000, 3, 20)
            .unwrap()
            .and_hms_opt(7, 35, 0)
            .unwrap();
        let jde = jd_utc_to_jde(jd_from_datetime(dt));
        let lon = apparent_solar_longitude(jde);
        assert!(normalize_pm180(lon).abs() < 0.02, "λ = {lon}");
    }

    #[test]
    fn test_lunation_before_brackets_jd() {
        let jd = jd_from_datetime(
            NaiveDate::from_ymd_opt(2020, 1, 25)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        let k = lunation_before(jd);
        assert!(new_moon_jde(k) <= jd);
        assert!(new_moon_jde(k + 1) > jd);
    }
}
