//! Four-pillar computation from a solar birth date-time.
//!
//! Boundaries follow common practice: the pillar year and the 寅 month open
//! at lichun, pillar months turn at each jie, the day pillar follows the
//! civil date, and the 子 hour opening at 23:00 borrows the next day's stem.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use super::astro::{jd_from_datetime, jde_to_jd_utc, jdn};
use super::cycle::{Branch, Stem, StemBranch};
use super::solar_terms::{jie_before, lichun_jde};
use super::SajuError;

/// All birth instants are interpreted in Asia/Seoul, as the original
/// service hardcodes.
pub const KST_OFFSET_HOURS: f64 = 9.0;

/// Inclusive year range the astronomical fits are trusted over.
pub const MIN_YEAR: i32 = 1901;
pub const MAX_YEAR: i32 = 2099;

/// The four stem-branch pairs for a birth instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourPillars {
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    pub hour: StemBranch,
}

impl FourPillars {
    /// The heavenly stem of the day pillar.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }
}

/// Sexagenary pair of a civil date's day cycle.
fn day_pillar(date: NaiveDate) -> StemBranch {
    StemBranch::from_cycle_index(((jdn(date) + 49).rem_euclid(60)) as u8)
}

/// Sexagenary pair for pillar year `year` (the year in force after its lichun).
fn year_pillar(year: i32) -> StemBranch {
    StemBranch::new(
        Stem::from_index((year - 4).rem_euclid(10) as u8),
        Branch::from_index((year - 4).rem_euclid(12) as u8),
    )
}

/// Computes the four pillars for a local (KST) birth date-time.
pub fn four_pillars(birth: NaiveDateTime) -> Result<FourPillars, SajuError> {
    let year = birth.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(SajuError::OutOfRange { year });
    }

    let jd_utc = jd_from_datetime(birth) - KST_OFFSET_HOURS / 24.0;

    // Year pillar: births before lichun belong to the previous year.
    let pillar_year = if jd_utc < jde_to_jd_utc(lichun_jde(year)) {
        year - 1
    } else {
        year
    };
    let year_sb = year_pillar(pillar_year);

    // Month pillar: branch from the governing jie, stem from the
    // five-tigers rule off the year stem.
    let (_, month_index) = jie_before(jd_utc);
    let month_branch = Branch::from_index((2 + month_index) % 12);
    let month_stem =
        Stem::from_index(((year_sb.stem.index() % 5) * 2 + 2 + month_index) % 10);
    let month_sb = StemBranch::new(month_stem, month_branch);

    let day_sb = day_pillar(birth.date());

    // Hour pillar: two-hour slots from 子 at 23:00; the late 子 slot takes
    // the following day's stem (five-rats rule).
    let hour_branch_index = ((birth.hour() + 1) / 2 % 12) as u8;
    let stem_day = if birth.hour() == 23 {
        birth.date() + Duration::days(1)
    } else {
        birth.date()
    };
    let hour_stem = Stem::from_index(
        (day_pillar(stem_day).stem.index() % 5) * 2 + hour_branch_index,
    );
    let hour_sb = StemBranch::new(hour_stem, Branch::from_index(hour_branch_index));

    Ok(FourPillars {
        year: year_sb,
        month: month_sb,
        day: day_sb,
        hour: hour_sb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_day_pillar_prc_founding_is_gapja() {
        // 1949-10-01 is the textbook 甲子 day.
        let p = day_pillar(NaiveDate::from_ymd_opt(1949, 10, 1).unwrap());
        assert_eq!(p.to_string(), "甲子");
    }

    #[test]
    fn test_millennium_noon_pillars() {
        let p = four_pillars(at(2000, 1, 1, 12, 0)).unwrap();
        // Before lichun 2000: still the 己卯 year; 子 month; 戊午 day and hour.
        assert_eq!(p.year.to_string(), "己卯");
        assert_eq!(p.month.to_string(), "丙子");
        assert_eq!(p.day.to_string(), "戊午");
        assert_eq!(p.hour.to_string(), "戊午");
    }

    #[test]
    fn test_year_turns_at_lichun() {
        let before = four_pillars(at(2000, 2, 3, 12, 0)).unwrap();
        let after = four_pillars(at(2000, 2, 5, 12, 0)).unwrap();
        assert_eq!(before.year.to_string(), "己卯");
        assert_eq!(after.year.to_string(), "庚辰");
        assert_eq!(after.month.to_string(), "戊寅");
    }

    #[test]
    fn test_late_ja_hour_borrows_next_day_stem() {
        let p = four_pillars(at(2000, 1, 1, 23, 30)).unwrap();
        // Day pillar stays with the civil date.
        assert_eq!(p.day.to_string(), "戊午");
        // 己 day opens its 子 hour with 甲.
        assert_eq!(p.hour.to_string(), "甲子");
    }

    #[test]
    fn test_day_master_is_day_stem() {
        let p = four_pillars(at(2000, 1, 1, 12, 0)).unwrap();
        assert_eq!(p.day_master(), Stem::Mu);
    }

    #[test]
    fn test_out_of_range_year_rejected() {
        assert!(four_pillars(at(1890, 1, 1, 12, 0)).is_err());
        assert!(four_pillars(at(2150, 1, 1, 12, 0)).is_err());
    }
}
