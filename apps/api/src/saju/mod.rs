//! Calendar core: sexagenary cycle, solar/lunar event search, and the
//! four-pillar derivation the interpretation engines consume.

use thiserror::Error;

pub mod astro;
pub mod cycle;
pub mod lunar;
pub mod pillars;
pub mod solar_terms;

pub use cycle::{Stem, StemBranch};
pub use pillars::{four_pillars, FourPillars, KST_OFFSET_HOURS};

#[derive(Debug, Error)]
pub enum SajuError {
    #[error("birth year {year} is outside the supported range 1901-2099")]
    OutOfRange { year: i32 },

    #[error("no such lunar date: {year}-{month}-{day}")]
    InvalidLunarDate { year: i32, month: u8, day: u8 },
}
