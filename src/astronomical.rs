use std::fmt;
use std::time::Instant;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use rayon::prelude::*;
use tracing::debug;

use crate::locale::Locale;

/// Mean length of the synodic month (new moon to new moon), in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// Number of discrete phases the cycle is split into.
pub const PHASE_COUNT: usize = 8;

/// Width of one phase bucket, in days.
pub const PHASE_BUCKET_DAYS: f64 = SYNODIC_MONTH_DAYS / PHASE_COUNT as f64;

const SECONDS_PER_DAY: f64 = 86_400.0;

// Longest run of days needed to see every phase begin at least once.
const PHASE_SEARCH_DAYS: u32 = 34;

lazy_static! {
    /// New Moon of 6 January 2000, 18:14 UTC.
    pub static ref REFERENCE_NEW_MOON: NaiveDateTime = NaiveDate::from_ymd_opt(2000, 1, 6)
        .and_then(|date| date.and_hms_opt(18, 14, 0))
        .expect("reference new moon is a valid UTC instant");
}

/// One of the eight named phases, in cycle order starting at New Moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; PHASE_COUNT] = [
        MoonPhase::New,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::Full,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Phase for a bucket index; wraps indices past the last bucket.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % PHASE_COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MoonPhase::New => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::Full => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }

    pub fn name(self, locale: Locale) -> &'static str {
        locale.phase_names()[self.index()]
    }

    pub fn is_waxing(self) -> bool {
        (1..=3).contains(&self.index())
    }

    pub fn is_waning(self) -> bool {
        (5..=7).contains(&self.index())
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.name(Locale::English))
    }
}

/// Days since the most recent New Moon at `instant` (UTC), in `[0, SYNODIC_MONTH_DAYS)`.
///
/// The remainder is floored explicitly: `%` on `f64` keeps the sign of the
/// dividend, so instants before the reference come out negative and are
/// shifted up by one cycle.
pub fn moon_age_at(instant: NaiveDateTime) -> f64 {
    let elapsed = instant.signed_duration_since(*REFERENCE_NEW_MOON);
    let elapsed_days = elapsed.num_seconds() as f64 / SECONDS_PER_DAY;

    let mut age = elapsed_days % SYNODIC_MONTH_DAYS;
    if age < 0.0 {
        age += SYNODIC_MONTH_DAYS;
    }
    age
}

/// Moon age at midnight UTC of `date`.
pub fn moon_age(date: NaiveDate) -> f64 {
    moon_age_at(date.and_time(NaiveTime::MIN))
}

/// Bucket index (0..=7) for a moon age.
///
/// The trailing `% PHASE_COUNT` catches an age that rounded up to a full cycle.
pub fn phase_index(age: f64) -> usize {
    ((age / PHASE_BUCKET_DAYS).floor() as usize) % PHASE_COUNT
}

pub fn phase_at(instant: NaiveDateTime) -> MoonPhase {
    MoonPhase::from_index(phase_index(moon_age_at(instant)))
}

/// Moon phase for a calendar date, evaluated at midnight UTC.
pub fn compute_phase(date: NaiveDate) -> MoonPhase {
    MoonPhase::from_index(phase_index(moon_age(date)))
}

/// Phases for `days` consecutive dates starting at `start`, in date order.
///
/// Dates past the end of chrono's range are dropped.
pub fn phase_range(start: NaiveDate, days: u32) -> Vec<(NaiveDate, MoonPhase)> {
    let started = Instant::now();

    let results: Vec<(NaiveDate, MoonPhase)> = (0..days)
        .into_par_iter()
        .filter_map(|offset| {
            let date = start.checked_add_days(Days::new(u64::from(offset)))?;
            Some((date, compute_phase(date)))
        })
        .collect();

    debug!(
        target: "phase_calculation",
        "Calculated {} phases from {} in {}µs",
        results.len(),
        start,
        started.elapsed().as_micros()
    );

    results
}

/// First date on or after `from` whose phase is `target`, with the number of
/// days until it. `None` only when the search runs off the end of the calendar.
pub fn next_phase(from: NaiveDate, target: MoonPhase) -> Option<(NaiveDate, i64)> {
    phase_range(from, PHASE_SEARCH_DAYS)
        .into_iter()
        .find(|&(_, phase)| phase == target)
        .map(|(date, _)| (date, (date - from).num_days()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn reference_instant_is_new_moon() {
        assert_eq!(moon_age_at(*REFERENCE_NEW_MOON), 0.0);
        assert_eq!(phase_at(*REFERENCE_NEW_MOON), MoonPhase::New);
    }

    #[test]
    fn midnight_before_reference_is_end_of_previous_cycle() {
        // 18h14m before the reference instant
        let age = moon_age(ymd(2000, 1, 6));
        let expected = SYNODIC_MONTH_DAYS - (18.0 * 3600.0 + 14.0 * 60.0) / SECONDS_PER_DAY;
        assert!((age - expected).abs() < 1e-9);
        assert_eq!(compute_phase(ymd(2000, 1, 6)), MoonPhase::WaningCrescent);
    }

    #[test]
    fn day_after_reference_is_new_moon() {
        assert_eq!(compute_phase(ymd(2000, 1, 7)), MoonPhase::New);
    }

    #[test]
    fn half_cycle_later_is_full_moon() {
        assert_eq!(compute_phase(ymd(2000, 1, 21)), MoonPhase::WaxingGibbous);
        assert_eq!(compute_phase(ymd(2000, 1, 22)), MoonPhase::Full);
    }

    #[test]
    fn known_dates_in_2024() {
        assert_eq!(compute_phase(ymd(2024, 2, 10)), MoonPhase::New);
        assert_eq!(compute_phase(ymd(2024, 2, 15)), MoonPhase::WaxingCrescent);
        assert_eq!(compute_phase(ymd(2024, 2, 24)), MoonPhase::WaxingGibbous);
    }

    #[test]
    fn age_is_normalised_before_epoch() {
        for date in [ymd(1900, 1, 1), ymd(1500, 3, 1), ymd(1, 1, 1), ymd(-4000, 6, 30)] {
            let age = moon_age(date);
            assert!(
                (0.0..=SYNODIC_MONTH_DAYS).contains(&age),
                "age {} out of range for {}",
                age,
                date
            );
        }
        assert_eq!(compute_phase(ymd(1500, 3, 1)), MoonPhase::WaningGibbous);
    }

    #[test]
    fn phase_index_boundaries() {
        assert_eq!(phase_index(0.0), 0);
        assert_eq!(phase_index(PHASE_BUCKET_DAYS - 1e-9), 0);
        assert_eq!(phase_index(PHASE_BUCKET_DAYS), 1);
        assert_eq!(phase_index(4.0 * PHASE_BUCKET_DAYS), 4);
        assert_eq!(phase_index(SYNODIC_MONTH_DAYS - 1e-9), 7);
        // A full cycle wraps back to New Moon instead of producing index 8.
        assert_eq!(phase_index(SYNODIC_MONTH_DAYS), 0);
    }

    #[test]
    fn phase_metadata() {
        assert_eq!(MoonPhase::ALL.len(), 8);
        for (i, phase) in MoonPhase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
            assert_eq!(MoonPhase::from_index(i), *phase);
        }
        assert_eq!(MoonPhase::from_index(8), MoonPhase::New);
        assert_eq!(MoonPhase::Full.symbol(), "🌕");
        assert_eq!(MoonPhase::Full.name(Locale::Portuguese), "Lua Cheia");
        assert_eq!(MoonPhase::LastQuarter.to_string(), "🌗 Last Quarter");
        assert!(MoonPhase::FirstQuarter.is_waxing());
        assert!(MoonPhase::WaningGibbous.is_waning());
        assert!(!MoonPhase::New.is_waxing() && !MoonPhase::New.is_waning());
        assert!(!MoonPhase::Full.is_waxing() && !MoonPhase::Full.is_waning());
    }

    #[test]
    fn phase_range_is_in_date_order() {
        let start = ymd(2024, 2, 1);
        let range = phase_range(start, 29);
        assert_eq!(range.len(), 29);
        for (offset, (date, phase)) in range.iter().enumerate() {
            assert_eq!(*date, start + Days::new(offset as u64));
            assert_eq!(*phase, compute_phase(*date));
        }
    }

    #[test]
    fn phase_range_stops_at_end_of_calendar() {
        let range = phase_range(NaiveDate::MAX, 5);
        assert_eq!(range.len(), 1);
        assert_eq!(range[0].0, NaiveDate::MAX);
    }

    #[test]
    fn next_phase_finds_upcoming_dates() {
        let from = ymd(2024, 2, 15);
        assert_eq!(next_phase(from, MoonPhase::WaxingCrescent), Some((from, 0)));

        let (full, days) = next_phase(from, MoonPhase::Full).unwrap();
        assert_eq!(compute_phase(full), MoonPhase::Full);
        assert_eq!(compute_phase(full.pred_opt().unwrap()), MoonPhase::WaxingGibbous);
        assert_eq!(days, (full - from).num_days());

        let (new, _) = next_phase(from, MoonPhase::New).unwrap();
        assert!(new > full);
        assert_eq!(compute_phase(new), MoonPhase::New);
    }

    #[test]
    fn next_phase_always_finds_every_phase() {
        let mut from = ymd(1999, 12, 1);
        for _ in 0..60 {
            for phase in MoonPhase::ALL {
                let (_, days) = next_phase(from, phase).unwrap();
                assert!(days < i64::from(PHASE_SEARCH_DAYS));
            }
            from = from + Days::new(7);
        }
    }
}
