//! Monthly calendar annotated with the moon phase of each day.
//!
//! The phase of a date comes from its position in the mean synodic month,
//! measured from the New Moon of 2000-01-06 18:14 UTC and split into eight
//! equal buckets. Month grids run Monday to Sunday and include the lead and
//! trail days of the neighbouring months.
//!
//! ```
//! use chrono::NaiveDate;
//! use lunar_calendar::{build_month_grid, compute_phase, MoonPhase};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
//! assert_eq!(compute_phase(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), MoonPhase::New);
//!
//! let grid = build_month_grid(2024, 2, today).unwrap();
//! assert_eq!(grid.weeks().len(), 5);
//! assert!(grid.today().is_some());
//! ```

pub mod app;
pub mod astronomical;
pub mod cache;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod locale;
pub mod logging;
pub mod metrics;
pub mod month_grid;

pub use app::{DaySummary, LunarCalendarApp};
pub use astronomical::{
    compute_phase, moon_age, moon_age_at, next_phase, phase_at, phase_index, phase_range,
    MoonPhase, PHASE_BUCKET_DAYS, PHASE_COUNT, REFERENCE_NEW_MOON, SYNODIC_MONTH_DAYS,
};
pub use cache::GridCache;
pub use config::Config;
pub use error::CalendarError;
pub use locale::Locale;
pub use metrics::Metrics;
pub use month_grid::{build_month_grid, CalendarCell, MonthGrid, Week};
