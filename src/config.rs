// Configuration for the lunar calendar viewer
use std::env;
use std::num::NonZeroUsize;

use crate::error::CalendarError;
use crate::locale::Locale;

pub const LOCALE_VAR: &str = "LUNAR_CALENDAR_LOCALE";
pub const YEAR_SPAN_VAR: &str = "LUNAR_CALENDAR_YEAR_SPAN";
pub const CACHE_CAPACITY_VAR: &str = "LUNAR_CALENDAR_CACHE_CAPACITY";

const DEFAULT_YEAR_SPAN: i32 = 50;
const MAX_YEAR_SPAN: i32 = 10_000;
const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(24) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    locale: Locale,
    year_span: i32,
    cache_capacity: NonZeroUsize,
    show_adjacent_days: bool,
}

impl Config {
    /// Defaults: English, current year ± 50, 24 cached grids, adjacent days shown.
    pub fn new() -> Self {
        Self {
            locale: Locale::default(),
            year_span: DEFAULT_YEAR_SPAN,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            show_adjacent_days: true,
        }
    }

    /// Defaults overlaid with the `LUNAR_CALENDAR_*` environment variables.
    pub fn from_env() -> Result<Self, CalendarError> {
        Self::new().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup; unset keys keep their current value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, CalendarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(LOCALE_VAR) {
            self.locale = value.parse()?;
        }
        if let Some(value) = lookup(YEAR_SPAN_VAR) {
            self.year_span = value.trim().parse().map_err(|_| {
                CalendarError::InvalidConfig(format!("{YEAR_SPAN_VAR} is not an integer: {value}"))
            })?;
        }
        if let Some(value) = lookup(CACHE_CAPACITY_VAR) {
            self.cache_capacity = value.trim().parse().map_err(|_| {
                CalendarError::InvalidConfig(format!(
                    "{CACHE_CAPACITY_VAR} must be a positive integer: {value}"
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_year_span(mut self, span: i32) -> Self {
        self.year_span = span;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_show_adjacent_days(mut self, show: bool) -> Self {
        self.show_adjacent_days = show;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn year_span(&self) -> i32 {
        self.year_span
    }

    pub fn cache_capacity(&self) -> NonZeroUsize {
        self.cache_capacity
    }

    pub fn show_adjacent_days(&self) -> bool {
        self.show_adjacent_days
    }

    /// Years offered around `current_year`, clamped to the `i32` range.
    pub fn year_choices(&self, current_year: i32) -> std::ops::RangeInclusive<i32> {
        current_year.saturating_sub(self.year_span)..=current_year.saturating_add(self.year_span)
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        if !(0..=MAX_YEAR_SPAN).contains(&self.year_span) {
            return Err(CalendarError::InvalidConfig(format!(
                "year_span must be in 0..={MAX_YEAR_SPAN}, got {}",
                self.year_span
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
