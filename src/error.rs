// Calendar error handling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid month: {month} (must be 1..=12)")]
    InvalidMonth { month: u32 },

    #[error("Year {year} is outside the supported calendar range")]
    YearOutOfRange { year: i32 },

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CalendarError {
    /// True for errors caused by a bad caller-supplied value rather than
    /// a bad configuration source.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CalendarError::InvalidMonth { .. }
                | CalendarError::YearOutOfRange { .. }
                | CalendarError::UnknownLocale(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_month_message() {
        let e = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(e.to_string(), "Invalid month: 13 (must be 1..=12)");
        assert!(e.is_invalid_argument());
    }

    #[test]
    fn year_out_of_range_message() {
        let e = CalendarError::YearOutOfRange { year: 400_000 };
        assert_eq!(
            e.to_string(),
            "Year 400000 is outside the supported calendar range"
        );
        assert!(e.is_invalid_argument());
    }

    #[test]
    fn config_errors_are_not_argument_errors() {
        let e = CalendarError::InvalidConfig("year_span must be positive".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid configuration: year_span must be positive"
        );
        assert!(!e.is_invalid_argument());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
