use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Display language for phase, month and weekday names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    English,
    Portuguese,
}

const ENGLISH_PHASES: [&str; 8] = [
    "New Moon", "Waxing Crescent", "First Quarter", "Waxing Gibbous",
    "Full Moon", "Waning Gibbous", "Last Quarter", "Waning Crescent",
];

const PORTUGUESE_PHASES: [&str; 8] = [
    "Lua Nova", "Crescente Iluminante", "Quarto Crescente", "Gibosa Crescente",
    "Lua Cheia", "Gibosa Minguante", "Quarto Minguante", "Minguante Iluminante",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const PORTUGUESE_MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

// Monday first
const ENGLISH_WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const PORTUGUESE_WEEKDAYS: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"];

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Portuguese];

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Portuguese => "pt",
        }
    }

    pub(crate) fn phase_names(self) -> &'static [&'static str; 8] {
        match self {
            Locale::English => &ENGLISH_PHASES,
            Locale::Portuguese => &PORTUGUESE_PHASES,
        }
    }

    /// Name of a 1-based month; `None` outside 1..=12.
    pub fn month_name(self, month: u32) -> Option<&'static str> {
        let names = match self {
            Locale::English => &ENGLISH_MONTHS,
            Locale::Portuguese => &PORTUGUESE_MONTHS,
        };
        names.get((month as usize).checked_sub(1)?).copied()
    }

    pub fn weekday_headers(self) -> &'static [&'static str; 7] {
        match self {
            Locale::English => &ENGLISH_WEEKDAYS,
            Locale::Portuguese => &PORTUGUESE_WEEKDAYS,
        }
    }

    /// Heading for a month view, e.g. "February 2024" or "Fevereiro de 2024".
    pub fn month_heading(self, year: i32, month: u32) -> Option<String> {
        let name = self.month_name(month)?;
        Some(match self {
            Locale::English => format!("{} {}", name, year),
            Locale::Portuguese => format!("{} de {}", name, year),
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "English"),
            Locale::Portuguese => write!(f, "Português"),
        }
    }
}

impl FromStr for Locale {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        // Region suffixes ("pt-BR", "en_US") select the base language.
        let base = code.split(['-', '_']).next().unwrap_or_default();
        match base {
            "en" | "english" => Ok(Locale::English),
            "pt" | "portuguese" | "português" => Ok(Locale::Portuguese),
            _ => Err(CalendarError::UnknownLocale(s.to_string())),
        }
    }
}
