use std::fmt::{self, Write as _};
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::astronomical::{compute_phase, MoonPhase};
use crate::date_utils::{first_of_month, last_of_month, week_end, week_start};
use crate::error::CalendarError;
use crate::locale::Locale;

pub const DAYS_PER_WEEK: usize = 7;

/// One day of a month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    /// False for lead/trail days borrowed from the adjacent months.
    pub in_month: bool,
    pub is_today: bool,
}

impl CalendarCell {
    /// Phase to show for this cell. Lead/trail days carry a phase but do not display it.
    pub fn display_phase(&self) -> Option<MoonPhase> {
        self.in_month.then_some(self.phase)
    }
}

pub type Week = [CalendarCell; DAYS_PER_WEEK];

/// Monday-first weeks covering a whole month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> + '_ {
        self.weeks.iter().flatten()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.weeks.first().map(|week| week[0].date)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.weeks.last().map(|week| week[DAYS_PER_WEEK - 1].date)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.cells().find(|cell| cell.date == date)
    }

    pub fn today(&self) -> Option<&CalendarCell> {
        self.cells().find(|cell| cell.is_today)
    }

    /// Plain-text month view with localised headings.
    pub fn render_text(&self, locale: Locale) -> String {
        let mut out = String::new();
        if let Some(heading) = locale.month_heading(self.year, self.month) {
            out.push_str(&heading);
            out.push('\n');
        }

        let header: Vec<String> = locale
            .weekday_headers()
            .iter()
            .map(|name| format!("{:>5}", name))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        for week in &self.weeks {
            let line: Vec<String> = week
                .iter()
                .map(|cell| match cell.display_phase() {
                    Some(phase) => {
                        let marker = if cell.is_today { '*' } else { ' ' };
                        format!("{}{:>2} {}", marker, cell.date.day(), phase.symbol())
                    }
                    None => format!("{:>3}  ", cell.date.day()),
                })
                .collect();
            // writing into a String cannot fail
            let _ = writeln!(out, "{}", line.join(" ").trim_end());
        }
        out
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(Locale::English))
    }
}

/// Build the month view for `year`/`month`, flagging `today`.
///
/// The grid runs from the Monday on or before the 1st to the Sunday on or
/// after the last day, so every week has seven cells.
pub fn build_month_grid(year: i32, month: u32, today: NaiveDate) -> Result<MonthGrid, CalendarError> {
    let started = Instant::now();

    let out_of_range = CalendarError::YearOutOfRange { year };
    let first = week_start(first_of_month(year, month)?).ok_or_else(|| out_of_range.clone())?;
    let last = week_end(last_of_month(year, month)?).ok_or(out_of_range)?;

    let cells: Vec<CalendarCell> = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| CalendarCell {
            date,
            phase: compute_phase(date),
            in_month: date.year() == year && date.month() == month,
            is_today: date == today,
        })
        .collect();

    let weeks: Vec<Week> = cells
        .chunks_exact(DAYS_PER_WEEK)
        .filter_map(|chunk| <Week>::try_from(chunk).ok())
        .collect();

    debug!(
        target: "grid_builder",
        "Built {}-{:02} grid: {} weeks from {} to {} in {}µs",
        year,
        month,
        weeks.len(),
        first,
        last,
        started.elapsed().as_micros()
    );

    Ok(MonthGrid { year, month, weeks })
}
