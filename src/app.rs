use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use eframe::App;
use egui::{Color32, Context, RichText, Stroke, Ui};
use tracing::{info, warn};

use crate::astronomical::{compute_phase, moon_age, next_phase, MoonPhase};
use crate::cache::GridCache;
use crate::config::Config;
use crate::date_utils::{check_month, date_to_jdn, shift_month};
use crate::error::CalendarError;
use crate::locale::Locale;
use crate::metrics::Metrics;
use crate::month_grid::{CalendarCell, MonthGrid};

const HEADER_COLOR: Color32 = Color32::from_rgb(0xFF, 0xC1, 0x07);
const CELL_BORDER: Color32 = Color32::from_rgb(0x4A, 0x4A, 0x4A);
const CELL_FILL: Color32 = Color32::from_rgba_premultiplied(14, 14, 14, 77);
const TODAY_FILL: Color32 = Color32::from_rgba_premultiplied(26, 19, 1, 26);
const CELL_SIZE: f32 = 96.0;

/// Moon facts for a single day, shown under the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub age_days: f64,
    pub phase: MoonPhase,
    pub julian_day: i64,
    pub next_full: Option<(NaiveDate, i64)>,
    pub next_new: Option<(NaiveDate, i64)>,
}

impl DaySummary {
    pub fn for_date(date: NaiveDate) -> Self {
        let age_days = moon_age(date);
        Self {
            date,
            age_days,
            phase: compute_phase(date),
            julian_day: date_to_jdn(date),
            next_full: next_phase(date, MoonPhase::Full),
            next_new: next_phase(date, MoonPhase::New),
        }
    }
}

fn period_label(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "🗓 Select a period",
        Locale::Portuguese => "🗓 Selecione o Período",
    }
}

fn year_label(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Year",
        Locale::Portuguese => "Ano",
    }
}

fn month_label(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Month",
        Locale::Portuguese => "Mês",
    }
}

fn today_label(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Today",
        Locale::Portuguese => "Hoje",
    }
}

fn footer_caption(locale: Locale) -> &'static str {
    match locale {
        Locale::English => {
            "Moon phases are approximate, computed from the mean synodic cycle. \
             The reference for the calculation is the New Moon of 6 January 2000, 18:14 UTC."
        }
        Locale::Portuguese => {
            "As fases da lua são calculadas com base no ciclo sinódico médio. \
             A data de referência para o cálculo é 6 de Janeiro de 2000, 18:14 UTC."
        }
    }
}

// ---------- LUNAR CALENDAR STRUCT & METHODS ----------

pub struct LunarCalendarApp {
    config: Config,
    locale: Locale,
    cache: GridCache,
    today: NaiveDate,
    year: i32,
    month: u32,
    last_error: Option<String>,
}

impl LunarCalendarApp {
    pub fn new(config: Config, today: NaiveDate) -> Self {
        let metrics = Arc::new(Metrics::new());
        let cache = GridCache::new(config.cache_capacity(), metrics);
        info!(
            target: "viewer",
            "Opening calendar at {}-{:02} ({})",
            today.year(),
            today.month(),
            config.locale()
        );
        Self {
            locale: config.locale(),
            config,
            cache,
            today,
            year: today.year(),
            month: today.month(),
            last_error: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Update the caller-supplied current date, e.g. after midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            info!(target: "viewer", "Date changed from {} to {}", self.today, today);
            self.today = today;
        }
    }

    pub fn select(&mut self, year: i32, month: u32) -> Result<(), CalendarError> {
        let result = check_month(month).map(|()| {
            self.year = year;
            self.month = month;
        });
        self.note_result(result)
    }

    /// Move the view by `delta` months.
    pub fn shift(&mut self, delta: i32) -> Result<(), CalendarError> {
        let result = shift_month(self.year, self.month, delta).map(|(year, month)| {
            self.year = year;
            self.month = month;
        });
        self.note_result(result)
    }

    pub fn go_to_today(&mut self) {
        self.year = self.today.year();
        self.month = self.today.month();
        self.last_error = None;
    }

    pub fn current_grid(&self) -> Result<Arc<MonthGrid>, CalendarError> {
        self.cache.grid(self.year, self.month, self.today)
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        self.cache.metrics()
    }

    fn note_result(&mut self, result: Result<(), CalendarError>) -> Result<(), CalendarError> {
        match &result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!(target: "viewer", "Rejected navigation: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
        result
    }

    fn render_sidebar(&mut self, ctx: &Context) {
        egui::SidePanel::left("period_panel").show(ctx, |ui| {
            ui.heading(period_label(self.locale));
            ui.add_space(8.0);

            let mut year = self.year;
            ui.label(year_label(self.locale));
            egui::ComboBox::from_id_source("year_select")
                .selected_text(year.to_string())
                .show_ui(ui, |ui| {
                    for choice in self.config.year_choices(self.today.year()) {
                        ui.selectable_value(&mut year, choice, choice.to_string());
                    }
                });

            let mut month = self.month;
            ui.label(month_label(self.locale));
            egui::ComboBox::from_id_source("month_select")
                .selected_text(self.locale.month_name(month).unwrap_or_default())
                .show_ui(ui, |ui| {
                    for choice in 1..=12 {
                        let name = self.locale.month_name(choice).unwrap_or_default();
                        ui.selectable_value(&mut month, choice, name);
                    }
                });

            if (year, month) != (self.year, self.month) {
                let _ = self.select(year, month);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    let _ = self.shift(-1);
                }
                if ui.button(today_label(self.locale)).clicked() {
                    self.go_to_today();
                }
                if ui.button("▶").clicked() {
                    let _ = self.shift(1);
                }
            });

            ui.add_space(8.0);
            let mut locale = self.locale;
            egui::ComboBox::from_id_source("locale_select")
                .selected_text(locale.to_string())
                .show_ui(ui, |ui| {
                    for choice in Locale::ALL {
                        ui.selectable_value(&mut locale, choice, choice.to_string());
                    }
                });
            self.set_locale(locale);

            if let Some(error) = &self.last_error {
                ui.colored_label(Color32::RED, error.as_str());
            }
        });
    }

    fn render_calendar(&self, ui: &mut Ui) {
        let heading = self
            .locale
            .month_heading(self.year, self.month)
            .unwrap_or_default();
        ui.heading(heading);

        let grid = match self.current_grid() {
            Ok(grid) => grid,
            Err(e) => {
                ui.colored_label(Color32::RED, e.to_string());
                return;
            }
        };

        egui::Grid::new("month_grid")
            .num_columns(7)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for name in self.locale.weekday_headers() {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(*name).strong().color(HEADER_COLOR));
                    });
                }
                ui.end_row();

                for week in grid.weeks() {
                    for cell in week {
                        self.render_cell(ui, cell);
                    }
                    ui.end_row();
                }
            });
    }

    fn render_cell(&self, ui: &mut Ui, cell: &CalendarCell) {
        let (stroke, fill) = if cell.is_today {
            (Stroke::new(2.0, Color32::RED), TODAY_FILL)
        } else {
            (Stroke::new(1.0, CELL_BORDER), CELL_FILL)
        };

        egui::Frame::none()
            .fill(fill)
            .stroke(stroke)
            .rounding(8.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_min_size(egui::vec2(CELL_SIZE, CELL_SIZE));
                ui.vertical_centered(|ui| {
                    let day = cell.date.day().to_string();
                    match cell.display_phase() {
                        Some(phase) => {
                            let mut number = RichText::new(day).size(16.0);
                            if cell.is_today {
                                number = number.strong();
                            }
                            ui.label(number);
                            let name = phase.name(self.locale);
                            ui.label(RichText::new(phase.symbol()).size(30.0))
                                .on_hover_text(name);
                            ui.label(RichText::new(name).small());
                        }
                        None if self.config.show_adjacent_days() => {
                            ui.label(RichText::new(day).size(16.0).color(Color32::GRAY));
                        }
                        None => {}
                    }
                });
            });
    }

    fn render_today(&self, ui: &mut Ui) {
        let summary = DaySummary::for_date(self.today);
        ui.label(format!(
            "{} {}: {} {} ({:.1} d), JDN {}",
            today_label(self.locale),
            summary.date,
            summary.phase.symbol(),
            summary.phase.name(self.locale),
            summary.age_days,
            summary.julian_day
        ));
        for (phase, next) in [(MoonPhase::Full, summary.next_full), (MoonPhase::New, summary.next_new)] {
            if let Some((date, days)) = next {
                ui.label(format!(
                    "{} {}: {} (+{} d)",
                    phase.symbol(),
                    phase.name(self.locale),
                    date,
                    days
                ));
            }
        }
    }

    fn render(&mut self, ctx: &Context) {
        self.render_sidebar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_calendar(ui);
                ui.separator();
                self.render_today(ui);
                ui.separator();
                ui.small(footer_caption(self.locale));

                if cfg!(debug_assertions) {
                    ui.collapsing("📊 Performance Metrics", |ui| {
                        ui.monospace(self.metrics().report());
                    });
                }
            });
        });
    }
}

// ---------- IMPLEMENT APP FOR LUNAR CALENDAR ----------

impl App for LunarCalendarApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.set_today(Local::now().date_naive());
        self.render(ctx);
    }
}
