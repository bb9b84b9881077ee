use super::util::iso_week_number;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Duration, Month};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const WEEKS_IN_GRID: usize = 6;

pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * WEEKS_IN_GRID;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) date: Date,
    pub(crate) is_current_month: bool,
    pub(crate) is_today: bool,
    pub(crate) week_number: u8,
}

impl CalendarDay {
    fn new(date: Date, month: Month, today: Date) -> CalendarDay {
        CalendarDay {
            date,
            is_current_month: date.month() == month,
            is_today: date == today,
            week_number: iso_week_number(date),
        }
    }

    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }

    /// The four-column label drawn for the day in the grid
    pub(crate) fn show(&self) -> String {
        if self.is_today {
            format!("[{:2}]", self.day())
        } else {
            format!(" {:2} ", self.day())
        }
    }
}

/// One row of the grid: seven days, Monday through Sunday
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekRow<'a> {
    pub(crate) week_number: u8,
    pub(crate) days: &'a [CalendarDay],
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    year: i32,
    month: Month,
    // Invariant: Exactly GRID_CELLS consecutive days, the first of which is a
    // Monday on or before the first of the month
    days: Vec<CalendarDay>,
}

impl MonthGrid {
    /// Lays out the six weeks starting with the week that contains the first
    /// of `month`.  Fails if any of those days cannot be represented.
    pub(crate) fn generate(year: i32, month: Month, today: Date) -> Result<MonthGrid, OutOfTimeError> {
        let first = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
        let lead = i64::from(first.weekday().number_days_from_monday());
        let start = first
            .checked_sub(Duration::days(lead))
            .ok_or(OutOfTimeError)?;
        let days = successors(Some(start), |d| d.next_day())
            .take(GRID_CELLS)
            .map(|date| CalendarDay::new(date, month, today))
            .collect::<Vec<_>>();
        if days.len() < GRID_CELLS {
            return Err(OutOfTimeError);
        }
        Ok(MonthGrid { year, month, days })
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn get(&self, index: usize) -> Option<&CalendarDay> {
        self.days.get(index)
    }

    pub(crate) fn position_of(&self, date: Date) -> Option<usize> {
        self.days.iter().position(|d| d.date == date)
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = WeekRow<'_>> + '_ {
        self.days.chunks_exact(DAYS_IN_WEEK).map(|days| WeekRow {
            week_number: days[0].week_number,
            days,
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
