use crate::calendar::{
    format_date, format_ymd, DueDateType, Lang, MonthGrid, MonthView, OutOfTimeError,
    GRID_CELLS,
};
use crate::store::Store;
use log::{debug, warn};
use std::fmt;
use time::{
    Date,
    Month::{self, December, January},
};

/// Request to move the view by one month.  It is written into the shared
/// state and consumed by [`DatePicker::sync`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Navigation {
    Prev,
    Next,
}

/// The month after or before `month`, rolling the year over at the ends
pub(crate) fn shift_month(year: i32, month: Month, nav: Navigation) -> (i32, Month) {
    match nav {
        Navigation::Prev if month == January => (year - 1, December),
        Navigation::Prev => (year, month.previous()),
        Navigation::Next if month == December => (year + 1, January),
        Navigation::Next => (year, month.next()),
    }
}

/// State shared between the picker and its host for as long as the picker is
/// open
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarState {
    pub(crate) open: bool,
    pub(crate) entry_month: Month,
    pub(crate) entry_year: i32,
    pub(crate) lang: Lang,
    pub(crate) title: String,
    pub(crate) selected_date: Option<String>,
    pub(crate) due_date_type: Option<DueDateType>,
    pub(crate) navigation: Option<Navigation>,
}

impl CalendarState {
    pub(crate) fn new(today: Date, lang: Lang) -> CalendarState {
        CalendarState {
            open: true,
            entry_month: today.month(),
            entry_year: today.year(),
            lang,
            title: lang.title(today.year(), today.month()),
            selected_date: None,
            due_date_type: None,
            navigation: None,
        }
    }
}

pub(crate) type CalendarStore = Store<CalendarState>;

/// A month-grid date picker.
///
/// The picker only keeps what is needed to draw the current month (the grid,
/// the keyboard cursor, and which cell was clicked); everything else lives
/// in the [`CalendarStore`] passed to each operation.  `clicked` is called
/// with the `YYYY-MM-DD` form of every day the user selects.
///
/// By default a selected date is recorded in the English long form and the
/// title snaps back to the current month.  [`DatePicker::localized`] keeps
/// the viewed month in the title and formats the selection in the state's
/// language instead.
pub(crate) struct DatePicker<F> {
    today: Date,
    lang: Lang,
    short: bool,
    localized: bool,
    grid: Option<MonthGrid>,
    cursor: usize,
    selected: Option<usize>,
    clicked: F,
}

impl<F: FnMut(&str)> DatePicker<F> {
    pub(crate) fn new(today: Date, lang: Lang, clicked: F) -> Self {
        DatePicker {
            today,
            lang,
            short: false,
            localized: false,
            grid: None,
            cursor: 0,
            selected: None,
            clicked,
        }
    }

    /// Show selected dates without the year when they fall in the current
    /// year
    pub(crate) fn short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }

    pub(crate) fn localized(mut self, localized: bool) -> Self {
        self.localized = localized;
        self
    }

    pub(crate) fn lang(&self) -> Lang {
        self.lang
    }

    pub(crate) fn is_open(&self) -> bool {
        self.grid.is_some()
    }

    /// Opening (re)initializes the shared state to the current month;
    /// closing removes it.
    pub(crate) fn set_open(
        &mut self,
        open: bool,
        store: &mut CalendarStore,
    ) -> Result<(), OutOfTimeError> {
        if open {
            let grid = MonthGrid::generate(self.today.year(), self.today.month(), self.today)?;
            store.set(CalendarState::new(self.today, self.lang));
            debug!("Opened calendar at {}", self.lang.title(grid.year(), grid.month()));
            self.show_grid(grid);
        } else {
            store.remove();
            self.grid = None;
            self.selected = None;
            self.cursor = 0;
            debug!("Closed calendar");
        }
        Ok(())
    }

    /// Asks for the previous or next month and applies the request at once
    pub(crate) fn navigate(
        &mut self,
        nav: Navigation,
        store: &mut CalendarStore,
    ) -> Result<(), OutOfTimeError> {
        store.update(|state| state.navigation = Some(nav));
        self.sync(store)
    }

    /// Brings the picker in line with the shared state: consumes any pending
    /// navigation request and regenerates the grid if the month changed.
    /// With no shared state, the picker is closed.
    pub(crate) fn sync(&mut self, store: &mut CalendarStore) -> Result<(), OutOfTimeError> {
        let Some(state) = store.get() else {
            self.grid = None;
            self.selected = None;
            return Ok(());
        };
        let nav = state.navigation;
        let (mut year, mut month) = (state.entry_year, state.entry_month);
        if let Some(nav) = nav {
            (year, month) = shift_month(year, month, nav);
        }
        let current = self
            .grid
            .as_ref()
            .is_some_and(|g| g.year() == year && g.month() == month);
        if !current {
            match MonthGrid::generate(year, month, self.today) {
                Ok(grid) => self.show_grid(grid),
                Err(e) => {
                    if nav.is_some() {
                        store.update(|state| state.navigation = None);
                    }
                    warn!("Cannot show {year}-{}: {e}", u8::from(month));
                    return Err(e);
                }
            }
        }
        if nav.is_some() {
            store.update(|state| {
                state.entry_year = year;
                state.entry_month = month;
                state.title = state.lang.title(year, month);
                state.navigation = None;
            });
            debug!("Moved calendar to {year}-{}", u8::from(month));
        }
        Ok(())
    }

    /// Moves the view back to the month containing today.  Returns `false`
    /// if the picker is closed.
    pub(crate) fn jump_to_today(&mut self, store: &mut CalendarStore) -> bool {
        let today = self.today;
        let updated = store.update(|state| {
            state.entry_year = today.year();
            state.entry_month = today.month();
            state.title = state.lang.title(today.year(), today.month());
            state.navigation = None;
        });
        updated && self.sync(store).is_ok()
    }

    /// Moves the keyboard cursor by `delta` cells.  Returns `false` if that
    /// would leave the grid.
    pub(crate) fn move_cursor(&mut self, delta: isize) -> bool {
        if self.grid.is_none() {
            return false;
        }
        match self
            .cursor
            .checked_add_signed(delta)
            .filter(|&i| i < GRID_CELLS)
        {
            Some(i) => {
                self.cursor = i;
                true
            }
            None => false,
        }
    }

    pub(crate) fn select_cursor(&mut self, store: &mut CalendarStore) -> bool {
        self.click_day(self.cursor, store)
    }

    /// Selects the day in cell `index` of the grid: records its formatted
    /// date and due-date bucket in the shared state and tells the host.
    /// Returns `false` if the picker is closed.
    pub(crate) fn click_day(&mut self, index: usize, store: &mut CalendarStore) -> bool {
        let Some(day) = self.grid.as_ref().and_then(|g| g.get(index)).copied() else {
            return false;
        };
        let (today, short, localized) = (self.today, self.short, self.localized);
        let updated = store.update(|state| {
            if localized {
                state.selected_date = format_date(day.date, short, state.lang, today);
            } else {
                state.selected_date = format_date(day.date, short, Lang::En, today);
                state.title = state.lang.title(today.year(), today.month());
            }
            state.due_date_type = Some(DueDateType::for_date(day.date, today));
        });
        if !updated {
            return false;
        }
        self.selected = Some(index);
        self.cursor = index;
        let ymd = format_ymd(day.date);
        debug!("Selected {ymd}");
        (self.clicked)(&ymd);
        true
    }

    /// Everything needed to draw the picker, or `None` if it is not ready
    pub(crate) fn view<'a>(&'a self, store: &'a CalendarStore) -> Option<MonthView<'a>> {
        let grid = self.grid.as_ref()?;
        let state = store.get().filter(|state| state.open)?;
        Some(MonthView::new(grid, state, self.cursor, self.selected))
    }

    fn show_grid(&mut self, grid: MonthGrid) {
        let first = Date::from_calendar_date(grid.year(), grid.month(), 1).ok();
        self.cursor = grid
            .position_of(self.today)
            .or_else(|| first.and_then(|d| grid.position_of(d)))
            .unwrap_or(0);
        self.selected = None;
        self.grid = Some(grid);
    }
}

impl<F> fmt::Debug for DatePicker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("today", &self.today)
            .field("lang", &self.lang)
            .field("short", &self.short)
            .field("localized", &self.localized)
            .field("grid", &self.grid)
            .field("cursor", &self.cursor)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
