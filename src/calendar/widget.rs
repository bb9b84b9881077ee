use super::grid::{CalendarDay, MonthGrid, DAYS_IN_WEEK};
use super::locale::Lang;
use crate::picker::CalendarState;
use crate::theme::{
    due_style, CURSOR_STYLE, DAY_STYLE, HINT_STYLE, OTHER_MONTH_STYLE, SELECTED_STYLE,
    TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE, WEEK_NUMBER_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};
use std::iter::zip;

/// Width of the week-number column, including its gutter
const WEEK_COL_WIDTH: u16 = 4;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of the whole picker
pub(crate) const MAIN_WIDTH: u16 = WEEK_COL_WIDTH + DAY_WIDTH * 7;

const TITLE_LINE: u16 = 0;

const HEADER_LINE: u16 = 1;

const RULE_LINE: u16 = 2;

const FIRST_WEEK_LINE: u16 = 3;

/// The status line comes after the six weeks and a blank line
const STATUS_LINE: u16 = FIRST_WEEK_LINE + 7;

pub(crate) const TOTAL_HEIGHT: u16 = STATUS_LINE + 1;

const ACS_HLINE: char = '─';

/// A drawable snapshot of an open picker
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    grid: &'a MonthGrid,
    state: &'a CalendarState,
    cursor: usize,
    selected: Option<usize>,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(
        grid: &'a MonthGrid,
        state: &'a CalendarState,
        cursor: usize,
        selected: Option<usize>,
    ) -> Self {
        MonthView {
            grid,
            state,
            cursor,
            selected,
        }
    }

    fn day_style(&self, day: &CalendarDay, index: usize) -> Style {
        let mut style = if day.is_today {
            TODAY_STYLE
        } else if day.is_current_month {
            DAY_STYLE
        } else {
            OTHER_MONTH_STYLE
        };
        if self.selected == Some(index) {
            style = style.patch(SELECTED_STYLE);
        }
        if self.cursor == index {
            style = style.patch(CURSOR_STYLE);
        }
        style
    }

    fn status_line(&self) -> Line<'static> {
        let lang = self.state.lang;
        match (&self.state.selected_date, self.state.due_date_type) {
            (Some(date), Some(due)) => Line::from_iter([
                Span::raw(format!("{}: {date} ", lang.selected_label())),
                Span::styled(format!("({due})"), due_style(due)),
            ]),
            (Some(date), None) => Line::raw(format!("{}: {date}", lang.selected_label())),
            (None, _) => Line::styled(lang.help_hint(), HINT_STYLE),
        }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([TOTAL_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        let lang = self.state.lang;
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.state.title);
        canvas.draw_header(lang);
        for (row, week) in zip(0u16.., self.grid.weeks()) {
            canvas.draw_week_number(row, week.week_number);
            for (col, day) in zip(0u16.., week.days) {
                let index = usize::from(row) * DAYS_IN_WEEK + usize::from(col);
                canvas.draw_day(row, col, day.show(), self.day_style(day, index));
            }
        }
        canvas.draw_status(self.status_line());
    }
}

/// Shown in place of the grid while the picker is closed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ClosedHint(pub(crate) Lang);

impl Widget for ClosedHint {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        Paragraph::new(Line::styled(self.0.closed_hint(), HINT_STYLE))
            .centered()
            .render(area, buf);
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(Text::raw(title).width()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(TITLE_LINE, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self, lang: Lang) {
        self.mvprint(
            HEADER_LINE,
            0,
            format!("{:>3}", lang.week_label()),
            Some(WEEKDAY_STYLE),
        );
        for (col, name) in zip(0u16.., lang.weekday_names()) {
            self.mvprint(
                HEADER_LINE,
                WEEK_COL_WIDTH + DAY_WIDTH * col,
                format!("{name:^4}"),
                Some(WEEKDAY_STYLE),
            );
        }
        self.hline(RULE_LINE, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_week_number(&mut self, row: u16, week_number: u8) {
        self.mvprint(
            FIRST_WEEK_LINE + row,
            0,
            format!("{week_number:>3}"),
            Some(WEEK_NUMBER_STYLE),
        );
    }

    fn draw_day(&mut self, row: u16, col: u16, s: String, style: Style) {
        self.mvprint(
            FIRST_WEEK_LINE + row,
            WEEK_COL_WIDTH + DAY_WIDTH * col,
            s,
            Some(style),
        );
    }

    fn draw_status(&mut self, line: Line<'_>) {
        if STATUS_LINE < self.area.height {
            let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
            Paragraph::new(line).render(
                Rect {
                    x: self.area.x,
                    y: self.area.y + STATUS_LINE,
                    width: self.area.width.min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // picker's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
