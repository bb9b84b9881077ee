use crate::calendar::DueDateType;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEK_NUMBER_STYLE: Style = BASE_STYLE.fg(Color::Cyan);

pub(crate) const DAY_STYLE: Style = BASE_STYLE;

pub(crate) const OTHER_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const fn due_style(due: DueDateType) -> Style {
    match due {
        DueDateType::DueToday => BASE_STYLE.fg(Color::LightYellow).add_modifier(Modifier::BOLD),
        DueDateType::Upcoming => BASE_STYLE.fg(Color::LightGreen),
        DueDateType::Future => BASE_STYLE.fg(Color::Green),
        DueDateType::Overdue => BASE_STYLE.fg(Color::LightRed),
        DueDateType::LongOverdue => BASE_STYLE.fg(Color::Red),
        DueDateType::CriticallyOverdue => BASE_STYLE.fg(Color::Red).add_modifier(Modifier::BOLD),
        DueDateType::Unknown => BASE_STYLE.fg(Color::DarkGray),
    }
}
