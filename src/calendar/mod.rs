mod grid;
mod locale;
mod util;
mod widget;
pub(crate) use self::grid::{MonthGrid, OutOfTimeError, GRID_CELLS};
pub(crate) use self::locale::Lang;
pub(crate) use self::util::{
    classify_due_date, format_date, format_ymd, iso_week_number, parse_date, DueDateType,
    InvalidDateError,
};
pub(crate) use self::widget::{ClosedHint, MonthView};
