use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Month;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Lang {
    #[default]
    De,
    En,
}

/// Everything the picker displays that depends on the language
#[derive(Debug, Eq, PartialEq)]
struct LocaleTable {
    /// Weekday abbreviations, starting with Monday
    weekdays: [&'static str; 7],
    months: [&'static str; 12],
    week_label: &'static str,
    selected_label: &'static str,
    help_hint: &'static str,
    closed_hint: &'static str,
    help_title: &'static str,
    /// Key bindings listed in the help popup, one per line
    help_lines: &'static [&'static str],
}

static DE: LocaleTable = LocaleTable {
    weekdays: ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
    months: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    week_label: "KW",
    selected_label: "Auswahl",
    help_hint: "? für Hilfe",
    closed_hint: "Kalender geschlossen, o zum Öffnen",
    help_title: " Tastenbelegung ",
    help_lines: &[
        "h, LINKS        Vorheriger Tag",
        "l, RECHTS       Nächster Tag",
        "k, HOCH         Vorherige Woche",
        "j, RUNTER       Nächste Woche",
        "p, BILD HOCH    Vorheriger Monat",
        "n, BILD RUNTER  Nächster Monat",
        "0, POS1         Zu heute springen",
        "ENTER, LEER     Tag auswählen",
        "o               Kalender öffnen/schließen",
        "?               Diese Hilfe anzeigen",
        "q, ESC          Beenden",
        "",
        "Beliebige Taste schließt die Hilfe.",
    ],
};

static EN: LocaleTable = LocaleTable {
    weekdays: ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"],
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    week_label: "CW",
    selected_label: "Selected",
    help_hint: "? for help",
    closed_hint: "Calendar closed, press o to open",
    help_title: " Commands ",
    help_lines: &[
        "h, LEFT         Previous day",
        "l, RIGHT        Next day",
        "k, UP           Previous week",
        "j, DOWN         Next week",
        "p, PAGE UP      Previous month",
        "n, PAGE DOWN    Next month",
        "0, HOME         Jump to today",
        "ENTER, SPACE    Select day",
        "o               Open/close calendar",
        "?               Show this help",
        "q, ESC          Quit",
        "",
        "Press the Any Key to dismiss.",
    ],
};

impl Lang {
    fn table(self) -> &'static LocaleTable {
        match self {
            Lang::De => &DE,
            Lang::En => &EN,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Lang::De => "de",
            Lang::En => "en",
        }
    }

    pub(crate) fn weekday_names(self) -> &'static [&'static str; 7] {
        &self.table().weekdays
    }

    pub(crate) fn month_name(self, month: Month) -> &'static str {
        let i = usize::from(u8::from(month)) - 1;
        self.table().months[i]
    }

    /// Header of the week-number column
    pub(crate) fn week_label(self) -> &'static str {
        self.table().week_label
    }

    pub(crate) fn selected_label(self) -> &'static str {
        self.table().selected_label
    }

    pub(crate) fn help_hint(self) -> &'static str {
        self.table().help_hint
    }

    pub(crate) fn closed_hint(self) -> &'static str {
        self.table().closed_hint
    }

    pub(crate) fn help_title(self) -> &'static str {
        self.table().help_title
    }

    pub(crate) fn help_lines(self) -> &'static [&'static str] {
        self.table().help_lines
    }

    /// The heading shown above the month grid, e.g. "März 2024"
    pub(crate) fn title(self, year: i32, month: Month) -> String {
        format!("{} {year}", self.month_name(month))
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = ParseLangError;

    fn from_str(s: &str) -> Result<Lang, ParseLangError> {
        match s {
            "de" => Ok(Lang::De),
            "en" => Ok(Lang::En),
            _ => Err(ParseLangError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown language {0:?}; expected \"de\" or \"en\"")]
pub(crate) struct ParseLangError(String);
