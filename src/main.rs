mod app;
mod calendar;
mod help;
mod picker;
mod store;
mod theme;
use crate::app::App;
use crate::calendar::{
    classify_due_date, format_date, iso_week_number, parse_date, InvalidDateError, Lang,
};
use crate::picker::{CalendarStore, DatePicker};
use crate::store::Change;
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use log::{debug, warn};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use time::{Date, OffsetDateTime};

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        lang: Lang,
        short: bool,
        localized: bool,
        log_file: Option<PathBuf>,
    },
    Week {
        date: Date,
    },
    Due {
        date: String,
    },
    Format {
        date: String,
        short: bool,
        lang: Lang,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut lang = None;
        let mut short = false;
        let mut localized = false;
        let mut log_file = None;
        let mut subcommand: Option<String> = None;
        let mut date = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("lang") => {
                    lang = Some(parser.value()?.parse::<Lang>()?);
                }
                Arg::Short('s') | Arg::Long("short") => short = true,
                Arg::Long("localized") => localized = true,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) => {
                    let value = value.string()?;
                    if subcommand.is_none() && ["week", "due", "format"].contains(&value.as_str())
                    {
                        subcommand = Some(value);
                    } else if subcommand.is_some() && date.is_none() {
                        date = Some(value);
                    } else {
                        return Err(lexopt::Error::UnexpectedArgument(value.into()));
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        let Some(subcommand) = subcommand else {
            return Ok(Command::Run {
                lang: lang.unwrap_or_default(),
                short,
                localized,
                log_file,
            });
        };
        let Some(date) = date else {
            return Err(lexopt::Error::MissingValue {
                option: Some(String::from("DATE")),
            });
        };
        match subcommand.as_str() {
            "week" => match parse_date(&date) {
                Some(d) => Ok(Command::Week { date: d }),
                None => Err(lexopt::Error::ParsingFailed {
                    value: date,
                    error: Box::new(InvalidDateError),
                }),
            },
            "due" => Ok(Command::Due { date }),
            _ => Ok(Command::Format {
                date,
                short,
                lang: lang.unwrap_or(Lang::En),
            }),
        }
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                lang,
                short,
                localized,
                log_file,
            } => {
                let _logger = log_file.as_deref().map(init_logging).transpose()?;
                let today = local_today()?;
                let (tx, rx) = mpsc::channel();
                let mut store = CalendarStore::new();
                store.subscribe(|change| match change {
                    Change::Set(state) => debug!(
                        "Calendar state: {:?}, selected {:?} ({:?})",
                        state.title, state.selected_date, state.due_date_type
                    ),
                    Change::Removed => debug!("Calendar state removed"),
                });
                let mut picker = DatePicker::new(today, lang, forward_to(tx))
                    .short(short)
                    .localized(localized);
                picker
                    .set_open(true, &mut store)
                    .context("failed to open calendar")?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker, store).run(&mut terminal)?;
                    Ok(())
                })?;
                if let Some(date) = rx.try_iter().last() {
                    println!("{date}");
                }
                Ok(())
            }
            Command::Week { date } => {
                println!("{}", iso_week_number(date));
                Ok(())
            }
            Command::Due { date } => {
                println!("{}", classify_due_date(&date, local_today()?));
                Ok(())
            }
            Command::Format { date, short, lang } => {
                let formatted = format_date(date.as_str(), short, lang, utc_today())
                    .with_context(|| format!("invalid date: {date:?}"))?;
                println!("{formatted}");
                Ok(())
            }
            Command::Help => {
                println!("Usage: duepick [-l de|en] [-s] [--localized] [--log-file PATH]");
                println!("       duepick week DATE");
                println!("       duepick due DATE");
                println!("       duepick format [-l de|en] [-s] DATE");
                println!();
                println!("Terminal month-grid date picker with ISO week numbers and due-date buckets");
                println!();
                println!("Options:");
                println!("  -l, --lang LANG   Language for names and date formats (de or en)");
                println!("  -s, --short       Leave the year off dates in the current year");
                println!("  --localized       Show the selected date in the chosen language and");
                println!("                    keep the viewed month in the title");
                println!("  --log-file PATH   Write log messages to PATH");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn local_today() -> anyhow::Result<Date> {
    Ok(OffsetDateTime::now_local()
        .context("failed to determine local date")?
        .date())
}

// The formatter takes the date of a timestamp in UTC, so "the current year"
// for `--short` is judged in UTC as well.
fn utc_today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Sends each selected date down `tx`.  A hung-up receiver only costs the
/// date, which is logged.
fn forward_to(tx: mpsc::Sender<String>) -> impl FnMut(&str) {
    move |date: &str| {
        if let Err(e) = tx.send(date.to_owned()) {
            warn!("Could not pass on selected date {date}: {e}");
        }
    }
}

// Logging only ever goes to a file, as the terminal is taken up by the
// picker.  The level can be overridden with `RUST_LOG`.
fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .append()
        .start()
        .context("failed to start logger")?;
    Ok(handle)
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
