mod app;
mod availability;
mod calendar;
mod controller;
mod form;
mod help;
mod locale;
mod logging;
mod notice;
mod popup;
mod theme;
use crate::app::App;
use crate::controller::LogSink;
use crate::locale::Lang;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};
use tracing::info;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        today: Option<Date>,
        closed: Weekday,
        lang: Lang,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut today = None;
        let mut closed = Weekday::Sunday;
        let mut lang = Lang::default();
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("closed") => {
                    let value = parser.value()?.string()?;
                    match parse_weekday(&value) {
                        Ok(wd) => closed = wd,
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Short('l') | Arg::Long("lang") => lang = parser.value()?.parse()?,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if today.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => today = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            today,
            closed,
            lang,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                today,
                closed,
                lang,
                log_file,
            } => {
                if let Some(path) = log_file {
                    logging::init(&path)?;
                }
                let today = match today {
                    Some(d) => d,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                info!(%today, %closed, %lang, "starting reservation calendar");
                let app = App::new(today, closed, lang, LogSink);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: rescal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick an available day of the month and submit a reservation for it.");
                println!("The optional date is used in place of today's date.");
                println!();
                println!("Options:");
                println!("  -c, --closed <WEEKDAY>  Weekday on which no reservations are taken");
                println!("                          [default: sunday]");
                println!("  -l, --lang <en|ja>      Language of the interface [default: en]");
                println!("      --log-file <PATH>   Append log messages to the given file");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
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

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    let s = s.to_ascii_lowercase();
    let wd = match s.as_str() {
        "sun" | "sunday" => Weekday::Sunday,
        "mon" | "monday" => Weekday::Monday,
        "tue" | "tuesday" => Weekday::Tuesday,
        "wed" | "wednesday" => Weekday::Wednesday,
        "thu" | "thursday" => Weekday::Thursday,
        "fri" | "friday" => Weekday::Friday,
        "sat" | "saturday" => Weekday::Saturday,
        _ => return Err(ParseWeekdayError),
    };
    Ok(wd)
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("expected a day of the week, such as \"sunday\" or \"sun\"")]
struct ParseWeekdayError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            parse(&[]).ok(),
            Some(Command::Run {
                today: None,
                closed: Weekday::Sunday,
                lang: Lang::En,
                log_file: None,
            })
        );
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&[
                "--closed",
                "Sat",
                "--lang=ja",
                "--log-file",
                "rescal.log",
                "2025-04-10"
            ])
            .ok(),
            Some(Command::Run {
                today: Some(date!(2025 - 04 - 10)),
                closed: Weekday::Saturday,
                lang: Lang::Ja,
                log_file: Some(PathBuf::from("rescal.log")),
            })
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["2025-04-10", "--help"]).ok(), Some(Command::Help));
    }

    #[test]
    fn test_bad_values() {
        assert!(parse(&["--closed", "someday"]).is_err());
        assert!(parse(&["--lang", "fr"]).is_err());
        assert!(parse(&["2025-13-01"]).is_err());
        assert!(parse(&["2025-04-10", "2025-04-11"]).is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("WEDNESDAY"), Ok(Weekday::Wednesday));
        assert_eq!(parse_weekday("thu"), Ok(Weekday::Thursday));
        assert_eq!(parse_weekday("th"), Err(ParseWeekdayError));
    }
}
