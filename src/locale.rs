use crate::form::{Field, ValidationError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Month, Weekday};

static EN_DATE_FMT: &[FormatItem<'_>] =
    format_description!("[weekday repr:short], [day padding:none] [month repr:short] [year]");

/// Language used for all user-facing captions
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Lang {
    #[default]
    En,
    Ja,
}

impl Lang {
    pub(crate) fn title(self) -> &'static str {
        match self {
            Lang::En => "Choose a reservation date",
            Lang::Ja => "「予約日時」の選択",
        }
    }

    pub(crate) fn previous(self) -> &'static str {
        match self {
            Lang::En => "Previous",
            Lang::Ja => "前へ",
        }
    }

    pub(crate) fn today(self) -> &'static str {
        match self {
            Lang::En => "Today",
            Lang::Ja => "今日",
        }
    }

    pub(crate) fn next(self) -> &'static str {
        match self {
            Lang::En => "Next",
            Lang::Ja => "次へ",
        }
    }

    pub(crate) fn month_view(self) -> &'static str {
        match self {
            Lang::En => "Month",
            Lang::Ja => "月",
        }
    }

    pub(crate) fn week_view(self) -> &'static str {
        match self {
            Lang::En => "Week",
            Lang::Ja => "週",
        }
    }

    pub(crate) fn help(self) -> &'static str {
        match self {
            Lang::En => "Help",
            Lang::Ja => "ヘルプ",
        }
    }

    pub(crate) fn available(self) -> &'static str {
        match self {
            Lang::En => "available",
            Lang::Ja => "予約可",
        }
    }

    pub(crate) fn unavailable(self) -> &'static str {
        match self {
            Lang::En => "unavailable",
            Lang::Ja => "予約不可",
        }
    }

    pub(crate) fn weekday_abbrev(self, wd: Weekday) -> &'static str {
        match (self, wd) {
            (Lang::En, Weekday::Sunday) => "Su",
            (Lang::En, Weekday::Monday) => "Mo",
            (Lang::En, Weekday::Tuesday) => "Tu",
            (Lang::En, Weekday::Wednesday) => "We",
            (Lang::En, Weekday::Thursday) => "Th",
            (Lang::En, Weekday::Friday) => "Fr",
            (Lang::En, Weekday::Saturday) => "Sa",
            (Lang::Ja, Weekday::Sunday) => "日",
            (Lang::Ja, Weekday::Monday) => "月",
            (Lang::Ja, Weekday::Tuesday) => "火",
            (Lang::Ja, Weekday::Wednesday) => "水",
            (Lang::Ja, Weekday::Thursday) => "木",
            (Lang::Ja, Weekday::Friday) => "金",
            (Lang::Ja, Weekday::Saturday) => "土",
        }
    }

    pub(crate) fn month_title(self, year: i32, month: Month) -> String {
        match self {
            Lang::En => format!("{month} {year}"),
            Lang::Ja => format!("{year}年{}月", u8::from(month)),
        }
    }

    pub(crate) fn format_date(self, date: Date) -> String {
        match self {
            Lang::En => date
                .format(&EN_DATE_FMT)
                .unwrap_or_else(|_| date.to_string()),
            Lang::Ja => format!(
                "{}年{:02}月{:02}日 ({})",
                date.year(),
                u8::from(date.month()),
                date.day(),
                self.weekday_abbrev(date.weekday())
            ),
        }
    }

    pub(crate) fn form_title(self) -> &'static str {
        match self {
            Lang::En => "Reservation",
            Lang::Ja => "予約フォーム",
        }
    }

    pub(crate) fn date_label(self) -> &'static str {
        match self {
            Lang::En => "Date",
            Lang::Ja => "予約日",
        }
    }

    pub(crate) fn field_label(self, field: Field) -> &'static str {
        match (self, field) {
            (Lang::En, Field::Name) => "Name",
            (Lang::En, Field::Email) => "Email",
            (Lang::En, Field::Phone) => "Phone",
            (Lang::Ja, Field::Name) => "お名前",
            (Lang::Ja, Field::Email) => "メールアドレス",
            (Lang::Ja, Field::Phone) => "電話番号",
        }
    }

    pub(crate) fn cancel(self) -> &'static str {
        match self {
            Lang::En => "Cancel",
            Lang::Ja => "キャンセル",
        }
    }

    pub(crate) fn submit(self) -> &'static str {
        match self {
            Lang::En => "Reserve",
            Lang::Ja => "予約する",
        }
    }

    pub(crate) fn reserved(self) -> &'static str {
        match self {
            Lang::En => "Reservation complete!",
            Lang::Ja => "予約が完了しました！",
        }
    }

    pub(crate) fn dismiss(self) -> &'static str {
        match self {
            Lang::En => "Press any key to continue.",
            Lang::Ja => "何かキーを押してください。",
        }
    }

    pub(crate) fn error_message(self, err: ValidationError) -> String {
        match (self, err) {
            (Lang::En, ValidationError::Empty(field)) => {
                format!("{} is required", self.field_label(field))
            }
            (Lang::En, ValidationError::InvalidEmail) => {
                String::from("Email must be of the form user@domain")
            }
            (Lang::Ja, ValidationError::Empty(field)) => {
                format!("{}を入力してください", self.field_label(field))
            }
            (Lang::Ja, ValidationError::InvalidEmail) => {
                String::from("メールアドレスの形式が正しくありません")
            }
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::En => write!(f, "en"),
            Lang::Ja => write!(f, "ja"),
        }
    }
}

impl FromStr for Lang {
    type Err = ParseLangError;

    fn from_str(s: &str) -> Result<Lang, ParseLangError> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Lang::En),
            "ja" | "japanese" => Ok(Lang::Ja),
            _ => Err(ParseLangError),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("unknown language; expected \"en\" or \"ja\"")]
pub(crate) struct ParseLangError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_format_date_en() {
        assert_eq!(Lang::En.format_date(date!(2025 - 04 - 15)), "Tue, 15 Apr 2025");
    }

    #[test]
    fn test_format_date_ja() {
        assert_eq!(
            Lang::Ja.format_date(date!(2025 - 04 - 05)),
            "2025年04月05日 (土)"
        );
    }

    #[test]
    fn test_month_title() {
        assert_eq!(Lang::En.month_title(2025, Month::April), "April 2025");
        assert_eq!(Lang::Ja.month_title(2025, Month::April), "2025年4月");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Lang::En.error_message(ValidationError::Empty(Field::Phone)),
            "Phone is required"
        );
        assert_eq!(
            Lang::Ja.error_message(ValidationError::Empty(Field::Name)),
            "お名前を入力してください"
        );
    }

    #[test]
    fn test_parse_lang() {
        assert_eq!("ja".parse::<Lang>(), Ok(Lang::Ja));
        assert_eq!("EN".parse::<Lang>(), Ok(Lang::En));
        assert_eq!("fr".parse::<Lang>(), Err(ParseLangError));
    }
}
