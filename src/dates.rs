use std::ops::Index;

use chrono::{Locale, NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DateStyle {
    /// Year, month and day, e.g. `March 5, 2024`
    Long,
    /// Weekday, year, month and day, e.g. `Tuesday, March 5, 2024`
    LongWithWeekday,
}

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the calendar date of an ISO-8601 timestamp.
///
/// Accepts a bare date (`2024-03-05`) or a date with time, fractional seconds
/// and offset (`2024-03-05T09:00:00.000Z`, `2024-03-05 09:00:00+09:00`).
/// The date is taken as written, the offset is not applied.
pub fn parse_post_date(buf: &str) -> Result<NaiveDate, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{2})(?::(\d{2})(?:\.\d{1,9})?)?)?(?:Z|[+-]\d{2}:?\d{2})?$"
        ).unwrap();
    }

    let buf = buf.trim();
    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("{} is not a valid calendar date", buf))?;

    if let Some(h) = caps.get(4) {
        let h = to_u32(h.as_str())?;
        let mn = to_u32(caps.index(5))?;
        let s = match caps.get(6) {
            Some(s) => to_u32(s.as_str())?,
            None => 0,
        };
        if NaiveTime::from_hms_opt(h, mn, s).is_none() {
            return Err(format!("{} has an invalid time of day", buf));
        }
    }

    Ok(date)
}

/// Maps a BCP 47 tag (`ko-KR`, `en`) to a chrono locale, falling back to `en_US`.
pub fn resolve_locale(tag: &str) -> Locale {
    let name = tag.trim().replace('-', "_");
    if let Ok(locale) = Locale::try_from(name.as_str()) {
        return locale;
    }

    let language = name.split('_').next().unwrap_or_default().to_lowercase();
    match language.as_str() {
        "ko" => Locale::ko_KR,
        "ja" => Locale::ja_JP,
        "de" => Locale::de_DE,
        "fr" => Locale::fr_FR,
        "es" => Locale::es_ES,
        "pt" => Locale::pt_PT,
        "it" => Locale::it_IT,
        _ => Locale::en_US,
    }
}

// Field order per language. Month and weekday names come from the locale.
fn long_pattern(locale: &str, style: DateStyle) -> &'static str {
    let language = locale.split(['-', '_']).next().unwrap_or_default().to_lowercase();
    match (language.as_str(), style) {
        ("ko", DateStyle::Long) => "%Y년 %B %-d일",
        ("ko", DateStyle::LongWithWeekday) => "%Y년 %B %-d일 %A",
        ("ja", DateStyle::Long) => "%Y年%B%-d日",
        ("ja", DateStyle::LongWithWeekday) => "%Y年%B%-d日 %A",
        ("en", DateStyle::Long) => "%B %-d, %Y",
        ("en", DateStyle::LongWithWeekday) => "%A, %B %-d, %Y",
        ("de", DateStyle::Long) => "%-d. %B %Y",
        ("de", DateStyle::LongWithWeekday) => "%A, %-d. %B %Y",
        (_, DateStyle::Long) => "%-d %B %Y",
        (_, DateStyle::LongWithWeekday) => "%A %-d %B %Y",
    }
}

pub fn format_long_date(date: &NaiveDate, locale: &str, style: DateStyle) -> String {
    let pattern = long_pattern(locale, style);
    date.format_localized(pattern, resolve_locale(locale)).to_string()
}
