/*! Date extraction

Finds a publication date in free header text.

Patterns are tried in a fixed order:
1. French, weekday-prefixed: `lundi 3 janvier 2022`
1. French: `3 janvier 2022`
1. English, weekday-prefixed: `Monday, January 3, 2022`
1. English: `January 3, 2022`

A pattern is only accepted if its month token resolves to a known month
(English names are first translated to French ones). Otherwise the next pattern is tried.
!*/
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref FRENCH_WEEKDAY_DATE: Regex = Regex::new(
        r"(?:lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche) [0-9]+(?:er)? (?:janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre) [0-9]{4}"
    )
    .unwrap();
    static ref FRENCH_DATE: Regex = Regex::new(r"\d{1,2}(?:er)?\s\w+\s\d{4}").unwrap();
    static ref ENGLISH_WEEKDAY_DATE: Regex = Regex::new(r"\w+,\s?\w+\s\d{1,2},\s?\d{4}").unwrap();
    static ref ENGLISH_DATE: Regex = Regex::new(r"\w+\s\d{1,2},\s?\d{4}").unwrap();

    /// time of day following a date, `14:30`, `14h30` or `14:30:05`
    static ref TIME_OF_DAY: Regex =
        Regex::new(r"\b([01]?\d|2[0-3])[:h]([0-5]\d)(?::([0-5]\d))?\b").unwrap();

    /// French month name -> month number
    pub static ref MONTHS: HashMap<&'static str, u32> = [
        ("janvier", 1),
        ("février", 2),
        ("mars", 3),
        ("avril", 4),
        ("mai", 5),
        ("juin", 6),
        ("juillet", 7),
        ("août", 8),
        ("septembre", 9),
        ("octobre", 10),
        ("novembre", 11),
        ("décembre", 12),
    ]
    .into_iter()
    .collect();

    /// English month name -> French month name
    pub static ref MONTH_TRANSLATIONS: HashMap<&'static str, &'static str> = [
        ("January", "janvier"),
        ("February", "février"),
        ("March", "mars"),
        ("April", "avril"),
        ("May", "mai"),
        ("June", "juin"),
        ("July", "juillet"),
        ("August", "août"),
        ("September", "septembre"),
        ("October", "octobre"),
        ("November", "novembre"),
        ("December", "décembre"),
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatePattern {
    FrenchWeekday,
    French,
    EnglishWeekday,
    English,
}

impl DatePattern {
    const ORDER: [DatePattern; 4] = [
        DatePattern::FrenchWeekday,
        DatePattern::French,
        DatePattern::EnglishWeekday,
        DatePattern::English,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            DatePattern::FrenchWeekday => &*FRENCH_WEEKDAY_DATE,
            DatePattern::French => &*FRENCH_DATE,
            DatePattern::EnglishWeekday => &*ENGLISH_WEEKDAY_DATE,
            DatePattern::English => &*ENGLISH_DATE,
        }
    }

    /// split a match into (day, month, year) raw tokens.
    fn tokens<'a>(&self, matched: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        match self {
            DatePattern::FrenchWeekday => {
                let mut parts = matched.split_whitespace().skip(1);
                Some((parts.next()?, parts.next()?, parts.next()?))
            }
            DatePattern::French => {
                let mut parts = matched.split_whitespace();
                Some((parts.next()?, parts.next()?, parts.next()?))
            }
            DatePattern::EnglishWeekday => {
                let mut parts = matched.split(',').skip(1);
                let month_day = parts.next()?;
                let year = parts.next()?;
                let (month, day) = split_month_day(month_day)?;
                Some((day, month, year))
            }
            DatePattern::English => {
                let (month_day, year) = matched.split_once(',')?;
                let (month, day) = split_month_day(month_day)?;
                Some((day, month, year))
            }
        }
    }
}

fn split_month_day(month_day: &str) -> Option<(&str, &str)> {
    let mut parts = month_day.split_whitespace();
    Some((parts.next()?, parts.next()?))
}

/// Resolve a month token to its number.
///
/// English names are translated first, then the French table is used.
pub fn resolve_month(token: &str) -> Option<u32> {
    let token = token.trim();
    let native = MONTH_TRANSLATIONS
        .get(token)
        .map(|m| m.to_string())
        .unwrap_or_else(|| token.to_lowercase());
    MONTHS.get(native.as_str()).copied()
}

/// parse a day token, accepting the French ordinal `1er`.
fn parse_day(token: &str) -> Option<u32> {
    token.trim().trim_end_matches("er").parse().ok()
}

/// Looks for a time of day right after the date match.
fn find_time(rest: &str) -> NaiveTime {
    TIME_OF_DAY
        .captures(rest)
        .and_then(|caps| {
            let hour = caps.get(1)?.as_str().parse().ok()?;
            let minute = caps.get(2)?.as_str().parse().ok()?;
            let second = caps
                .get(3)
                .and_then(|s| s.as_str().parse().ok())
                .unwrap_or(0);
            NaiveTime::from_hms_opt(hour, minute, second)
        })
        .unwrap_or(NaiveTime::MIN)
}

/// Extract a date (and time when present) from a string.
///
/// Returns [None] when no pattern resolves, which is a common outcome.
pub fn find_datetime(text: &str) -> Option<NaiveDateTime> {
    for pattern in DatePattern::ORDER {
        let Some(matched) = pattern.regex().find(text) else {
            continue;
        };

        let resolved = pattern.tokens(matched.as_str()).and_then(|(day, month, year)| {
            let month = resolve_month(month)?;
            let day = parse_day(day)?;
            let year = year.trim().parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        });

        match resolved {
            Some(date) => {
                let time = find_time(&text[matched.end()..]);
                return Some(date.and_time(time));
            }
            None => debug!("{:?} matched {:?} but did not resolve", pattern, matched.as_str()),
        }
    }

    debug!("no valid date found in {:?}", text);
    None
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn french_weekday() {
        let d = find_datetime("Le Monde, lundi 3 janvier 2022 500 mots").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2022, 1, 3));
        assert_eq!(d.hour(), 0);
    }

    #[test]
    fn french_no_weekday() {
        let d = find_datetime("Sud Ouest, 14 juillet 1998, p. 4").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (1998, 7, 14));
    }

    #[test]
    fn french_first_of_month() {
        let d = find_datetime("samedi 1er août 2020").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2020, 8, 1));
    }

    #[test]
    fn english_weekday() {
        let d = find_datetime("The Guardian - Monday, March 7, 2016").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2016, 3, 7));
    }

    #[test]
    fn english_no_weekday() {
        let d = find_datetime("Published December 25, 2019").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2019, 12, 25));
    }

    #[test]
    fn unresolved_month_falls_through() {
        // "12 pages 2020" matches the second pattern textually but "pages" is no month,
        // the english pattern further along must still be found.
        let d = find_datetime("12 pages 2020 - April 2, 2021").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2021, 4, 2));
    }

    #[test]
    fn impossible_day_is_none() {
        assert_eq!(find_datetime("31 février 2020"), None);
    }

    #[test]
    fn time_of_day() {
        let d = find_datetime("mardi 4 janvier 2022 - 14:30 UTC").unwrap();
        assert_eq!((d.hour(), d.minute(), d.second()), (14, 30, 0));

        let d = find_datetime("4 janvier 2022 à 9h05").unwrap();
        assert_eq!((d.hour(), d.minute()), (9, 5));
    }

    #[test]
    fn no_date() {
        assert_eq!(find_datetime("no date in here"), None);
        assert_eq!(find_datetime(""), None);
    }

    #[test]
    fn month_resolution() {
        assert_eq!(resolve_month("août"), Some(8));
        assert_eq!(resolve_month("Août"), Some(8));
        assert_eq!(resolve_month("August"), Some(8));
        assert_eq!(resolve_month("Agosto"), None);
    }
}
