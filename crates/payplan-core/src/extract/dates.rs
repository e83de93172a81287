//! Date normalization: raw date text to canonical calendar dates.

use std::fmt;

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::schedule::DateLocale;

use super::provider::ProviderProfile;
use super::rules::patterns::{
    DATE_ISO, DATE_SLASH, DATE_TEXT_DMY, DATE_TEXT_MDY, ORDINAL_SUFFIX, SLASH_DATE,
};

/// Reminders usually arrive close to the due date; anything further out
/// than these windows is treated as a misparse.
const PAST_WINDOW_DAYS: i64 = 30;
const FUTURE_WINDOW_DAYS: i64 = 730;

/// A successfully normalized date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedDate {
    pub date: NaiveDate,
    /// The raw text was a two-numeric slash form readable under either
    /// locale. Attached to the accepted item, never a rejection.
    pub ambiguous: bool,
}

/// Why a date candidate was rejected. Both collapse into one
/// "due date not found" condition at the block boundary; the distinction
/// survives in the issue text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRejection {
    /// No format template parsed the text, or the calendar date does not
    /// exist (Feb 30).
    Unparsed,
    /// Parsed, but too far outside the plausible reminder window.
    Suspicious(NaiveDate),
}

impl fmt::Display for DateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRejection::Unparsed => write!(f, "unrecognized date format"),
            DateRejection::Suspicious(date) => {
                write!(f, "implausible date {}", date.format("%Y-%m-%d"))
            }
        }
    }
}

/// Parses heterogeneous date text against a fixed, ordered template list.
pub struct DateNormalizer {
    locale: DateLocale,
    today: NaiveDate,
}

// Textual month-name forms are unambiguous under either locale.
const TEXT_TEMPLATES: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

impl DateNormalizer {
    /// Normalizer anchored at the current date in the supplied time zone.
    pub fn new(locale: DateLocale, tz: Tz) -> Self {
        Self {
            locale,
            today: Utc::now().with_timezone(&tz).date_naive(),
        }
    }

    /// Normalizer with a pinned "today" for deterministic replays.
    pub fn anchored(locale: DateLocale, today: NaiveDate) -> Self {
        Self { locale, today }
    }

    /// Convert raw date text into a canonical date.
    ///
    /// Format order is fixed: ISO first, then the slash form read in the
    /// locale-preferred order (falling back to the other reading, so
    /// "13/02/2026" parses as Feb 13 under either locale), then textual
    /// month-name forms. The first form that parses wins; later forms are
    /// not tried. Parsed dates outside the plausibility window are
    /// rejected as [`DateRejection::Suspicious`].
    pub fn normalize(&self, raw: &str) -> Result<NormalizedDate, DateRejection> {
        let stripped = ORDINAL_SUFFIX.replace_all(raw, "$1");
        let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d") {
            return self.classify(date, raw);
        }

        if let Some(caps) = SLASH_DATE.captures(&cleaned) {
            let first: u32 = caps[1].parse().unwrap_or(0);
            let second: u32 = caps[2].parse().unwrap_or(0);
            let year = parse_year(&caps[3]);

            let (month, day) = match self.locale {
                DateLocale::Us => (first, second),
                DateLocale::Eu => (second, first),
            };
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .or_else(|| NaiveDate::from_ymd_opt(year, day, month))
                .ok_or(DateRejection::Unparsed)?;
            return self.classify(date, raw);
        }

        let date = TEXT_TEMPLATES
            .iter()
            .find_map(|t| NaiveDate::parse_from_str(&cleaned, t).ok())
            .ok_or(DateRejection::Unparsed)?;
        self.classify(date, raw)
    }

    fn classify(&self, date: NaiveDate, raw: &str) -> Result<NormalizedDate, DateRejection> {
        if date < self.today - Duration::days(PAST_WINDOW_DAYS)
            || date > self.today + Duration::days(FUTURE_WINDOW_DAYS)
        {
            return Err(DateRejection::Suspicious(date));
        }
        Ok(NormalizedDate {
            date,
            ambiguous: is_ambiguous_slash(raw),
        })
    }
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: 00-50 means 2000s, 51-99 means 1900s.
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

/// True iff the text is a two-numeric slash form with both parts in 1..=12,
/// i.e. plausible under either locale reading.
pub fn is_ambiguous_slash(raw: &str) -> bool {
    SLASH_DATE
        .captures(raw.trim())
        .map(|caps| {
            let first: u32 = caps[1].parse().unwrap_or(0);
            let second: u32 = caps[2].parse().unwrap_or(0);
            (1..=12).contains(&first) && (1..=12).contains(&second)
        })
        .unwrap_or(false)
}

/// Collect date-like substrings from a block in due-date priority order:
/// text captured by the provider's due/payment context patterns first, then
/// a generic scan over the whole block. The assembler takes the first
/// candidate that normalizes cleanly.
pub fn find_date_candidates(block: &str, profile: &ProviderProfile) -> Vec<String> {
    let mut candidates = Vec::new();
    for pattern in &profile.due_date_patterns {
        for caps in pattern.captures_iter(block) {
            candidates.extend(date_tokens(&caps[1]));
        }
    }
    candidates.extend(date_tokens(block));
    candidates
}

fn date_tokens(text: &str) -> Vec<String> {
    let mut tokens: Vec<(usize, String)> = Vec::new();
    for regex in [&*DATE_ISO, &*DATE_SLASH, &*DATE_TEXT_MDY, &*DATE_TEXT_DMY] {
        for m in regex.find_iter(text) {
            tokens.push((m.start(), m.as_str().to_string()));
        }
    }
    tokens.sort();
    tokens.dedup();
    tokens.into_iter().map(|(_, token)| token).collect()
}
