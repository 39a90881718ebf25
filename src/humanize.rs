//! Human-readable durations, distances, amounts and dates
//!
//! Everything here is a pure function. Results are opaque strings that get
//! substituted into service templates as plain arguments.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::template::{TemplateKey, TemplateProvider};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Largest first
const UNITS: &[(TemplateKey, i64)] = &[
    (TemplateKey::Years, YEAR),
    (TemplateKey::Months, MONTH),
    (TemplateKey::Weeks, WEEK),
    (TemplateKey::Days, DAY),
    (TemplateKey::Hours, HOUR),
    (TemplateKey::Minutes, MINUTE),
    (TemplateKey::Seconds, 1),
];

/// Wall clock style for times of day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clock {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

fn counted(
    templates: &dyn TemplateProvider,
    key: TemplateKey,
    count: i64,
) -> Result<String, TemplateError> {
    let value = count.to_string();
    Ok(templates.lookup_counted(key, count, &[&value])?.text)
}

/// Timer length such as "1 week" or "36 hours".
///
/// With `prefer_lower` the largest unit that divides the value exactly is
/// used, so odd lengths stay precise. Otherwise the largest unit that fits is
/// used and the value is rounded down.
pub fn time_interval(
    templates: &dyn TemplateProvider,
    seconds: i32,
    prefer_lower: bool,
) -> Result<String, TemplateError> {
    let seconds = i64::from(seconds.max(0));

    let (key, size) = UNITS
        .iter()
        .copied()
        .find(|&(_, size)| {
            if prefer_lower {
                seconds >= size && seconds % size == 0
            } else {
                seconds >= size
            }
        })
        .unwrap_or((TemplateKey::Seconds, 1));

    counted(templates, key, seconds / size)
}

/// Length of a finished call
pub fn call_duration(
    templates: &dyn TemplateProvider,
    seconds: i32,
) -> Result<String, TemplateError> {
    let seconds = i64::from(seconds.max(0));
    if seconds < MINUTE {
        counted(templates, TemplateKey::Seconds, seconds)
    } else if seconds < HOUR {
        counted(templates, TemplateKey::Minutes, seconds / MINUTE)
    } else {
        counted(templates, TemplateKey::Hours, seconds / HOUR)
    }
}

/// Distance in metres, switching to kilometres from 1 km up
pub fn distance(templates: &dyn TemplateProvider, meters: i32) -> Result<String, TemplateError> {
    let meters = meters.max(0);
    if meters < 1000 {
        let value = meters.to_string();
        return Ok(templates.lookup(TemplateKey::Meters, &[&value])?.text);
    }

    let tenths = (i64::from(meters) + 50) / 100;
    let value = if tenths % 10 == 0 {
        format!("{}", tenths / 10)
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    };
    Ok(templates.lookup(TemplateKey::Kilometers, &[&value])?.text)
}

/// (code, symbol, minor-unit digits, symbol goes first)
const CURRENCIES: &[(&str, &str, u32, bool)] = &[
    ("USD", "$", 2, true),
    ("EUR", "€", 2, true),
    ("GBP", "£", 2, true),
    ("INR", "₹", 2, true),
    ("JPY", "¥", 0, true),
    ("KRW", "₩", 0, true),
    ("RUB", "₽", 2, false),
    ("UAH", "₴", 2, false),
];

/// Format an amount given in minor units, e.g. `(123456, "USD")` → `$1,234.56`
pub fn currency_amount(amount: i64, currency: &str) -> String {
    let code = currency.to_ascii_uppercase();
    let (symbol, exponent, prefix) = CURRENCIES
        .iter()
        .find(|(c, ..)| *c == code)
        .map(|&(_, symbol, exponent, prefix)| (symbol.to_string(), exponent, prefix))
        .unwrap_or((code, 2, false));

    let divisor = 10u64.pow(exponent);
    let magnitude = amount.unsigned_abs();
    let mut number = group_thousands(magnitude / divisor);
    if exponent > 0 {
        number.push_str(&format!(
            ".{:0width$}",
            magnitude % divisor,
            width = exponent as usize
        ));
    }

    let sign = if amount < 0 { "-" } else { "" };
    if prefix {
        format!("{}{}{}", sign, symbol, number)
    } else {
        format!("{}{} {}", sign, number, symbol)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Which day a timestamp falls on relative to now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Yesterday,
    Today,
    Tomorrow,
    Other,
}

/// A timestamp broken into phrase-ready parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moment {
    pub day: Day,
    /// Time of day, e.g. "18:30" or "6:30 PM"
    pub time: String,
    /// Calendar date, e.g. "Mar 4" or "Mar 4, 2027"
    pub date: String,
}

/// Split `timestamp` into day relation, time and date as seen at `now`
pub fn moment(timestamp: i64, now: i64, utc_offset: i32, clock: Clock) -> Moment {
    let offset = FixedOffset::east_opt(utc_offset).unwrap_or_else(|| Utc.fix());
    let at = DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&offset);
    let now = DateTime::from_timestamp(now, 0)
        .unwrap_or_default()
        .with_timezone(&offset);

    let day = match (at.date_naive() - now.date_naive()).num_days() {
        -1 => Day::Yesterday,
        0 => Day::Today,
        1 => Day::Tomorrow,
        _ => Day::Other,
    };

    let time = match clock {
        Clock::TwentyFourHour => at.format("%H:%M").to_string(),
        Clock::TwelveHour => at.format("%-I:%M %p").to_string(),
    };

    let date = if at.year() == now.year() {
        at.format("%b %-d").to_string()
    } else {
        at.format("%b %-d, %Y").to_string()
    };

    Moment { day, time, date }
}

/// Relative phrase such as "today at 18:30" or "Mar 4 at 09:00"
pub fn timestamp(templates: &dyn TemplateProvider, moment: &Moment) -> Result<String, TemplateError> {
    let filled = match moment.day {
        Day::Today => templates.lookup(TemplateKey::TodayAt, &[&moment.time])?,
        Day::Tomorrow => templates.lookup(TemplateKey::TomorrowAt, &[&moment.time])?,
        Day::Yesterday => templates.lookup(TemplateKey::YesterdayAt, &[&moment.time])?,
        Day::Other => templates.lookup(TemplateKey::DateAt, &[&moment.date, &moment.time])?,
    };
    Ok(filled.text)
}
