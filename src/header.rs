//! Email header field extraction from reconstructed page text
//!
//! Extraction is best effort: every field that cannot be found keeps the
//! [`UNKNOWN`](crate::UNKNOWN) sentinel and nothing here returns an error.

use crate::types::EmailHeaderRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

const FROM_LABEL: &str = "From:";
const TO_LABEL: &str = "To:";
const DATE_LABEL: &str = "Date:";

/// Labels that end each field's value
///
/// A field's value runs from its own label to the earliest following stop
/// label, or the end of the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub sender_stop_labels: Vec<String>,
    pub receiver_stop_labels: Vec<String>,
    pub date_stop_labels: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sender_stop_labels: labels(&["To:", "Subject:", "Date:"]),
            receiver_stop_labels: labels(&["Subject:", "Date:", "From:"]),
            date_stop_labels: labels(&["Subject:", "From:", "To:"]),
        }
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

// Trailing "(Australian Eastern Standard Time)" style zone names
static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").unwrap());

// <weekday> <month> <day> <year>; month may carry stray spaces ("A pr")
static LOOSE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z]+),?[ \t]+([A-Za-z][A-Za-z \t]*?)[ \t]+([0-9]{1,2}),?[ \t]+([0-9]{4})\b",
    )
    .unwrap()
});

/// Pulls `From:`, `To:` and `Date:` values out of page text
#[derive(Debug, Clone)]
pub struct HeaderExtractor {
    sender_stops: Vec<String>,
    receiver_stops: Vec<String>,
    date_stops: Vec<String>,
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

impl HeaderExtractor {
    #[must_use]
    pub fn new(config: &ExtractorConfig) -> Self {
        let lower = |stops: &[String]| -> Vec<String> {
            stops
                .iter()
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };

        Self {
            sender_stops: lower(&config.sender_stop_labels),
            receiver_stops: lower(&config.receiver_stop_labels),
            date_stops: lower(&config.date_stop_labels),
        }
    }

    /// Extract all header fields; missing ones stay `Unknown`
    #[must_use]
    pub fn extract(&self, text: &str) -> EmailHeaderRecord {
        // ASCII lowercasing keeps byte offsets identical to `text`
        let lower = text.to_ascii_lowercase();
        let mut record = EmailHeaderRecord::default();

        if let Some(name) = field_segment(text, &lower, FROM_LABEL, &self.sender_stops)
            .and_then(|segment| extract_name(&field_value(segment)))
        {
            record.sender = name;
        }

        if let Some(name) = field_segment(text, &lower, TO_LABEL, &self.receiver_stops)
            .and_then(|segment| extract_name(&field_value(segment)))
        {
            record.receiver = name;
        }

        if let Some(segment) = field_segment(text, &lower, DATE_LABEL, &self.date_stops) {
            let date_full = strip_timezone_name(&field_value(segment));
            if !date_full.is_empty() {
                if let Some(formatted) = format_date(&date_full) {
                    record.date_formatted = formatted;
                }
                record.date_full = date_full;
            }
        }

        debug!("Extracted headers: {record}");

        record
    }
}

/// Extract header fields with the default stop labels
#[must_use]
pub fn extract_headers(text: &str) -> EmailHeaderRecord {
    HeaderExtractor::default().extract(text)
}

/// Find `label` in `lower` at or after `from`
///
/// A match counts when it starts a word, when the original text capitalises
/// it, or when it follows an address run. That catches labels glued to the
/// previous value (`jaime@b.comSubject:`, `jaime@b.comsubject:`) while
/// skipping `mailto:` and `Update:`.
fn find_label(text: &str, lower: &str, label: &str, from: usize) -> Option<usize> {
    let mut start = from;
    while let Some(pos) = lower[start..].find(label) {
        let at = start + pos;
        let before = &lower[..at];
        let at_word_start = before
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let capitalised = text[at..].starts_with(|c: char| c.is_uppercase());
        let after_address = before
            .rsplit(char::is_whitespace)
            .next()
            .is_some_and(|run| run.contains('@'));
        if at_word_start || capitalised || after_address {
            return Some(at);
        }
        start = at + label.len();
    }
    None
}

/// Text between a field label and the earliest following stop label
fn field_segment<'a>(
    text: &'a str,
    lower: &str,
    label: &str,
    stops: &[String],
) -> Option<&'a str> {
    let label = label.to_ascii_lowercase();
    let start = find_label(text, lower, &label, 0)? + label.len();

    let end = stops
        .iter()
        .filter_map(|stop| find_label(text, lower, stop, start))
        .min()
        .unwrap_or(text.len());

    Some(&text[start..end])
}

/// Value of a bounded segment, whitespace collapsed
///
/// Only the first line is read unless it leaves a `(` or `"` open, in which
/// case following lines are joined until it closes.
fn field_value(segment: &str) -> String {
    let mut lines = segment.trim_start().split(['\n', '\r']);
    let mut value = lines.next().unwrap_or_default().to_string();

    while is_unclosed(&value) {
        let Some(line) = lines.next() else { break };
        value.push(' ');
        value.push_str(line);
    }

    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_unclosed(value: &str) -> bool {
    value.matches('(').count() > value.matches(')').count()
        || value.matches('"').count() % 2 == 1
}

/// Display name from a field value
///
/// Double quotes win and take the text up to the second quote. Single
/// quotes take the text up to the last quote so names such as `O'Brien`
/// survive. Otherwise the name is everything before `<`.
fn extract_name(line: &str) -> Option<String> {
    let quoted = quoted_name(line).map(str::trim).filter(|n| !n.is_empty());
    let name = quoted.unwrap_or_else(|| unquoted_name(line));

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn quoted_name(line: &str) -> Option<&str> {
    if let Some(open) = line.find('"') {
        let rest = &line[open + 1..];
        if let Some(close) = rest.find('"') {
            return Some(&rest[..close]);
        }
    }

    let open = line.find('\'')?;
    let close = line.rfind('\'')?;
    (close > open).then(|| &line[open + 1..close])
}

fn unquoted_name(line: &str) -> &str {
    let end = line.find('<').unwrap_or(line.len());
    line[..end].trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

fn strip_timezone_name(date: &str) -> String {
    TRAILING_PARENTHETICAL.replace(date.trim(), "").trim().to_string()
}

/// `DD.MM.YYYY` from a `<weekday> <month> <day> <year> ...` date string
///
/// Returns `None` when the string does not have that shape. An
/// unrecognised month name still produces a date, in January.
#[must_use]
pub fn format_date(date: &str) -> Option<String> {
    let caps = LOOSE_DATE.captures(date.trim())?;
    let month_token = caps.get(2)?.as_str();
    let day = caps.get(3)?.as_str();
    let year = caps.get(4)?.as_str();

    let month = month_number(month_token).unwrap_or_else(|| {
        warn!("Unrecognised month {month_token:?} in date {date:?}, defaulting to 01");
        "01"
    });

    Some(format!("{day:0>2}.{month}.{year}"))
}

/// Two-digit month number for an English month name or abbreviation
#[must_use]
pub fn month_number(token: &str) -> Option<&'static str> {
    let month: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let number = match month.as_str() {
        "jan" | "january" => "01",
        "feb" | "february" => "02",
        "mar" | "march" => "03",
        "apr" | "april" => "04",
        "may" => "05",
        "jun" | "june" => "06",
        "jul" | "july" => "07",
        "aug" | "august" => "08",
        "sep" | "sept" | "september" => "09",
        "oct" | "october" => "10",
        "nov" | "november" => "11",
        "dec" | "december" => "12",
        _ => return None,
    };

    Some(number)
}
