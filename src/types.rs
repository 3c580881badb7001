//! Core types for positioned text and extracted header records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sentinel used for any header field that could not be resolved
pub const UNKNOWN: &str = "Unknown";

/// One positioned piece of text from a PDF content stream
///
/// Coordinates are page coordinates with the origin at the bottom-left,
/// so larger `y` values are higher up the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Text content, anything from a single glyph to a whole line
    pub text: String,

    /// Baseline start X
    pub x: f64,

    /// Baseline Y
    pub y: f64,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }

    /// Number of characters, used for glyph-width estimates
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Sender, receiver and date pulled from an email-derived page
///
/// Every field holds [`UNKNOWN`] when it could not be located, never an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailHeaderRecord {
    /// Display name from the `From:` field
    pub sender: String,

    /// Display name from the `To:` field
    pub receiver: String,

    /// Date as written, minus any trailing parenthetical timezone name
    pub date_full: String,

    /// `DD.MM.YYYY` rendering of the date
    pub date_formatted: String,
}

impl Default for EmailHeaderRecord {
    fn default() -> Self {
        Self {
            sender: UNKNOWN.to_string(),
            receiver: UNKNOWN.to_string(),
            date_full: UNKNOWN.to_string(),
            date_formatted: UNKNOWN.to_string(),
        }
    }
}

impl EmailHeaderRecord {
    #[must_use]
    pub fn is_unknown_sender(&self) -> bool {
        self.sender == UNKNOWN
    }

    #[must_use]
    pub fn is_unknown_receiver(&self) -> bool {
        self.receiver == UNKNOWN
    }

    #[must_use]
    pub fn is_unknown_date(&self) -> bool {
        self.date_full == UNKNOWN
    }

    /// True when no field could be resolved at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_unknown_sender()
            && self.is_unknown_receiver()
            && self.is_unknown_date()
            && self.date_formatted == UNKNOWN
    }

    /// Calendar date behind `date_formatted`, if it is a real date
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_formatted, "%d.%m.%Y").ok()
    }

    /// Order records by date, oldest first, with undated records last
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for EmailHeaderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.sender, self.receiver, self.date_full
        )
    }
}

/// Result of processing one page: the rebuilt text and what was found in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExtraction {
    /// Reading-order text, lines separated by `\n`
    pub text: String,

    /// Header fields extracted from `text`
    pub record: EmailHeaderRecord,
}
