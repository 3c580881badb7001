//! Header records from raw RFC 5322 messages
//!
//! Exhibits saved as `.eml` files carry their headers in structured form.
//! They are rendered back into labelled lines and run through the same
//! extractor as PDF pages so both sources produce identical records.

use crate::error::{ParseError, Result};
use crate::header::HeaderExtractor;
use crate::types::{EmailHeaderRecord, UNKNOWN};
use chrono::DateTime;
use tracing::debug;

const RENDERED_HEADERS: [(&str, &str); 4] = [
    ("from", "From:"),
    ("to", "To:"),
    ("date", "Date:"),
    ("subject", "Subject:"),
];

/// Parse raw message bytes into a header record using default settings
pub fn record_from_message(raw: &[u8]) -> Result<EmailHeaderRecord> {
    record_from_message_with(&HeaderExtractor::default(), raw)
}

pub(crate) fn record_from_message_with(
    extractor: &HeaderExtractor,
    raw: &[u8],
) -> Result<EmailHeaderRecord> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

    let text = render_headers(&parsed.headers);
    let mut record = extractor.extract(&text);

    // RFC 2822 dates put the day before the month, which the loose pattern rejects
    if record.date_formatted == UNKNOWN
        && let Some(date) = header_value(&parsed.headers, "date")
        && let Ok(parsed_date) = DateTime::parse_from_rfc2822(date.trim())
    {
        record.date_formatted = parsed_date.format("%d.%m.%Y").to_string();
    }

    debug!("Parsed message headers: {record}");

    Ok(record)
}

fn header_value(headers: &[mailparse::MailHeader], key: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().to_lowercase() == key)
        .map(mailparse::MailHeader::get_value)
}

fn render_headers(headers: &[mailparse::MailHeader]) -> String {
    RENDERED_HEADERS
        .iter()
        .filter_map(|(key, label)| {
            header_value(headers, key).map(|value| format!("{label} {}", value.trim()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
