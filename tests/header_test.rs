use exhibit_extract::*;
use std::cmp::Ordering;

const HEADER_BLOCK: &str = "From: \"Decision Enquiry\" <decisionenquiry@proton.me>\n\
                            Sent: Thursday\n\
                            To: \"Jaime McIver\" <jaime@example.com>\n\
                            Date: Thu Apr 25 2024 09:01:38 GMT+1000 (Australian Eastern Standard Time)\n\
                            Subject: RE: Case\n\
                            Hi Jaime, it's about the 'review' we discussed.";

// --- Full records ---

#[test]
fn test_extract_header_block() {
    let record = extract_headers(HEADER_BLOCK);

    assert_eq!(record.sender, "Decision Enquiry");
    assert_eq!(record.receiver, "Jaime McIver");
    assert_eq!(record.date_full, "Thu Apr 25 2024 09:01:38 GMT+1000");
    assert_eq!(record.date_formatted, "25.04.2024");
}

#[test]
fn test_empty_text_is_all_unknown() {
    let record = extract_headers("");

    assert_eq!(record, EmailHeaderRecord::default());
    assert_eq!(record.sender, UNKNOWN);
    assert_eq!(record.receiver, UNKNOWN);
    assert_eq!(record.date_full, UNKNOWN);
    assert_eq!(record.date_formatted, UNKNOWN);
    assert!(record.is_empty());
}

#[test]
fn test_fields_are_independent() {
    let record = extract_headers("To: Jaime McIver <jaime@example.com>");

    assert!(record.is_unknown_sender());
    assert_eq!(record.receiver, "Jaime McIver");
    assert!(record.is_unknown_date());
}

// --- Sender ---

#[test]
fn test_sender_quoted_name_precedence() {
    let record = extract_headers("From: \"Decision Enquiry\" <decisionenquiry@proton.me>");
    assert_eq!(record.sender, "Decision Enquiry");
}

#[test]
fn test_sender_unquoted() {
    let record = extract_headers("From: Jane Doe <jane@example.com>\nTo: someone");
    assert_eq!(record.sender, "Jane Doe");
}

#[test]
fn test_sender_case_insensitive_label() {
    let record = extract_headers("FROM: \"Alice Smith\" <alice@example.com>");
    assert_eq!(record.sender, "Alice Smith");
}

#[test]
fn test_sender_single_quotes_keep_apostrophe() {
    let record = extract_headers("From: 'Conor O'Brien' <conor@example.com>");
    assert_eq!(record.sender, "Conor O'Brien");
}

#[test]
fn test_sender_address_only_is_unknown() {
    let record = extract_headers("From: <decisionenquiry@proton.me>");
    assert_eq!(record.sender, UNKNOWN);

    let record = extract_headers("From: \"\" <decisionenquiry@proton.me>");
    assert_eq!(record.sender, UNKNOWN);
}

#[test]
fn test_sender_plain_address() {
    let record = extract_headers("From: decisionenquiry@proton.me\nDate: soon");
    assert_eq!(record.sender, "decisionenquiry@proton.me");
}

// --- Receiver ---

#[test]
fn test_receiver_bounded_by_next_label() {
    let record = extract_headers("To: \"Jaime McIver\" <a@b.com>Subject: RE: Case");
    assert_eq!(record.receiver, "Jaime McIver");

    let record = extract_headers("To: jaime@b.comSubject: RE: Case");
    assert_eq!(record.receiver, "jaime@b.com");
}

#[test]
fn test_receiver_unquoted_stops_at_address() {
    let record = extract_headers("To: Jaime McIver <jaime@example.com>Date: Thu Apr 25 2024");
    assert_eq!(record.receiver, "Jaime McIver");
    assert_eq!(record.date_formatted, "25.04.2024");
}

#[test]
fn test_receiver_label_inside_word_is_ignored() {
    // "mailto:" must not be read as a To: label
    let record = extract_headers("From: Bob mailto:bob@example.com\nTo: Carol <c@example.com>");
    assert_eq!(record.receiver, "Carol");
}

#[test]
fn test_receiver_bounded_by_lowercase_label_after_address() {
    let record = extract_headers("To: a@b.comsubject: RE Case");
    assert_eq!(record.receiver, "a@b.com");
}

#[test]
fn test_receiver_quoted_name_wrapped_across_lines() {
    let record = extract_headers("To: \"Jaime\nMcIver\" <a@b.com>\nSubject: x");
    assert_eq!(record.receiver, "Jaime McIver");
}

#[test]
fn test_receiver_closed_value_does_not_read_next_line() {
    let record = extract_headers("To: Jaime McIver <a@b.com>\n\"Quoted\" body text");
    assert_eq!(record.receiver, "Jaime McIver");
}

#[test]
fn test_receiver_stop_labels_are_configurable() {
    let text = "To: Alice Cc: Bob <bob@example.com>";
    assert_eq!(extract_headers(text).receiver, "Alice Cc: Bob");

    let mut config = ExtractorConfig::default();
    config.receiver_stop_labels.push("Cc:".into());
    let extractor = HeaderExtractor::new(&config);
    assert_eq!(extractor.extract(text).receiver, "Alice");
}

// --- Date ---

#[test]
fn test_date_strips_trailing_timezone_name() {
    let record = extract_headers(
        "Date: Thu Apr 25 2024 09:01:38 GMT+1000 (Australian Eastern Standard Time)",
    );
    assert_eq!(record.date_full, "Thu Apr 25 2024 09:01:38 GMT+1000");
    assert_eq!(record.date_formatted, "25.04.2024");
}

#[test]
fn test_date_wrapped_timezone_name() {
    let record = extract_headers(
        "From: Alice <alice@example.com>\n\
         Date: Thu Apr 25 2024 09:01:38 GMT+1000 (Australian Eastern\n\
         Standard Time)\n\
         Subject: x",
    );
    assert_eq!(record.date_full, "Thu Apr 25 2024 09:01:38 GMT+1000");
    assert_eq!(record.date_formatted, "25.04.2024");
}

#[test]
fn test_date_keeps_inner_parenthetical() {
    let record = extract_headers("Date: Thu Apr 25 2024 (AEST) 09:01");
    assert_eq!(record.date_full, "Thu Apr 25 2024 (AEST) 09:01");
    assert_eq!(record.date_formatted, "25.04.2024");
}

#[test]
fn test_date_pads_day() {
    let record = extract_headers("Date: Mon Jan 5 2024 10:00:00");
    assert_eq!(record.date_formatted, "05.01.2024");
}

#[test]
fn test_date_full_month_names_and_commas() {
    let record = extract_headers("Date: Thursday, April 25, 2024 9:01 AM");
    assert_eq!(record.date_formatted, "25.04.2024");
}

#[test]
fn test_date_month_with_stray_space() {
    let record = extract_headers("Date: Thu A pr 25 2024 09:01:38");
    assert_eq!(record.date_full, "Thu A pr 25 2024 09:01:38");
    assert_eq!(record.date_formatted, "25.04.2024");
}

#[test]
fn test_date_unknown_month_defaults_to_january() {
    // A garbled month silently becomes January; this masks a parse failure
    let record = extract_headers("Date: Thu Foo 25 2024 09:01:38");
    assert_eq!(record.date_full, "Thu Foo 25 2024 09:01:38");
    assert_eq!(record.date_formatted, "25.01.2024");
}

#[test]
fn test_date_unparseable_keeps_full_text() {
    let record = extract_headers("Date: 25/04/2024");
    assert_eq!(record.date_full, "25/04/2024");
    assert_eq!(record.date_formatted, UNKNOWN);
}

#[test]
fn test_date_requires_ascii_digits() {
    let record = extract_headers("Date: Thu Apr \u{662}\u{665} \u{662}\u{660}\u{662}\u{664}");
    assert_eq!(record.date_full, "Thu Apr \u{662}\u{665} \u{662}\u{660}\u{662}\u{664}");
    assert_eq!(record.date_formatted, UNKNOWN);
    assert!(record.date().is_none());
}

#[test]
fn test_date_label_inside_word_is_ignored() {
    let record = extract_headers("Update: none\nDate: Fri Mar 1 2024");
    assert_eq!(record.date_full, "Fri Mar 1 2024");
    assert_eq!(record.date_formatted, "01.03.2024");
}

#[test]
fn test_date_bounded_by_subject_on_same_line() {
    let record = extract_headers("Date: Thu Apr 25 2024Subject: Hello");
    assert_eq!(record.date_full, "Thu Apr 25 2024");
}

#[test]
fn test_date_empty_value() {
    let record = extract_headers("Date: \nSubject: Hi");
    assert_eq!(record.date_full, UNKNOWN);
    assert_eq!(record.date_formatted, UNKNOWN);
}

#[test]
fn test_format_date() {
    assert_eq!(
        format_date("Wed Dec 31 2025 23:59:59").as_deref(),
        Some("31.12.2025")
    );
    assert_eq!(format_date("Sent Thu Apr 25 2024"), Some("25.01.2024".into()));
    assert!(format_date("Thu, 25 Apr 2024").is_none());
    assert!(format_date("").is_none());
}

#[test]
fn test_month_number() {
    let cases = [
        ("Jan", "01"),
        ("february", "02"),
        ("MAR", "03"),
        ("April", "04"),
        ("May", "05"),
        ("jun", "06"),
        ("July", "07"),
        ("aug", "08"),
        ("Sept", "09"),
        ("September", "09"),
        ("oct", "10"),
        ("Nov", "11"),
        ("D ec", "12"),
    ];
    for (token, expected) in &cases {
        assert_eq!(month_number(token), Some(*expected), "{token}");
    }
    assert!(month_number("Foo").is_none());
    assert!(month_number("").is_none());
}

// --- EmailHeaderRecord ---

#[test]
fn test_record_date() {
    let record = extract_headers(HEADER_BLOCK);
    let date = record.date().unwrap();
    assert_eq!(date.to_string(), "2024-04-25");

    assert!(EmailHeaderRecord::default().date().is_none());
}

#[test]
fn test_record_chronological_order() {
    let april = extract_headers("Date: Thu Apr 25 2024");
    let march = extract_headers("Date: Fri Mar 1 2024");
    let undated = EmailHeaderRecord::default();

    assert_eq!(march.chronological_cmp(&april), Ordering::Less);
    assert_eq!(april.chronological_cmp(&undated), Ordering::Less);
    assert_eq!(undated.chronological_cmp(&march), Ordering::Greater);

    let mut records = vec![undated.clone(), april.clone(), march.clone()];
    records.sort_by(EmailHeaderRecord::chronological_cmp);
    assert_eq!(records, vec![march, april, undated]);
}

#[test]
fn test_record_serializes_camel_case() {
    let record = extract_headers(HEADER_BLOCK);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["sender"], "Decision Enquiry");
    assert_eq!(json["dateFull"], "Thu Apr 25 2024 09:01:38 GMT+1000");
    assert_eq!(json["dateFormatted"], "25.04.2024");
}

#[test]
fn test_record_display() {
    let record = extract_headers(HEADER_BLOCK);
    assert_eq!(
        record.to_string(),
        "Decision Enquiry -> Jaime McIver (Thu Apr 25 2024 09:01:38 GMT+1000)"
    );
}
