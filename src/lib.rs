// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Exhibit Header Extraction
//!
//! Rebuilds reading-order text from the positioned fragments of an
//! email-derived PDF page and pulls the sender, receiver and date out of
//! the `From:`/`To:`/`Date:` headers it contains.
//!
//! # Features
//!
//! - Line grouping and word-break inference from fragment geometry
//! - Cleanup of glyph-level spacing artifacts, with an injectable
//!   vocabulary of known words
//! - Best-effort header extraction that never fails: unresolved fields
//!   read `"Unknown"`
//! - `DD.MM.YYYY` date normalisation for tabular indexes
//! - The same records from raw `.eml` messages
//!
//! # Example
//!
//! ```rust
//! use exhibit_extract::{TextFragment, extract_page};
//!
//! let fragments = vec![
//!     TextFragment::new("Date: Thu Apr 25 2024 09:01:38 GMT+1000", 50.0, 680.0),
//!     TextFragment::new("From: \"Decision Enquiry\" <decisionenquiry@proton.me>", 50.0, 700.0),
//! ];
//! let record = extract_page(&fragments);
//!
//! assert_eq!(record.sender, "Decision Enquiry");
//! assert_eq!(record.date_formatted, "25.04.2024");
//! assert_eq!(record.receiver, "Unknown");
//! ```

mod config;
mod error;
mod header;
mod layout;
mod message;
mod pipeline;
mod types;

pub use config::Config;
pub use error::{ParseError, Result};
pub use header::{ExtractorConfig, HeaderExtractor, extract_headers, format_date, month_number};
pub use layout::{LayoutConfig, Reconstructor, Vocabulary, clean_text, reconstruct};
pub use message::record_from_message;
pub use pipeline::{PageExtractor, extract_page};
pub use types::*;
