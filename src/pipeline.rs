//! Per-page extraction: fragments in, header record out

use crate::config::Config;
use crate::error::Result;
use crate::header::HeaderExtractor;
use crate::layout::Reconstructor;
use crate::message::record_from_message_with;
use crate::types::{EmailHeaderRecord, PageExtraction, TextFragment};
use tracing::debug;

/// Reconstructs page text and extracts its header fields
///
/// Holds no per-page state, so one instance can serve any number of pages
/// (including from several threads).
#[derive(Debug, Clone, Default)]
pub struct PageExtractor {
    reconstructor: Reconstructor,
    extractor: HeaderExtractor,
}

impl PageExtractor {
    #[must_use]
    pub const fn new(reconstructor: Reconstructor, extractor: HeaderExtractor) -> Self {
        Self {
            reconstructor,
            extractor,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.layout.validate()?;
        let vocabulary = config.build_vocabulary()?;

        Ok(Self::new(
            Reconstructor::new(config.layout, vocabulary),
            HeaderExtractor::new(&config.extractor),
        ))
    }

    #[must_use]
    pub const fn reconstructor(&self) -> &Reconstructor {
        &self.reconstructor
    }

    #[must_use]
    pub fn extract_page(&self, fragments: &[TextFragment]) -> PageExtraction {
        let text = self.reconstructor.reconstruct(fragments);
        let record = self.extractor.extract(&text);
        PageExtraction { text, record }
    }

    /// Process pages independently, in order
    pub fn extract_pages<'a, I>(&self, pages: I) -> Vec<PageExtraction>
    where
        I: IntoIterator<Item = &'a [TextFragment]>,
    {
        let results: Vec<PageExtraction> = pages
            .into_iter()
            .map(|fragments| self.extract_page(fragments))
            .collect();

        debug!("Extracted headers from {} pages", results.len());

        results
    }

    /// Header record for a raw `.eml` message
    pub fn extract_message(&self, raw: &[u8]) -> Result<EmailHeaderRecord> {
        record_from_message_with(&self.extractor, raw)
    }
}

/// Header record for one page using the default configuration
#[must_use]
pub fn extract_page(fragments: &[TextFragment]) -> EmailHeaderRecord {
    PageExtractor::default().extract_page(fragments).record
}
