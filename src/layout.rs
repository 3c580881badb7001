//! Reading-order reconstruction of positioned PDF text
//!
//! PDF content streams often emit one fragment per glyph, in whatever order
//! the producer chose, with no explicit space characters. This module puts
//! fragments back into top-to-bottom, left-to-right order, infers word
//! breaks from the horizontal gaps between fragments and then cleans up the
//! spacing artifacts that inference leaves behind.

use crate::error::{ParseError, Result};
use crate::types::TextFragment;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Geometric thresholds for line grouping and word-break inference
///
/// All values are in page coordinate units. They are empirical and tuned
/// for common body fonts at typical point sizes; other PDF producers may
/// need different values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum vertical distance for two fragments to share a line
    pub line_tolerance: f64,

    /// Estimated advance width of one character
    pub char_width: f64,

    /// Gap above which a fragment is visually well separated (two spaces)
    pub wide_gap: f64,

    /// Gap above which a fragment starts a new word (one space)
    pub word_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 5.0,
            char_width: 3.0,
            wide_gap: 15.0,
            word_gap: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Check that all thresholds are usable
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("line_tolerance", self.line_tolerance),
            ("char_width", self.char_width),
            ("wide_gap", self.wide_gap),
            ("word_gap", self.word_gap),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ParseError::InvalidConfig {
                    field: field.into(),
                    details: format!("expected a finite non-negative number, got {value}"),
                });
            }
        }

        if self.word_gap > self.wide_gap {
            return Err(ParseError::InvalidConfig {
                field: "word_gap".into(),
                details: format!(
                    "word_gap ({}) must not exceed wide_gap ({})",
                    self.word_gap, self.wide_gap
                ),
            });
        }

        Ok(())
    }

    /// Separator to insert between two neighbouring fragments on one line
    #[must_use]
    pub fn separator(&self, previous: &TextFragment, current: &TextFragment) -> &'static str {
        #[allow(clippy::cast_precision_loss)]
        let expected_x = self.char_width.mul_add(previous.char_count() as f64, previous.x);
        let gap = current.x - expected_x;

        if gap > self.wide_gap {
            "  "
        } else if gap > self.word_gap {
            " "
        } else {
            ""
        }
    }
}

/// Words that are regularly split into spaced-out letters by glyph-level
/// extraction and are worth stitching back together.
const DEFAULT_WORDS: &[&str] = &[
    // Field labels
    "From", "To", "Date", "Subject", "Sent", "Cc",
    // Months
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
    "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec",
    // Days
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun",
    "GMT",
];

static DEFAULT_VOCABULARY: LazyLock<Vocabulary> =
    LazyLock::new(|| Vocabulary::new(DEFAULT_WORDS.iter().copied()).unwrap());

#[derive(Debug, Clone)]
struct VocabularyEntry {
    word: String,
    pattern: Regex,
}

/// Known-word corrections applied after geometric spacing
///
/// Each word matches when its letters appear separated by horizontal
/// whitespace (`M a r c h`) at a token boundary, and is replaced by the
/// unspaced word. Corpus-specific proper nouns belong here rather than in
/// the reconstruction logic.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.clone()
    }
}

impl Vocabulary {
    /// Build a vocabulary from words; phrases are split into their words
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::empty().extend(words)
    }

    /// A vocabulary that corrects nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add more words, keeping longer words ahead of shorter ones
    pub fn extend<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in words {
            for word in phrase.as_ref().split_whitespace() {
                if word.chars().count() < 2 || self.contains(word) {
                    continue;
                }
                self.entries.push(VocabularyEntry {
                    word: word.to_string(),
                    pattern: spaced_word_pattern(word)?,
                });
            }
        }

        // An abbreviation must not swallow the start of a longer spaced word
        self.entries.sort_by(|a, b| {
            b.word
                .chars()
                .count()
                .cmp(&a.word.chars().count())
                .then_with(|| a.word.cmp(&b.word))
        });

        Ok(self)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|e| e.word == word)
    }

    /// Words in the order they are applied
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collapse spaced-out occurrences of every known word
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for entry in &self.entries {
            result = entry
                .pattern
                .replace_all(&result, NoExpand(&entry.word))
                .into_owned();
        }
        result
    }
}

fn spaced_word_pattern(word: &str) -> Result<Regex> {
    let letters: Vec<String> = word
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    let pattern = format!(r"\b{}\b", letters.join(r"[^\S\n]+"));

    Regex::new(&pattern).map_err(|e| ParseError::Vocabulary {
        word: word.to_string(),
        details: e.to_string(),
    })
}

// Cleanup patterns. Only horizontal whitespace is touched so line breaks survive.
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());

static LINE_EDGE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]*\n[^\S\n]*").unwrap());

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+([:.,)!?])").unwrap());

static SPACE_AFTER_OPEN_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^\S\n]+").unwrap());

static SPACE_AROUND_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]*@[^\S\n]*").unwrap());

static SPACE_IN_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^\S\n]+([a-z])").unwrap());

/// Remove spacing artifacts from reconstructed text
///
/// Running this on its own output changes nothing.
#[must_use]
pub fn clean_text(text: &str, vocabulary: &Vocabulary) -> String {
    let text = HORIZONTAL_SPACE.replace_all(text, " ");
    let text = LINE_EDGE_SPACE.replace_all(&text, "\n");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    let text = SPACE_AFTER_OPEN_PAREN.replace_all(&text, "(");
    let text = SPACE_AROUND_AT.replace_all(&text, "@");
    let text = SPACE_IN_DOMAIN.replace_all(&text, ".$1");
    let text = vocabulary.apply(&text);

    text.trim().to_string()
}

/// Rebuilds reading-order text from unordered fragments
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    config: LayoutConfig,
    vocabulary: Vocabulary,
}

impl Reconstructor {
    #[must_use]
    pub const fn new(config: LayoutConfig, vocabulary: Vocabulary) -> Self {
        Self { config, vocabulary }
    }

    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Group fragments into lines, top of the page first, each left to right
    #[must_use]
    pub fn lines<'a>(&self, fragments: &'a [TextFragment]) -> Vec<Vec<&'a TextFragment>> {
        let mut sorted: Vec<&TextFragment> = fragments.iter().collect();
        sorted.sort_by(|a, b| {
            b.y.total_cmp(&a.y)
                .then(a.x.total_cmp(&b.x))
                .then_with(|| a.text.cmp(&b.text))
        });

        let mut lines: Vec<Vec<&TextFragment>> = Vec::new();
        let mut line_top = f64::NAN;

        for fragment in sorted {
            match lines.last_mut() {
                Some(line) if (line_top - fragment.y).abs() <= self.config.line_tolerance => {
                    line.push(fragment);
                }
                _ => {
                    line_top = fragment.y;
                    lines.push(vec![fragment]);
                }
            }
        }

        for line in &mut lines {
            line.sort_by(|a, b| {
                a.x.total_cmp(&b.x)
                    .then(b.y.total_cmp(&a.y))
                    .then_with(|| a.text.cmp(&b.text))
            });
        }

        lines
    }

    /// Join fragments with inferred spacing and line breaks, without cleanup
    #[must_use]
    pub fn layout(&self, fragments: &[TextFragment]) -> String {
        let lines = self.lines(fragments);
        let mut result = String::new();

        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                result.push('\n');
            }

            let mut previous: Option<&TextFragment> = None;
            for fragment in line {
                if let Some(prev) = previous {
                    result.push_str(self.config.separator(prev, fragment));
                }
                result.push_str(&fragment.text);
                previous = Some(fragment);
            }
        }

        debug!(
            "Laid out {} fragments on {} lines",
            fragments.len(),
            lines.len()
        );

        result
    }

    /// Reading-order text with spacing artifacts cleaned up
    #[must_use]
    pub fn reconstruct(&self, fragments: &[TextFragment]) -> String {
        clean_text(&self.layout(fragments), &self.vocabulary)
    }
}

/// Reconstruct text with the default thresholds and vocabulary
#[must_use]
pub fn reconstruct(fragments: &[TextFragment]) -> String {
    Reconstructor::default().reconstruct(fragments)
}
