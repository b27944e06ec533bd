//! Address normalization: abbreviation expansion over tagged components.
//!
//! Two tiers, in order of preference:
//!
//! 1. **Structured**: the tagger segments the address. Street addresses
//!    are rebuilt component by component with every word expanded; PO
//!    Boxes collapse to `"PO Box <id>"`.
//! 2. **Fallback**: when the tagger gives up (or returns something that
//!    is neither a street address nor a PO Box) the raw string is split on
//!    whitespace and each word is expanded on its own.
//!
//! Normalization never fails. The worst case is the input with its
//! whitespace collapsed.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use lead_cleaner_address_models::{Classification, ComponentLabel, TagOutcome};

use crate::abbreviations::{AbbreviationTables, lookup_key};
use crate::tagger::{AddressTagger, UsAddressTagger};

static DEFAULT_NORMALIZER: LazyLock<AddressNormalizer> = LazyLock::new(AddressNormalizer::default);

/// Normalizes `raw` with the standard tables and the US tagger.
#[must_use]
pub fn normalize(raw: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw)
}

/// Expands abbreviations in free-text addresses.
#[derive(Debug, Clone)]
pub struct AddressNormalizer<T = UsAddressTagger> {
    tables: Arc<AbbreviationTables>,
    tagger: T,
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        let tables = AbbreviationTables::standard();
        let tagger = UsAddressTagger::new(Arc::clone(&tables));
        Self { tables, tagger }
    }
}

impl<T: AddressTagger> AddressNormalizer<T> {
    /// Creates a normalizer from explicit tables and tagger.
    #[must_use]
    pub const fn new(tables: Arc<AbbreviationTables>, tagger: T) -> Self {
        Self { tables, tagger }
    }

    /// Normalizes one address.
    ///
    /// Empty and whitespace-only input yields an empty string.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        match self.tagger.tag(raw) {
            TagOutcome::Parsed {
                components,
                classification: Classification::StreetAddress,
            } => components
                .iter()
                .map(|c| self.expand_words(&c.text))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            outcome @ TagOutcome::Parsed {
                classification: Classification::PoBox,
                ..
            } => match outcome.component(ComponentLabel::UspsBoxId) {
                Some(id) => format!("PO Box {id}"),
                None => {
                    log::debug!("PO Box without a box id, falling back: {raw:?}");
                    self.expand_words(raw)
                }
            },
            TagOutcome::Parsed { classification, .. } => {
                log::debug!("Unsupported classification {classification}, falling back: {raw:?}");
                self.expand_words(raw)
            }
            TagOutcome::Unparseable { reason } => {
                log::debug!("Tagger gave up ({reason}), falling back: {raw:?}");
                self.expand_words(raw)
            }
        }
    }

    /// Splits `text` on whitespace and expands each word independently.
    ///
    /// This is the fallback path, and also how each tagged component is
    /// expanded.
    #[must_use]
    pub fn expand_words(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.expand_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Expands a single word.
    ///
    /// Punctuation is stripped and the word uppercased only to build the
    /// lookup key. A word with no expansion is returned exactly as given.
    #[must_use]
    pub fn expand_word<'a>(&'a self, word: &'a str) -> Cow<'a, str> {
        let key = lookup_key(word);
        if key.is_empty() {
            return Cow::Borrowed(word);
        }
        self.tables
            .lookup(&key)
            .map_or(Cow::Borrowed(word), Cow::Borrowed)
    }
}
