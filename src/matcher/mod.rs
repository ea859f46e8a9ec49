//! Company matcher: finds which listed entity a piece of free text talks about.
//!
//! Every `(entity, variant)` pair is compiled once, in declaration order, into a
//! single [`RegexSet`] of escaped literals. One scan over the normalized text
//! reports every variant that occurs; the lowest declared index wins, which is
//! exactly the answer a nested "for each entity, for each variant" loop with
//! early exit would give.

use std::sync::Arc;

use regex::{Regex, RegexSet};
use unicode_normalization::UnicodeNormalization;

use crate::core::NepseError;
use crate::entities::EntityDictionary;

/// Confidence reported for any successful match.
pub const FULL_CONFIDENCE: u8 = 100;

/// Case-folds, trims and applies canonical decomposition (NFKD).
///
/// Text and variants go through the same function so they compare byte for byte.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().nfkd().collect()
}

/// How the winning variant occurred in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Whole-word occurrence (word boundaries on both sides).
    Word,
    /// Plain substring containment, e.g. the variant carries a Nepali case suffix.
    Substring,
}

/// Dominant script of a text, logged for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Devanagari,
    Latin,
    Mixed,
    Unknown,
}

/// Counts Devanagari and Latin letters; whichever holds at least 80% wins.
pub fn detect_script(text: &str) -> Script {
    let (mut deva, mut latin) = (0usize, 0usize);
    for c in text.chars() {
        if ('\u{0900}'..='\u{097F}').contains(&c) {
            deva += 1;
        } else if c.is_ascii_alphabetic() {
            latin += 1;
        }
    }
    let total = deva + latin;
    if total == 0 {
        Script::Unknown
    } else if deva * 5 >= total * 4 {
        Script::Devanagari
    } else if latin * 5 >= total * 4 {
        Script::Latin
    } else {
        Script::Mixed
    }
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyMatch {
    pub symbol: String,
    pub display_name: String,
    /// The normalized variant that matched.
    pub variant: String,
    pub kind: MatchKind,
    pub confidence: u8,
}

/// A variant that can never be reported because an earlier-declared variant
/// of a different entity is contained in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedVariant {
    pub symbol: String,
    pub variant: String,
    pub shadowed_by_symbol: String,
    pub shadowed_by_variant: String,
}

#[derive(Debug)]
struct VariantEntry {
    entity: usize,
    variant: String,
    boundary: Regex,
}

/// Compiled, read-only matcher over an [`EntityDictionary`].
///
/// Safe to share across threads; wrap in an `Arc` for concurrent classification.
#[derive(Debug)]
pub struct CompanyMatcher {
    entities: Vec<(String, String)>,
    entries: Vec<VariantEntry>,
    set: RegexSet,
}

impl CompanyMatcher {
    /// Compiles every variant of `dictionary`.
    ///
    /// Variants that normalize to an empty string are skipped (they would match
    /// any text).
    ///
    /// # Errors
    ///
    /// Returns `NepseError::Pattern` if the search set cannot be built.
    pub fn new(dictionary: &EntityDictionary) -> Result<Self, NepseError> {
        let mut entities = Vec::with_capacity(dictionary.len());
        let mut entries = Vec::new();

        for (idx, entity) in dictionary.iter().enumerate() {
            entities.push((entity.symbol.clone(), entity.display_name.clone()));
            for raw in &entity.variants {
                let variant = normalize(raw);
                if variant.is_empty() {
                    tracing::warn!(symbol = %entity.symbol, "skipping empty name variant");
                    continue;
                }
                let boundary = Regex::new(&format!(r"\b{}\b", regex::escape(&variant)))?;
                entries.push(VariantEntry {
                    entity: idx,
                    variant,
                    boundary,
                });
            }
        }

        let set = RegexSet::new(entries.iter().map(|e| regex::escape(&e.variant)))?;
        tracing::debug!(
            entities = entities.len(),
            variants = entries.len(),
            "company matcher compiled"
        );

        Ok(Self {
            entities,
            entries,
            set,
        })
    }

    /// Matcher over the bundled NEPSE dictionary.
    ///
    /// # Errors
    ///
    /// See [`CompanyMatcher::new`].
    pub fn nepse() -> Result<Arc<Self>, NepseError> {
        Self::new(&EntityDictionary::nepse()).map(Arc::new)
    }

    /// Number of compiled variants.
    pub fn variant_count(&self) -> usize {
        self.entries.len()
    }

    /// Finds the first declared entity whose variant occurs in `text`.
    pub fn find(&self, text: &str) -> Option<CompanyMatch> {
        let content = normalize(text);
        if content.is_empty() {
            return None;
        }
        tracing::trace!(script = ?detect_script(&content), "matching text");

        let idx = self.set.matches(&content).iter().next()?;
        let entry = &self.entries[idx];
        let (symbol, display_name) = &self.entities[entry.entity];
        let kind = if entry.boundary.is_match(&content) {
            MatchKind::Word
        } else {
            MatchKind::Substring
        };

        Some(CompanyMatch {
            symbol: symbol.clone(),
            display_name: display_name.clone(),
            variant: entry.variant.clone(),
            kind,
            confidence: FULL_CONFIDENCE,
        })
    }

    /// `(symbol, confidence)`; `(None, 0)` when nothing matches.
    pub fn match_text(&self, text: &str) -> (Option<String>, u8) {
        match self.find(text) {
            Some(m) => (Some(m.symbol), m.confidence),
            None => (None, 0),
        }
    }

    /// Variants that lose to an earlier variant of another entity.
    ///
    /// Reported, not corrected: the first declared match always wins.
    pub fn shadowed_variants(&self) -> Vec<ShadowedVariant> {
        let mut out = Vec::new();
        for (j, later) in self.entries.iter().enumerate() {
            let Some(earlier) = self.entries[..j]
                .iter()
                .find(|e| later.variant.contains(e.variant.as_str()))
            else {
                continue;
            };
            if earlier.entity != later.entity {
                out.push(ShadowedVariant {
                    symbol: self.entities[later.entity].0.clone(),
                    variant: later.variant.clone(),
                    shadowed_by_symbol: self.entities[earlier.entity].0.clone(),
                    shadowed_by_variant: earlier.variant.clone(),
                });
            }
        }
        out
    }
}
