//! Reference data: listed securities and the localized name variants used to
//! recognise them in news text.
//!
//! The dictionary is immutable after construction. Declaration order matters:
//! the matcher returns the first entity (and, within it, the first variant)
//! that occurs in the text.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::core::NepseError;

const NEPSE_ENTITIES_JSON: &str = include_str!("nepse_entities.json");

static NEPSE: LazyLock<Arc<EntityDictionary>> = LazyLock::new(|| {
    Arc::new(EntityDictionary::from_json(NEPSE_ENTITIES_JSON).expect("embedded NEPSE dictionary is valid"))
});

/// A listed company or instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Canonical trading symbol, e.g. `NABIL`.
    pub symbol: String,
    /// English security name as published by the exchange.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Name variants in matching priority order (most specific first).
    pub variants: Vec<String>,
}

/// Ordered, symbol-unique collection of [`Entity`] records.
#[derive(Debug, Clone)]
pub struct EntityDictionary {
    entities: Vec<Entity>,
    by_symbol: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl EntityDictionary {
    /// The bundled dictionary of NEPSE securities with Devanagari variants.
    ///
    /// Built once per process and shared.
    pub fn nepse() -> Arc<Self> {
        Arc::clone(&NEPSE)
    }

    /// Builds a dictionary, keeping the given declaration order.
    ///
    /// # Errors
    ///
    /// Returns `NepseError::InvalidParams` if a symbol is empty or repeated.
    pub fn from_entities(entities: Vec<Entity>) -> Result<Self, NepseError> {
        let mut by_symbol = HashMap::with_capacity(entities.len());
        let mut by_name = HashMap::with_capacity(entities.len());

        for (idx, e) in entities.iter().enumerate() {
            if e.symbol.trim().is_empty() {
                return Err(NepseError::InvalidParams(format!(
                    "entity #{idx} ({}) has an empty symbol",
                    e.display_name
                )));
            }
            if by_symbol.insert(e.symbol.clone(), idx).is_some() {
                return Err(NepseError::InvalidParams(format!(
                    "duplicate symbol {}",
                    e.symbol
                )));
            }
            if e.variants.is_empty() {
                tracing::warn!(symbol = %e.symbol, "entity has no name variants and can never match");
            }
            by_name.entry(e.display_name.clone()).or_insert(idx);
        }

        Ok(Self {
            entities,
            by_symbol,
            by_name,
        })
    }

    /// Parses a JSON array of `{symbol, name, variants}` objects.
    ///
    /// # Errors
    ///
    /// Returns `NepseError::Json` for malformed input and the errors of
    /// [`EntityDictionary::from_entities`].
    pub fn from_json(json: &str) -> Result<Self, NepseError> {
        let entities: Vec<Entity> = serde_json::from_str(json)?;
        Self::from_entities(entities)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, symbol: &str) -> Option<&Entity> {
        self.by_symbol.get(symbol).map(|&i| &self.entities[i])
    }

    /// Symbol of the first entity declared with this display name.
    pub fn symbol_for_name(&self, display_name: &str) -> Option<&str> {
        self.by_name
            .get(display_name)
            .map(|&i| self.entities[i].symbol.as_str())
    }

    /// All symbols in declaration order.
    pub fn symbols(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.symbol.clone()).collect()
    }
}
