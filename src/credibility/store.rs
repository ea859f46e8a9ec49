use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::NepseError;

/// Pair counts for one domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredibilityStat {
    #[serde(default)]
    pub correct: u64,
    #[serde(default)]
    pub incorrect: u64,
    #[serde(default)]
    pub total_pairs: u64,
    /// `correct / total_pairs`, `0.0` without pairs.
    #[serde(default)]
    pub average_weight: f64,
}

impl CredibilityStat {
    pub fn recompute(&mut self) {
        self.average_weight = if self.total_pairs == 0 {
            0.0
        } else {
            (self.correct as f64 / self.total_pairs as f64).clamp(0.0, 1.0)
        };
    }
}

/// Domain → [`CredibilityStat`], the single source of truth between runs.
///
/// Read once at the start of an analysis pass and written once at the end.
/// Concurrent writers are not supported: the last save wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredibilityStore {
    stats: BTreeMap<String, CredibilityStat>,
}

impl CredibilityStore {
    /// Loads the store; a missing file is an empty store.
    ///
    /// Weights are recomputed from the counts, so a hand-edited file stays consistent.
    ///
    /// # Errors
    ///
    /// `NepseError::Io` if the file exists but cannot be read, `NepseError::Json` if
    /// it is not a domain-keyed object of stats.
    pub fn load(path: &Path) -> Result<Self, NepseError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no credibility store yet, starting empty");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let raw = raw.trim_start_matches('\u{feff}');
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut store: Self = serde_json::from_str(raw)?;
        store.recompute_all();
        tracing::info!(path = %path.display(), domains = store.len(), "credibility store loaded");
        Ok(store)
    }

    /// Writes the store as a 4-space indented JSON object, creating parent dirs.
    ///
    /// # Errors
    ///
    /// Propagates filesystem and encoding failures.
    pub fn save(&self, path: &Path) -> Result<(), NepseError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser)?;
        fs::write(path, buf)?;
        tracing::info!(path = %path.display(), domains = self.len(), "credibility store saved");
        Ok(())
    }

    /// Overwrites this store's entry for every domain present in `other`.
    pub fn merge(&mut self, other: Self) {
        for (domain, stat) in other.stats {
            self.stats.insert(domain, stat);
        }
    }

    pub fn get(&self, domain: &str) -> Option<&CredibilityStat> {
        self.stats.get(domain)
    }

    pub(crate) fn entry(&mut self, domain: &str) -> &mut CredibilityStat {
        self.stats.entry(domain.to_string()).or_default()
    }

    /// Weight of `domain`; `0.0` if the domain has never been seen.
    pub fn weight(&self, domain: &str) -> f64 {
        self.weight_or(domain, 0.0)
    }

    /// Weight of `domain`, or `default` if the domain has never been seen.
    pub fn weight_or(&self, domain: &str, default: f64) -> f64 {
        self.stats.get(domain).map_or(default, |s| s.average_weight)
    }

    pub fn recompute_all(&mut self) {
        self.stats.values_mut().for_each(CredibilityStat::recompute);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CredibilityStat)> {
        self.stats.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
