use dashmap::DashSet;

/// Set of article ids that have already been emitted.
///
/// Implementations must be safe to call from many workers at once; `insert`
/// is the single point of truth for "who emits this id".
pub trait SeenStore: Send + Sync {
    fn contains(&self, id: &str) -> bool;

    /// Records `id`; returns `false` if it was already present.
    fn insert(&self, id: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every id.
    fn clear(&self);
}

/// In-memory seen set. Lives as long as the process unless checkpointed by the caller.
#[derive(Debug, Default)]
pub struct SeenIds {
    ids: DashSet<String>,
}

impl SeenIds {
    /// Seeds the set, e.g. from ids already persisted in news files.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = DashSet::new();
        for id in ids {
            set.insert(id.into());
        }
        Self { ids: set }
    }
}

impl SeenStore for SeenIds {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn insert(&self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn clear(&self) {
        self.ids.clear();
    }
}
