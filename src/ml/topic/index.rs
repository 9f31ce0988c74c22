use std::collections::HashMap;
use std::hash::Hash;

/// A stable bijection between raw identifiers and dense indices `0..len`.
///
/// Indices are handed out in first-seen order and never change once assigned.
#[derive(Debug, Clone)]
pub struct IdIndex<K> {
    ids: Vec<K>,
    lookup: HashMap<K, usize>,
}

impl<K> Default for IdIndex<K> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<K> IdIndex<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `id`, registering it first if it is new.
    pub fn insert(&mut self, id: K) -> usize {
        if let Some(&index) = self.lookup.get(&id) {
            return index;
        }
        let index = self.ids.len();
        self.ids.push(id.clone());
        self.lookup.insert(id, index);
        index
    }

    /// Dense index of `id`, if it was registered.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    /// Raw identifier registered at `index`.
    pub fn id_of(&self, index: usize) -> Option<&K> {
        self.ids.get(index)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Raw identifiers in index order.
    pub fn ids(&self) -> &[K] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut index = IdIndex::new();
        assert_eq!(index.insert("b"), 0);
        assert_eq!(index.insert("a"), 1);
        assert_eq!(index.insert("b"), 0);
        assert_eq!(index.len(), 2);
        assert_eq!(index.ids(), &["b", "a"]);
    }

    #[test]
    fn test_round_trip_lookup() {
        let mut index = IdIndex::new();
        for id in ["x", "y", "z"] {
            index.insert(id.to_string());
        }
        for i in 0..index.len() {
            let id = index.id_of(i).unwrap();
            assert_eq!(index.index_of(id), Some(i));
        }
        assert_eq!(index.index_of(&"missing".to_string()), None);
        assert_eq!(index.id_of(3), None);
    }
}
