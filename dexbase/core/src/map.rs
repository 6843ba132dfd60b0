use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An ordered slice of values indexed by a key derived from each value.
///
/// Cloning is cheap; all clones share the same values.
#[derive(Debug)]
pub struct Map<K, V>(Arc<Inner<K, V>>);

#[derive(Debug)]
struct Inner<K, V> {
    entries: BTreeMap<K, usize>,
    values: Arc<[V]>,
}

impl<K, V> Map<K, V> {
    /// Indexes `values` by `to_key`, keeping their order.
    ///
    /// When two values share a key, the first one wins.
    pub fn new(values: impl Into<Arc<[V]>>, to_key: impl Fn(&V) -> K) -> Self
    where
        K: Ord,
    {
        let values = values.into();
        let mut entries = BTreeMap::new();

        for (i, value) in values.iter().enumerate() {
            let _ = entries.entry(to_key(value)).or_insert(i);
        }

        Self(Arc::new(Inner { entries, values }))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        Some(&self.0.values[self.position(key)?])
    }

    /// The index of the value stored under `key`.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.0.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values.is_empty()
    }

    pub fn values(&self) -> &[V] {
        &self.0.values
    }

    /// Builds a second index over the same values.
    pub fn reindex<J>(&self, to_key: impl Fn(&V) -> J) -> Map<J, V>
    where
        J: Ord,
    {
        Map::new(self.0.values.clone(), to_key)
    }
}

impl<K, V> Clone for Map<K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_keeps_order() {
        let map = Map::new(vec!["charmander", "bulbasaur", "squirtle"], |name| {
            name.len()
        });

        assert_eq!(map.values(), ["charmander", "bulbasaur", "squirtle"]);
        assert_eq!(map.get(&9), Some(&"bulbasaur"));
        assert_eq!(map.position(&10), Some(0));
        assert_eq!(map.get(&3), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let map = Map::new(vec![(1, "farfetch"), (1, "farfetchd")], |(n, _)| *n);

        assert_eq!(map.get(&1), Some(&(1, "farfetch")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn reindex_shares_values() {
        let map = Map::new(vec![(25, "pikachu".to_owned())], |(n, _)| *n);
        let by_name = map.reindex(|(_, name)| name.clone());

        assert_eq!(by_name.get("pikachu").map(|(n, _)| *n), Some(25));
        assert!(std::ptr::eq(map.values(), by_name.values()));
    }
}
