use crate::Species;

use std::fmt;
use std::sync::Arc;

/// The species matching a query, in catalog order.
pub struct Search {
    query: String,
    matches: Arc<[Species]>,
}

impl Search {
    pub fn new<'a>(query: &str, species: impl IntoIterator<Item = &'a Species>) -> Self {
        let query = query.trim().to_lowercase();

        let matches: Vec<_> = species
            .into_iter()
            .filter(|species| species.matches(&query))
            .cloned()
            .collect();

        Self {
            query,
            matches: matches.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[Species] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl Clone for Search {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            matches: self.matches.clone(),
        }
    }
}

impl fmt::Debug for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("query", &self.query)
            .field("matches", &self.matches.len())
            .finish()
    }
}
