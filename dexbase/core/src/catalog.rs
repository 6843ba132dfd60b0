use crate::species::Number;
use crate::validate::{self, Defect};
use crate::{Generation, Map, Search, Species};

use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::OnceLock;

static SPECIES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/species.ron.gz"));

/// Every known species, ordered by dex number.
///
/// A catalog never changes after it is built. Clones share the same records.
#[derive(Clone)]
pub struct Catalog {
    by_number: Map<Number, Species>,
    by_name: Map<String, Species>,
}

impl Catalog {
    /// The embedded catalog, decoded on first access.
    pub fn get() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();

        CATALOG.get_or_init(|| Self::embedded().expect("Catalog is corrupt! Decoding failed."))
    }

    /// Decodes a fresh copy of the embedded catalog.
    pub fn embedded() -> Result<Self, anywho::Error> {
        let species: Vec<Species> = decompress(SPECIES)?;

        log::info!("Loaded catalog with {} species", species.len());

        Ok(Self::new(species))
    }

    /// Decodes the embedded catalog without blocking the async runtime.
    pub async fn load() -> Result<Self, anywho::Error> {
        use tokio::task;

        task::spawn_blocking(Self::embedded).await?
    }

    /// Builds a catalog from records that are already in dex order.
    pub fn new(species: impl Into<Vec<Species>>) -> Self {
        let by_number = Map::new(species.into(), |species| species.number);
        let by_name = by_number.reindex(|species| species.name.clone());

        Self { by_number, by_name }
    }

    pub fn all(&self) -> &[Species] {
        self.by_number.values()
    }

    pub fn by_number(&self, number: Number) -> Option<&Species> {
        self.by_number.get(&number)
    }

    /// Looks up a species by its slug, e.g. `mr-mime`.
    pub fn by_name(&self, name: &str) -> Option<&Species> {
        self.by_name.get(name)
    }

    /// Resolves either a dex number or a slug.
    pub fn find(&self, key: &str) -> Option<&Species> {
        let key = key.trim();

        match key.parse::<u32>() {
            Ok(number) => self.by_number(Number::new(number)?),
            Err(_) => self.by_name(&key.to_lowercase()),
        }
    }

    /// The species introduced by `generation`.
    pub fn generation(&self, generation: Generation) -> &[Species] {
        let all = self.all();

        let start = all.partition_point(|species| species.generation < generation);
        let end = all.partition_point(|species| species.generation <= generation);

        &all[start..end]
    }

    pub fn search(&self, query: &str) -> Search {
        Search::new(query, self.all())
    }

    pub fn first(&self) -> Option<&Species> {
        self.all().first()
    }

    pub fn last(&self) -> Option<&Species> {
        self.all().last()
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    pub fn validate(&self) -> Vec<Defect> {
        validate::check(self.all())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.all())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let species: Vec<Species> = serde_json::from_str(json)?;

        Ok(Self::new(species))
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self.all(), ron::ser::PrettyConfig::default())
    }

    pub fn from_ron(ron: &str) -> Result<Self, ron::error::SpannedError> {
        let species: Vec<Species> = ron::de::from_str(ron)?;

        Ok(Self::new(species))
    }
}

fn decompress<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, anywho::Error> {
    use flate2::read::GzDecoder;

    let decoder = GzDecoder::new(bytes);

    Ok(ron::de::from_reader(decoder)?)
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("species", &self.len())
            .finish()
    }
}
