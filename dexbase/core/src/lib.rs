mod catalog;
mod map;
mod search;

pub mod generation;
pub mod species;
pub mod validate;

pub use catalog::Catalog;
pub use generation::Generation;
pub use map::Map;
pub use search::Search;
pub use species::Species;

/// Every species of the embedded catalog, ordered by dex number.
pub fn all() -> &'static [Species] {
    Catalog::get().all()
}
