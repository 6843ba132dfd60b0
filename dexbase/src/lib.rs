pub mod error;
pub mod session;

pub use dexbase_core as core;
pub use dexbase_core::{Catalog, Generation, Search, Species, generation, species, validate};
pub use error::Error;
pub use session::{Image, Session};

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
