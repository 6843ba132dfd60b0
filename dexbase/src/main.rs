use dexbase::{Catalog, Species};

use std::fs;
use std::path::PathBuf;

/// Rewrites the embedded species data with every asset URL derived from its dex number.
fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt::init();

    let catalog = Catalog::embedded()?;

    let species: Vec<Species> = catalog
        .all()
        .iter()
        .map(|species| {
            Species::new(
                species.number,
                species.card_name.clone(),
                species.name.clone(),
                species.generation,
            )
        })
        .collect();

    let normalized = Catalog::new(species);

    for defect in normalized.validate() {
        log::warn!("{defect}");
    }

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("core/data/species.ron");

    fs::write(&path, normalized.to_ron()?)?;

    log::info!("Wrote {} species to {}", normalized.len(), path.display());

    Ok(())
}
