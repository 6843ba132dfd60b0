mod command;
mod config;

use crate::command::{Command, CommandLine, Format};
use crate::config::Config;

use dexbase::{Catalog, Generation, Session, Species};

use anywho::anywho;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let commands = CommandLine::parse_args();
    let catalog = Catalog::load().await?;

    match commands.command {
        Command::List { generation } => {
            if let Some(generation) = generation.and_then(Generation::new) {
                println!("{generation}");
            }

            for species in select(&catalog, generation) {
                println!("{species}");
            }

            Ok(())
        }
        Command::Show { species } => {
            let species = find(&catalog, &species)?;

            show(species);
            Ok(())
        }
        Command::Search { query } => {
            let search = catalog.search(&query);

            if search.is_empty() {
                println!("No species match \"{}\"", search.query());
            }

            for species in search.matches() {
                println!("{species}");
            }

            Ok(())
        }
        Command::Export { format, output } => {
            let contents = match format {
                Format::Json => catalog.to_json()?,
                Format::Ron => catalog.to_ron()?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, contents).await?;
                    log::info!("Exported {} species to {}", catalog.len(), path.display());
                }
                None => println!("{contents}"),
            }

            Ok(())
        }
        Command::Validate => {
            let defects = catalog.validate();

            for defect in &defects {
                println!("{defect}");
            }

            if defects.is_empty() {
                println!("{} species, no defects", catalog.len());
                Ok(())
            } else {
                Err(anywho!("found {} defects", defects.len()))
            }
        }
        Command::Fetch {
            species,
            asset,
            output,
        } => {
            let species = find(&catalog, &species)?;
            let session = session(&apply_flags(
                Config::load().await?,
                commands.retries,
                commands.timeout,
                commands.no_cache,
            ))?;

            let image = session.download(species, asset).await?;
            write(&output, &image.bytes).await?;

            println!("{species}: {asset} saved to {}", output.display());
            Ok(())
        }
        Command::Mirror {
            generation,
            asset,
            output,
            concurrency,
        } => {
            let species = select(&catalog, generation);
            let session = session(&apply_flags(
                Config::load().await?,
                commands.retries,
                commands.timeout,
                commands.no_cache,
            ))?;

            let images = session.download_all(species, asset, concurrency).await;
            let mut failed = 0;

            for (species, image) in species.iter().zip(images) {
                match image {
                    Ok(image) => write(&mirror_path(&output, species), &image.bytes).await?,
                    Err(error) => {
                        log::warn!("{species}: {error}");
                        failed += 1;
                    }
                }
            }

            println!(
                "{} of {} {asset} images saved to {}",
                species.len() - failed,
                species.len(),
                output.display()
            );

            if failed == 0 {
                Ok(())
            } else {
                Err(anywho!("{failed} downloads failed"))
            }
        }
    }
}

fn select(catalog: &Catalog, generation: Option<u8>) -> &[Species] {
    match generation.and_then(Generation::new) {
        Some(generation) => catalog.generation(generation),
        None => catalog.all(),
    }
}

fn mirror_path(output: &Path, species: &Species) -> PathBuf {
    output.join(format!("{}.png", species.number))
}

fn find<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Species, anywho::Error> {
    catalog
        .find(key)
        .ok_or_else(|| dexbase::Error::SpeciesNotFound(key.to_owned()).into())
}

fn show(species: &Species) {
    println!("{species}");
    println!("  slug:          {}", species.name);
    println!("  card name:     {}", species.card_name);
    println!("  generation:    {}", species.generation);
    println!("  sprite:        {}", species.sprite);
    println!("  sprite shiny:  {}", species.sprite_shiny);
    println!("  artwork:       {}", species.artwork);
    println!("  artwork shiny: {}", species.artwork_shiny);
}

fn apply_flags(
    mut config: Config,
    retries: Option<usize>,
    timeout: Option<u64>,
    no_cache: bool,
) -> Config {
    if let Some(retries) = retries {
        config.retries = retries;
    }

    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }

    if no_cache {
        config.cache = None;
    }

    config
}

fn session(config: &Config) -> Result<Session, anywho::Error> {
    let timeout = config.timeout().max(Duration::from_secs(1));

    Ok(Session::new(config.retries, config.cache.clone()).with_timeout(timeout)?)
}

async fn write(path: &Path, bytes: &[u8]) -> Result<(), anywho::Error> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    fs::write(path, bytes).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config = apply_flags(Config::default(), Some(7), Some(20), true);

        assert_eq!(config.retries, 7);
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.cache, None);
    }

    #[test]
    fn config_is_kept_without_flags() {
        let config = apply_flags(Config::default(), None, None, false);

        assert_eq!(config, Config::default());
    }

    #[test]
    fn select_by_generation() {
        let catalog = Catalog::get();

        assert_eq!(select(catalog, None).len(), 1025);
        assert_eq!(select(catalog, Some(2)).first().unwrap().name, "chikorita");
        assert_eq!(select(catalog, Some(2)).len(), 100);
    }

    #[test]
    fn mirror_files_are_named_by_number() {
        let mew = Catalog::get().find("mew").unwrap();

        assert_eq!(
            mirror_path(Path::new("kanto"), mew),
            PathBuf::from("kanto/151.png")
        );
    }

    #[test]
    fn unknown_species() {
        let catalog = Catalog::get();

        assert!(find(catalog, "missingno").is_err());
        assert_eq!(find(catalog, "mr-mime").unwrap().number.get(), 122);
    }
}
