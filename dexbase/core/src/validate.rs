//! Integrity checks over a sequence of species.
//!
//! The embedded catalog is expected to pass every check. Any [`Defect`] is a
//! data-authoring mistake, never a runtime condition.
use crate::species::{Asset, Number};
use crate::{Generation, Species};

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Defect {
    #[error("#{0} appears more than once")]
    DuplicateNumber(Number),
    #[error("expected #{expected} at position {position}, found #{found}")]
    OutOfSequence {
        position: usize,
        expected: u32,
        found: Number,
    },
    #[error("#{number} has a {asset} url that does not match: {url}")]
    UrlMismatch {
        number: Number,
        asset: Asset,
        url: String,
    },
    #[error("#{number} goes back to {generation} after {previous}")]
    GenerationRegressed {
        number: Number,
        generation: Generation,
        previous: Generation,
    },
    #[error("#{number} is not part of {generation}")]
    GenerationMismatch {
        number: Number,
        generation: Generation,
    },
    #[error("#{number} has a malformed slug: {name:?}")]
    MalformedName { number: Number, name: String },
    #[error("#{number} has a malformed card name: {card_name:?}")]
    MalformedCardName { number: Number, card_name: String },
}

/// Runs every check over `species`, in order, and collects what fails.
pub fn check(species: &[Species]) -> Vec<Defect> {
    let mut defects = Vec::new();
    let mut seen = BTreeSet::new();
    let mut previous: Option<Generation> = None;

    for (position, species) in species.iter().enumerate() {
        let number = species.number;

        if !seen.insert(number) {
            defects.push(Defect::DuplicateNumber(number));
        }

        let expected = position as u32 + 1;

        if number.get() != expected {
            defects.push(Defect::OutOfSequence {
                position,
                expected,
                found: number,
            });
        }

        for asset in Asset::ALL {
            let url = species.asset(asset);

            if url != asset.url(number) {
                defects.push(Defect::UrlMismatch {
                    number,
                    asset,
                    url: url.to_owned(),
                });
            }
        }

        if let Some(previous) = previous.filter(|previous| species.generation < *previous) {
            defects.push(Defect::GenerationRegressed {
                number,
                generation: species.generation,
                previous,
            });
        }

        if Generation::of(number) != Some(species.generation) {
            defects.push(Defect::GenerationMismatch {
                number,
                generation: species.generation,
            });
        }

        previous = Some(species.generation);

        if !is_slug(&species.name) {
            defects.push(Defect::MalformedName {
                number,
                name: species.name.clone(),
            });
        }

        if !is_card_name(&species.card_name) {
            defects.push(Defect::MalformedCardName {
                number,
                card_name: species.card_name.clone(),
            });
        }
    }

    defects
}

/// Lowercase ASCII words joined by single hyphens.
pub fn is_slug(name: &str) -> bool {
    name.split('-').all(|word| {
        !word.is_empty()
            && word
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    })
}

fn is_card_name(card_name: &str) -> bool {
    !card_name.is_empty()
        && card_name.trim() == card_name
        && !card_name.chars().any(char::is_uppercase)
}
