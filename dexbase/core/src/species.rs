use crate::Generation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every asset URL starts with this host and path.
pub const ASSET_HOST: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/";

/// A single entry of the catalog.
///
/// The serialized field names are part of the public shape of the catalog and
/// must not change; `cardName` keeps its camel case on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub number: Number,
    #[serde(rename = "cardName")]
    pub card_name: String,
    pub name: String,
    pub generation: Generation,
    pub sprite: String,
    pub sprite_shiny: String,
    pub artwork: String,
    pub artwork_shiny: String,
}

impl Species {
    /// Builds a record with its four asset URLs derived from `number`.
    pub fn new(
        number: Number,
        card_name: impl Into<String>,
        name: impl Into<String>,
        generation: Generation,
    ) -> Self {
        Self {
            number,
            card_name: card_name.into(),
            name: name.into(),
            generation,
            sprite: Asset::Sprite.url(number),
            sprite_shiny: Asset::SpriteShiny.url(number),
            artwork: Asset::Artwork.url(number),
            artwork_shiny: Asset::ArtworkShiny.url(number),
        }
    }

    pub fn asset(&self, asset: Asset) -> &str {
        match asset {
            Asset::Sprite => &self.sprite,
            Asset::SpriteShiny => &self.sprite_shiny,
            Asset::Artwork => &self.artwork,
            Asset::ArtworkShiny => &self.artwork_shiny,
        }
    }

    /// The card name in title case, e.g. `Mr. Mime` or `Ho-Oh`.
    pub fn display_name(&self) -> String {
        let mut name = String::with_capacity(self.card_name.len());
        let mut capitalize = true;

        for c in self.card_name.chars() {
            if capitalize {
                name.extend(c.to_uppercase());
            } else {
                name.push(c);
            }

            capitalize = c == ' ' || c == '-';
        }

        name
    }

    /// Whether the slug or the card name contains `query`, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();

        self.name.contains(&query) || self.card_name.contains(&query)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04} {}", self.number.get(), self.display_name())
    }
}

/// A National Pokédex number. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Number(pub(crate) u32);

impl Number {
    pub fn new(number: u32) -> Option<Self> {
        (number >= 1).then_some(Self(number))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Number {
    type Error = String;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| format!("invalid dex number: {number}"))
    }
}

impl From<Number> for u32 {
    fn from(number: Number) -> Self {
        number.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One of the four images hosted for every species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    Sprite,
    SpriteShiny,
    Artwork,
    ArtworkShiny,
}

impl Asset {
    pub const ALL: [Asset; 4] = [
        Asset::Sprite,
        Asset::SpriteShiny,
        Asset::Artwork,
        Asset::ArtworkShiny,
    ];

    /// The subdirectory of [`ASSET_HOST`] holding this kind of image.
    pub fn directory(self) -> &'static str {
        match self {
            Asset::Sprite => "",
            Asset::SpriteShiny => "shiny/",
            Asset::Artwork => "other/official-artwork/",
            Asset::ArtworkShiny => "other/official-artwork/shiny/",
        }
    }

    pub fn url(self, number: Number) -> String {
        format!("{ASSET_HOST}{}{number}.png", self.directory())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Asset::Sprite => "sprite",
            Asset::SpriteShiny => "sprite-shiny",
            Asset::Artwork => "artwork",
            Asset::ArtworkShiny => "artwork-shiny",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset: {0} (expected sprite, sprite-shiny, artwork or artwork-shiny)")]
pub struct ParseAssetError(String);

impl FromStr for Asset {
    type Err = ParseAssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Asset::ALL
            .into_iter()
            .find(|asset| asset.as_str() == s || asset.as_str().replace('-', "_") == s)
            .ok_or_else(|| ParseAssetError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: u32) -> Number {
        Number::new(n).unwrap()
    }

    #[test]
    fn zero_is_not_a_dex_number() {
        assert_eq!(Number::new(0), None);
        assert!(serde_json::from_str::<Number>("0").is_err());
        assert_eq!(serde_json::from_str::<Number>("7").unwrap(), number(7));
    }

    #[test]
    fn asset_urls_only_differ_in_directory() {
        assert_eq!(
            Asset::Sprite.url(number(1)),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/1.png"
        );
        assert_eq!(
            Asset::ArtworkShiny.url(number(25)),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/shiny/25.png"
        );

        for asset in Asset::ALL {
            let url = asset.url(number(133));

            assert!(url.starts_with(ASSET_HOST));
            assert!(url.ends_with("/133.png"));
        }
    }

    #[test]
    fn new_species_derives_every_url() {
        let species = Species::new(number(122), "mr. mime", "mr-mime", Generation(1));

        for asset in Asset::ALL {
            assert_eq!(species.asset(asset), asset.url(number(122)));
        }
    }

    #[test]
    fn display_name_is_title_case() {
        let mime = Species::new(number(122), "mr. mime", "mr-mime", Generation(1));
        let ho_oh = Species::new(number(250), "ho-oh", "ho-oh", Generation(2));

        assert_eq!(mime.display_name(), "Mr. Mime");
        assert_eq!(ho_oh.display_name(), "Ho-Oh");
        assert_eq!(ho_oh.to_string(), "#0250 Ho-Oh");
    }

    #[test]
    fn matches_ignores_case() {
        let mime = Species::new(number(122), "mr. mime", "mr-mime", Generation(1));

        assert!(mime.matches("Mr. Mime"));
        assert!(mime.matches("MR-MI"));
        assert!(!mime.matches("rime"));
    }

    #[test]
    fn parse_asset() {
        assert_eq!("sprite".parse(), Ok(Asset::Sprite));
        assert_eq!("artwork-shiny".parse(), Ok(Asset::ArtworkShiny));
        assert_eq!("sprite_shiny".parse(), Ok(Asset::SpriteShiny));
        assert!("hologram".parse::<Asset>().is_err());
    }

    #[test]
    fn card_name_keeps_camel_case_when_serialized() {
        let species = Species::new(number(1), "bulbasaur", "bulbasaur", Generation(1));
        let json = serde_json::to_value(&species).unwrap();

        assert_eq!(json["cardName"], "bulbasaur");
        assert_eq!(json["number"], 1);
        assert_eq!(json["generation"], 1);
        assert!(json.get("card_name").is_none());
    }
}
