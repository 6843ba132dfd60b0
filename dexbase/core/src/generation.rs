use crate::species::Number;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// The era of the franchise a species was introduced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Generation(pub(crate) u8);

const ROMAN: [&str; 9] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

// Last dex number introduced by each generation.
const LAST: [u32; 9] = [151, 251, 386, 493, 649, 721, 809, 905, 1025];

impl Generation {
    pub const ALL: [Generation; 9] = [
        Generation(1),
        Generation(2),
        Generation(3),
        Generation(4),
        Generation(5),
        Generation(6),
        Generation(7),
        Generation(8),
        Generation(9),
    ];

    pub fn new(generation: u8) -> Option<Self> {
        (1..=9).contains(&generation).then_some(Self(generation))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn roman(self) -> &'static str {
        ROMAN[self.index()]
    }

    /// Parses names such as `generation-iv`, as used by PokéAPI.
    pub fn from_name(name: &str) -> Option<Self> {
        let numeral = name.to_lowercase();
        let numeral = numeral.strip_prefix("generation-")?;

        ROMAN
            .iter()
            .position(|roman| roman.eq_ignore_ascii_case(numeral))
            .map(|i| Self(i as u8 + 1))
    }

    /// The dex numbers introduced by this generation.
    pub fn numbers(self) -> RangeInclusive<u32> {
        let first = match self.index() {
            0 => 1,
            i => LAST[i - 1] + 1,
        };

        first..=LAST[self.index()]
    }

    /// The generation that introduced `number`, if it is a known one.
    pub fn of(number: Number) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|generation| generation.numbers().contains(&number.get()))
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for Generation {
    type Error = String;

    fn try_from(generation: u8) -> Result<Self, Self::Error> {
        Self::new(generation).ok_or_else(|| format!("invalid generation: {generation}"))
    }
}

impl From<Generation> for u8 {
    fn from(generation: Generation) -> Self {
        generation.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation {}", self.roman())
    }
}
