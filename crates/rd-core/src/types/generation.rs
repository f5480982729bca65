//! Game generations.
//!
//! Generation membership is decided locally from static national-dex id
//! ranges. The upstream `/generation/{name}` endpoint can also be queried
//! (see `rd-api`); [`Generation::api_name`] gives the slug for that.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A main-series game generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// Red/Blue/Yellow.
    I,
    /// Gold/Silver/Crystal.
    II,
    /// Ruby/Sapphire/Emerald.
    III,
    /// Diamond/Pearl/Platinum.
    IV,
    /// Black/White.
    V,
    /// X/Y.
    VI,
    /// Sun/Moon.
    VII,
    /// Sword/Shield.
    VIII,
    /// Scarlet/Violet.
    IX,
}

impl Generation {
    /// All generations in release order.
    pub const ALL: [Self; 9] = [
        Self::I,
        Self::II,
        Self::III,
        Self::IV,
        Self::V,
        Self::VI,
        Self::VII,
        Self::VIII,
        Self::IX,
    ];

    /// Returns the 1-based generation number.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
            Self::V => 5,
            Self::VI => 6,
            Self::VII => 7,
            Self::VIII => 8,
            Self::IX => 9,
        }
    }

    /// Returns the generation with the given 1-based number.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.number() == number)
    }

    /// Returns the national-dex ids introduced in this generation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rd_core::Generation;
    ///
    /// assert_eq!(Generation::I.id_range(), 1..=151);
    /// assert_eq!(Generation::II.id_range(), 152..=251);
    /// ```
    #[must_use]
    pub const fn id_range(self) -> RangeInclusive<u32> {
        match self {
            Self::I => 1..=151,
            Self::II => 152..=251,
            Self::III => 252..=386,
            Self::IV => 387..=493,
            Self::V => 494..=649,
            Self::VI => 650..=721,
            Self::VII => 722..=809,
            Self::VIII => 810..=905,
            Self::IX => 906..=1025,
        }
    }

    /// Returns `true` if the national-dex id belongs to this generation.
    #[inline]
    #[must_use]
    pub fn contains_id(self, id: u32) -> bool {
        self.id_range().contains(&id)
    }

    /// Returns the upstream slug (`generation-i`, `generation-ii`, ...).
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::I => "generation-i",
            Self::II => "generation-ii",
            Self::III => "generation-iii",
            Self::IV => "generation-iv",
            Self::V => "generation-v",
            Self::VI => "generation-vi",
            Self::VII => "generation-vii",
            Self::VIII => "generation-viii",
            Self::IX => "generation-ix",
        }
    }

    /// Returns the display label (`Generation I`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::I => "Generation I",
            Self::II => "Generation II",
            Self::III => "Generation III",
            Self::IV => "Generation IV",
            Self::V => "Generation V",
            Self::VI => "Generation VI",
            Self::VII => "Generation VII",
            Self::VIII => "Generation VIII",
            Self::IX => "Generation IX",
        }
    }

    fn roman(self) -> &'static str {
        self.api_name().trim_start_matches("generation-")
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown generation '{0}' (expected 1-9, a roman numeral, or 'Generation I')")]
pub struct ParseGenerationError(pub String);

impl FromStr for Generation {
    type Err = ParseGenerationError;

    /// Accepts `3`, `iii`, `III`, `generation-iii` and `Generation III`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "-");
        let roman = normalized
            .strip_prefix("generation-")
            .unwrap_or(&normalized);

        if let Ok(number) = roman.parse::<u8>() {
            return Self::from_number(number).ok_or_else(|| ParseGenerationError(s.to_owned()));
        }

        Self::ALL
            .into_iter()
            .find(|g| g.roman() == roman)
            .ok_or_else(|| ParseGenerationError(s.to_owned()))
    }
}
