//! Size classes and their grid footprints.
//!
//! Every question declares one of six size classes. Each maps to a fixed
//! rectangle of grid cells; the mapping is total, and anything unrecognized on
//! the wire degrades to `Small` rather than failing deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A (width, height) rectangle measured in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width_cells: usize,
    pub height_cells: usize,
}

impl Footprint {
    pub const fn new(width_cells: usize, height_cells: usize) -> Self {
        Self {
            width_cells,
            height_cells,
        }
    }
}

impl std::fmt::Display for Footprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width_cells, self.height_cells)
    }
}

/// The six question size classes.
///
/// Wire form is a case-insensitive name (`"wide"`) or a 1-based ordinal in
/// declaration order (`2`). Serializes as the lowercase name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    #[default]
    Small,
    Wide,
    Square,
    Medium,
    Large,
    Extra,
}

impl SizeClass {
    pub const ALL: [SizeClass; 6] = [
        SizeClass::Small,
        SizeClass::Wide,
        SizeClass::Square,
        SizeClass::Medium,
        SizeClass::Large,
        SizeClass::Extra,
    ];

    /// Grid footprint for this size class.
    pub const fn footprint(self) -> Footprint {
        match self {
            SizeClass::Small => Footprint::new(1, 1),
            SizeClass::Wide => Footprint::new(2, 1),
            SizeClass::Square => Footprint::new(1, 2),
            SizeClass::Medium => Footprint::new(2, 2),
            SizeClass::Large => Footprint::new(3, 2),
            SizeClass::Extra => Footprint::new(4, 2),
        }
    }

    /// Resolves a 1-based ordinal. Out-of-range values fall back to `Small`.
    pub fn from_ordinal(n: i64) -> Self {
        usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    /// Resolves a name, ignoring case and surrounding whitespace.
    /// Unknown names fall back to `Small`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "wide" => SizeClass::Wide,
            "square" => SizeClass::Square,
            "medium" => SizeClass::Medium,
            "large" => SizeClass::Large,
            "extra" => SizeClass::Extra,
            _ => SizeClass::Small,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Ordinal(i64),
    Name(String),
    Other(Value),
}

impl<'de> Deserialize<'de> for SizeClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSize::deserialize(deserializer)? {
            RawSize::Ordinal(n) => SizeClass::from_ordinal(n),
            RawSize::Name(name) => SizeClass::from_name(&name),
            RawSize::Other(_) => SizeClass::Small,
        })
    }
}
