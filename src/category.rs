//! Threshold categorisation of poverty percentages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound (inclusive) of the `Rendah` bucket
pub const LOW_UPPER_BOUND: f64 = 5.0;
/// Upper bound (inclusive) of the `Sedang` bucket
pub const MEDIUM_UPPER_BOUND: f64 = 10.0;

/// Poverty level of a region, ordered from low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Low poverty (≤ 5%)
    Rendah,
    /// Medium poverty (5% < p ≤ 10%)
    Sedang,
    /// High poverty (> 10%)
    Tinggi,
}

impl Category {
    /// All categories in ascending order
    pub const ALL: [Category; 3] = [Category::Rendah, Category::Sedang, Category::Tinggi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rendah => "Rendah",
            Category::Sedang => "Sedang",
            Category::Tinggi => "Tinggi",
        }
    }

    /// Display colour as an RGB triple
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Category::Rendah => (0x28, 0xa7, 0x45),
            Category::Sedang => (0xff, 0xc1, 0x07),
            Category::Tinggi => (0xdc, 0x35, 0x45),
        }
    }

    /// Position of this category in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Rendah" => Ok(Category::Rendah),
            "Sedang" => Ok(Category::Sedang),
            "Tinggi" => Ok(Category::Tinggi),
            other => anyhow::bail!("Unknown category: {}", other),
        }
    }
}

/// Map a percentage to its category. Boundaries belong to the lower bucket.
pub fn categorize(percentage: f64) -> Category {
    if percentage <= LOW_UPPER_BOUND {
        Category::Rendah
    } else if percentage <= MEDIUM_UPPER_BOUND {
        Category::Sedang
    } else {
        Category::Tinggi
    }
}
