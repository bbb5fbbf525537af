//! The fixed category list.
//!
//! Categories are a closed set: their order drives the totals listing, the
//! chart order and the palette assignment.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::EngineError;

/// An RGB color, used by chart descriptions and the PDF report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Expense category.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[default]
    Hoteles,
    Gasoil,
    Comidas,
    #[serde(rename = "Cafetería")]
    Cafeteria,
    Parking,
    Salones,
    Varios,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Hoteles,
        Category::Gasoil,
        Category::Comidas,
        Category::Cafeteria,
        Category::Parking,
        Category::Salones,
        Category::Varios,
    ];

    /// Palette aligned positionally with [`Category::ALL`].
    pub const PALETTE: [Rgb; 7] = [
        Rgb(0x00, 0x80, 0x80),
        Rgb(0x00, 0x99, 0x99),
        Rgb(0x00, 0xb3, 0xb3),
        Rgb(0xad, 0xd8, 0xe6),
        Rgb(0x87, 0xce, 0xeb),
        Rgb(0xff, 0xa5, 0x00),
        Rgb(0xff, 0x8c, 0x00),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Hoteles => "Hoteles",
            Category::Gasoil => "Gasoil",
            Category::Comidas => "Comidas",
            Category::Cafeteria => "Cafetería",
            Category::Parking => "Parking",
            Category::Salones => "Salones",
            Category::Varios => "Varios",
        }
    }

    /// Position in [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Category::Hoteles => 0,
            Category::Gasoil => 1,
            Category::Comidas => 2,
            Category::Cafeteria => 3,
            Category::Parking => 4,
            Category::Salones => 5,
            Category::Varios => 6,
        }
    }

    #[must_use]
    pub const fn color(self) -> Rgb {
        Self::PALETTE[self.index()]
    }

    /// Next category in display order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous category in display order, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    /// Matches a label ignoring case, accents and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s)
            .ok_or_else(|| EngineError::InvalidCategory("empty category".to_string()))?;
        Category::ALL
            .into_iter()
            .find(|c| normalize_key(c.label()).as_deref() == Some(key.as_str()))
            .ok_or_else(|| EngineError::InvalidCategory(s.trim().to_string()))
    }
}

fn normalize_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let out: String = trimmed
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect();
    if out.is_empty() { None } else { Some(out) }
}
