//! RGB color used for trails, markers and the figure background.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure blue, the default trail color.
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// Pure white, the default background.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black, used for the axis grid, tick labels and titles.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its channels
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Ten-color categorical cycle used for current-position markers.
    ///
    /// Element `i` gets entry `i % 10`, so neighbouring elements stay
    /// distinguishable while trails share a single color.
    #[must_use]
    pub fn categorical_cycle() -> Vec<Self> {
        [
            0x1f77b4, // blue
            0xff7f0e, // orange
            0x2ca02c, // green
            0xd62728, // red
            0x9467bd, // purple
            0x8c564b, // brown
            0xe377c2, // pink
            0x7f7f7f, // gray
            0xbcbd22, // olive
            0x17becf, // cyan
        ]
        .into_iter()
        .map(Self::from_hex)
        .collect()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Parse `RRGGBB` or `#RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidValue {
                field: "color",
                reason: format!("expected RRGGBB hex, got '{s}'"),
            });
        }
        let hex = u32::from_str_radix(digits, 16).map_err(|e| ConfigError::InvalidValue {
            field: "color",
            reason: e.to_string(),
        })?;
        Ok(Self::from_hex(hex))
    }
}
