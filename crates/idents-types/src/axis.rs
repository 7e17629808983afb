//! Measurement axis vocabulary.
//!
//! One shared definition of the X and Y axes, plus a value for contexts
//! where no axis applies. The tracker uses it as the strip "view"; the
//! calorimeter as the crystal "orientation".

use std::fmt;

/// A measurement axis, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    X,
    Y,
    None,
}

impl Axis {
    /// Decode the 0/1 view encoding used by the packed tracker identifier.
    pub const fn from_view(view: u32) -> Option<Self> {
        match view {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            _ => None,
        }
    }

    /// The 0/1 view encoding, or `None` for [`Axis::None`].
    pub const fn view(self) -> Option<u32> {
        match self {
            Self::X => Some(0),
            Self::Y => Some(1),
            Self::None => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
            Self::None => f.write_str("none"),
        }
    }
}
