//! Tower grid identifiers.
//!
//! The LAT is a 4×4 grid of identical towers; the flat tower index used by
//! the subsystem identifiers is `ix + 4*iy`.

use std::fmt;

use idents_error::{IdentsError, Result};

/// Number of towers along X.
pub const X_NUM: u32 = 4;

/// Number of towers along Y.
pub const Y_NUM: u32 = 4;

/// Flat identifier of one tower in the 4×4 grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[repr(transparent)]
pub struct TowerId(u8);

impl TowerId {
    /// Build from a flat tower index (0..16).
    pub const fn from_id(id: u32) -> Result<Self> {
        if id >= X_NUM * Y_NUM {
            return Err(IdentsError::OutOfRange {
                what: "tower id",
                value: id,
                max: X_NUM * Y_NUM - 1,
            });
        }
        Ok(Self(id as u8))
    }

    /// Build from grid coordinates (each 0..4).
    pub const fn from_xy(ix: u32, iy: u32) -> Result<Self> {
        if ix >= X_NUM {
            return Err(IdentsError::OutOfRange {
                what: "tower x index",
                value: ix,
                max: X_NUM - 1,
            });
        }
        if iy >= Y_NUM {
            return Err(IdentsError::OutOfRange {
                what: "tower y index",
                value: iy,
                max: Y_NUM - 1,
            });
        }
        Ok(Self((ix + X_NUM * iy) as u8))
    }

    /// The flat tower index.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0 as u32
    }

    /// The x index (0..4).
    #[inline]
    pub const fn ix(self) -> u32 {
        self.id() % X_NUM
    }

    /// The y index (0..4).
    #[inline]
    pub const fn iy(self) -> u32 {
        self.id() / X_NUM
    }

    /// Whether `other` is this tower or one of its (up to 8) grid
    /// neighbors.
    pub const fn neighbor(self, other: TowerId) -> bool {
        let dx = self.ix() as i32 - other.ix() as i32;
        let dy = self.iy() as i32 - other.iy() as i32;
        dx < 2 && dx > -2 && dy < 2 && dy > -2
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
