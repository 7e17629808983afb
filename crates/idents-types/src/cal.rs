//! Calorimeter crystal identifiers.
//!
//! A crystal is addressed by tower, layer, and column, packed as
//! `(tower*8 + layer)*16 + column`. Two readout annotations — which crystal
//! face reported, and which ADC range — are optional and carry their own
//! presence bits, so an annotated id never compares equal to the bare
//! crystal address.
//!
//! ```text
//!  15  14   13    12   11   10     7  6     4  3     0
//! ┌───────┬─────┬────┬─────┬─────────┬────────┬────────┐
//! │ range │ rng │face│ face│  tower  │ layer  │ column │
//! │       │valid│    │valid│         │        │        │
//! └───────┴─────┴────┴─────┴─────────┴────────┴────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use idents_error::{IdentsError, Result};

use crate::volume::{
    VolumeIdentifier, FIELD_LAT_OBJ, FIELD_TOWER_OBJ, TAG_LAT_TOWERS, TAG_TOWER_CAL,
};

const MASK_COLUMN: u32 = 0xF;
const MASK_LAYER: u32 = 0x7;
const MASK_TOWER: u32 = 0xF;
const SHIFT_LAYER: u32 = 4;
const SHIFT_TOWER: u32 = 7;
const BIT_FACE_VALID: u32 = 1 << 11;
const BIT_FACE: u32 = 1 << 12;
const BIT_RANGE_VALID: u32 = 1 << 13;
const SHIFT_RANGE: u32 = 14;
const MASK_RANGE: u32 = 0x3;

/// Positions of the calorimeter fields within a volume identifier.
const FIELD_TOWER_Y: usize = 1;
const FIELD_TOWER_X: usize = 2;
const FIELD_LAYER: usize = 4;
const FIELD_COLUMN: usize = 6;
const MIN_FIELDS: usize = 7;

/// Crystal ends are labeled by POSitive or NEGative face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum XtalFace {
    Pos = 0,
    Neg = 1,
}

/// Each crystal end reports one of four energy ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AdcRange {
    Lex8 = 0,
    Lex1 = 1,
    Hex8 = 2,
    Hex1 = 3,
}

impl AdcRange {
    const fn from_bits(bits: u32) -> Self {
        match bits & MASK_RANGE {
            0 => Self::Lex8,
            1 => Self::Lex1,
            2 => Self::Hex8,
            _ => Self::Hex1,
        }
    }
}

/// Readout can be best-of-four energy ranges or all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CalTrigMode {
    BestRange = 0,
    AllRange = 2,
}

/// Packed identifier of one calorimeter crystal, with optional readout
/// annotations.
///
/// Equality and ordering are by the packed word.
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
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct CalXtalId(u32);

impl CalXtalId {
    /// Pack a crystal address from tower, layer, and column numbers.
    pub const fn new(tower: u32, layer: u32, column: u32) -> Result<Self> {
        if tower > MASK_TOWER {
            return Err(IdentsError::OutOfRange {
                what: "calorimeter tower",
                value: tower,
                max: MASK_TOWER,
            });
        }
        if layer > MASK_LAYER {
            return Err(IdentsError::OutOfRange {
                what: "calorimeter layer",
                value: layer,
                max: MASK_LAYER,
            });
        }
        if column > MASK_COLUMN {
            return Err(IdentsError::OutOfRange {
                what: "calorimeter column",
                value: column,
                max: MASK_COLUMN,
            });
        }
        Ok(Self((tower << SHIFT_TOWER) | (layer << SHIFT_LAYER) | column))
    }

    /// Attach readout annotations. Presence bits are set only for the
    /// `Some` annotations, so an unannotated id stays equal to the bare
    /// crystal address.
    #[must_use]
    pub const fn with_readout(self, face: Option<XtalFace>, range: Option<AdcRange>) -> Self {
        let mut packed = self.0;
        if let Some(face) = face {
            packed |= BIT_FACE_VALID;
            if matches!(face, XtalFace::Neg) {
                packed |= BIT_FACE;
            }
        }
        if let Some(range) = range {
            packed |= BIT_RANGE_VALID | ((range as u32) << SHIFT_RANGE);
        }
        Self(packed)
    }

    /// Decode a crystal address from a volume identifier.
    ///
    /// The identifier must carry the tower tag in field 0 and the
    /// calorimeter tag in field 3; `towers_per_row` linearizes the 2-D
    /// tower position of fields 1 and 2 into the flat tower index. Field 5
    /// (the crystal's measurement orientation) is not part of the address.
    pub fn from_volume_id(vid: &VolumeIdentifier, towers_per_row: u32) -> Result<Self> {
        if vid.size() < MIN_FIELDS {
            return Err(IdentsError::TruncatedVolumeId {
                subsystem: "calorimeter",
                need: MIN_FIELDS,
                got: vid.size(),
            });
        }
        if vid.field(FIELD_LAT_OBJ) != TAG_LAT_TOWERS
            || vid.field(FIELD_TOWER_OBJ) != TAG_TOWER_CAL
        {
            return Err(IdentsError::WrongSubsystem {
                expected: "calorimeter",
            });
        }
        // Saturate on overflow; new() then reports the tower out of range.
        let tower = towers_per_row
            .checked_mul(vid.field(FIELD_TOWER_Y))
            .and_then(|t| t.checked_add(vid.field(FIELD_TOWER_X)))
            .unwrap_or(u32::MAX);
        Self::new(tower, vid.field(FIELD_LAYER), vid.field(FIELD_COLUMN))
    }

    /// Rebuild from a packed word, revalidating the annotation bits.
    ///
    /// A face or range value bit may be set only under its presence bit.
    pub const fn from_packed(packed: u32) -> Result<Self> {
        let face_ok = packed & BIT_FACE == 0 || packed & BIT_FACE_VALID != 0;
        let range_ok =
            (packed >> SHIFT_RANGE) & MASK_RANGE == 0 || packed & BIT_RANGE_VALID != 0;
        if packed >> 16 == 0 && face_ok && range_ok {
            Ok(Self(packed))
        } else {
            Err(IdentsError::PackedValueInvalid {
                value: packed as u64,
            })
        }
    }

    /// The packed word.
    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn tower(self) -> u32 {
        (self.0 >> SHIFT_TOWER) & MASK_TOWER
    }

    #[inline]
    pub const fn layer(self) -> u32 {
        (self.0 >> SHIFT_LAYER) & MASK_LAYER
    }

    #[inline]
    pub const fn column(self) -> u32 {
        self.0 & MASK_COLUMN
    }

    /// The unpacked `(tower, layer, column)` triple.
    pub const fn unpack(self) -> (u32, u32, u32) {
        (self.tower(), self.layer(), self.column())
    }

    /// The annotated crystal face, when one was supplied.
    pub const fn face(self) -> Option<XtalFace> {
        if self.0 & BIT_FACE_VALID == 0 {
            return None;
        }
        if self.0 & BIT_FACE != 0 {
            Some(XtalFace::Neg)
        } else {
            Some(XtalFace::Pos)
        }
    }

    /// The annotated ADC range, when one was supplied.
    pub const fn range(self) -> Option<AdcRange> {
        if self.0 & BIT_RANGE_VALID == 0 {
            return None;
        }
        Some(AdcRange::from_bits(self.0 >> SHIFT_RANGE))
    }
}

/// Streams as unpacked space-separated `tower layer column`; the readout
/// annotations are diagnostic-only and not part of the textual form.
impl fmt::Display for CalXtalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.tower(), self.layer(), self.column())
    }
}

impl FromStr for CalXtalId {
    type Err = IdentsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace().map(|part| {
            part.parse::<u32>()
                .map_err(|_| IdentsError::MalformedText {
                    text: s.to_owned(),
                })
        });
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(tower), Some(layer), Some(column), None) => {
                Self::new(tower?, layer?, column?)
            }
            _ => Err(IdentsError::MalformedText { text: s.to_owned() }),
        }
    }
}

impl From<CalXtalId> for u32 {
    fn from(id: CalXtalId) -> Self {
        id.packed()
    }
}

impl TryFrom<u32> for CalXtalId {
    type Error = IdentsError;

    fn try_from(packed: u32) -> Result<Self> {
        Self::from_packed(packed)
    }
}
