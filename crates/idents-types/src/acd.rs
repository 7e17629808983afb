//! ACD (anticoincidence detector) identifiers.
//!
//! An ACD channel reads out one of three kinds of object:
//!
//! - a **tile**, addressed by face (0 = top, 1..=4 = sides), row, and
//!   column;
//! - a **ribbon**, a wrap-around scintillator strip addressed by an
//!   orientation pseudo-face (5 or 6) and a ribbon number;
//! - **nothing** — spare electronics channels carry a reserved
//!   not-applicable flag instead of a detector address.
//!
//! The three shapes are mutually exclusive and distinguished by the decoded
//! face value plus the N/A bit:
//!
//! ```text
//!  13   12  11  10      8  7      4  3      0
//! ┌────┬────────┬─────────┬─────────┬────────┐
//! │ NA │ layer  │  face   │  row    │ column │
//! └────┴────────┴─────────┴─────────┴────────┘
//! ```
//!
//! Row and column only mean anything for tiles; the ribbon number lives in
//! the column bits of a ribbon id. The accessors return `None` rather than
//! whatever the bits happen to hold.

use std::fmt;

use idents_error::{IdentsError, Result};

use crate::volume::{VolumeIdentifier, FIELD_LAT_OBJ, TAG_LAT_ACD};

const MASK_COLUMN: u32 = 0xF;
const MASK_ROW: u32 = 0xF;
const MASK_FACE: u32 = 0x7;
const MASK_LAYER: u32 = 0x3;
const SHIFT_ROW: u32 = 4;
const SHIFT_FACE: u32 = 8;
const SHIFT_LAYER: u32 = 11;
const BIT_NA: u32 = 1 << 13;

/// Highest face value naming a tile; 5 and 6 are the ribbon orientations.
const MAX_TILE_FACE: u32 = 4;
const MAX_FACE: u32 = 6;

/// Volume-identifier geometry: field 2 tags the sensitive-volume kind.
const VOL_KIND_TILE: u32 = 40;
const VOL_KIND_RIBBON: u32 = 41;
const FIELD_FACE: usize = 1;
const FIELD_KIND: usize = 2;
const FIELD_ROW: usize = 3;
const FIELD_COLUMN: usize = 4;
const MIN_FIELDS: usize = 5;

/// Packed identifier of one ACD element (tile, ribbon, or N/A channel).
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
pub struct AcdId(u32);

impl AcdId {
    /// Pack an id from layer, face, row, and column numbers.
    pub const fn new(layer: u32, face: u32, row: u32, column: u32) -> Result<Self> {
        if layer > MASK_LAYER {
            return Err(IdentsError::OutOfRange {
                what: "ACD layer",
                value: layer,
                max: MASK_LAYER,
            });
        }
        if face > MAX_FACE {
            return Err(IdentsError::OutOfRange {
                what: "ACD face",
                value: face,
                max: MAX_FACE,
            });
        }
        if row > MASK_ROW {
            return Err(IdentsError::OutOfRange {
                what: "ACD row",
                value: row,
                max: MASK_ROW,
            });
        }
        if column > MASK_COLUMN {
            return Err(IdentsError::OutOfRange {
                what: "ACD column",
                value: column,
                max: MASK_COLUMN,
            });
        }
        Ok(Self(
            (layer << SHIFT_LAYER) | (face << SHIFT_FACE) | (row << SHIFT_ROW) | column,
        ))
    }

    /// Pack a ribbon id from its orientation pseudo-face (5 or 6) and
    /// ribbon number.
    pub const fn ribbon(orientation: u32, number: u32) -> Result<Self> {
        if orientation < MAX_TILE_FACE + 1 || orientation > MAX_FACE {
            return Err(IdentsError::OutOfRange {
                what: "ribbon orientation",
                value: orientation,
                max: MAX_FACE,
            });
        }
        Self::new(0, orientation, 0, number)
    }

    /// The reserved id for an electronics channel with no detector element.
    pub const fn not_applicable() -> Self {
        Self(BIT_NA)
    }

    /// Decode from a volume identifier.
    ///
    /// Requires the ACD tag in field 0 and a sensitive-volume kind (tile or
    /// ribbon) in field 2. Tiles carry face/row/column in fields 1, 3, 4;
    /// ribbons carry their orientation in field 3 (normalized to the 5/6
    /// pseudo-face as `6 - field`) and their number in field 4.
    pub fn from_volume_id(vid: &VolumeIdentifier) -> Result<Self> {
        if vid.size() < MIN_FIELDS {
            return Err(IdentsError::TruncatedVolumeId {
                subsystem: "ACD",
                need: MIN_FIELDS,
                got: vid.size(),
            });
        }
        if vid.field(FIELD_LAT_OBJ) != TAG_LAT_ACD {
            return Err(IdentsError::WrongSubsystem { expected: "ACD" });
        }
        match vid.field(FIELD_KIND) {
            VOL_KIND_TILE => {
                let face = vid.field(FIELD_FACE);
                if face > MAX_TILE_FACE {
                    return Err(IdentsError::OutOfRange {
                        what: "tile face",
                        value: face,
                        max: MAX_TILE_FACE,
                    });
                }
                Self::new(0, face, vid.field(FIELD_ROW), vid.field(FIELD_COLUMN))
            }
            VOL_KIND_RIBBON => {
                let orientation = vid.field(FIELD_ROW);
                if orientation > 1 {
                    return Err(IdentsError::OutOfRange {
                        what: "ribbon orientation field",
                        value: orientation,
                        max: 1,
                    });
                }
                Self::ribbon(MAX_FACE - orientation, vid.field(FIELD_COLUMN))
            }
            _ => Err(IdentsError::WrongSubsystem { expected: "ACD" }),
        }
    }

    /// Rebuild from a packed word.
    pub const fn from_raw(raw: u32) -> Result<Self> {
        if raw >> 14 != 0 || (raw >> SHIFT_FACE) & MASK_FACE > MAX_FACE {
            return Err(IdentsError::PackedValueInvalid { value: raw as u64 });
        }
        Ok(Self(raw))
    }

    /// The packed word.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this channel has no detector element behind it.
    #[inline]
    pub const fn is_na(self) -> bool {
        self.0 & BIT_NA != 0
    }

    /// Whether this id names a tile.
    #[inline]
    pub const fn is_tile(self) -> bool {
        !self.is_na() && self.face() <= MAX_TILE_FACE
    }

    /// Whether this id names a ribbon.
    #[inline]
    pub const fn is_ribbon(self) -> bool {
        !self.is_na() && self.face() > MAX_TILE_FACE
    }

    /// Whether this is a tile on the top face.
    #[inline]
    pub const fn is_top(self) -> bool {
        self.is_tile() && self.face() == 0
    }

    /// Whether this is a tile on one of the four side faces.
    #[inline]
    pub const fn is_side(self) -> bool {
        self.is_tile() && self.face() != 0
    }

    #[inline]
    pub const fn layer(self) -> u32 {
        (self.0 >> SHIFT_LAYER) & MASK_LAYER
    }

    #[inline]
    pub const fn face(self) -> u32 {
        (self.0 >> SHIFT_FACE) & MASK_FACE
    }

    /// The tile row; `None` unless this id names a tile.
    pub const fn row(self) -> Option<u32> {
        if self.is_tile() {
            Some((self.0 >> SHIFT_ROW) & MASK_ROW)
        } else {
            None
        }
    }

    /// The tile column; `None` unless this id names a tile.
    pub const fn column(self) -> Option<u32> {
        if self.is_tile() {
            Some(self.0 & MASK_COLUMN)
        } else {
            None
        }
    }

    /// The ribbon number; `None` unless this id names a ribbon.
    pub const fn ribbon_number(self) -> Option<u32> {
        if self.is_ribbon() {
            Some(self.0 & MASK_COLUMN)
        } else {
            None
        }
    }

    /// The ribbon orientation pseudo-face (5 or 6); `None` unless this id
    /// names a ribbon.
    pub const fn ribbon_orientation(self) -> Option<u32> {
        if self.is_ribbon() {
            Some(self.face())
        } else {
            None
        }
    }

    /// The decimal matrix form `layer*1000 + face*100 + row*10 + column`,
    /// read straight off the bit fields.
    pub const fn id(self) -> u32 {
        let layer = self.layer();
        let face = self.face();
        let row = (self.0 >> SHIFT_ROW) & MASK_ROW;
        let column = self.0 & MASK_COLUMN;
        layer * 1000 + face * 100 + row * 10 + column
    }
}

impl fmt::Display for AcdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl From<AcdId> for u32 {
    fn from(id: AcdId) -> Self {
        id.raw()
    }
}

impl TryFrom<u32> for AcdId {
    type Error = IdentsError;

    fn try_from(raw: u32) -> Result<Self> {
        Self::from_raw(raw)
    }
}

const GAP_MASK_THREE_BIT: u32 = 0x7;
const GAP_MASK_NIBBLE: u32 = 0xF;
const GAP_SHIFT_ROW: u32 = 3;
const GAP_SHIFT_FACE: u32 = 6;
const GAP_SHIFT_GAP: u32 = 9;
const GAP_SHIFT_TYPE: u32 = 12;

/// Identifier of a gap between ACD elements, for assigning near-miss hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct AcdGapId(u16);

impl AcdGapId {
    /// Pack from gap type, gap, face, row, and column numbers.
    pub const fn new(gap_type: u32, gap: u32, face: u32, row: u32, col: u32) -> Result<Self> {
        if gap_type > GAP_MASK_NIBBLE {
            return Err(IdentsError::OutOfRange {
                what: "gap type",
                value: gap_type,
                max: GAP_MASK_NIBBLE,
            });
        }
        if gap > GAP_MASK_THREE_BIT {
            return Err(IdentsError::OutOfRange {
                what: "gap",
                value: gap,
                max: GAP_MASK_THREE_BIT,
            });
        }
        if face > GAP_MASK_THREE_BIT {
            return Err(IdentsError::OutOfRange {
                what: "gap face",
                value: face,
                max: GAP_MASK_THREE_BIT,
            });
        }
        if row > GAP_MASK_THREE_BIT {
            return Err(IdentsError::OutOfRange {
                what: "gap row",
                value: row,
                max: GAP_MASK_THREE_BIT,
            });
        }
        if col > GAP_MASK_THREE_BIT {
            return Err(IdentsError::OutOfRange {
                what: "gap column",
                value: col,
                max: GAP_MASK_THREE_BIT,
            });
        }
        Ok(Self(
            ((gap_type << GAP_SHIFT_TYPE)
                | (gap << GAP_SHIFT_GAP)
                | (face << GAP_SHIFT_FACE)
                | (row << GAP_SHIFT_ROW)
                | col) as u16,
        ))
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn gap_type(self) -> u32 {
        (self.0 as u32 >> GAP_SHIFT_TYPE) & GAP_MASK_NIBBLE
    }

    pub const fn gap(self) -> u32 {
        (self.0 as u32 >> GAP_SHIFT_GAP) & GAP_MASK_THREE_BIT
    }

    pub const fn face(self) -> u32 {
        (self.0 as u32 >> GAP_SHIFT_FACE) & GAP_MASK_THREE_BIT
    }

    pub const fn row(self) -> u32 {
        (self.0 as u32 >> GAP_SHIFT_ROW) & GAP_MASK_THREE_BIT
    }

    pub const fn col(self) -> u32 {
        self.0 as u32 & GAP_MASK_THREE_BIT
    }

    /// Decimal face/row/column form of the nearest tile.
    pub const fn closest_tile(self) -> u32 {
        100 * self.face() + 10 * self.row() + self.col()
    }

    /// Full decimal form including gap type and gap.
    pub const fn as_decimal(self) -> u32 {
        10_000 * self.gap_type() + 1000 * self.gap() + self.closest_tile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::VolumeIdentifier;

    fn acd_vid(fields: &[u32]) -> VolumeIdentifier {
        VolumeIdentifier::from_fields(fields).unwrap()
    }

    #[test]
    fn tile_shape_over_all_tile_faces() {
        for face in 0..=4 {
            let id = AcdId::new(0, face, 2, 3).unwrap();
            assert!(id.is_tile(), "face {face}");
            assert!(!id.is_ribbon(), "face {face}");
            assert!(!id.is_na(), "face {face}");
            assert_eq!(id.row(), Some(2));
            assert_eq!(id.column(), Some(3));
            assert_eq!(id.ribbon_number(), None);
            assert_eq!(id.ribbon_orientation(), None);
            assert_eq!(id.is_top(), face == 0);
            assert_eq!(id.is_side(), face != 0);
        }
    }

    #[test]
    fn ribbon_shape_over_both_orientations() {
        for orientation in 5..=6 {
            let id = AcdId::ribbon(orientation, 3).unwrap();
            assert!(id.is_ribbon(), "orientation {orientation}");
            assert!(!id.is_tile(), "orientation {orientation}");
            assert_eq!(id.ribbon_number(), Some(3));
            assert_eq!(id.ribbon_orientation(), Some(orientation));
            assert_eq!(id.row(), None);
            assert_eq!(id.column(), None);
            assert!(!id.is_top());
            assert!(!id.is_side());
        }
    }

    #[test]
    fn na_channel_is_neither() {
        let id = AcdId::not_applicable();
        assert!(id.is_na());
        assert!(!id.is_tile());
        assert!(!id.is_ribbon());
        assert_eq!(id.row(), None);
        assert_eq!(id.column(), None);
        assert_eq!(id.ribbon_number(), None);
        assert_eq!(id.ribbon_orientation(), None);
    }

    #[test]
    fn construction_is_range_checked() {
        assert!(AcdId::new(4, 0, 0, 0).is_err());
        assert!(AcdId::new(0, 7, 0, 0).is_err());
        assert!(AcdId::new(0, 0, 16, 0).is_err());
        assert!(AcdId::new(0, 0, 0, 16).is_err());
        assert!(AcdId::ribbon(4, 0).is_err());
        assert!(AcdId::ribbon(7, 0).is_err());
    }

    #[test]
    fn decodes_tile_volume() {
        let vid = acd_vid(&[1, 2, 40, 3, 4]);
        let id = AcdId::from_volume_id(&vid).unwrap();
        assert!(id.is_tile());
        assert_eq!(id.face(), 2);
        assert_eq!(id.row(), Some(3));
        assert_eq!(id.column(), Some(4));
        assert_eq!(id.id(), 234);
    }

    #[test]
    fn decodes_ribbon_volume_with_normalized_orientation() {
        // Source orientation 0 maps to pseudo-face 6, 1 to 5.
        let vid = acd_vid(&[1, 0, 41, 0, 2]);
        let id = AcdId::from_volume_id(&vid).unwrap();
        assert!(id.is_ribbon());
        assert_eq!(id.ribbon_orientation(), Some(6));
        assert_eq!(id.ribbon_number(), Some(2));

        let vid = acd_vid(&[1, 0, 41, 1, 3]);
        let id = AcdId::from_volume_id(&vid).unwrap();
        assert_eq!(id.ribbon_orientation(), Some(5));
        assert_eq!(id.ribbon_number(), Some(3));
    }

    #[test]
    fn rejects_malformed_volumes() {
        // Too short.
        assert_eq!(
            AcdId::from_volume_id(&acd_vid(&[1, 0, 40, 3])),
            Err(IdentsError::TruncatedVolumeId {
                subsystem: "ACD",
                need: 5,
                got: 4
            })
        );
        // Tower tag in the LAT-object field.
        assert_eq!(
            AcdId::from_volume_id(&acd_vid(&[0, 0, 40, 3, 4])),
            Err(IdentsError::WrongSubsystem { expected: "ACD" })
        );
        // Unknown sensitive-volume kind.
        assert!(AcdId::from_volume_id(&acd_vid(&[1, 0, 39, 3, 4])).is_err());
        // Tile face out of tile range.
        assert!(AcdId::from_volume_id(&acd_vid(&[1, 5, 40, 3, 4])).is_err());
        // Ribbon orientation field must be 0 or 1.
        assert!(AcdId::from_volume_id(&acd_vid(&[1, 0, 41, 2, 3])).is_err());
    }

    #[test]
    fn raw_round_trip() {
        let id = AcdId::new(1, 3, 5, 7).unwrap();
        assert_eq!(AcdId::from_raw(id.raw()), Ok(id));
        assert_eq!(AcdId::from_raw(AcdId::not_applicable().raw()).unwrap(), AcdId::not_applicable());

        // Face 7 never names anything.
        assert!(AcdId::from_raw(7 << 8).is_err());
        // Bits above the N/A flag.
        assert!(AcdId::from_raw(1 << 14).is_err());
    }

    #[test]
    fn decimal_matrix_form() {
        let id = AcdId::new(1, 2, 3, 4).unwrap();
        assert_eq!(id.id(), 1234);
        assert_eq!(id.to_string(), "1234");

        // Ribbons read as 5xx/6xx, matching the electronics tile numbers.
        assert_eq!(AcdId::ribbon(5, 2).unwrap().id(), 502);
        assert_eq!(AcdId::ribbon(6, 0).unwrap().id(), 600);
    }

    #[test]
    fn serde_round_trip() {
        let id = AcdId::ribbon(6, 1).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: AcdId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn gap_id_round_trip() {
        let gap = AcdGapId::new(2, 3, 1, 4, 5).unwrap();
        assert_eq!(gap.gap_type(), 2);
        assert_eq!(gap.gap(), 3);
        assert_eq!(gap.face(), 1);
        assert_eq!(gap.row(), 4);
        assert_eq!(gap.col(), 5);
        assert_eq!(gap.closest_tile(), 145);
        assert_eq!(gap.as_decimal(), 23_145);
    }

    #[test]
    fn gap_id_range_checks() {
        assert!(AcdGapId::new(16, 0, 0, 0, 0).is_err());
        assert!(AcdGapId::new(0, 8, 0, 0, 0).is_err());
        assert!(AcdGapId::new(0, 0, 8, 0, 0).is_err());
        assert!(AcdGapId::new(0, 0, 0, 8, 0).is_err());
        assert!(AcdGapId::new(0, 0, 0, 0, 8).is_err());
    }
}
