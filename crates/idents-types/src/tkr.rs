//! Tracker identifiers.
//!
//! A tracker address names a silicon wafer by tower position, tray, top or
//! bottom silicon, measurement view, ladder, and wafer. A volume identifier
//! may legitimately stop before the deeper fields (a whole tray, say), so
//! the packed word carries a parallel presence mask and accessors for
//! absent fields fail instead of returning a bogus zero.

use std::fmt;

use idents_error::{IdentsError, Result};

use crate::axis::Axis;
use crate::volume::{
    VolumeIdentifier, FIELD_LAT_OBJ, FIELD_TOWER_OBJ, TAG_LAT_TOWERS, TAG_TOWER_TKR,
};

const MASK_TOWER_Y: u16 = 0x3;
const MASK_TOWER_X: u16 = 0x3;
const MASK_TRAY: u16 = 0x1F;
const MASK_VIEW: u16 = 0x1;
const MASK_BOT_TOP: u16 = 0x1;
const MASK_LADDER: u16 = 0x3;
const MASK_WAFER: u16 = 0x3;

const SHIFT_TOWER_Y: u16 = 0;
const SHIFT_TOWER_X: u16 = 2;
const SHIFT_TRAY: u16 = 4;
const SHIFT_VIEW: u16 = 9;
const SHIFT_BOT_TOP: u16 = 10;
const SHIFT_LADDER: u16 = 11;
const SHIFT_WAFER: u16 = 13;

/// Positions of the tracker fields within a volume identifier.
const FIELD_TOWER_Y: usize = 1;
const FIELD_TOWER_X: usize = 2;
const FIELD_TRAY: usize = 4;
const FIELD_VIEW: usize = 5;
const FIELD_BOT_TOP: usize = 6;
const FIELD_LADDER: usize = 7;
const FIELD_WAFER: usize = 8;
const MIN_FIELDS: usize = 4;

/// Packed identifier of a tracker volume, down to whatever depth the source
/// volume identifier supplied.
///
/// Equality compares the packed word and the presence mask together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TkrId {
    packed: u16,
    valid: u16,
}

impl TkrId {
    /// Bottom silicon layer of a tray.
    pub const SI_BOTTOM: u32 = 0;
    /// Top silicon layer of a tray.
    pub const SI_TOP: u32 = 1;
    /// Strips measure X.
    pub const MEASURE_X: u32 = 0;
    /// Strips measure Y.
    pub const MEASURE_Y: u32 = 1;

    /// Decode a tracker address from a volume identifier.
    ///
    /// Requires the tower tag in field 0 and the tracker tag in field 3.
    /// Fields past the tower position are optional: a shorter identifier
    /// yields an id whose deeper accessors report the field as absent.
    pub fn from_volume_id(vid: &VolumeIdentifier) -> Result<Self> {
        if vid.size() < MIN_FIELDS {
            return Err(IdentsError::TruncatedVolumeId {
                subsystem: "tracker",
                need: MIN_FIELDS,
                got: vid.size(),
            });
        }
        if vid.field(FIELD_LAT_OBJ) != TAG_LAT_TOWERS
            || vid.field(FIELD_TOWER_OBJ) != TAG_TOWER_TKR
        {
            return Err(IdentsError::WrongSubsystem {
                expected: "tracker",
            });
        }

        let mut id = Self { packed: 0, valid: 0 };
        id.set(vid.field(FIELD_TOWER_Y), "tower y index", MASK_TOWER_Y, SHIFT_TOWER_Y)?;
        id.set(vid.field(FIELD_TOWER_X), "tower x index", MASK_TOWER_X, SHIFT_TOWER_X)?;

        let optional = [
            (FIELD_TRAY, "tray", MASK_TRAY, SHIFT_TRAY),
            (FIELD_VIEW, "view", MASK_VIEW, SHIFT_VIEW),
            (FIELD_BOT_TOP, "bottom/top", MASK_BOT_TOP, SHIFT_BOT_TOP),
            (FIELD_LADDER, "ladder", MASK_LADDER, SHIFT_LADDER),
            (FIELD_WAFER, "wafer", MASK_WAFER, SHIFT_WAFER),
        ];
        for (field, what, mask, shift) in optional {
            match vid.get(field) {
                Some(value) => id.set(value, what, mask, shift)?,
                None => break,
            }
        }
        Ok(id)
    }

    /// Build a tray-level address directly from component values.
    pub fn new(tower_x: u32, tower_y: u32, tray: u32, bot_top: u32) -> Result<Self> {
        let mut id = Self { packed: 0, valid: 0 };
        id.set(tower_y, "tower y index", MASK_TOWER_Y, SHIFT_TOWER_Y)?;
        id.set(tower_x, "tower x index", MASK_TOWER_X, SHIFT_TOWER_X)?;
        id.set(tray, "tray", MASK_TRAY, SHIFT_TRAY)?;
        id.set(bot_top, "bottom/top", MASK_BOT_TOP, SHIFT_BOT_TOP)?;
        Ok(id)
    }

    /// Attach the measurement view to a directly-built address.
    pub fn with_view(mut self, view: u32) -> Result<Self> {
        self.set(view, "view", MASK_VIEW, SHIFT_VIEW)?;
        Ok(self)
    }

    fn set(&mut self, value: u32, what: &'static str, mask: u16, shift: u16) -> Result<()> {
        if value > u32::from(mask) {
            return Err(IdentsError::OutOfRange {
                what,
                value,
                max: u32::from(mask),
            });
        }
        self.packed |= (value as u16) << shift;
        self.valid |= mask << shift;
        Ok(())
    }

    const fn read(&self, field: &'static str, mask: u16, shift: u16) -> Result<u32> {
        if self.valid & (mask << shift) == 0 {
            return Err(IdentsError::FieldNotPresent { field });
        }
        Ok(((self.packed >> shift) & mask) as u32)
    }

    pub const fn has_tower_x(&self) -> bool {
        self.valid & (MASK_TOWER_X << SHIFT_TOWER_X) != 0
    }

    pub const fn tower_x(&self) -> Result<u32> {
        self.read("tower x", MASK_TOWER_X, SHIFT_TOWER_X)
    }

    pub const fn has_tower_y(&self) -> bool {
        self.valid & (MASK_TOWER_Y << SHIFT_TOWER_Y) != 0
    }

    pub const fn tower_y(&self) -> Result<u32> {
        self.read("tower y", MASK_TOWER_Y, SHIFT_TOWER_Y)
    }

    pub const fn has_tray(&self) -> bool {
        self.valid & (MASK_TRAY << SHIFT_TRAY) != 0
    }

    pub const fn tray(&self) -> Result<u32> {
        self.read("tray", MASK_TRAY, SHIFT_TRAY)
    }

    pub const fn has_view(&self) -> bool {
        self.valid & (MASK_VIEW << SHIFT_VIEW) != 0
    }

    /// The measurement view ([`MEASURE_X`](Self::MEASURE_X) or
    /// [`MEASURE_Y`](Self::MEASURE_Y)).
    pub const fn view(&self) -> Result<u32> {
        self.read("view", MASK_VIEW, SHIFT_VIEW)
    }

    /// The measurement view as an [`Axis`].
    pub fn axis(&self) -> Result<Axis> {
        self.view().map(|view| match view {
            0 => Axis::X,
            _ => Axis::Y,
        })
    }

    pub const fn has_bot_top(&self) -> bool {
        self.valid & (MASK_BOT_TOP << SHIFT_BOT_TOP) != 0
    }

    /// [`SI_BOTTOM`](Self::SI_BOTTOM) or [`SI_TOP`](Self::SI_TOP).
    pub const fn bot_top(&self) -> Result<u32> {
        self.read("bottom/top", MASK_BOT_TOP, SHIFT_BOT_TOP)
    }

    pub const fn has_ladder(&self) -> bool {
        self.valid & (MASK_LADDER << SHIFT_LADDER) != 0
    }

    pub const fn ladder(&self) -> Result<u32> {
        self.read("ladder", MASK_LADDER, SHIFT_LADDER)
    }

    pub const fn has_wafer(&self) -> bool {
        self.valid & (MASK_WAFER << SHIFT_WAFER) != 0
    }

    pub const fn wafer(&self) -> Result<u32> {
        self.read("wafer", MASK_WAFER, SHIFT_WAFER)
    }

    /// The packed word and presence mask.
    pub const fn raw_parts(&self) -> (u16, u16) {
        (self.packed, self.valid)
    }
}

// Diagnostic form only; tracker ids are not round-tripped through text.
impl fmt::Display for TkrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:#x}, {:#x})", self.packed, self.valid)
    }
}
