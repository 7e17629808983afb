//! Conversion between ACD detector space and electronics space.
//!
//! Each ACD element (tile or ribbon) is read out by two photomultipliers,
//! and each PMT is wired to one channel (GAFE) of one readout board (GARC).
//! The wiring is a fixed harness, captured here as forward lookup tables
//! plus memoized reverse maps:
//!
//! - `(cable, channel)` ↔ `(tile, pmt)` over the 12×18 channel matrix;
//! - GEM register bit position ↔ tile number (128 slots, some reserved);
//! - enable/ROI register bit position ↔ tile number (108 slots, all wired).
//!
//! Reverse maps are built at most once, on first use, by scanning the
//! forward tables; lookups in both directions are O(1) and a missing key is
//! an ordinary `None`, not an error — scanning for unwired channels is how
//! callers discover the harness topology.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

mod tables;

/// Number of GARC boards (readout cables).
pub const GARC_COUNT: usize = 12;

/// Number of GAFE channels per GARC board.
pub const GAFE_COUNT: usize = 18;

/// Number of bit positions in the GEM register map.
pub const GEM_SLOTS: usize = 128;

/// Number of bit positions in the enable/ROI register map.
pub const REGISTER_SLOTS: usize = 108;

/// Hardware sentinel for a register slot with no tile behind it. The public
/// lookups translate it to `None`.
pub const NO_TILE: u16 = 0xFFFF;

/// A detector-space address: tile number plus PMT (A = 0, B = 1).
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
pub struct TilePmt {
    pub tile: u16,
    pub pmt: u16,
}

impl TilePmt {
    #[inline]
    pub const fn new(tile: u16, pmt: u16) -> Self {
        Self { tile, pmt }
    }
}

/// An electronics-space address: GARC board plus GAFE channel.
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
pub struct GarcGafe {
    pub garc: u16,
    pub gafe: u16,
}

impl GarcGafe {
    #[inline]
    pub const fn new(garc: u16, gafe: u16) -> Self {
        Self { garc, gafe }
    }

    /// The flat channel index `gafe + 18*garc` used for array storage.
    #[inline]
    pub const fn index(self) -> u16 {
        self.gafe + GAFE_COUNT as u16 * self.garc
    }

    /// Inverse of [`index`](Self::index); `None` past the channel count.
    pub const fn from_index(index: u16) -> Option<Self> {
        if index >= (GARC_COUNT * GAFE_COUNT) as u16 {
            return None;
        }
        Some(Self {
            garc: index / GAFE_COUNT as u16,
            gafe: index % GAFE_COUNT as u16,
        })
    }
}

/// The tile/PMT pair read out by `(cable, channel)`.
///
/// `None` when the cable or channel is outside the 12×18 matrix.
pub fn tile_pmt(cable: u16, channel: u16) -> Option<TilePmt> {
    let row = tables::TILE_PMT.get(cable as usize)?;
    row.get(channel as usize).copied()
}

/// The electronics channel wired to `(tile, pmt)`.
///
/// `None` when the pair never appears in the wiring matrix.
pub fn garc_gafe(tile: u16, pmt: u16) -> Option<GarcGafe> {
    static REVERSE: OnceLock<HashMap<TilePmt, GarcGafe>> = OnceLock::new();
    let map = REVERSE.get_or_init(|| {
        let mut map = HashMap::new();
        for (garc, row) in tables::TILE_PMT.iter().enumerate() {
            for (gafe, &tile_pmt) in row.iter().enumerate() {
                if tile_pmt.tile == NO_TILE || tile_pmt.pmt == NO_TILE {
                    continue;
                }
                map.insert(tile_pmt, GarcGafe::new(garc as u16, gafe as u16));
            }
        }
        debug!(entries = map.len(), "built tile/pmt -> garc/gafe reverse map");
        map
    });
    map.get(&TilePmt::new(tile, pmt)).copied()
}

/// The tile behind a GEM register bit position.
///
/// `None` for an out-of-range index or a reserved must-be-zero slot.
pub fn tile_from_gem_index(index: u16) -> Option<u16> {
    match tables::GEM_TILE.get(index as usize) {
        Some(&NO_TILE) | None => None,
        Some(&tile) => Some(tile),
    }
}

/// The GEM register bit position of a tile.
pub fn gem_index_from_tile(tile: u16) -> Option<u16> {
    static REVERSE: OnceLock<HashMap<u16, u16>> = OnceLock::new();
    let map = REVERSE.get_or_init(|| {
        let map: HashMap<u16, u16> = tables::GEM_TILE
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile != NO_TILE)
            .map(|(index, &tile)| (tile, index as u16))
            .collect();
        debug!(entries = map.len(), "built tile -> gem index reverse map");
        map
    });
    map.get(&tile).copied()
}

/// The tile behind an enable/ROI register bit position.
pub fn tile_from_index(index: u16) -> Option<u16> {
    tables::REGISTER_TILE.get(index as usize).copied()
}

/// The enable/ROI register bit position of a tile.
pub fn index_from_tile(tile: u16) -> Option<u16> {
    static REVERSE: OnceLock<HashMap<u16, u16>> = OnceLock::new();
    let map = REVERSE.get_or_init(|| {
        let map: HashMap<u16, u16> = tables::REGISTER_TILE
            .iter()
            .enumerate()
            .map(|(index, &tile)| (tile, index as u16))
            .collect();
        debug!(entries = map.len(), "built tile -> enable/roi index reverse map");
        map
    });
    map.get(&tile).copied()
}

/// Build all three reverse maps now instead of on first lookup.
///
/// Lazy initialization is already safe under concurrent first use; this
/// just moves the one-time cost to a point of the caller's choosing.
pub fn prime_reverse_maps() {
    let _ = garc_gafe(NO_TILE, NO_TILE);
    let _ = gem_index_from_tile(NO_TILE);
    let _ = index_from_tile(NO_TILE);
}
