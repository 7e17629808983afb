//! Fixed hardware wiring tables.
//!
//! These encode the flight cabling harness: which tile and PMT each
//! electronics channel reads out, and the two register bit-position
//! orderings (GEM, enable/ROI) of the tile numbers. They never change at
//! runtime.

use crate::{TilePmt, GAFE_COUNT, GARC_COUNT, NO_TILE};

const fn tp(pmt: u16, tile: u16) -> TilePmt {
    TilePmt { tile, pmt }
}

/// (cable, channel) → tile/PMT. Even-numbered cables carry PMT A (0) of
/// their tiles, odd-numbered cables PMT B (1).
#[rustfmt::skip]
pub(crate) const TILE_PMT: [[TilePmt; GAFE_COUNT]; GARC_COUNT] = [
    [tp(0, 120),  tp(0, 1004), tp(0, 502),  tp(0, 1005), // 0
     tp(0, 121),  tp(0, 111),  tp(0, 101),  tp(0, 122),
     tp(0, 112),  tp(0, 102),  tp(0, 103),  tp(0, 113),
     tp(0, 123),  tp(0, 503),  tp(0, 104),  tp(0, 114),
     tp(0, 124),  tp(0, 130)],
    [tp(1, 130),  tp(1, 120),  tp(1, 110),  tp(1, 100),  // 1
     tp(1, 500),  tp(1, 121),  tp(1, 111),  tp(1, 101),
     tp(1, 102),  tp(1, 112),  tp(1, 122),  tp(1, 103),
     tp(1, 113),  tp(1, 123),  tp(1, 1005), tp(1, 501),
     tp(1, 1004), tp(1, 124)],
    [tp(0, 110),  tp(0, 100),  tp(0, 220),  tp(0, 210),  // 2
     tp(0, 600),  tp(0, 200),  tp(0, 0),    tp(0, 10),
     tp(0, 20),   tp(0, 221),  tp(0, 211),  tp(0, 201),
     tp(0, 1),    tp(0, 11),   tp(0, 21),   tp(0, 22),
     tp(0, 1006), tp(0, 2)],
    [tp(1, 2),    tp(1, 601),  tp(1, 22),   tp(1, 21),   // 3
     tp(1, 11),   tp(1, 1),    tp(1, 201),  tp(1, 211),
     tp(1, 221),  tp(1, 20),   tp(1, 10),   tp(1, 0),
     tp(1, 200),  tp(1, 1006), tp(1, 210),  tp(1, 220),
     tp(1, 1003), tp(1, 230)],
    [tp(0, 222),  tp(0, 602),  tp(0, 212),  tp(0, 202),  // 4
     tp(0, 12),   tp(0, 13),   tp(0, 3),    tp(0, 203),
     tp(0, 213),  tp(0, 223),  tp(0, 14),   tp(0, 4),
     tp(0, 204),  tp(0, 1007), tp(0, 214),  tp(0, 224),
     tp(0, 1010), tp(0, 230)],
    [tp(1, 310),  tp(1, 300),  tp(1, 224),  tp(1, 214),  // 5
     tp(1, 603),  tp(1, 204),  tp(1, 4),    tp(1, 14),
     tp(1, 223),  tp(1, 213),  tp(1, 203),  tp(1, 3),
     tp(1, 13),   tp(1, 12),   tp(1, 202),  tp(1, 212),
     tp(1, 1007), tp(1, 222)],
    [tp(0, 324),  tp(0, 1009), tp(0, 501),  tp(0, 1008), // 6
     tp(0, 323),  tp(0, 313),  tp(0, 303),  tp(0, 322),
     tp(0, 312),  tp(0, 302),  tp(0, 301),  tp(0, 311),
     tp(0, 321),  tp(0, 500),  tp(0, 300),  tp(0, 310),
     tp(0, 320),  tp(0, 330)],
    [tp(1, 330),  tp(1, 324),  tp(1, 314),  tp(1, 304),  // 7
     tp(1, 503),  tp(1, 323),  tp(1, 313),  tp(1, 303),
     tp(1, 302),  tp(1, 312),  tp(1, 322),  tp(1, 301),
     tp(1, 311),  tp(1, 321),  tp(1, 1008), tp(1, 502),
     tp(1, 1009), tp(1, 320)],
    [tp(0, 314),  tp(0, 304),  tp(0, 1000), tp(0, 424),  // 8
     tp(0, 603),  tp(0, 414),  tp(0, 404),  tp(0, 44),
     tp(0, 34),   tp(0, 24),   tp(0, 423),  tp(0, 413),
     tp(0, 403),  tp(0, 43),   tp(0, 33),   tp(0, 23),
     tp(0, 1001), tp(0, 42)],
    [tp(1, 42),   tp(1, 602),  tp(1, 23),   tp(1, 33),   // 9
     tp(1, 43),   tp(1, 403),  tp(1, 413),  tp(1, 423),
     tp(1, 24),   tp(1, 34),   tp(1, 44),   tp(1, 404),
     tp(1, 414),  tp(1, 1010), tp(1, 424),  tp(1, 1000),
     tp(1, 1001), tp(1, 430)],
    [tp(0, 422),  tp(0, 601),  tp(0, 412),  tp(0, 402),  // 10
     tp(0, 32),   tp(0, 31),   tp(0, 41),   tp(0, 401),
     tp(0, 411),  tp(0, 421),  tp(0, 30),   tp(0, 40),
     tp(0, 400),  tp(0, 1002), tp(0, 410),  tp(0, 420),
     tp(0, 1003), tp(0, 430)],
    [tp(1, 114),  tp(1, 104),  tp(1, 420),  tp(1, 410),  // 11
     tp(1, 600),  tp(1, 400),  tp(1, 40),   tp(1, 30),
     tp(1, 421),  tp(1, 411),  tp(1, 401),  tp(1, 41),
     tp(1, 31),   tp(1, 32),   tp(1, 402),  tp(1, 412),
     tp(1, 1002), tp(1, 422)],
];

/// GEM register bit position → tile number. Slots 89–95, 104–111 and
/// 123–127 are must-be-zero register bits with no channel behind them.
#[rustfmt::skip]
pub(crate) const GEM_TILE: [u16; 128] = [
    200, 201, 202, 203, 204,                     // X - minus side 0-15
    210, 211, 212, 213, 214,
    220, 221, 222, 223, 224,
    230,
    400, 401, 402, 403, 404,                     // X - plus side 16-31
    410, 411, 412, 413, 414,
    420, 421, 422, 423, 424,
    430,
    100, 101, 102, 103, 104,                     // Y - minus side 32-47
    110, 111, 112, 113, 114,
    120, 121, 122, 123, 124,
    130,
    300, 301, 302, 303, 304,                     // Y - plus side 48-63
    310, 311, 312, 313, 314,
    320, 321, 322, 323, 324,
    330,
    0, 1, 2, 3, 4,                               // top 64-88
    10, 11, 12, 13, 14,
    20, 21, 22, 23, 24,
    30, 31, 32, 33, 34,
    40, 41, 42, 43, 44,
    NO_TILE, NO_TILE, NO_TILE, NO_TILE, NO_TILE, // 89-95 must be zero
    NO_TILE, NO_TILE,
    500, 501, 502, 503,                          // ribbons 96-103
    600, 601, 602, 603,
    NO_TILE, NO_TILE, NO_TILE, NO_TILE,          // 104-111 must be zero
    NO_TILE, NO_TILE, NO_TILE, NO_TILE,
    1000, 1001, 1002, 1003, 1004, 1005,          // not assigned 112-122
    1006, 1007, 1008, 1009, 1010,
    NO_TILE, NO_TILE, NO_TILE, NO_TILE, NO_TILE, // 123-127 must be zero
];

/// Enable/ROI register bit position → tile number. Every slot is wired.
#[rustfmt::skip]
pub(crate) const REGISTER_TILE: [u16; 108] = [
    0, 1, 2, 3, 4, 10, 11, 12, 13, 14,
    20, 21, 22, 23, 24, 30, 31, 32, 33, 34,
    40, 41, 42, 43, 44, 1002,
    1003, 100, 101, 102, 103, 104, 110, 111, 112, 113, 114,
    120, 121, 122, 123, 124, 130, 1004,
    1005, 200, 201, 202, 203, 204, 210, 211, 212, 213, 214,
    220, 221, 222, 223, 224, 230, 1006,
    1007, 300, 301, 302, 303, 304, 310, 311, 312, 313, 314,
    320, 321, 322, 323, 324, 330, 1008,
    1009, 400, 401, 402, 403, 404, 410, 411, 412, 413, 414,
    420, 421, 422, 423, 424, 430, 1000,
    1001, 500, 501, 502, 503, 600, 601, 602, 603, 1010,
];
