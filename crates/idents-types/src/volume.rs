//! Packed volume identifiers.
//!
//! A volume identifier is the ordered sequence of small integers produced by
//! walking the nested-volume geometry description (tower, tray, ladder, ...).
//! The sequence is packed into a single 64-bit word so identifiers are cheap
//! to copy, hash, and use as sorted-map keys while reconstructing event data.
//!
//! Each field occupies 6 bits and the first field appended sits in the
//! most-significant group actually used:
//!
//! ```text
//!  63      60                                                        0
//! ┌────────┬─────────┬─────────┬─────────┬──          ──┬───────────┐
//! │ unused │ field 0 │ field 1 │ field 2 │     ...      │ (zero)    │
//! │ 4 bits │ 54..60  │ 48..54  │ 42..48  │              │           │
//! └────────┴─────────┴─────────┴─────────┴──          ──┴───────────┘
//! ```
//!
//! Since 64 is not evenly divisible by 6, the top 4 bits are always zero.

use std::fmt;

use idents_error::{IdentsError, Result};

/// Width of one packed field.
pub const BITS_PER_FIELD: usize = 6;

/// Maximum number of fields in one identifier (`64 / 6`).
pub const MAX_FIELDS: usize = 64 / BITS_PER_FIELD;

/// Maximum value of a single field.
pub const MAX_FIELD_VALUE: u32 = (1 << BITS_PER_FIELD) - 1;

/// Shift of field 0, the most-significant group.
const TOP_SHIFT: usize = (MAX_FIELDS - 1) * BITS_PER_FIELD;

/// Geometry tag values for field 0 (the LAT object field).
///
/// These must correspond with the constants in the geometry description in
/// use when the identifier was created, or the subsystem predicates and
/// decoders will lie.
pub(crate) const TAG_LAT_TOWERS: u32 = 0;
pub(crate) const TAG_LAT_ACD: u32 = 1;

/// Geometry tag values for field 3 (the tower object field).
pub(crate) const TAG_TOWER_CAL: u32 = 0;
pub(crate) const TAG_TOWER_TKR: u32 = 1;

/// Field positions shared by the tower-object subsystems.
pub(crate) const FIELD_LAT_OBJ: usize = 0;
pub(crate) const FIELD_TOWER_OBJ: usize = 3;

/// An ordered sequence of 6-bit geometry fields packed into one 64-bit word.
///
/// Ordering is by the packed word first and the field count second, so that
/// a shorter identifier sorts before any extension of itself. Two
/// identifiers are equal only when both the word and the count match.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "RawParts", into = "RawParts")]
pub struct VolumeIdentifier {
    value: u64,
    size: usize,
}

impl VolumeIdentifier {
    /// The empty identifier.
    #[inline]
    pub const fn new() -> Self {
        Self { value: 0, size: 0 }
    }

    /// Rebuild an identifier from a persisted `(value, size)` pair.
    ///
    /// Rejects a size over [`MAX_FIELDS`] and any word with bits set outside
    /// the `size` leading field groups.
    pub const fn from_raw(value: u64, size: usize) -> Result<Self> {
        if size > MAX_FIELDS || value & !used_mask(size) != 0 {
            return Err(IdentsError::RawValueInvalid { value, size });
        }
        Ok(Self { value, size })
    }

    /// Build an identifier by packing `fields` in order.
    pub fn from_fields(fields: &[u32]) -> Result<Self> {
        let mut id = Self::new();
        for &field in fields {
            id.push(field)?;
        }
        Ok(id)
    }

    /// Append one field at the tail.
    ///
    /// Fails with [`IdentsError::FieldTooLarge`] for a value over
    /// [`MAX_FIELD_VALUE`] and [`IdentsError::IdentifierFull`] when the
    /// identifier already holds [`MAX_FIELDS`] fields.
    pub fn push(&mut self, field: u32) -> Result<()> {
        if field > MAX_FIELD_VALUE {
            return Err(IdentsError::FieldTooLarge {
                value: field,
                max: MAX_FIELD_VALUE,
            });
        }
        if self.size == MAX_FIELDS {
            return Err(IdentsError::IdentifierFull { max: MAX_FIELDS });
        }
        self.value |= u64::from(field) << (TOP_SHIFT - BITS_PER_FIELD * self.size);
        self.size += 1;
        Ok(())
    }

    /// Concatenate another identifier's fields, in order, onto the tail.
    pub fn append(&mut self, other: &VolumeIdentifier) -> Result<()> {
        if self.size + other.size > MAX_FIELDS {
            return Err(IdentsError::IdentifierFull { max: MAX_FIELDS });
        }
        self.value |= other.value >> (BITS_PER_FIELD * self.size);
        self.size += other.size;
        Ok(())
    }

    /// Splice another identifier's fields in front of this one's; they
    /// become the new most-significant fields.
    pub fn prepend(&mut self, other: &VolumeIdentifier) -> Result<()> {
        if self.size + other.size > MAX_FIELDS {
            return Err(IdentsError::IdentifierFull { max: MAX_FIELDS });
        }
        self.value = other.value | (self.value >> (BITS_PER_FIELD * other.size));
        self.size += other.size;
        Ok(())
    }

    /// The i-th field, 0-indexed from the first appended.
    ///
    /// Returns `None` when `index >= size`.
    #[inline]
    pub const fn get(&self, index: usize) -> Option<u32> {
        if index >= self.size {
            return None;
        }
        let shift = TOP_SHIFT - BITS_PER_FIELD * index;
        Some(((self.value >> shift) & MAX_FIELD_VALUE as u64) as u32)
    }

    /// The i-th field, 0-indexed from the first appended.
    ///
    /// # Panics
    ///
    /// Panics when `index >= size`; use [`get`](Self::get) for the checked
    /// form.
    #[inline]
    pub fn field(&self, index: usize) -> u32 {
        match self.get(index) {
            Some(field) => field,
            None => panic!(
                "field index {index} out of bounds for volume identifier of size {}",
                self.size
            ),
        }
    }

    /// Number of fields present.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The raw packed word. Primary sort key.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Render the fields as decimal numbers, each preceded by `delimiter`.
    ///
    /// The string starts with the delimiter: `[0, 1, 2]` renders as
    /// `"/0/1/2"`. The empty identifier renders as `""`.
    pub fn name(&self, delimiter: &str) -> String {
        let mut out = String::new();
        for index in 0..self.size {
            out.push_str(delimiter);
            out.push_str(&self.field(index).to_string());
        }
        out
    }

    /// Iterate the fields in order.
    pub fn fields(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.size).map(|index| self.field(index))
    }

    /// Whether the leading fields say "tracker".
    pub fn is_tkr(&self) -> bool {
        self.size > FIELD_TOWER_OBJ
            && self.field(FIELD_LAT_OBJ) == TAG_LAT_TOWERS
            && self.field(FIELD_TOWER_OBJ) == TAG_TOWER_TKR
    }

    /// Whether the leading fields say "calorimeter".
    pub fn is_cal(&self) -> bool {
        self.size > FIELD_TOWER_OBJ
            && self.field(FIELD_LAT_OBJ) == TAG_LAT_TOWERS
            && self.field(FIELD_TOWER_OBJ) == TAG_TOWER_CAL
    }

    /// Whether the leading fields say "ACD".
    pub fn is_acd(&self) -> bool {
        self.size > FIELD_LAT_OBJ && self.field(FIELD_LAT_OBJ) == TAG_LAT_ACD
    }
}

/// Mask of the bits occupied by the `size` leading field groups.
const fn used_mask(size: usize) -> u64 {
    if size == 0 {
        return 0;
    }
    ((1_u64 << (BITS_PER_FIELD * size)) - 1) << (TOP_SHIFT + BITS_PER_FIELD - BITS_PER_FIELD * size)
}

impl fmt::Display for VolumeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name("/"))
    }
}

/// Persisted form of a [`VolumeIdentifier`]; revalidated on deserialize.
#[derive(serde::Serialize, serde::Deserialize)]
struct RawParts {
    value: u64,
    size: usize,
}

impl From<VolumeIdentifier> for RawParts {
    fn from(id: VolumeIdentifier) -> Self {
        Self {
            value: id.value,
            size: id.size,
        }
    }
}

impl TryFrom<RawParts> for VolumeIdentifier {
    type Error = IdentsError;

    fn try_from(raw: RawParts) -> Result<Self> {
        Self::from_raw(raw.value, raw.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(fields: &[u32]) -> VolumeIdentifier {
        VolumeIdentifier::from_fields(fields).unwrap()
    }

    #[test]
    fn push_then_read_back() {
        let fields = [0_u32, 63, 1, 40, 12, 5, 0, 63, 2, 33];
        for n in 0..=fields.len() {
            let vid = id(&fields[..n]);
            assert_eq!(vid.size(), n);
            for (i, &f) in fields[..n].iter().enumerate() {
                assert_eq!(vid.field(i), f, "field {i} of a {n}-field identifier");
                assert_eq!(vid.get(i), Some(f));
            }
            assert_eq!(vid.get(n), None);
        }
    }

    #[test]
    fn first_field_is_most_significant() {
        let vid = id(&[1]);
        assert_eq!(vid.value(), 1 << 54);

        let vid = id(&[1, 2]);
        assert_eq!(vid.value(), (1 << 54) | (2 << 48));
    }

    #[test]
    fn top_four_bits_stay_clear() {
        let vid = id(&[63, 63, 63, 63, 63, 63, 63, 63, 63, 63]);
        assert_eq!(vid.value() >> 60, 0);
        assert_eq!(vid.value(), (1 << 60) - 1);
    }

    #[test]
    fn push_rejects_oversized_field() {
        let mut vid = VolumeIdentifier::new();
        assert_eq!(
            vid.push(64),
            Err(IdentsError::FieldTooLarge { value: 64, max: 63 })
        );
        // The failed push must not have touched the identifier.
        assert_eq!(vid, VolumeIdentifier::new());
    }

    #[test]
    fn push_rejects_eleventh_field() {
        let mut vid = id(&[1; 10]);
        assert_eq!(vid.push(0), Err(IdentsError::IdentifierFull { max: 10 }));
        assert_eq!(vid.push(63), Err(IdentsError::IdentifierFull { max: 10 }));
        assert_eq!(vid.size(), 10);
    }

    #[test]
    fn append_concatenates_in_order() {
        let mut vid = id(&[1, 2]);
        vid.append(&id(&[3, 4, 5])).unwrap();
        assert_eq!(vid, id(&[1, 2, 3, 4, 5]));

        vid.append(&VolumeIdentifier::new()).unwrap();
        assert_eq!(vid, id(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn prepend_splices_in_front() {
        let mut vid = id(&[3, 4, 5]);
        vid.prepend(&id(&[1, 2])).unwrap();
        assert_eq!(vid, id(&[1, 2, 3, 4, 5]));

        let mut vid = id(&[7]);
        vid.prepend(&VolumeIdentifier::new()).unwrap();
        assert_eq!(vid, id(&[7]));
    }

    #[test]
    fn append_and_prepend_respect_capacity() {
        let mut vid = id(&[1; 6]);
        assert_eq!(
            vid.append(&id(&[2; 5])),
            Err(IdentsError::IdentifierFull { max: 10 })
        );
        assert_eq!(
            vid.prepend(&id(&[2; 5])),
            Err(IdentsError::IdentifierFull { max: 10 })
        );
        // Still intact after the rejected splices.
        assert_eq!(vid, id(&[1; 6]));
    }

    #[test]
    fn ordering_value_primary_size_tiebreak() {
        // [1, 1], [1, 1, 0] and [1, 1, 0, 0] pack to the same word.
        let a = id(&[1, 1]);
        let b = id(&[1, 1, 0]);
        let c = id(&[1, 1, 0, 0]);
        assert_eq!(a.value(), b.value());
        assert_eq!(b.value(), c.value());
        assert!(a < b && b < c);

        // A differing word decides regardless of size.
        let d = id(&[0, 2]);
        assert!(d < a);
        assert_ne!(a, b);
        assert_eq!(a, id(&[1, 1]));
    }

    #[test]
    fn name_leads_with_delimiter() {
        assert_eq!(id(&[0, 1, 2]).name("/"), "/0/1/2");
        assert_eq!(id(&[40]).name("."), ".40");
        assert_eq!(VolumeIdentifier::new().name("/"), "");
        assert_eq!(id(&[0, 1, 2]).to_string(), "/0/1/2");
    }

    #[test]
    fn from_raw_validates() {
        let vid = id(&[1, 2, 3]);
        let restored = VolumeIdentifier::from_raw(vid.value(), vid.size()).unwrap();
        assert_eq!(restored, vid);

        // Stray bits below the used groups.
        assert!(VolumeIdentifier::from_raw(vid.value() | 1, 3).is_err());
        // Size over the cap.
        assert!(VolumeIdentifier::from_raw(0, 11).is_err());
        // Top 4 bits are never legal.
        assert!(VolumeIdentifier::from_raw(1 << 63, 10).is_err());
        assert!(VolumeIdentifier::from_raw(0, 10).is_ok());
    }

    #[test]
    fn subsystem_predicates() {
        assert!(id(&[0, 1, 2, 1, 4]).is_tkr());
        assert!(id(&[0, 1, 2, 0, 5, 0, 10]).is_cal());
        assert!(id(&[1, 0, 40, 2, 3]).is_acd());

        assert!(!id(&[0, 1, 2, 0, 5]).is_tkr());
        assert!(!id(&[0, 1, 2]).is_tkr());
        assert!(!id(&[0, 1, 2, 1]).is_cal());
        assert!(!id(&[0, 1]).is_acd());
        assert!(!VolumeIdentifier::new().is_acd());
    }

    #[test]
    fn serde_round_trip() {
        let vid = id(&[0, 1, 2, 1, 4, 0, 1]);
        let json = serde_json::to_string(&vid).unwrap();
        let back: VolumeIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vid);
    }

    #[test]
    fn serde_rejects_tampered_raw() {
        let json = r#"{"value":1,"size":0}"#;
        assert!(serde_json::from_str::<VolumeIdentifier>(json).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_fields() -> impl Strategy<Value = Vec<u32>> {
            proptest::collection::vec(0_u32..=63, 0..=10)
        }

        proptest! {
            #[test]
            fn round_trip_arbitrary(fields in arb_fields()) {
                let vid = id(&fields);
                prop_assert_eq!(vid.size(), fields.len());
                let decoded: Vec<u32> = vid.fields().collect();
                prop_assert_eq!(decoded, fields);
            }

            /// Packed-word ordering agrees with lexicographic field order.
            #[test]
            fn ordering_is_lexicographic(a in arb_fields(), b in arb_fields()) {
                let ia = id(&a);
                let ib = id(&b);
                prop_assert_eq!(ia.cmp(&ib), a.cmp(&b));
            }

            #[test]
            fn split_append_equals_whole(fields in arb_fields(), cut in 0_usize..=10) {
                let cut = cut.min(fields.len());
                let mut vid = id(&fields[..cut]);
                vid.append(&id(&fields[cut..])).unwrap();
                prop_assert_eq!(vid, id(&fields));

                let mut vid = id(&fields[cut..]);
                vid.prepend(&id(&fields[..cut])).unwrap();
                prop_assert_eq!(vid, id(&fields));
            }
        }
    }
}
