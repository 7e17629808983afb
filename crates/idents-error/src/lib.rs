//! Shared error type for the LAT identifier crates.
//!
//! Identifier construction fails fast: a malformed or out-of-range input is
//! rejected at the point of packing, never truncated into a half-valid id.
//! Conversion-table misses are *not* errors — the lookup crates report those
//! through `Option`, since scanning for unwired channels is ordinary control
//! flow.

use thiserror::Error;

/// Primary error type for identifier construction and field access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentsError {
    // === Packing errors ===
    /// A field value exceeds the 6-bit range of a packed volume identifier.
    #[error("field value {value} exceeds the packed-field maximum of {max}")]
    FieldTooLarge { value: u32, max: u32 },

    /// A volume identifier already holds its maximum number of fields.
    #[error("volume identifier is full ({max} fields)")]
    IdentifierFull { max: usize },

    /// A persisted `(value, size)` pair is not a well-formed packed word.
    #[error("raw volume identifier {value:#x} with size {size} has bits outside its fields")]
    RawValueInvalid { value: u64, size: usize },

    /// A packed subsystem identifier word violates its own layout, for
    /// example an annotation value bit set without its presence bit.
    #[error("packed identifier word {value:#x} is not well-formed")]
    PackedValueInvalid { value: u64 },

    /// A component value does not fit the bit slot of its packed layout.
    #[error("{what} out of range: {value} (max {max})")]
    OutOfRange {
        what: &'static str,
        value: u32,
        max: u32,
    },

    // === Decoder errors ===
    /// A volume identifier is too short to contain a subsystem's mandatory
    /// fields.
    #[error(
        "volume identifier too short for {subsystem}: need at least {need} fields, got {got}"
    )]
    TruncatedVolumeId {
        subsystem: &'static str,
        need: usize,
        got: usize,
    },

    /// A volume identifier's tag fields do not address the expected
    /// subsystem.
    #[error("volume identifier does not address a {expected} volume")]
    WrongSubsystem { expected: &'static str },

    /// Text that does not parse as an identifier's streamed form.
    #[error("malformed identifier text: {text:?}")]
    MalformedText { text: String },

    // === Accessor errors ===
    /// An optional field was not supplied by the source volume identifier.
    #[error("identifier has no {field} field")]
    FieldNotPresent { field: &'static str },
}

impl IdentsError {
    /// Whether the error was raised while decoding a volume identifier, as
    /// opposed to packing component values directly.
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::TruncatedVolumeId { .. } | Self::WrongSubsystem { .. }
        )
    }
}

/// Convenience alias used throughout the identifier crates.
pub type Result<T> = std::result::Result<T, IdentsError>;
