//! Detector identifier types for the LAT simulation and reconstruction
//! framework.
//!
//! This facade re-exports the identifier family:
//!
//! - [`VolumeIdentifier`] — a nested geometry path packed into one 64-bit
//!   word, ordered and hashable for use as a map key;
//! - [`AcdId`], [`CalXtalId`], [`TkrId`] — per-subsystem decoders that turn
//!   a validly-tagged volume identifier into a dense readout-element id;
//! - [`TowerId`], [`Axis`], [`AcdGapId`] — the supporting vocabulary;
//! - [`acdconv`] — ACD electronics↔detector channel conversion tables.

pub use idents_error::{IdentsError, Result};
pub use idents_types::{
    AcdGapId, AcdId, AdcRange, Axis, CalTrigMode, CalXtalId, TkrId, TowerId, VolumeIdentifier,
    XtalFace, BITS_PER_FIELD, MAX_FIELDS, MAX_FIELD_VALUE,
};

pub use idents_acdconv as acdconv;
