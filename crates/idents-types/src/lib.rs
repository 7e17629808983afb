//! Identifier types for the LAT detector simulation and reconstruction
//! framework.
//!
//! The geometry description names every sensitive volume by a nested path of
//! small integers; [`VolumeIdentifier`] packs that path into one 64-bit
//! word. The subsystem identifiers ([`AcdId`], [`CalXtalId`], [`TkrId`])
//! each decode a validly-tagged volume identifier into their own dense
//! packed layout with named accessors for face, row, tray, ladder, and so
//! on.
//!
//! The two identifier families are not interchangeable: a volume identifier
//! addresses a geometry volume, a subsystem identifier addresses a readout
//! element. Bridging them is the caller's job.

pub mod acd;
pub mod axis;
pub mod cal;
pub mod tkr;
pub mod tower;
pub mod volume;

pub use acd::{AcdGapId, AcdId};
pub use axis::Axis;
pub use cal::{AdcRange, CalTrigMode, CalXtalId, XtalFace};
pub use tkr::TkrId;
pub use tower::TowerId;
pub use volume::{VolumeIdentifier, BITS_PER_FIELD, MAX_FIELDS, MAX_FIELD_VALUE};
