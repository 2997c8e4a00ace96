//! Data model for sequence alignments.
//!
//! An [Alignment] is built once by the NEXUS parser, rewritten in place by
//! the [transform](crate::transform) pipeline and consumed by a
//! [writer](crate::writer). Labels are unique; see [Alignment::insert] for
//! the collision policy.

pub mod alignment;

pub use alignment::{Alignment, AlignmentRecord, FormatInfo};
