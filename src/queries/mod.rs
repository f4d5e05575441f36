//! Reshaping of raw snapshots into display-ready values.
//!
//! Everything here is pure: no I/O, no page access, no clock reads.

pub mod prices;
pub mod searches;
pub mod stats;
pub mod trends;
