//! Domain logic for the Bitlings creature-collection backend.
//!
//! Everything in this crate is pure: no I/O, no locking. The store and the
//! HTTP layer call into these modules to validate input, apply vote
//! arithmetic, decide promotions and repair generator output.

pub mod collection;
pub mod creature;
pub mod error;
pub mod generation;
pub mod listing;
pub mod procedural;
pub mod rules;
pub mod stats;
pub mod types;
pub mod voting;
