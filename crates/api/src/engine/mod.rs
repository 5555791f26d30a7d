//! Workflows that span the store and the generator.
//!
//! Handlers stay thin: anything that reacts to a store result (promotion
//! side effects) or combines the generator with persistence lives here.

pub mod generation;
pub mod promotion;
