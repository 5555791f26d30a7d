//! Domain model structs and DTOs.
//!
//! Each submodule contains the stored entity struct (serialised camelCase
//! for the HTTP layer) and, where the entity is created from caller input,
//! a create DTO.

pub mod collection;
pub mod proposal;
pub mod stat_block;
pub mod vote;
