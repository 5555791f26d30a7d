//! Entity store for proposals, stat blocks, votes, and collection entries.
//!
//! [`BitlingStore`] is the storage seam; [`MemoryStore`] is the in-process
//! implementation used by the API server and the test suites.

pub mod memory;
pub mod models;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use store::{BitlingStore, DynStore};
