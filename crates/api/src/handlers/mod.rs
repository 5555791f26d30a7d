pub mod admin;
pub mod bitlings;
pub mod collection;
pub mod generation;
pub mod vote;
