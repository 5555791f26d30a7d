//! Request extractors.
//!
//! - [`extract::AppJson`], [`extract::AppQuery`], [`extract::AppPath`] -- wrap
//!   Axum's extractors so rejections use the standard error envelope.
//! - [`identity::VoterIdentity`] -- pseudo-identity used for one-vote-per-voter.
//! - [`identity::CollectorId`] -- whose collection a request reads.
//! - [`admin::RequireAdmin`] -- requires the configured admin token.

pub mod admin;
pub mod extract;
pub mod identity;
