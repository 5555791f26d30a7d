//! Shared query parameter types for API handlers.

use bitlings_core::creature::ProposalStatus;
use bitlings_core::error::CoreError;
use bitlings_core::listing::{SortKey, Timeframe};
use serde::Deserialize;

/// Query parameters for `GET /bitlings` (`?status=&sort=&page=&limit=`).
///
/// `page` and `limit` are checked by `PageRequest::new`, so zero or negative
/// values produce a validation error instead of a deserialisation failure.
#[derive(Debug, Default, Deserialize)]
pub struct ListBitlingsParams {
    pub status: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListBitlingsParams {
    /// Parse the `status` filter. An empty value means "no filter".
    pub fn status_filter(&self) -> Result<Option<ProposalStatus>, CoreError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

/// Query parameters for `GET /bitlings/leaderboard` (`?timeframe=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    #[serde(default, alias = "timeFrame")]
    pub timeframe: Timeframe,
    pub limit: Option<i64>,
}
