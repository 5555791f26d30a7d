//! Sorting, pagination, and leaderboard windows for proposal listings.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default page size for proposal listings.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Default number of leaderboard entries.
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

/// Ordering for proposal listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Creation timestamp, newest first.
    #[default]
    Newest,
    /// Net votes, highest first.
    TopRated,
}

/// Leaderboard time window, measured back from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeframe {
    #[default]
    Weekly,
    Monthly,
    AllTime,
}

impl Timeframe {
    /// Earliest creation timestamp included in the window, or `None` for
    /// no lower bound.
    pub fn window_start(self, now: Timestamp) -> Option<Timestamp> {
        match self {
            Timeframe::Weekly => Some(now - Duration::days(7)),
            Timeframe::Monthly => Some(now - Duration::days(30)),
            Timeframe::AllTime => None,
        }
    }

    /// Whether a proposal created at `created_at` falls inside the window.
    pub fn contains(self, created_at: Timestamp, now: Timestamp) -> bool {
        self.window_start(now).map_or(true, |start| created_at >= start)
    }
}

/// A validated, 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a page request from optional caller input.
    ///
    /// Missing values take defaults; zero or negative values are rejected;
    /// `limit` is capped at [`MAX_PAGE_SIZE`].
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, CoreError> {
        let page = positive(page, 1, "page")?;
        let limit = positive(limit, i64::from(DEFAULT_PAGE_SIZE), "limit")?;
        Ok(Self {
            page: u32::try_from(page).unwrap_or(u32::MAX),
            limit: u32::try_from(limit)
                .unwrap_or(MAX_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        })
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }

    /// Slice a fully sorted sequence down to this page. A page past the end
    /// yields an empty vector.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect()
    }
}

/// Validate a leaderboard limit: positive, capped at [`MAX_PAGE_SIZE`].
pub fn leaderboard_limit(limit: Option<i64>) -> Result<usize, CoreError> {
    let limit = positive(limit, i64::from(DEFAULT_LEADERBOARD_LIMIT), "limit")?;
    Ok(limit.min(i64::from(MAX_PAGE_SIZE)) as usize)
}

fn positive(value: Option<i64>, default: i64, name: &str) -> Result<i64, CoreError> {
    match value {
        None => Ok(default),
        Some(v) if v >= 1 => Ok(v),
        Some(v) => Err(CoreError::Validation(format!(
            "{name} must be a positive integer, got {v}"
        ))),
    }
}
