use std::sync::Arc;

use bitlings_core::rules::GameRules;
use bitlings_db::DynStore;
use bitlings_generator::Generator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Entity store for proposals, votes, stats and collections.
    pub store: DynStore,
    /// External generative capability (stats and images).
    pub generator: Arc<dyn Generator>,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// Promotion and collection rules.
    pub rules: Arc<GameRules>,
}
