//! Stats generation for stored proposals.

use bitlings_core::error::CoreError;
use bitlings_core::generation::GeneratedBundle;
use bitlings_core::types::DbId;
use bitlings_db::models::stat_block::NewStatBlock;
use bitlings_generator::StatsRequest;

use crate::state::AppState;

/// Generate and persist the stat block of proposal `bitling_id`.
///
/// Fails with [`CoreError::Conflict`] when the proposal already has stats,
/// both before calling the generator and, for a concurrent request that won
/// the race, when persisting. Nothing is stored if generation fails.
pub async fn generate_for_proposal(
    state: &AppState,
    bitling_id: DbId,
) -> Result<GeneratedBundle, CoreError> {
    let existing = state.store.get_proposal(bitling_id).await?;
    if existing.stats.is_some() {
        return Err(CoreError::Conflict(format!(
            "Bitling {bitling_id} already has stats"
        )));
    }

    let request = StatsRequest {
        name: existing.proposal.name,
        description: existing.proposal.prompt,
        image_url: existing.proposal.image_url,
    };
    let normalized = state.generator.generate_stats(&request).await?;
    let bundle = normalized.bundle;

    state
        .store
        .attach_generated(
            bitling_id,
            NewStatBlock {
                stats: bundle.stats,
                moves: bundle.moves.clone(),
            },
            bundle.types.clone(),
        )
        .await?;

    tracing::info!(
        proposal_id = %bitling_id,
        types = ?bundle.types,
        moves = bundle.moves.len(),
        repaired = !normalized.repairs.is_empty(),
        "Generated stats",
    );
    Ok(bundle)
}
