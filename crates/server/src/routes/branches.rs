//! Branch endpoints. Branches are static reference data in this
//! fixture; the hosted backend owns their lifecycle.

use api_types::DataEnvelope;
use axum::{Json, extract::State};
use core_types::Branch;

use crate::state::AppState;

/// GET /api/branches
pub async fn list_branches(State(state): State<AppState>) -> Json<DataEnvelope<Branch>> {
    Json(DataEnvelope::new(state.branches.as_ref().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_branches_is_enveloped() {
        let state = AppState::seeded();
        let Json(envelope) = list_branches(State(state)).await;
        assert!(!envelope.data.is_empty());
        assert!(envelope.data.iter().any(|b| b.name == "Downtown Headquarters"));
    }
}
