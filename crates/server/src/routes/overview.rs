//! Overview endpoint: the summary figures for the landing screen,
//! computed with the same derived-view pass the SPA uses client-side.

use api_types::OverviewStats;
use axum::{Json, extract::State};
use chrono::Utc;
use core_types::CustomerStatus;
use derived_view::{ViewQuery, aggregate, derive};

use crate::state::AppState;

/// GET /api/overview
pub async fn get_overview(State(state): State<AppState>) -> Json<OverviewStats> {
    let customers = state.customers.read().await;
    let savings = state.savings.read().await;

    let saved = aggregate(customers.iter());
    let active = customers
        .iter()
        .filter(|c| c.status == CustomerStatus::Active)
        .count();

    let today = derive(&savings, &ViewQuery::for_date(Utc::now().date_naive())).summary;

    Json(OverviewStats {
        total_customers: customers.len() as u32,
        active_customers: active as u32,
        total_branches: state.branches.len() as u32,
        total_saved: saved.total,
        today_total: today.total,
        today_count: today.count as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_overview_totals_from_seeded_state() {
        let state = AppState::seeded();
        let Json(stats) = get_overview(State(state.clone())).await;

        assert_eq!(stats.total_customers, 5);
        assert_eq!(stats.active_customers, 3);
        assert_eq!(stats.total_branches, 3);
        assert_eq!(
            stats.total_saved,
            Decimal::from(12500 + 30000 + 15000 + 45000 + 5000)
        );

        // Two seeded records are dated today.
        assert_eq!(stats.today_count, 2);
        assert_eq!(stats.today_total, Decimal::from(15000 + 8500));
    }

    #[tokio::test]
    async fn test_overview_on_empty_state_is_all_zero() {
        let state = AppState::new(Vec::new(), Vec::new(), Vec::new());
        let Json(stats) = get_overview(State(state)).await;

        assert_eq!(stats.total_customers, 0);
        assert_eq!(stats.today_count, 0);
        assert_eq!(stats.total_saved, Decimal::ZERO);
    }
}
