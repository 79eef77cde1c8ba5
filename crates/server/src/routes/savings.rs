//! Savings record endpoints.

use api_types::{CreateSavingsRequest, DeleteResponse, UpdateSavingsRequest};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use core_types::{CustomerLink, SavingsRecord};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{ApiResult, not_found};
use crate::state::AppState;

/// GET /api/savings
///
/// Served as a bare array, the oldest shape the SPA still has to
/// tolerate from the hosted backend.
pub async fn list_savings(State(state): State<AppState>) -> Json<Vec<SavingsRecord>> {
    Json(state.savings.read().await.clone())
}

/// POST /api/savings
///
/// The customer reference is resolved against the customer book; an
/// unknown id still creates the record, with an unresolved link, which
/// the UI renders under its placeholder label.
pub async fn create_saving(
    State(state): State<AppState>,
    Json(req): Json<CreateSavingsRequest>,
) -> ApiResult<SavingsRecord> {
    let mut customers = state.customers.write().await;
    let link = match customers.iter_mut().find(|c| c.id == req.customer_id) {
        Some(customer) => {
            customer.total_saved += req.amount;
            customer.days_active += 1;
            customer.last_visit = Some(Utc::now());
            customer.link()
        }
        None => CustomerLink::new(req.customer_id.clone(), None),
    };
    drop(customers);

    let mut record = SavingsRecord::new(Uuid::new_v4().to_string(), link, req.amount, req.date);
    if let Some(status) = req.status {
        record.status = status;
    }

    // Newest first, matching how the add-record screen lists them.
    state.savings.write().await.insert(0, record.clone());
    Ok(Json(record))
}

/// PUT /api/savings/:id — partial update, absent fields unchanged.
pub async fn update_saving(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSavingsRequest>,
) -> ApiResult<SavingsRecord> {
    let mut savings = state.savings.write().await;
    let record = savings
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found("savings record", &id))?;

    if let Some(amount) = req.amount {
        record.amount = amount;
    }
    if let Some(date) = req.date {
        record.date = date;
    }
    if let Some(status) = req.status {
        record.status = status;
    }

    Ok(Json(record.clone()))
}

/// DELETE /api/savings/:id — rolls the amount back out of the
/// customer's running total when the reference resolves.
pub async fn delete_saving(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResponse> {
    let mut savings = state.savings.write().await;
    let position = savings
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| not_found("savings record", &id))?;
    let record = savings.remove(position);
    drop(savings);

    let mut customers = state.customers.write().await;
    if let Some(customer) = customers.iter_mut().find(|c| c.id == record.customer.id) {
        customer.total_saved = if customer.total_saved > record.amount {
            customer.total_saved - record.amount
        } else {
            Decimal::ZERO
        };
        customer.days_active = customer.days_active.saturating_sub(1);
    }

    Ok(Json(DeleteResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use core_types::{SavingStatus, UNKNOWN_CUSTOMER};

    fn create_req(customer_id: &str, amount: i64) -> CreateSavingsRequest {
        CreateSavingsRequest {
            customer_id: customer_id.to_string(),
            amount: Decimal::from(amount),
            date: NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_resolves_customer_and_bumps_totals() {
        let state = AppState::seeded();
        let before = state
            .customers
            .read()
            .await
            .iter()
            .find(|c| c.id == "cus-1001")
            .unwrap()
            .clone();

        let Json(record) = create_saving(State(state.clone()), Json(create_req("cus-1001", 500)))
            .await
            .unwrap();

        assert_eq!(record.customer.display_name(), "Sarah Johnson");
        assert_eq!(record.status, SavingStatus::Paid);

        let customers = state.customers.read().await;
        let after = customers.iter().find(|c| c.id == "cus-1001").unwrap();
        assert_eq!(after.total_saved, before.total_saved + Decimal::from(500));
        assert_eq!(after.days_active, before.days_active + 1);

        // Newest record lands at the front of the list.
        assert_eq!(state.savings.read().await[0].id, record.id);
    }

    #[tokio::test]
    async fn test_create_with_unknown_customer_keeps_unresolved_link() {
        let state = AppState::seeded();

        let Json(record) = create_saving(State(state), Json(create_req("nobody", 500)))
            .await
            .unwrap();

        assert_eq!(record.customer.id, "nobody");
        assert_eq!(record.customer.display_name(), UNKNOWN_CUSTOMER);
    }

    #[tokio::test]
    async fn test_update_merges_partial_body() {
        let state = AppState::seeded();

        let req = UpdateSavingsRequest {
            status: Some(SavingStatus::Missed),
            ..UpdateSavingsRequest::default()
        };
        let Json(updated) = update_saving(State(state), Path("sav-2001".to_string()), Json(req))
            .await
            .unwrap();

        assert_eq!(updated.status, SavingStatus::Missed);
        assert_eq!(updated.amount, Decimal::from(15000));
    }

    #[tokio::test]
    async fn test_delete_rolls_back_customer_total() {
        let state = AppState::seeded();
        let before = state
            .customers
            .read()
            .await
            .iter()
            .find(|c| c.id == "cus-1001")
            .unwrap()
            .total_saved;

        let Json(resp) = delete_saving(State(state.clone()), Path("sav-2001".to_string()))
            .await
            .unwrap();
        assert!(resp.success);

        let customers = state.customers.read().await;
        let after = customers.iter().find(|c| c.id == "cus-1001").unwrap();
        assert_eq!(after.total_saved, before - Decimal::from(15000));
        assert!(!state.savings.read().await.iter().any(|r| r.id == "sav-2001"));
    }

    #[tokio::test]
    async fn test_unknown_record_is_404() {
        let state = AppState::seeded();
        let result = delete_saving(State(state), Path("missing".to_string())).await;
        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
