//! Customer endpoints.

use api_types::{
    CreateCustomerRequest, DataEnvelope, DeleteResponse, UpdateCustomerRequest,
};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use core_types::{Customer, SavingsRecord};
use uuid::Uuid;

use super::{ApiResult, bad_request, not_found};
use crate::state::AppState;

/// GET /api/customers
pub async fn list_customers(State(state): State<AppState>) -> Json<DataEnvelope<Customer>> {
    Json(DataEnvelope::new(state.customers.read().await.clone()))
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> ApiResult<Customer> {
    let name = req.name.trim();
    let phone = req.phone.trim();
    if name.is_empty() || phone.is_empty() {
        return Err(bad_request("name and phone are required"));
    }

    let mut customer = Customer::new(Uuid::new_v4().to_string(), name, phone, req.daily_amount);
    customer.email = req.email;
    customer.start_date = Some(req.start_date.unwrap_or_else(|| Utc::now().date_naive()));
    if let Some(branch_id) = req.branch_id {
        customer.branch_name = state
            .branches
            .iter()
            .find(|b| b.id == branch_id)
            .map(|b| b.name.clone());
        customer.branch_id = Some(branch_id);
    }

    state.customers.write().await.push(customer.clone());
    Ok(Json(customer))
}

/// PUT /api/customers/:id — partial update, absent fields unchanged.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCustomerRequest>,
) -> ApiResult<Customer> {
    let mut customers = state.customers.write().await;
    let customer = customers
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("customer", &id))?;

    if let Some(name) = req.name {
        customer.name = name;
    }
    if let Some(phone) = req.phone {
        customer.phone = phone;
    }
    if let Some(email) = req.email {
        customer.email = Some(email);
    }
    if let Some(daily_amount) = req.daily_amount {
        customer.daily_amount = daily_amount;
    }
    if let Some(status) = req.status {
        customer.status = status;
    }
    if let Some(branch_id) = req.branch_id {
        customer.branch_name = state
            .branches
            .iter()
            .find(|b| b.id == branch_id)
            .map(|b| b.name.clone());
        customer.branch_id = Some(branch_id);
    }

    Ok(Json(customer.clone()))
}

/// DELETE /api/customers/:id — also drops the customer's records.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResponse> {
    let mut customers = state.customers.write().await;
    let before = customers.len();
    customers.retain(|c| c.id != id);
    if customers.len() == before {
        return Err(not_found("customer", &id));
    }
    drop(customers);

    state.savings.write().await.retain(|r| r.customer.id != id);
    Ok(Json(DeleteResponse { success: true }))
}

/// GET /api/customers/:id/history
pub async fn customer_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<SavingsRecord>> {
    if !state.customers.read().await.iter().any(|c| c.id == id) {
        return Err(not_found("customer", &id));
    }

    let history: Vec<SavingsRecord> = state
        .savings
        .read()
        .await
        .iter()
        .filter(|r| r.customer.id == id)
        .cloned()
        .collect();
    Ok(Json(history))
}
