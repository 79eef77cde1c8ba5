//! Request and response shapes of the records API.
//!
//! Shared by the web client and the development server so both sides of
//! the wire agree on one contract. Collection endpoints have shipped in
//! two envelope styles over time; [`ListPayload`] absorbs both on read,
//! while [`DataEnvelope`] is the canonical shape written by the server.

use chrono::NaiveDate;
use core_types::{CustomerStatus, SavingStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Standard error payload: `{ "error": "...", "code": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }

    pub fn with_code(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
        }
    }
}

/// Canonical `{ "data": [...] }` collection envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Collection payload tolerant of every envelope style the backend has
/// been seen using: a bare array, `{ "data": [...] }`, and
/// `{ "success": true, "data": [...] }` (the extra field is ignored).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Enveloped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Enveloped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

/// Body of `POST /api/customers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone: String,
    pub daily_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Body of `PUT /api/customers/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

/// Body of `POST /api/savings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavingsRequest {
    pub customer_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SavingStatus>,
}

/// Body of `PUT /api/savings/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSavingsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SavingStatus>,
}

/// Response of the delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Summary figures for the overview screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_customers: u32,
    pub active_customers: u32,
    pub total_branches: u32,
    pub total_saved: Decimal,
    pub today_total: Decimal,
    pub today_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::SavingsRecord;

    #[test]
    fn test_list_payload_parses_bare_array() {
        let json = r#"[{"id": "r1", "customerId": "c1", "amount": 100, "date": "2023-10-15"}]"#;
        let payload: ListPayload<SavingsRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_vec().len(), 1);
    }

    #[test]
    fn test_list_payload_parses_data_envelope() {
        let json =
            r#"{"data": [{"id": "r1", "customerId": "c1", "amount": 100, "date": "2023-10-15"}]}"#;
        let payload: ListPayload<SavingsRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_vec().len(), 1);
    }

    #[test]
    fn test_list_payload_ignores_success_flag() {
        let json = r#"{"success": true, "data": []}"#;
        let payload: ListPayload<SavingsRecord> = serde_json::from_str(json).unwrap();
        assert!(payload.into_vec().is_empty());
    }

    #[test]
    fn test_api_error_omits_absent_code() {
        let json = serde_json::to_string(&ApiError::new("nope")).unwrap();
        assert_eq!(json, r#"{"error":"nope"}"#);

        let json = serde_json::to_string(&ApiError::with_code("nope", "NOT_FOUND")).unwrap();
        assert!(json.contains("NOT_FOUND"));
    }

    #[test]
    fn test_update_request_accepts_partial_bodies() {
        let req: UpdateCustomerRequest = serde_json::from_str(r#"{"phone": "555-0000"}"#).unwrap();
        assert_eq!(req.phone.as_deref(), Some("555-0000"));
        assert!(req.name.is_none());
        assert!(req.status.is_none());
    }

    #[test]
    fn test_create_request_wire_names_are_camel_case() {
        let req = CreateCustomerRequest {
            name: "Sarah Johnson".to_string(),
            phone: "555-123-4567".to_string(),
            daily_amount: Decimal::from(500),
            email: None,
            branch_id: Some("b1".to_string()),
            start_date: NaiveDate::from_ymd_opt(2023, 5, 15),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"dailyAmount\""));
        assert!(json.contains("\"branchId\""));
        assert!(json.contains("\"startDate\""));
    }
}
