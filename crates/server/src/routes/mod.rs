//! API route handlers.

mod branches;
mod customers;
mod overview;
mod savings;

pub use branches::*;
pub use customers::*;
pub use overview::*;
pub use savings::*;

use api_types::ApiError;
use axum::{Json, http::StatusCode};

/// Handler result: a JSON body or a status plus error payload.
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) fn not_found(what: &str, id: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::with_code(
            format!("{what} not found: {id}"),
            "NOT_FOUND",
        )),
    )
}

pub(crate) fn bad_request(message: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_code(message, "BAD_REQUEST")),
    )
}
