//! Client-side access to the records API.
//!
//! [`RecordsApi`] is the wire boundary: one method per endpoint, typed
//! with the shared request/response shapes and nothing else. [`Store`]
//! wraps an implementation with the read-through cache the dashboard
//! pages share. [`HttpApi`] is the browser implementation over `fetch`.

mod http;
mod store;

pub use http::HttpApi;
pub use store::Store;

use api_types::{
    CreateCustomerRequest, CreateSavingsRequest, OverviewStats, UpdateCustomerRequest,
    UpdateSavingsRequest,
};
use core_types::{Branch, Customer, SavingsRecord};
use thiserror::Error;

/// Errors surfaced to the UI. Every failure is terminal for the one
/// user action that triggered it; there is no retry layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Operations exposed by the records backend.
///
/// Futures returned here are not `Send`; the client runs on the
/// single-threaded browser event loop.
#[allow(async_fn_in_trait)]
pub trait RecordsApi {
    async fn list_customers(&self) -> Result<Vec<Customer>>;
    async fn create_customer(&self, req: &CreateCustomerRequest) -> Result<Customer>;
    async fn update_customer(&self, id: &str, req: &UpdateCustomerRequest) -> Result<Customer>;
    async fn delete_customer(&self, id: &str) -> Result<()>;
    async fn customer_history(&self, id: &str) -> Result<Vec<SavingsRecord>>;

    async fn list_savings(&self) -> Result<Vec<SavingsRecord>>;
    async fn create_saving(&self, req: &CreateSavingsRequest) -> Result<SavingsRecord>;
    async fn update_saving(&self, id: &str, req: &UpdateSavingsRequest) -> Result<SavingsRecord>;
    async fn delete_saving(&self, id: &str) -> Result<()>;

    async fn list_branches(&self) -> Result<Vec<Branch>>;
    async fn overview(&self) -> Result<OverviewStats>;
}
