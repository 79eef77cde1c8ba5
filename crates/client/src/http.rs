//! `RecordsApi` over the browser `fetch` API.

use api_types::{
    ApiError, CreateCustomerRequest, CreateSavingsRequest, DeleteResponse, ListPayload,
    OverviewStats, UpdateCustomerRequest, UpdateSavingsRequest,
};
use core_types::{Branch, Customer, SavingsRecord};
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, RecordsApi, Result};

/// HTTP client for the records API. An empty base targets the serving
/// origin, which is how the dashboard is deployed behind the dev
/// server's static fallback.
pub struct HttpApi {
    base: String,
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        decode(check(resp).await?).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = match method {
            "POST" => Request::post(&self.url(path)),
            _ => Request::put(&self.url(path)),
        };
        let resp = builder
            .json(body)
            .map_err(|e| ClientError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        decode(check(resp).await?).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let resp = Request::delete(&self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let resp = check(resp).await?;
        let status = resp.status();
        let body: DeleteResponse = decode(resp).await?;
        if body.success {
            Ok(())
        } else {
            Err(ClientError::Api {
                status,
                message: "delete was not applied".to_string(),
            })
        }
    }
}

/// Turn a non-2xx response into an error, preferring the server's own
/// message when the body carries one.
async fn check(resp: Response) -> Result<Response> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let fallback = resp.status_text();
    let message = match resp.json::<ApiError>().await {
        Ok(body) => body.error,
        Err(_) => fallback,
    };
    Err(ClientError::Api { status, message })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

impl RecordsApi for HttpApi {
    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let payload: ListPayload<Customer> = self.get_json("/api/customers").await?;
        Ok(payload.into_vec())
    }

    async fn create_customer(&self, req: &CreateCustomerRequest) -> Result<Customer> {
        self.send_json("POST", "/api/customers", req).await
    }

    async fn update_customer(&self, id: &str, req: &UpdateCustomerRequest) -> Result<Customer> {
        self.send_json("PUT", &format!("/api/customers/{id}"), req)
            .await
    }

    async fn delete_customer(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/customers/{id}")).await
    }

    async fn customer_history(&self, id: &str) -> Result<Vec<SavingsRecord>> {
        let payload: ListPayload<SavingsRecord> = self
            .get_json(&format!("/api/customers/{id}/history"))
            .await?;
        Ok(payload.into_vec())
    }

    async fn list_savings(&self) -> Result<Vec<SavingsRecord>> {
        let payload: ListPayload<SavingsRecord> = self.get_json("/api/savings").await?;
        Ok(payload.into_vec())
    }

    async fn create_saving(&self, req: &CreateSavingsRequest) -> Result<SavingsRecord> {
        self.send_json("POST", "/api/savings", req).await
    }

    async fn update_saving(&self, id: &str, req: &UpdateSavingsRequest) -> Result<SavingsRecord> {
        self.send_json("PUT", &format!("/api/savings/{id}"), req)
            .await
    }

    async fn delete_saving(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/savings/{id}")).await
    }

    async fn list_branches(&self) -> Result<Vec<Branch>> {
        let payload: ListPayload<Branch> = self.get_json("/api/branches").await?;
        Ok(payload.into_vec())
    }

    async fn overview(&self) -> Result<OverviewStats> {
        self.get_json("/api/overview").await
    }
}
