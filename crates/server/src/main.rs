//! Development API server for the records dashboard.
//!
//! An in-memory stand-in for the hosted backend: it serves the same
//! wire contract the SPA talks to in production so the dashboard can be
//! run and exercised end-to-end locally. Nothing survives a restart.

mod routes;
mod state;

use axum::{
    Router,
    routing::{get, put},
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use routes::{
    create_customer, create_saving, customer_history, delete_customer, delete_saving,
    get_overview, list_branches, list_customers, list_savings, update_customer, update_saving,
};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let state = AppState::seeded();
    {
        let customers = state.customers.read().await;
        println!("Seeded {} customers", customers.len());
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/:id",
            put(update_customer).delete(delete_customer),
        )
        .route("/customers/:id/history", get(customer_history))
        .route("/savings", get(list_savings).post(create_saving))
        .route("/savings/:id", put(update_saving).delete(delete_saving))
        .route("/branches", get(list_branches))
        .route("/overview", get(get_overview));

    let app = Router::new()
        .nest("/api", api_routes)
        // Serve the built SPA (when present) for everything else.
        .fallback_service(ServeDir::new("../frontend/dist").append_index_html_on_directories(true))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 5000));
    println!("Records API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
