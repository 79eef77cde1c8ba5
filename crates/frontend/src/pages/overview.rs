//! Overview page: greeting, live clock, headline figures, and quick
//! links into the other screens.

use api_types::OverviewStats;
use chrono::Local;
use core_types::format_naira;
use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::components::{ErrorBanner, Loading, StatCard};
use crate::store::use_store;

#[function_component(OverviewPage)]
pub fn overview_page() -> Html {
    let store = use_store();
    let stats = use_state(|| None::<OverviewStats>);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| true);
    let now = use_state(Local::now);

    {
        let now = now.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(1_000, move || now.set(Local::now()));
            move || drop(interval)
        });
    }

    {
        let store = store.clone();
        let stats = stats.clone();
        let error = error.clone();
        let loading = loading.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match store.overview().await {
                    Ok(data) => stats.set(Some(data)),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to fetch overview: {e}").into(),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
                loading.set(false);
            });
        });
    }

    html! {
        <div>
            <div class="welcome-row">
                <div class="card welcome-card">
                    <h1>{"Welcome back, Fisuny!"}</h1>
                    <p>{"Here's what's happening with your business today."}</p>
                </div>
                <div class="card clock-card">
                    <p class="clock-time">{ now.format("%H:%M").to_string() }</p>
                    <p class="clock-date">{ now.format("%b %e, %Y").to_string() }</p>
                    <p class="clock-day">{ now.format("%A").to_string() }</p>
                </div>
            </div>

            if let Some(message) = error.as_ref() {
                <ErrorBanner message={message.clone()} />
            }

            if *loading {
                <Loading message="Loading overview..." />
            } else if let Some(stats) = stats.as_ref() {
                <div class="stats-grid">
                    <StatCard
                        value={stats.total_customers.to_string()}
                        label="Total Customers"
                    />
                    <StatCard
                        value={stats.active_customers.to_string()}
                        label="Active Customers"
                    />
                    <StatCard
                        value={format_naira(stats.total_saved)}
                        label="Total Saved"
                    />
                    <StatCard
                        value={format_naira(stats.today_total)}
                        label="Collected Today"
                        hint={format!("{} records", stats.today_count)}
                    />
                </div>
            }

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{"Quick Actions"}</h2>
                </div>
                <div class="quick-actions">
                    <Link<Route> to={Route::Customers} classes="action-tile">
                        {"List of Customers"}
                    </Link<Route>>
                    <Link<Route> to={Route::AddRecord} classes="action-tile">
                        {"Add to Records"}
                    </Link<Route>>
                    <Link<Route> to={Route::NewCustomers} classes="action-tile">
                        {"New Customers"}
                    </Link<Route>>
                    <Link<Route> to={Route::Branches} classes="action-tile">
                        {"Branches"}
                    </Link<Route>>
                </div>
            </div>

            <footer class="page-footer">
                <p>{ format!("© {} Customer Records System. All rights reserved.", now.format("%Y")) }</p>
            </footer>
        </div>
    }
}
