//! Branches page: searchable directory of business locations.

use std::rc::Rc;

use core_types::{Branch, CustomerStatus};
use derived_view::ViewQuery;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{ErrorBanner, Loading, SearchBox, StatCard, StatusBadge};
use crate::store::use_store;

#[function_component(BranchesPage)]
pub fn branches_page() -> Html {
    let store = use_store();
    let branches = use_state(|| None::<Rc<Vec<Branch>>>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);

    {
        let store = store.clone();
        let branches = branches.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match store.branches().await {
                    Ok(list) => branches.set(Some(list)),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to fetch branches: {e}").into(),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
                loading.set(false);
            });
        });
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |value: String| search.set(value))
    };

    let (total, employees, active) = match branches.as_ref() {
        Some(list) => (
            list.len(),
            list.iter().map(|b| b.employees).sum::<u32>(),
            list.iter()
                .filter(|b| b.status == CustomerStatus::Active)
                .count(),
        ),
        None => (0, 0, 0),
    };

    let query = ViewQuery::default().with_search((*search).clone());
    let view: Vec<&Branch> = match branches.as_ref() {
        Some(list) => derived_view::apply(list, &query),
        None => Vec::new(),
    };

    html! {
        <div>
            <h1>{"Business Branches"}</h1>
            <p class="text-secondary">{"Manage and explore our network of locations"}</p>

            if let Some(message) = error.as_ref() {
                <ErrorBanner message={message.clone()} />
            }

            <div class="stats-grid">
                <StatCard value={total.to_string()} label="Total Branches" />
                <StatCard value={employees.to_string()} label="Total Employees" />
                <StatCard value={active.to_string()} label="Active Branches" />
            </div>

            <div class="card filter-bar">
                <SearchBox
                    value={(*search).clone()}
                    placeholder="Search by name, address, or manager..."
                    on_change={on_search}
                />
            </div>

            if *loading {
                <Loading message="Loading branches..." />
            } else if view.is_empty() {
                <div class="card">
                    <p class="empty-state">{"No branches match your search."}</p>
                </div>
            } else {
                <div class="branch-grid">
                    { for view.iter().map(|branch| html! {
                        <div class="card branch-card">
                            <div class="card-header">
                                <h2 class="card-title">{ &branch.name }</h2>
                                <StatusBadge status={branch.status} />
                            </div>
                            <p>{ &branch.address }</p>
                            <p class="text-secondary">{ &branch.hours }</p>
                            <div class="branch-meta">
                                <p>{ format!("Manager: {}", branch.manager) }</p>
                                <p>{ format!("Employees: {}", branch.employees) }</p>
                                <p>{ format!("Established: {}", branch.established) }</p>
                            </div>
                            <div class="branch-contact text-secondary">
                                <p>{ &branch.phone }</p>
                                <p>{ &branch.email }</p>
                            </div>
                        </div>
                    })}
                </div>
            }
        </div>
    }
}
