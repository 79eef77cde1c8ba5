//! Customers list page: searchable, sortable directory with a detail
//! panel showing the selected customer's savings history.

use std::rc::Rc;

use core_types::{Customer, SavingsRecord, format_naira};
use derived_view::{SortDirection, SortKey, SortSpec, ViewQuery};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::components::{ErrorBanner, Loading, PaymentBadge, SearchBox, StatusBadge};
use crate::store::use_store;

#[function_component(CustomersPage)]
pub fn customers_page() -> Html {
    let store = use_store();
    let customers = use_state(|| None::<Rc<Vec<Customer>>>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);
    let sort = use_state(|| SortSpec::ascending(SortKey::Text));
    let selected = use_state(|| None::<Customer>);
    let history = use_state(|| None::<Vec<SavingsRecord>>);
    let history_loading = use_state(|| false);

    {
        let store = store.clone();
        let customers = customers.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match store.customers().await {
                    Ok(list) => customers.set(Some(list)),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to fetch customers: {e}").into(),
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

    let sort_toggle = |key: SortKey| {
        let sort = sort.clone();
        Callback::from(move |_: MouseEvent| {
            let next = if sort.key == key {
                SortSpec {
                    key,
                    direction: sort.direction.toggled(),
                }
            } else {
                SortSpec::ascending(key)
            };
            sort.set(next);
        })
    };
    let on_sort_name = sort_toggle(SortKey::Text);
    let on_sort_visit = sort_toggle(SortKey::Date);

    let on_select = {
        let store = store.clone();
        let selected = selected.clone();
        let history = history.clone();
        let history_loading = history_loading.clone();
        let error = error.clone();

        Callback::from(move |customer: Customer| {
            selected.set(Some(customer.clone()));
            history.set(None);
            history_loading.set(true);

            let store = store.clone();
            let history = history.clone();
            let history_loading = history_loading.clone();
            let error = error.clone();
            spawn_local(async move {
                match store.customer_history(&customer.id).await {
                    Ok(records) => history.set(Some(records)),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to fetch history: {e}").into(),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
                history_loading.set(false);
            });
        })
    };

    let on_close_detail = {
        let selected = selected.clone();
        let history = history.clone();
        Callback::from(move |_: MouseEvent| {
            selected.set(None);
            history.set(None);
        })
    };

    let query = ViewQuery::default()
        .with_search((*search).clone())
        .with_sort(*sort);
    let view: Vec<&Customer> = match customers.as_ref() {
        Some(list) => derived_view::apply(list, &query),
        None => Vec::new(),
    };

    let sort_marker = |key: SortKey| {
        if sort.key == key {
            match sort.direction {
                SortDirection::Ascending => " ↑",
                SortDirection::Descending => " ↓",
            }
        } else {
            ""
        }
    };

    html! {
        <div>
            <h1>{"Customer Management"}</h1>
            <p class="text-secondary">{"Manage and view customer information"}</p>

            if let Some(message) = error.as_ref() {
                <ErrorBanner message={message.clone()} />
            }

            <div class="card filter-bar">
                <SearchBox
                    value={(*search).clone()}
                    placeholder="Search by name, email, or phone number..."
                    on_change={on_search}
                />
                <Link<Route> to={Route::NewCustomers} classes="btn btn-primary">
                    {"Add New Customer"}
                </Link<Route>>
            </div>

            if *loading {
                <Loading message="Loading customer records..." />
            } else {
                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">{"Customer Directory"}</h2>
                        <p class="text-secondary">
                            { format!("{} customers found", view.len()) }
                        </p>
                    </div>

                    if view.is_empty() {
                        <p class="empty-state">
                            {"No customers found. Try adjusting your search or add a new customer."}
                        </p>
                    } else {
                        <table class="record-table">
                            <thead>
                                <tr>
                                    <th class="sortable" onclick={on_sort_name}>
                                        { format!("Customer{}", sort_marker(SortKey::Text)) }
                                    </th>
                                    <th>{"Contact Information"}</th>
                                    <th class="sortable" onclick={on_sort_visit}>
                                        { format!("Last Visit{}", sort_marker(SortKey::Date)) }
                                    </th>
                                    <th>{"Status"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for view.iter().map(|customer| {
                                    let customer = (*customer).clone();
                                    let on_view = {
                                        let on_select = on_select.clone();
                                        let customer = customer.clone();
                                        Callback::from(move |_: MouseEvent| on_select.emit(customer.clone()))
                                    };
                                    let initial = customer.name.chars().next().unwrap_or('?');
                                    let last_visit = customer
                                        .last_visit
                                        .map(|ts| ts.format("%b %e, %Y %H:%M").to_string())
                                        .unwrap_or_else(|| "-".to_string());

                                    html! {
                                        <tr>
                                            <td>
                                                <div class="customer-cell">
                                                    <span class="avatar">{ initial }</span>
                                                    <div>
                                                        <div class="customer-name">{ &customer.name }</div>
                                                        <div class="text-secondary">{ format!("ID: {}", customer.id) }</div>
                                                    </div>
                                                </div>
                                            </td>
                                            <td>
                                                <div>{ customer.email.clone().unwrap_or_else(|| "-".to_string()) }</div>
                                                <div class="text-secondary">{ &customer.phone }</div>
                                            </td>
                                            <td>{ last_visit }</td>
                                            <td><StatusBadge status={customer.status} /></td>
                                            <td>
                                                <button class="btn btn-link" onclick={on_view}>
                                                    {"View Details"}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    }
                </div>
            }

            if let Some(customer) = selected.as_ref() {
                <div class="card detail-card">
                    <div class="card-header">
                        <div class="customer-cell">
                            <span class="avatar avatar-large">
                                { customer.name.chars().next().unwrap_or('?') }
                            </span>
                            <div>
                                <h2 class="card-title">{ &customer.name }</h2>
                                <p class="text-secondary">
                                    { format!(
                                        "ID: {} • Branch: {}",
                                        customer.id,
                                        customer.branch_name.as_deref().unwrap_or("N/A"),
                                    ) }
                                </p>
                            </div>
                        </div>
                        <button class="btn btn-secondary" onclick={on_close_detail}>
                            {"Close"}
                        </button>
                    </div>

                    <div class="detail-grid">
                        <div>
                            <h3>{"Contact Information"}</h3>
                            <p>{ format!("Email: {}", customer.email.as_deref().unwrap_or("-")) }</p>
                            <p>{ format!("Phone: {}", customer.phone) }</p>
                            <p>{ format!("Daily amount: {}", format_naira(customer.daily_amount)) }</p>
                            <p>{ format!("Total saved: {}", format_naira(customer.total_saved)) }</p>
                        </div>

                        <div>
                            <h3>{"Savings History"}</h3>
                            if *history_loading {
                                <Loading />
                            } else if let Some(records) = history.as_ref() {
                                if records.is_empty() {
                                    <p class="empty-state">
                                        {"No contributions recorded for this customer yet."}
                                    </p>
                                } else {
                                    <table class="record-table">
                                        <thead>
                                            <tr>
                                                <th>{"Date"}</th>
                                                <th>{"Amount"}</th>
                                                <th>{"Status"}</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            { for records.iter().map(|record| html! {
                                                <tr>
                                                    <td>{ record.date.format("%b %e, %Y").to_string() }</td>
                                                    <td>{ format_naira(record.amount) }</td>
                                                    <td><PaymentBadge status={record.status} /></td>
                                                </tr>
                                            })}
                                        </tbody>
                                    </table>
                                }
                            }
                        </div>
                    </div>
                </div>
            }
        </div>
    }
}
