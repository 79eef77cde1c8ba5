//! Daily savings plan management: enrollment stats, the recent/all
//! tabs, and create/edit/delete of customer plans through the API.

use std::rc::Rc;

use api_types::{CreateCustomerRequest, UpdateCustomerRequest};
use chrono::NaiveDate;
use core_types::{Customer, CustomerStatus, format_naira};
use derived_view::ViewQuery;
use rust_decimal::Decimal;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{ErrorBanner, Loading, SearchBox, StatCard, StatusBadge};
use crate::pages::{input_value, select_value};
use crate::store::use_store;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    New,
    All,
}

#[function_component(NewCustomersPage)]
pub fn new_customers_page() -> Html {
    let store = use_store();
    let customers = use_state(|| None::<Rc<Vec<Customer>>>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);
    let tab = use_state(|| Tab::New);

    // Form state, shared by create and edit.
    let show_form = use_state(|| false);
    let editing = use_state(|| None::<String>);
    let form_name = use_state(String::new);
    let form_phone = use_state(String::new);
    let form_amount = use_state(String::new);
    let form_start = use_state(String::new);
    let form_status = use_state(|| CustomerStatus::Active.as_str().to_string());
    let form_error = use_state(|| None::<String>);

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

    let select_tab = |target: Tab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };
    let on_tab_new = select_tab(Tab::New);
    let on_tab_all = select_tab(Tab::All);

    let open_create_form = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let form_name = form_name.clone();
        let form_phone = form_phone.clone();
        let form_amount = form_amount.clone();
        let form_start = form_start.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            form_name.set(String::new());
            form_phone.set(String::new());
            form_amount.set(String::new());
            form_start.set(String::new());
            form_error.set(None);
            show_form.set(true);
        })
    };

    let open_edit_form = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let form_name = form_name.clone();
        let form_phone = form_phone.clone();
        let form_amount = form_amount.clone();
        let form_status = form_status.clone();
        let form_error = form_error.clone();
        Callback::from(move |customer: Customer| {
            editing.set(Some(customer.id.clone()));
            form_name.set(customer.name.clone());
            form_phone.set(customer.phone.clone());
            form_amount.set(customer.daily_amount.to_string());
            form_status.set(customer.status.as_str().to_string());
            form_error.set(None);
            show_form.set(true);
        })
    };

    let on_cancel_form = {
        let show_form = show_form.clone();
        Callback::from(move |_: MouseEvent| show_form.set(false))
    };

    let on_delete = {
        let store = store.clone();
        let customers = customers.clone();
        let error = error.clone();
        Callback::from(move |id: String| {
            let store = store.clone();
            let customers = customers.clone();
            let error = error.clone();
            spawn_local(async move {
                match store.delete_customer(&id).await {
                    Ok(()) => {
                        if let Ok(list) = store.customers().await {
                            customers.set(Some(list));
                        }
                    }
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to delete customer: {e}").into(),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let on_submit = {
        let store = store.clone();
        let customers = customers.clone();
        let error = error.clone();
        let show_form = show_form.clone();
        let editing = editing.clone();
        let form_name = form_name.clone();
        let form_phone = form_phone.clone();
        let form_amount = form_amount.clone();
        let form_start = form_start.clone();
        let form_status = form_status.clone();
        let form_error = form_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name = form_name.trim().to_string();
            let phone = form_phone.trim().to_string();
            if name.is_empty() || phone.is_empty() {
                form_error.set(Some("Name and phone number are required.".to_string()));
                return;
            }

            // Contributions must be positive; the backend does not
            // enforce this, the form does.
            let Some(amount) = Decimal::from_str_exact(form_amount.trim())
                .ok()
                .filter(|a| *a > Decimal::ZERO)
            else {
                form_error.set(Some("Daily amount must be a positive number.".to_string()));
                return;
            };

            let start_date = if form_start.is_empty() {
                None
            } else {
                match NaiveDate::parse_from_str(&form_start, "%Y-%m-%d") {
                    Ok(date) => Some(date),
                    Err(_) => {
                        form_error.set(Some("Start date must be YYYY-MM-DD.".to_string()));
                        return;
                    }
                }
            };
            form_error.set(None);

            let editing_id = (*editing).clone();
            let status = CustomerStatus::from_label(&form_status);

            let store = store.clone();
            let customers = customers.clone();
            let error = error.clone();
            let show_form = show_form.clone();
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => {
                        let req = UpdateCustomerRequest {
                            name: Some(name),
                            phone: Some(phone),
                            daily_amount: Some(amount),
                            status: Some(status),
                            ..UpdateCustomerRequest::default()
                        };
                        store.update_customer(&id, &req).await.map(|_| ())
                    }
                    None => {
                        let req = CreateCustomerRequest {
                            name,
                            phone,
                            daily_amount: amount,
                            email: None,
                            branch_id: None,
                            start_date,
                        };
                        store.create_customer(&req).await.map(|_| ())
                    }
                };

                match result {
                    Ok(()) => {
                        if let Ok(list) = store.customers().await {
                            customers.set(Some(list));
                        }
                        show_form.set(false);
                    }
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to save customer: {e}").into(),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    // Headline figures over the full collection.
    let (total, daily_sum, total_saved, max_days) = match customers.as_ref() {
        Some(list) => {
            let daily: Decimal = list
                .iter()
                .filter(|c| c.status == CustomerStatus::Active)
                .map(|c| c.daily_amount)
                .sum();
            let saved = derived_view::aggregate(list.iter()).total;
            let days = list.iter().map(|c| c.days_active).max().unwrap_or(0);
            (list.len(), daily, saved, days)
        }
        None => (0, Decimal::ZERO, Decimal::ZERO, 0),
    };

    let query = ViewQuery::default().with_search((*search).clone());
    let view: Vec<&Customer> = match customers.as_ref() {
        Some(list) => derived_view::apply(list, &query)
            .into_iter()
            .filter(|c| *tab == Tab::All || c.status == CustomerStatus::New)
            .collect(),
        None => Vec::new(),
    };

    let tab_class = |target: Tab| {
        if *tab == target {
            "btn btn-primary"
        } else {
            "btn btn-secondary"
        }
    };

    html! {
        <div>
            <h1>{"Daily Savings Management"}</h1>
            <p class="text-secondary">{"Track and manage customer savings contributions"}</p>

            if let Some(message) = error.as_ref() {
                <ErrorBanner message={message.clone()} />
            }

            <div class="stats-grid">
                <StatCard value={total.to_string()} label="Total Customers" />
                <StatCard value={format_naira(daily_sum)} label="Daily Contributions" hint="active plans" />
                <StatCard value={format_naira(total_saved)} label="Total Saved" />
                <StatCard value={max_days.to_string()} label="Active Days" />
            </div>

            <div class="card filter-bar">
                <div class="tab-row">
                    <button class={tab_class(Tab::New)} onclick={on_tab_new}>
                        {"New Customers"}
                    </button>
                    <button class={tab_class(Tab::All)} onclick={on_tab_all}>
                        {"All Customers"}
                    </button>
                </div>
                <SearchBox
                    value={(*search).clone()}
                    placeholder="Search customers..."
                    on_change={on_search}
                />
                <button class="btn btn-primary" onclick={open_create_form}>
                    {"Add Customer"}
                </button>
            </div>

            if *show_form {
                <div class="card form-card">
                    <div class="card-header">
                        <h2 class="card-title">
                            { if editing.is_some() { "Edit Customer" } else { "Enroll New Customer" } }
                        </h2>
                    </div>

                    if let Some(message) = form_error.as_ref() {
                        <ErrorBanner message={message.clone()} />
                    }

                    <form onsubmit={on_submit}>
                        <div class="form-grid">
                            <div>
                                <label for="plan-name">{"Customer Name"}</label>
                                <input
                                    id="plan-name"
                                    type="text"
                                    placeholder="Enter name"
                                    value={(*form_name).clone()}
                                    oninput={{
                                        let form_name = form_name.clone();
                                        Callback::from(move |e: InputEvent| form_name.set(input_value(&e)))
                                    }}
                                />
                            </div>
                            <div>
                                <label for="plan-phone">{"Phone"}</label>
                                <input
                                    id="plan-phone"
                                    type="text"
                                    placeholder="555-000-0000"
                                    value={(*form_phone).clone()}
                                    oninput={{
                                        let form_phone = form_phone.clone();
                                        Callback::from(move |e: InputEvent| form_phone.set(input_value(&e)))
                                    }}
                                />
                            </div>
                            <div>
                                <label for="plan-amount">{"Daily Amount (₦)"}</label>
                                <input
                                    id="plan-amount"
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    placeholder="0.00"
                                    value={(*form_amount).clone()}
                                    oninput={{
                                        let form_amount = form_amount.clone();
                                        Callback::from(move |e: InputEvent| form_amount.set(input_value(&e)))
                                    }}
                                />
                            </div>
                            if editing.is_none() {
                                <div>
                                    <label for="plan-start">{"Start Date"}</label>
                                    <input
                                        id="plan-start"
                                        type="date"
                                        value={(*form_start).clone()}
                                        oninput={{
                                            let form_start = form_start.clone();
                                            Callback::from(move |e: InputEvent| form_start.set(input_value(&e)))
                                        }}
                                    />
                                </div>
                            } else {
                                <div>
                                    <label for="plan-status">{"Status"}</label>
                                    <select
                                        id="plan-status"
                                        onchange={{
                                            let form_status = form_status.clone();
                                            Callback::from(move |e: Event| form_status.set(select_value(&e)))
                                        }}
                                    >
                                        { for [
                                            CustomerStatus::Active,
                                            CustomerStatus::Paused,
                                            CustomerStatus::Inactive,
                                            CustomerStatus::New,
                                        ].iter().map(|status| html! {
                                            <option
                                                value={status.as_str()}
                                                selected={*form_status == status.as_str()}
                                            >
                                                { status.as_str() }
                                            </option>
                                        })}
                                    </select>
                                </div>
                            }
                        </div>

                        <div class="form-actions">
                            <button type="submit" class="btn btn-primary">
                                { if editing.is_some() { "Save Changes" } else { "Enroll Customer" } }
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={on_cancel_form}>
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            }

            if *loading {
                <Loading message="Loading customers..." />
            } else if view.is_empty() {
                <div class="card">
                    <p class="empty-state">{"No customers in this view yet."}</p>
                </div>
            } else {
                <div class="card">
                    <table class="record-table">
                        <thead>
                            <tr>
                                <th>{"Customer"}</th>
                                <th>{"Daily Amount"}</th>
                                <th>{"Total Saved"}</th>
                                <th>{"Days Active"}</th>
                                <th>{"Status"}</th>
                                <th>{"Start Date"}</th>
                                <th>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for view.iter().map(|customer| {
                                let customer = (*customer).clone();
                                let on_edit = {
                                    let open_edit_form = open_edit_form.clone();
                                    let customer = customer.clone();
                                    Callback::from(move |_: MouseEvent| open_edit_form.emit(customer.clone()))
                                };
                                let on_remove = {
                                    let on_delete = on_delete.clone();
                                    let id = customer.id.clone();
                                    Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                                };
                                let start = customer
                                    .start_date
                                    .map(|d| d.format("%b %e, %Y").to_string())
                                    .unwrap_or_else(|| "-".to_string());

                                html! {
                                    <tr>
                                        <td>
                                            <div class="customer-name">{ &customer.name }</div>
                                            <div class="text-secondary">{ &customer.phone }</div>
                                        </td>
                                        <td>{ format_naira(customer.daily_amount) }</td>
                                        <td>{ format_naira(customer.total_saved) }</td>
                                        <td>{ customer.days_active }</td>
                                        <td><StatusBadge status={customer.status} /></td>
                                        <td>{ start }</td>
                                        <td>
                                            <button class="btn btn-link" onclick={on_edit}>{"Edit"}</button>
                                            <button class="btn btn-link btn-danger" onclick={on_remove}>{"Delete"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </div>
            }
        </div>
    }
}
