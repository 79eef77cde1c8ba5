//! Add-record page: capture a savings contribution, browse and edit
//! the existing records, with summary figures over the matched set.

use std::rc::Rc;

use api_types::{CreateSavingsRequest, UpdateSavingsRequest};
use chrono::{Local, NaiveDate};
use core_types::{Customer, SavingStatus, SavingsRecord, format_naira};
use derived_view::ViewQuery;
use rust_decimal::Decimal;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{ErrorBanner, Loading, PaymentBadge, SearchBox, StatCard};
use crate::pages::{input_value, select_value};
use crate::store::use_store;

#[function_component(AddRecordPage)]
pub fn add_record_page() -> Html {
    let store = use_store();
    let customers = use_state(|| None::<Rc<Vec<Customer>>>);
    let records = use_state(|| None::<Rc<Vec<SavingsRecord>>>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);

    let editing = use_state(|| None::<String>);
    let form_customer = use_state(String::new);
    let form_amount = use_state(String::new);
    let form_date = use_state(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
    let form_status = use_state(|| SavingStatus::Paid.as_str().to_string());
    let form_error = use_state(|| None::<String>);

    {
        let store = store.clone();
        let customers = customers.clone();
        let records = records.clone();
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
                match store.savings().await {
                    Ok(list) => records.set(Some(list)),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to fetch savings records: {e}").into(),
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

    let reset_form = {
        let editing = editing.clone();
        let form_customer = form_customer.clone();
        let form_amount = form_amount.clone();
        let form_date = form_date.clone();
        let form_status = form_status.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            form_customer.set(String::new());
            form_amount.set(String::new());
            form_date.set(Local::now().date_naive().format("%Y-%m-%d").to_string());
            form_status.set(SavingStatus::Paid.as_str().to_string());
            form_error.set(None);
        })
    };

    let on_edit = {
        let editing = editing.clone();
        let form_customer = form_customer.clone();
        let form_amount = form_amount.clone();
        let form_date = form_date.clone();
        let form_status = form_status.clone();
        let form_error = form_error.clone();
        Callback::from(move |record: SavingsRecord| {
            editing.set(Some(record.id.clone()));
            form_customer.set(record.customer.id.clone());
            form_amount.set(record.amount.to_string());
            form_date.set(record.date.format("%Y-%m-%d").to_string());
            form_status.set(record.status.as_str().to_string());
            form_error.set(None);
        })
    };

    let on_delete = {
        let store = store.clone();
        let records = records.clone();
        let error = error.clone();
        Callback::from(move |id: String| {
            let store = store.clone();
            let records = records.clone();
            let error = error.clone();
            spawn_local(async move {
                match store.delete_saving(&id).await {
                    Ok(()) => {
                        if let Ok(list) = store.savings().await {
                            records.set(Some(list));
                        }
                    }
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to delete record: {e}").into(),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let on_submit = {
        let store = store.clone();
        let records = records.clone();
        let error = error.clone();
        let editing = editing.clone();
        let form_customer = form_customer.clone();
        let form_amount = form_amount.clone();
        let form_date = form_date.clone();
        let form_status = form_status.clone();
        let form_error = form_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if editing.is_none() && form_customer.is_empty() {
                form_error.set(Some("Choose a customer for the record.".to_string()));
                return;
            }

            // Positive amounts only; the backend does not enforce it.
            let Some(amount) = Decimal::from_str_exact(form_amount.trim())
                .ok()
                .filter(|a| *a > Decimal::ZERO)
            else {
                form_error.set(Some("Amount must be a positive number.".to_string()));
                return;
            };

            let Ok(date) = NaiveDate::parse_from_str(&form_date, "%Y-%m-%d") else {
                form_error.set(Some("Date must be YYYY-MM-DD.".to_string()));
                return;
            };
            form_error.set(None);

            let editing_id = (*editing).clone();
            let customer_id = (*form_customer).clone();
            let status = SavingStatus::from_label(&form_status);

            let store = store.clone();
            let records = records.clone();
            let error = error.clone();
            let editing = editing.clone();
            let form_amount = form_amount.clone();
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => {
                        let req = UpdateSavingsRequest {
                            amount: Some(amount),
                            date: Some(date),
                            status: Some(status),
                        };
                        store.update_saving(&id, &req).await.map(|_| ())
                    }
                    None => {
                        let req = CreateSavingsRequest {
                            customer_id,
                            amount,
                            date,
                            status: None,
                        };
                        store.create_saving(&req).await.map(|_| ())
                    }
                };

                match result {
                    Ok(()) => {
                        if let Ok(list) = store.savings().await {
                            records.set(Some(list));
                        }
                        editing.set(None);
                        form_amount.set(String::new());
                    }
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("failed to save record: {e}").into(),
                        );
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let query = ViewQuery::default().with_search((*search).clone());
    let view = match records.as_ref() {
        Some(list) => derived_view::derive(list, &query),
        None => derived_view::DerivedView {
            records: Vec::new(),
            summary: derived_view::Aggregate::default(),
        },
    };

    let today = Local::now().date_naive();
    let today_summary = match records.as_ref() {
        Some(list) => derived_view::derive(list, &ViewQuery::for_date(today)).summary,
        None => derived_view::Aggregate::default(),
    };

    html! {
        <div>
            <h1>{"Customer Savings Records"}</h1>
            <p class="text-secondary">{"Track daily savings contributions"}</p>

            if let Some(message) = error.as_ref() {
                <ErrorBanner message={message.clone()} />
            }

            <div class="form-row">
                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">{"Search Records"}</h2>
                    </div>
                    <SearchBox
                        value={(*search).clone()}
                        placeholder="Search by customer name..."
                        on_change={on_search}
                    />
                </div>

                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">
                            { if editing.is_some() { "Edit Record" } else { "Add New Record" } }
                        </h2>
                    </div>

                    if let Some(message) = form_error.as_ref() {
                        <ErrorBanner message={message.clone()} />
                    }

                    <form onsubmit={on_submit}>
                        <div class="form-grid">
                            if editing.is_none() {
                                <div>
                                    <label for="record-customer">{"Customer"}</label>
                                    <select
                                        id="record-customer"
                                        onchange={{
                                            let form_customer = form_customer.clone();
                                            Callback::from(move |e: Event| form_customer.set(select_value(&e)))
                                        }}
                                    >
                                        <option value="" selected={form_customer.is_empty()}>
                                            {"Select customer..."}
                                        </option>
                                        { for customers.iter().flat_map(|list| list.iter()).map(|customer| html! {
                                            <option
                                                value={customer.id.clone()}
                                                selected={*form_customer == customer.id}
                                            >
                                                { &customer.name }
                                            </option>
                                        })}
                                    </select>
                                </div>
                            } else {
                                <div>
                                    <label for="record-status">{"Status"}</label>
                                    <select
                                        id="record-status"
                                        onchange={{
                                            let form_status = form_status.clone();
                                            Callback::from(move |e: Event| form_status.set(select_value(&e)))
                                        }}
                                    >
                                        { for [SavingStatus::Paid, SavingStatus::Missed, SavingStatus::Pending]
                                            .iter()
                                            .map(|status| html! {
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
                            <div>
                                <label for="record-amount">{"Amount (₦)"}</label>
                                <input
                                    id="record-amount"
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
                            <div>
                                <label for="record-date">{"Date"}</label>
                                <input
                                    id="record-date"
                                    type="date"
                                    value={(*form_date).clone()}
                                    oninput={{
                                        let form_date = form_date.clone();
                                        Callback::from(move |e: InputEvent| form_date.set(input_value(&e)))
                                    }}
                                />
                            </div>
                        </div>

                        <div class="form-actions">
                            <button type="submit" class="btn btn-primary">
                                { if editing.is_some() { "Save Changes" } else { "Add Savings Record" } }
                            </button>
                            if editing.is_some() {
                                <button type="button" class="btn btn-secondary" onclick={reset_form.clone()}>
                                    {"Cancel"}
                                </button>
                            }
                        </div>
                    </form>
                </div>
            </div>

            if *loading {
                <Loading message="Loading savings records..." />
            } else {
                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">{"Savings Records"}</h2>
                        <p class="text-secondary">
                            { format!("{} records found", view.summary.count) }
                        </p>
                    </div>

                    if view.records.is_empty() {
                        <p class="empty-state">
                            {"No records found. Try adjusting your search or add a new record."}
                        </p>
                    } else {
                        <table class="record-table">
                            <thead>
                                <tr>
                                    <th>{"Customer"}</th>
                                    <th>{"Amount (₦)"}</th>
                                    <th>{"Date"}</th>
                                    <th>{"Status"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for view.records.iter().map(|record| {
                                    let record = (*record).clone();
                                    let on_edit_row = {
                                        let on_edit = on_edit.clone();
                                        let record = record.clone();
                                        Callback::from(move |_: MouseEvent| on_edit.emit(record.clone()))
                                    };
                                    let on_delete_row = {
                                        let on_delete = on_delete.clone();
                                        let id = record.id.clone();
                                        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                                    };
                                    let initial = record
                                        .customer
                                        .display_name()
                                        .chars()
                                        .next()
                                        .unwrap_or('?');

                                    html! {
                                        <tr>
                                            <td>
                                                <div class="customer-cell">
                                                    <span class="avatar">{ initial }</span>
                                                    <span class="customer-name">
                                                        { record.customer.display_name() }
                                                    </span>
                                                </div>
                                            </td>
                                            <td>{ format_naira(record.amount) }</td>
                                            <td>{ record.date.format("%b %e, %Y").to_string() }</td>
                                            <td><PaymentBadge status={record.status} /></td>
                                            <td>
                                                <button class="btn btn-link" onclick={on_edit_row}>{"Edit"}</button>
                                                <button class="btn btn-link btn-danger" onclick={on_delete_row}>{"Delete"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    }
                </div>

                <div class="stats-grid">
                    <StatCard
                        value={customers.as_ref().map(|list| list.len()).unwrap_or(0).to_string()}
                        label="Total Customers"
                    />
                    <StatCard
                        value={format_naira(view.summary.total)}
                        label="Total Savings"
                        hint="matched records"
                    />
                    <StatCard
                        value={format_naira(today_summary.total)}
                        label="Today's Savings"
                        hint={format!("{} records", today_summary.count)}
                    />
                </div>
            }
        </div>
    }
}
