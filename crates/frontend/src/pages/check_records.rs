//! Check-records page: search plus year/month/day filters over the
//! whole savings book, with totals, a per-month breakdown, and the top
//! contributors for the matched set.

use std::collections::BTreeSet;
use std::rc::Rc;

use core_types::{SavingsRecord, format_naira};
use derived_view::{DatePart, ViewQuery};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{ErrorBanner, Loading, PaymentBadge, SearchBox, StatCard};
use crate::pages::select_value;
use crate::store::use_store;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[function_component(CheckRecordsPage)]
pub fn check_records_page() -> Html {
    let store = use_store();
    let records = use_state(|| None::<Rc<Vec<SavingsRecord>>>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);
    let year = use_state(|| "all".to_string());
    let month = use_state(|| "all".to_string());
    let day = use_state(|| "all".to_string());

    {
        let store = store.clone();
        let records = records.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
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

    let bind_select = |state: UseStateHandle<String>| {
        Callback::from(move |e: Event| state.set(select_value(&e)))
    };
    let on_year = bind_select(year.clone());
    let on_month = bind_select(month.clone());
    let on_day = bind_select(day.clone());

    let on_reset = {
        let search = search.clone();
        let year = year.clone();
        let month = month.clone();
        let day = day.clone();
        Callback::from(move |_: MouseEvent| {
            search.set(String::new());
            year.set("all".to_string());
            month.set("all".to_string());
            day.set("all".to_string());
        })
    };

    // Years present in the data, newest first.
    let years: Vec<i32> = match records.as_ref() {
        Some(list) => {
            let set: BTreeSet<i32> = list
                .iter()
                .map(|r| chrono::Datelike::year(&r.date))
                .collect();
            set.into_iter().rev().collect()
        }
        None => Vec::new(),
    };

    let query = ViewQuery {
        search: (*search).clone(),
        year: DatePart::parse(&year),
        month: DatePart::parse(&month),
        day: DatePart::parse(&day),
        sort: None,
    };
    let view = match records.as_ref() {
        Some(list) => derived_view::derive(list, &query),
        None => derived_view::DerivedView {
            records: Vec::new(),
            summary: derived_view::Aggregate::default(),
        },
    };

    let month_breakdown = derived_view::monthly_counts(view.records.iter().copied());
    let top_customers = derived_view::top_groups(view.records.iter().copied(), 5);
    let max_month_count = month_breakdown.iter().copied().max().unwrap_or(0).max(1);

    html! {
        <div>
            <h1>{"Customer Records Checker"}</h1>
            <p class="text-secondary">{"Filter contributions by customer and date"}</p>

            if let Some(message) = error.as_ref() {
                <ErrorBanner message={message.clone()} />
            }

            <div class="card filter-bar">
                <SearchBox
                    value={(*search).clone()}
                    placeholder="Search by customer name..."
                    on_change={on_search}
                />

                <select class="filter-select" onchange={on_year}>
                    <option value="all" selected={*year == "all"}>{"All Years"}</option>
                    { for years.iter().map(|y| html! {
                        <option value={y.to_string()} selected={*year == y.to_string()}>
                            { *y }
                        </option>
                    })}
                </select>

                <select class="filter-select" onchange={on_month}>
                    <option value="all" selected={*month == "all"}>{"All Months"}</option>
                    { for (1..=12u32).map(|m| html! {
                        <option value={m.to_string()} selected={*month == m.to_string()}>
                            { MONTH_NAMES[(m - 1) as usize] }
                        </option>
                    })}
                </select>

                <select class="filter-select" onchange={on_day}>
                    <option value="all" selected={*day == "all"}>{"All Days"}</option>
                    { for (1..=31u32).map(|d| html! {
                        <option value={d.to_string()} selected={*day == d.to_string()}>
                            { d }
                        </option>
                    })}
                </select>

                <button class="btn btn-secondary" onclick={on_reset}>
                    {"Reset Filters"}
                </button>
            </div>

            if *loading {
                <Loading message="Loading customer records..." />
            } else {
                <div class="stats-grid">
                    <StatCard
                        value={view.summary.count.to_string()}
                        label="Matched Records"
                    />
                    <StatCard
                        value={format_naira(view.summary.total)}
                        label="Total Amount"
                    />
                </div>

                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">{"Matched Records"}</h2>
                    </div>

                    if view.records.is_empty() {
                        <p class="empty-state">{"No records match the current filters."}</p>
                    } else {
                        <table class="record-table">
                            <thead>
                                <tr>
                                    <th>{"Customer"}</th>
                                    <th>{"Amount"}</th>
                                    <th>{"Date"}</th>
                                    <th>{"Status"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for view.records.iter().map(|record| html! {
                                    <tr>
                                        <td>{ record.customer.display_name() }</td>
                                        <td>{ format_naira(record.amount) }</td>
                                        <td>{ record.date.format("%b %e, %Y").to_string() }</td>
                                        <td><PaymentBadge status={record.status} /></td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    }
                </div>

                <div class="detail-grid">
                    <div class="card">
                        <div class="card-header">
                            <h2 class="card-title">{"Records per Month"}</h2>
                        </div>
                        { for MONTH_NAMES.iter().enumerate().map(|(i, name)| {
                            let count = month_breakdown[i];
                            let width = (count * 100) / max_month_count;
                            html! {
                                <div class="breakdown-row">
                                    <span class="breakdown-label">{ *name }</span>
                                    <div class="progress-bar">
                                        <div
                                            class="progress-bar-fill"
                                            style={format!("width: {width}%")}
                                        />
                                    </div>
                                    <span class="breakdown-count">{ count }</span>
                                </div>
                            }
                        })}
                    </div>

                    <div class="card">
                        <div class="card-header">
                            <h2 class="card-title">{"Top Customers"}</h2>
                        </div>
                        if top_customers.is_empty() {
                            <p class="empty-state">{"No contributions in this view."}</p>
                        } else {
                            <ol class="top-list">
                                { for top_customers.iter().map(|group| html! {
                                    <li>
                                        <span>{ &group.label }</span>
                                        <span class="top-amount">{ format_naira(group.total) }</span>
                                    </li>
                                })}
                            </ol>
                        }
                    </div>
                </div>
            }
        </div>
    }
}
