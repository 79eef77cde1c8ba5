//! Status badges for customers and savings records.

use core_types::{CustomerStatus, SavingStatus};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: CustomerStatus,
}

/// Customer plan status pill.
#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let class = format!("status-badge status-{}", props.status.as_str());
    html! { <span {class}>{ props.status.as_str() }</span> }
}

#[derive(Properties, PartialEq)]
pub struct PaymentBadgeProps {
    pub status: SavingStatus,
}

/// Contribution status pill.
#[function_component(PaymentBadge)]
pub fn payment_badge(props: &PaymentBadgeProps) -> Html {
    let class = format!("status-badge payment-{}", props.status.as_str());
    html! { <span {class}>{ props.status.as_str() }</span> }
}
