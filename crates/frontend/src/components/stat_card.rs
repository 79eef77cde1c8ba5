//! Statistics card component.

use yew::prelude::*;

/// Properties for StatCard component.
#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub value: String,
    pub label: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
}

/// One headline figure with its label.
#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="card stat-card">
            <div class="stat-value">{ &props.value }</div>
            <div class="stat-label">{ &props.label }</div>
            if let Some(hint) = &props.hint {
                <div class="stat-hint">{ hint }</div>
            }
        </div>
    }
}
