//! Loading indicator shown while a request is outstanding.

use yew::prelude::*;

/// Properties for the Loading component.
#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub message: Option<AttrValue>,
}

/// Spinner with an optional caption.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="loading">
            <div class="spinner"></div>
            if let Some(message) = &props.message {
                <p class="loading-message">{ message }</p>
            }
        </div>
    }
}
