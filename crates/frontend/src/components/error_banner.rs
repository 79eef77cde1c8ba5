//! Inline error banner. Failures never clear data already on screen;
//! the banner sits above whatever was previously rendered.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: AttrValue,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="error-banner" role="alert">
            { &props.message }
        </div>
    }
}
