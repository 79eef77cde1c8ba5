//! Sign-in page. The form is decorative: the dashboard has no account
//! system, so any submission navigates straight into the records shell.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::pages::input_value;

#[function_component(SignInPage)]
pub fn sign_in_page() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let navigator = use_navigator();

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| email.set(input_value(&e)))
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| password.set(input_value(&e)))
    };

    let onsubmit = {
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Overview);
            }
        })
    };

    html! {
        <div class="signin-screen">
            <div class="card signin-card">
                <h1>{"Fisuny Records"}</h1>
                <p class="text-secondary">{"Sign in to manage customer savings records"}</p>

                <form {onsubmit}>
                    <label for="signin-email">{"Email"}</label>
                    <input
                        id="signin-email"
                        type="email"
                        placeholder="you@business.com"
                        value={(*email).clone()}
                        oninput={on_email}
                    />

                    <label for="signin-password">{"Password"}</label>
                    <input
                        id="signin-password"
                        type="password"
                        placeholder="••••••••"
                        value={(*password).clone()}
                        oninput={on_password}
                    />

                    <button type="submit" class="btn btn-primary">{"Sign In"}</button>
                </form>
            </div>
        </div>
    }
}
