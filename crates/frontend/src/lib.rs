//! Records dashboard - Yew WASM frontend.
//!
//! This crate is the web UI for the customer savings records system:
//! a sign-in stub, the sidebar shell, and the CRUD screens over the
//! records API.

mod app;
mod components;
mod pages;
mod store;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    yew::Renderer::<App>::new().render();
}
