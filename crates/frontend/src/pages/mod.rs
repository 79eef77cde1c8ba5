//! Page components.

mod add_record;
mod branches;
mod check_records;
mod customers;
mod new_customers;
mod overview;
mod sign_in;

pub use add_record::AddRecordPage;
pub use branches::BranchesPage;
pub use check_records::CheckRecordsPage;
pub use customers::CustomersPage;
pub use new_customers::NewCustomersPage;
pub use overview::OverviewPage;
pub use sign_in::SignInPage;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Current value of the input that fired an `InputEvent`.
pub(crate) fn input_value(e: &InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

/// Current value of the select that fired a change `Event`.
pub(crate) fn select_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}
