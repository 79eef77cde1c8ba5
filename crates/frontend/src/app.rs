//! Main application component: routing, the sidebar shell, and the
//! store context.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    AddRecordPage, BranchesPage, CheckRecordsPage, CustomersPage, NewCustomersPage, OverviewPage,
    SignInPage,
};
use crate::store::StoreHandle;

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/signin")]
    SignIn,
    #[at("/records")]
    Overview,
    #[at("/records/customers-list")]
    Customers,
    #[at("/records/new-customers")]
    NewCustomers,
    #[at("/records/create-record")]
    AddRecord,
    #[at("/records/check-record")]
    CheckRecords,
    #[at("/records/branch")]
    Branches,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Route switch function. The sign-in screen stands alone; every other
/// page renders inside the sidebar shell.
fn switch(route: Route) -> Html {
    let page = match route {
        Route::Home => return html! { <Redirect<Route> to={Route::SignIn} /> },
        Route::SignIn => return html! { <SignInPage /> },
        Route::NotFound => {
            return html! {
                <div class="card not-found">
                    <h1>{"404 - Page Not Found"}</h1>
                    <p>{"The page you're looking for doesn't exist or has been moved."}</p>
                    <Link<Route> to={Route::Overview} classes="btn btn-primary">
                        {"Back to overview"}
                    </Link<Route>>
                </div>
            };
        }
        Route::Overview => html! { <OverviewPage /> },
        Route::Customers => html! { <CustomersPage /> },
        Route::NewCustomers => html! { <NewCustomersPage /> },
        Route::AddRecord => html! { <AddRecordPage /> },
        Route::CheckRecords => html! { <CheckRecordsPage /> },
        Route::Branches => html! { <BranchesPage /> },
    };

    html! {
        <div class="app-container">
            <Sidebar />
            <main class="main-content">{ page }</main>
        </div>
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let store = (*use_memo((), |_| StoreHandle::new())).clone();

    html! {
        <ContextProvider<StoreHandle> context={store}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<StoreHandle>>
    }
}

/// Sidebar navigation component.
#[function_component(Sidebar)]
fn sidebar() -> Html {
    html! {
        <aside class="sidebar">
            <Link<Route> to={Route::Overview} classes="nav-brand">
                {"Fisuny Records"}
            </Link<Route>>
            <nav>
                <ul class="nav-links">
                    <li>
                        <Link<Route> to={Route::Overview}>{"Overview"}</Link<Route>>
                    </li>
                    <li>
                        <Link<Route> to={Route::Customers}>{"Customers"}</Link<Route>>
                    </li>
                    <li>
                        <Link<Route> to={Route::NewCustomers}>{"New Customers"}</Link<Route>>
                    </li>
                    <li>
                        <Link<Route> to={Route::AddRecord}>{"Add Record"}</Link<Route>>
                    </li>
                    <li>
                        <Link<Route> to={Route::CheckRecords}>{"Check Records"}</Link<Route>>
                    </li>
                    <li>
                        <Link<Route> to={Route::Branches}>{"Branches"}</Link<Route>>
                    </li>
                </ul>
            </nav>
            <div class="sidebar-footer">
                <Link<Route> to={Route::SignIn} classes="nav-signout">
                    {"Sign out"}
                </Link<Route>>
            </div>
        </aside>
    }
}
