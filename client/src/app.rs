//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::guard::{RequireRole, RouteGuard};
use crate::components::nav_bar::NavBar;
use crate::net::types::Role;
use crate::pages::{admin::AdminPage, home::HomePage, login::LoginPage, orders::OrdersPage, register::RegisterPage};
use crate::state::session::{BrowserSession, use_auth_bootstrap};

/// Root application component.
///
/// Provides the session context, hydrates it from a persisted token, and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = BrowserSession::browser();
    provide_context(session.clone());
    use_auth_bootstrap(&session);

    view! {
        <Title text="Storefront"/>

        <Router>
            <NavBar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <RouteGuard require_auth=false><LoginPage/></RouteGuard> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <RouteGuard require_auth=false><RegisterPage/></RouteGuard> }
                    />
                    <Route
                        path=StaticSegment("orders")
                        view=|| view! { <RouteGuard><OrdersPage/></RouteGuard> }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! {
                            <RouteGuard>
                                <RequireRole role=Role::Admin><AdminPage/></RequireRole>
                            </RouteGuard>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}
