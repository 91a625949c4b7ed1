//! Route gating components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route in `App` is wrapped in a `RouteGuard`. Protected routes use the
//! default `require_auth = true`; login and register pass `false` so signed-in
//! users are bounced off them. The decision logic lives in `util::auth`.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::net::types::Role;
use crate::state::session::BrowserSession;
use crate::util::auth::{GuardDecision, guard_decision, request_origin, role_allows, should_verify_on_mount};

/// Render `children` only when the auth requirement is met; redirect otherwise.
#[component]
pub fn RouteGuard(#[prop(default = true)] require_auth: bool, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let auth = session.state;

    if should_verify_on_mount(session.has_token(), require_auth, session.is_authenticated()) {
        leptos::task::spawn_local(session.verify_auth());
    }

    let location = use_location();
    let query = use_query_map();
    let decision = Memo::new(move |_| {
        let origin = request_origin(&location.pathname.get(), &location.search.get());
        let redirect = query.with(|q| q.get("redirect"));
        auth.with(|state| guard_decision(state, require_auth, &origin, redirect.as_deref()))
    });

    let navigate = use_navigate();
    Effect::new(move || match decision.get() {
        GuardDecision::RedirectToLogin(target) | GuardDecision::RedirectAway(target) => {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
        GuardDecision::Loading | GuardDecision::Render => {}
    });

    move || match decision.get() {
        GuardDecision::Loading => view! { <p class="guard-loading">"Loading..."</p> }.into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::RedirectToLogin(_) | GuardDecision::RedirectAway(_) => ().into_any(),
    }
}

/// Render `children` only for users whose role grants `role`. Place inside a
/// `RouteGuard` so anonymous visitors are redirected before reaching here.
#[component]
pub fn RequireRole(role: Role, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<BrowserSession>().state;

    move || {
        if auth.with(|state| role_allows(state, role)) {
            children().into_any()
        } else {
            view! {
                <div class="guard-denied">
                    <h2>"Not authorized"</h2>
                    <p>"Your account does not have access to this page."</p>
                    <a href="/">"Back to the store"</a>
                </div>
            }
            .into_any()
        }
    }
}
