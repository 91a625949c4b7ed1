//! Top navigation with session-aware links.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::session::BrowserSession;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let auth = session.state;

    let username = move || auth.with(|state| state.user.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let signed_in = move || auth.with(AuthState::is_authenticated);
    let is_staff = move || auth.with(|state| state.user.as_ref().is_some_and(|u| u.role.is_staff()));

    // The link itself navigates home; the handler only ends the session.
    let on_logout = move |_| leptos::task::spawn_local(session.logout());

    view! {
        <nav class="nav-bar">
            <a class="nav-bar__brand" href="/">"Storefront"</a>
            <div class="nav-bar__links">
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <a href="/login">"Sign in"</a>
                        <a href="/register">"Create account"</a>
                    }
                >
                    <a href="/orders">"My orders"</a>
                    <Show when=is_staff>
                        <a href="/admin">"Admin"</a>
                    </Show>
                    <span class="nav-bar__user">{username}</span>
                    <a class="nav-bar__logout" href="/" on:click=on_logout.clone()>"Sign out"</a>
                </Show>
            </div>
        </nav>
    }
}
