//! Email + password sign-in.
//!
//! Rendered inside `RouteGuard require_auth=false`: once `login` stores the
//! session, the guard redirects to the recorded origin on its own.

use leptos::prelude::*;

use crate::net::api;
use crate::state::session::BrowserSession;
use crate::util::validation::validate_login_input;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
            Ok(fields) => fields,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let session = session.clone();
        leptos::task::spawn_local(async move {
            match api::login(&email_value, &password_value).await {
                Ok(resp) => {
                    info.set(String::new());
                    session.login(resp);
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-switch">"New here? " <a href="/register">"Create an account"</a></p>
            </div>
        </div>
    }
}
