//! Account registration.

use leptos::prelude::*;

use crate::net::api;
use crate::state::session::BrowserSession;
use crate::util::validation::validate_register_input;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let input = match validate_register_input(
            &email.get_untracked(),
            &username.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        let session = session.clone();
        leptos::task::spawn_local(async move {
            match api::register(&input.email, &input.username, &input.password).await {
                Ok(resp) => {
                    info.set(String::new());
                    session.login(resp);
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
    };

    let field = move |signal: RwSignal<String>, kind: &'static str, placeholder: &'static str, autocomplete: &'static str| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {field(email, "email", "you@example.com", "email")}
                    {field(username, "text", "Username", "username")}
                    {field(password, "password", "Password (8+ characters)", "new-password")}
                    {field(confirm, "password", "Confirm password", "new-password")}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Create account"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-switch">"Already registered? " <a href="/login">"Sign in"</a></p>
            </div>
        </div>
    }
}
