//! Admin dashboard: every order plus a product entry form.
//!
//! Mounted behind `RouteGuard` and `RequireRole(Admin)`; the server enforces
//! the same role on every endpoint used here.

use leptos::prelude::*;

use crate::net::api::{self, OrderScope};
use crate::net::types::NewProduct;
use crate::pages::orders::{OrderTable, load_orders};
use crate::state::session::BrowserSession;
use crate::util::validation::parse_price_cents;

#[component]
pub fn AdminPage() -> impl IntoView {
    let orders = load_orders(OrderScope::All);

    view! {
        <section class="admin-page">
            <h1>"Dashboard"</h1>
            <h2>"New product"</h2>
            <ProductForm/>
            <h2>"All orders"</h2>
            <OrderTable orders=orders show_customer=true/>
        </section>
    }
}

#[component]
fn ProductForm() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let stock = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let price_cents = match parse_price_cents(&price.get_untracked()) {
            Ok(cents) => cents,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        let Ok(stock_count) = stock.get_untracked().trim().parse::<i32>() else {
            info.set("Stock must be a whole number.".to_owned());
            return;
        };
        let Some(token) = session.token() else {
            info.set("Not signed in.".to_owned());
            return;
        };
        let product = NewProduct {
            name: name.get_untracked().trim().to_owned(),
            price_cents,
            stock: stock_count,
            ..NewProduct::default()
        };
        busy.set(true);

        leptos::task::spawn_local(async move {
            match api::create_product(&token, &product).await {
                Ok(created) => {
                    info.set(format!("Added {}.", created.name));
                    name.set(String::new());
                    price.set(String::new());
                    stock.set(String::new());
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
    };

    view! {
        <form class="product-form" on:submit=on_submit>
            <input class="auth-input" type="text" placeholder="Name"
                prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev))/>
            <input class="auth-input" type="text" placeholder="Price (12.50)"
                prop:value=move || price.get() on:input=move |ev| price.set(event_target_value(&ev))/>
            <input class="auth-input" type="number" min="0" placeholder="Stock"
                prop:value=move || stock.get() on:input=move |ev| stock.set(event_target_value(&ev))/>
            <button class="auth-button" type="submit" disabled=move || busy.get()>"Add product"</button>
            <Show when=move || !info.get().is_empty()>
                <p class="auth-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}
