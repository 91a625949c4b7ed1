//! Signed-in customer's order history.

use leptos::prelude::*;

use crate::net::api::{self, OrderScope};
use crate::net::types::Order;
use crate::state::session::BrowserSession;
use crate::util::format::{format_date, format_price, short_id};

#[component]
pub fn OrdersPage() -> impl IntoView {
    let orders = load_orders(OrderScope::Mine);

    view! {
        <section class="orders-page">
            <h1>"My orders"</h1>
            <OrderTable orders=orders show_customer=false/>
        </section>
    }
}

/// Start loading orders for `scope` with the current session token.
pub(crate) fn load_orders(scope: OrderScope) -> RwSignal<Option<Result<Vec<Order>, String>>> {
    let session = expect_context::<BrowserSession>();
    let orders = RwSignal::new(None);
    let token = session.token();
    leptos::task::spawn_local(async move {
        let result = match token {
            Some(token) => api::fetch_orders(&token, scope).await,
            None => Err("Not signed in.".to_owned()),
        };
        orders.set(Some(result));
    });
    orders
}

#[component]
pub(crate) fn OrderTable(orders: RwSignal<Option<Result<Vec<Order>, String>>>, show_customer: bool) -> impl IntoView {
    move || match orders.get() {
        None => view! { <p class="page-status">"Loading orders..."</p> }.into_any(),
        Some(Err(e)) => view! { <p class="page-status page-status--error">{e}</p> }.into_any(),
        Some(Ok(list)) if list.is_empty() => view! { <p class="page-status">"No orders yet."</p> }.into_any(),
        Some(Ok(list)) => view! {
            <table class="order-table">
                <thead>
                    <tr>
                        <th>"Order"</th>
                        {show_customer.then(|| view! { <th>"Customer"</th> })}
                        <th>"Placed"</th>
                        <th>"Status"</th>
                        <th>"Total"</th>
                    </tr>
                </thead>
                <tbody>
                    {list
                        .into_iter()
                        .map(|order| {
                            let status_class = if order.status.is_open() { "badge badge--open" } else { "badge" };
                            view! {
                                <tr>
                                    <td>{short_id(&order.id)}</td>
                                    {show_customer.then(|| view! { <td>{short_id(&order.user_id)}</td> })}
                                    <td>{format_date(&order.created_at).to_owned()}</td>
                                    <td><span class=status_class>{order.status.label()}</span></td>
                                    <td>{format_price(order.total_cents)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
    }
}
