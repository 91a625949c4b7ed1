//! Public storefront landing page with the product grid.

use leptos::prelude::*;

use crate::net::api;
use crate::net::types::Product;
use crate::util::format::format_price;

#[component]
pub fn HomePage() -> impl IntoView {
    let products = RwSignal::new(None::<Result<Vec<Product>, String>>);
    leptos::task::spawn_local(async move {
        products.set(Some(api::fetch_products().await));
    });

    view! {
        <section class="home-page">
            <h1>"Shop"</h1>
            {move || match products.get() {
                None => view! { <p class="page-status">"Loading products..."</p> }.into_any(),
                Some(Err(e)) => view! { <p class="page-status page-status--error">{e}</p> }.into_any(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="page-status">"No products yet."</p> }.into_any()
                }
                Some(Ok(list)) => view! {
                    <div class="product-grid">
                        {list.into_iter().map(|product| view! { <ProductCard product=product/> }).collect_view()}
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let in_stock = product.in_stock();
    view! {
        <article class="product-card">
            {product.image_url.map(|src| view! { <img class="product-card__image" src=src alt=product.name.clone()/> })}
            <h2 class="product-card__name">{product.name}</h2>
            <p class="product-card__description">{product.description}</p>
            <p class="product-card__price">{format_price(product.price_cents)}</p>
            <p class="product-card__stock">{if in_stock { "In stock" } else { "Sold out" }}</p>
        </article>
    }
}
