//! Product catalog routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::StaffUser;
use crate::services::catalog::{self, CatalogError, NewProduct};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
}

pub(crate) fn catalog_error_to_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn catalog_error_response(err: CatalogError) -> Response {
    let status = catalog_error_to_status(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "catalog query failed");
        return status.into_response();
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// `GET /api/products`: newest products, public.
pub async fn list_products(State(state): State<AppState>, Query(page): Query<PageQuery>) -> Response {
    match catalog::list_products(&state.pool, catalog::page_size(page.limit)).await {
        Ok(products) => Json(products).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

/// `GET /api/products/{id}`
pub async fn get_product(State(state): State<AppState>, Path(product_id): Path<Uuid>) -> Response {
    match catalog::get_product(&state.pool, product_id).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

/// `POST /api/products`: admin only.
pub async fn create_product(
    State(state): State<AppState>,
    staff: StaffUser,
    Json(body): Json<NewProduct>,
) -> Response {
    match catalog::create_product(&state.pool, body).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, by = %staff.claims.sub, "product created");
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => catalog_error_response(e),
    }
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
