//! Order history routes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::auth::{AuthUser, StaffUser};
use crate::routes::products::PageQuery;
use crate::services::catalog::page_size;
use crate::services::orders::{self, Order};
use crate::state::AppState;

fn db_failure(err: sqlx::Error) -> StatusCode {
    tracing::error!(error = %err, "order query failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// `GET /api/orders`: the caller's orders.
pub async fn my_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Order>>, StatusCode> {
    let orders = orders::list_orders_for_user(&state.pool, auth.claims.sub, page_size(page.limit))
        .await
        .map_err(db_failure)?;
    Ok(Json(orders))
}

/// `GET /api/admin/orders`: every order, admin only.
pub async fn all_orders(
    State(state): State<AppState>,
    _staff: StaffUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Order>>, StatusCode> {
    let orders = orders::list_all_orders(&state.pool, page_size(page.limit))
        .await
        .map_err(db_failure)?;
    Ok(Json(orders))
}
