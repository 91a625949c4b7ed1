//! Order history reads for customers and the admin dashboard.

use std::str::FromStr;

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("unknown order status: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: String,
}

const ORDER_COLUMNS: &str = r#"id, user_id, status, total_cents,
    to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at"#;

fn order_from_row(row: &PgRow) -> Result<Order, sqlx::Error> {
    let status: String = row.get("status");
    let status = status
        .parse::<OrderStatus>()
        .map_err(|e| sqlx::Error::Decode(e.into()))?;
    Ok(Order {
        id: row.get("id"),
        user_id: row.get("user_id"),
        status,
        total_cents: row.get("total_cents"),
        created_at: row.get("created_at"),
    })
}

/// A customer's own orders, newest first.
///
/// # Errors
///
/// Returns a database error.
pub async fn list_orders_for_user(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<Order>, sqlx::Error> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id LIMIT $2");
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    rows.iter().map(order_from_row).collect()
}

/// Every order, newest first.
///
/// # Errors
///
/// Returns a database error.
pub async fn list_all_orders(pool: &PgPool, limit: i64) -> Result<Vec<Order>, sqlx::Error> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id LIMIT $1");
    let rows = sqlx::query(&sql).bind(limit).fetch_all(pool).await?;
    rows.iter().map(order_from_row).collect()
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
