//! Product catalog reads and admin product creation.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;
const NAME_MAX: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid product: {0}")]
    Invalid(&'static str),
    #[error("product not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub stock: i32,
    pub created_at: String,
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: i32,
}

impl NewProduct {
    /// Trim text fields and check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] describing the first rule broken.
    pub fn validated(mut self) -> Result<Self, CatalogError> {
        self.name = self.name.trim().to_owned();
        self.description = self.description.trim().to_owned();
        self.image_url = self
            .image_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        if self.name.is_empty() {
            return Err(CatalogError::Invalid("name is required"));
        }
        if self.name.chars().count() > NAME_MAX {
            return Err(CatalogError::Invalid("name must be at most 200 characters"));
        }
        if self.price_cents < 0 {
            return Err(CatalogError::Invalid("price must not be negative"));
        }
        if self.stock < 0 {
            return Err(CatalogError::Invalid("stock must not be negative"));
        }
        if let Some(url) = &self.image_url {
            if !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')) {
                return Err(CatalogError::Invalid("image_url must be an http(s) URL or a site path"));
            }
        }
        Ok(self)
    }
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
#[must_use]
pub fn page_size(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

const PRODUCT_COLUMNS: &str = r#"id, name, description, price_cents, image_url, stock,
    to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at"#;

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price_cents: row.get("price_cents"),
        image_url: row.get("image_url"),
        stock: row.get("stock"),
        created_at: row.get("created_at"),
    }
}

/// Newest products first.
///
/// # Errors
///
/// Returns a database error.
pub async fn list_products(pool: &PgPool, limit: i64) -> Result<Vec<Product>, CatalogError> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id LIMIT $1");
    let rows = sqlx::query(&sql).bind(limit).fetch_all(pool).await?;
    Ok(rows.iter().map(product_from_row).collect())
}

/// # Errors
///
/// Returns [`CatalogError::NotFound`] or a database error.
pub async fn get_product(pool: &PgPool, product_id: Uuid) -> Result<Product, CatalogError> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
    let row = sqlx::query(&sql)
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .ok_or(CatalogError::NotFound(product_id))?;
    Ok(product_from_row(&row))
}

/// Insert a product after validation.
///
/// # Errors
///
/// Returns a validation or database error.
pub async fn create_product(pool: &PgPool, product: NewProduct) -> Result<Product, CatalogError> {
    let product = product.validated()?;
    let sql = format!(
        "INSERT INTO products (name, description, price_cents, image_url, stock)
         VALUES ($1, $2, $3, $4, $5) RETURNING {PRODUCT_COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image_url)
        .bind(product.stock)
        .fetch_one(pool)
        .await?;
    Ok(product_from_row(&row))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
