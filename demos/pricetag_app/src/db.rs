// demos/pricetag_app/src/db.rs

//! Postgres-backed `Backend` for the scan workflows.
//!
//! Ids are read as text so the workflow never depends on the column type the
//! tables happen to use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pricetag::{Backend, NewProduct, NewPurchase, Product, Purchase, RecordId, Store};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};

const PRODUCT_COLUMNS: &str = "id::text AS id, name, brand, description, barcode, image_url, insert_date";
const PURCHASE_COLUMNS: &str =
  "id::text AS id, product_id::text AS product_id, store_id::text AS store_id, price::float8 AS price, purchase_date, is_promotion";

#[derive(Debug, FromRow)]
struct ProductRow {
  id: String,
  name: String,
  brand: Option<String>,
  description: Option<String>,
  barcode: Option<String>,
  image_url: Option<String>,
  insert_date: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: RecordId::from(row.id),
      name: row.name,
      brand: row.brand,
      description: row.description,
      barcode: row.barcode.unwrap_or_default(),
      image_url: row.image_url,
      insert_date: row.insert_date,
    }
  }
}

#[derive(Debug, FromRow)]
struct StoreRow {
  id: String,
  name: String,
  image_url: Option<String>,
}

#[derive(Debug, FromRow)]
struct PurchaseRow {
  id: String,
  product_id: String,
  store_id: String,
  price: f64,
  purchase_date: DateTime<Utc>,
  is_promotion: bool,
}

impl From<PurchaseRow> for Purchase {
  fn from(row: PurchaseRow) -> Self {
    Purchase {
      id: RecordId::from(row.id),
      product_id: RecordId::from(row.product_id),
      store_id: RecordId::from(row.store_id),
      price: row.price,
      purchase_date: row.purchase_date,
      is_promotion: row.is_promotion,
    }
  }
}

#[derive(Clone)]
pub struct PgBackend {
  db_pool: PgPool,
}

impl PgBackend {
  pub fn new(db_pool: PgPool) -> Self {
    Self { db_pool }
  }
}

#[async_trait]
impl Backend for PgBackend {
  async fn products_by_barcode(&self, barcode: &str) -> anyhow::Result<Vec<Product>> {
    let rows: Vec<ProductRow> = sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = $1"))
      .bind(barcode)
      .fetch_all(&self.db_pool)
      .await
      .map_err(|e| {
        error!("Failed to look up products by barcode {}: {}", barcode, e);
        e
      })?;
    debug!(barcode, matches = rows.len(), "Products fetched by barcode.");
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn product(&self, id: &RecordId) -> anyhow::Result<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id::text = $1"))
      .bind(id.as_str())
      .fetch_optional(&self.db_pool)
      .await?;
    Ok(row.map(Product::from))
  }

  async fn stores(&self) -> anyhow::Result<Vec<Store>> {
    let rows: Vec<StoreRow> = sqlx::query_as("SELECT id::text AS id, name, image_url FROM stores ORDER BY name ASC")
      .fetch_all(&self.db_pool)
      .await?;
    Ok(
      rows
        .into_iter()
        .map(|row| Store {
          id: RecordId::from(row.id),
          name: row.name,
          image_url: row.image_url,
        })
        .collect(),
    )
  }

  async fn purchases_for_product(&self, product_id: &RecordId) -> anyhow::Result<Vec<Purchase>> {
    let rows: Vec<PurchaseRow> = sqlx::query_as(&format!(
      "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE product_id::text = $1 ORDER BY purchase_date ASC"
    ))
    .bind(product_id.as_str())
    .fetch_all(&self.db_pool)
    .await?;
    Ok(rows.into_iter().map(Purchase::from).collect())
  }

  async fn create_product(&self, product: NewProduct) -> anyhow::Result<Product> {
    let row: ProductRow = sqlx::query_as(&format!(
      "INSERT INTO products (name, brand, description, barcode, image_url) VALUES ($1, $2, $3, $4, $5) \
       RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&product.name)
    .bind(&product.brand)
    .bind(&product.description)
    .bind(&product.barcode)
    .bind(&product.image_url)
    .fetch_one(&self.db_pool)
    .await?;
    Ok(row.into())
  }

  async fn create_purchase(&self, purchase: NewPurchase) -> anyhow::Result<Purchase> {
    // Ids arrive as text; let Postgres cast them back to the column types.
    let row: PurchaseRow = sqlx::query_as(&format!(
      "INSERT INTO purchases (product_id, store_id, price, purchase_date, is_promotion) \
       SELECT p.id, s.id, $3, $4, $5 FROM products p, stores s WHERE p.id::text = $1 AND s.id::text = $2 \
       RETURNING {PURCHASE_COLUMNS}"
    ))
    .bind(purchase.product_id.as_str())
    .bind(purchase.store_id.as_str())
    .bind(purchase.price)
    .bind(purchase.purchase_date)
    .bind(purchase.is_promotion)
    .fetch_optional(&self.db_pool)
    .await?
    .ok_or_else(|| anyhow::anyhow!("unknown product {} or store {}", purchase.product_id, purchase.store_id))?;
    Ok(row.into())
  }
}
