//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::products::{
    data::{NewProduct, ProductFilter},
    records::{ProductId, ProductRecord},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const UPSERT_PRODUCT_SQL: &str = include_str!("sql/upsert_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.as_deref())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<(), sqlx::Error> {
        let price = i64::try_from(product.price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let inventory = i32::try_from(product.inventory).map_err(|e| sqlx::Error::ColumnDecode {
            index: "inventory".to_string(),
            source: Box::new(e),
        })?;

        query(UPSERT_PRODUCT_SQL)
            .bind(product.id.as_str())
            .bind(&product.name)
            .bind(product.color_name.as_deref())
            .bind(price)
            .bind(&product.sizes)
            .bind(inventory)
            .bind(&product.image)
            .bind(&product.description)
            .bind(product.category.as_deref())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;
        let inventory_i32: i32 = row.try_get("inventory")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let inventory = u32::try_from(inventory_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "inventory".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: ProductId::new(row.try_get::<String, _>("id")?),
            name: row.try_get("name")?,
            color_name: row.try_get("color_name")?,
            price,
            sizes: row.try_get("sizes")?,
            inventory,
            image: row.try_get("image")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
