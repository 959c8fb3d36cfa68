//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::{
    auth::UserId,
    domain::orders::{
        data::NewOrder,
        records::{OrderId, OrderItem, OrderRecord, OrderTotals, PaymentDetails, ShippingInfo},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let totals = &order.totals;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.order_id.as_str())
            .bind(order.user_id.as_ref().map(UserId::as_str))
            .bind(to_column("subtotal", totals.subtotal)?)
            .bind(to_column("discount_amount", totals.discount_amount)?)
            .bind(to_column("delivery_charge", totals.delivery_charge)?)
            .bind(to_column("tax_amount", totals.tax_amount)?)
            .bind(to_column("grand_total", totals.grand_total)?)
            .bind(&order.order_status)
            .bind(Json(&order.order_items))
            .bind(Json(&order.shipping_info))
            .bind(Json(&order.payment_details))
            .bind(order.notes.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderId,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &UserId,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.as_str())
            .fetch_all(&mut **tx)
            .await
    }
}

fn to_column(column: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn from_column(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let amount: i64 = row.try_get(column)?;

    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_id: OrderId::new(row.try_get::<String, _>("order_id")?),
            user_id: row
                .try_get::<Option<String>, _>("user_id")?
                .map(UserId::new),
            totals: OrderTotals {
                subtotal: from_column(row, "subtotal")?,
                discount_amount: from_column(row, "discount_amount")?,
                delivery_charge: from_column(row, "delivery_charge")?,
                tax_amount: from_column(row, "tax_amount")?,
                grand_total: from_column(row, "grand_total")?,
            },
            order_status: row.try_get("order_status")?,
            order_items: row.try_get::<Json<Vec<OrderItem>>, _>("order_items")?.0,
            shipping_info: row.try_get::<Json<ShippingInfo>, _>("shipping_info")?.0,
            payment_details: row
                .try_get::<Json<PaymentDetails>, _>("payment_details")?
                .0,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
