//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::UserId,
    database::Db,
    domain::orders::{
        data::NewOrder,
        errors::OrdersServiceError,
        records::{OrderId, OrderRecord},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(name = "orders.create", skip_all, fields(order_id = %order.order_id))]
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        order.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_order(&mut tx, &order).await?;

        tx.commit().await?;

        info!(
            order_id = %created.order_id,
            grand_total = created.totals.grand_total,
            "order stored"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderId) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, &order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Store a new order. Orders are never changed afterwards.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order by its id.
    async fn get_order(&self, order: OrderId) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by a user, newest first.
    async fn list_orders(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_order};

    use super::*;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn created_orders_can_be_read_back() -> TestResult {
        let ctx = TestContext::new().await;
        let order = new_order("order_a", 500, 2);

        let created = ctx.orders.create_order(order.clone()).await?;
        let fetched = ctx.orders.get_order(order.order_id.clone()).await?;

        assert_eq!(created, fetched);
        assert_eq!(fetched.totals.grand_total, 1080);
        assert_eq!(fetched.order_status, "pending");
        assert_eq!(fetched.order_items, order.order_items);
        assert_eq!(fetched.shipping_info, order.shipping_info);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn duplicate_order_ids_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.orders.create_order(new_order("order_a", 500, 1)).await?;

        let result = ctx.orders.create_order(new_order("order_a", 700, 1)).await;

        assert!(
            matches!(result, Err(OrdersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn unknown_order_ids_are_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(OrderId::new("order_missing")).await;

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn list_orders_returns_a_users_orders_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserId::new("123");

        for id in ["order_1", "order_2"] {
            let mut order = new_order(id, 100, 1);
            order.user_id = Some(user.clone());
            ctx.orders.create_order(order).await?;
        }

        ctx.orders.create_order(new_order("order_guest", 100, 1)).await?;

        let orders = ctx.orders.list_orders(user).await?;
        let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();

        assert_eq!(ids, vec!["order_2", "order_1"]);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_orders_never_reach_the_database() {
        let db = Db::new(
            sqlx::postgres::PgPoolOptions::new()
                .connect_lazy("postgres://localhost/unused")
                .expect("lazy pools do not connect"),
        );

        let mut order = new_order("order_a", 500, 2);
        order.totals.grand_total = 1;

        let result = PgOrdersService::new(db).create_order(order).await;

        assert!(matches!(result, Err(OrdersServiceError::InvalidData)));
    }
}
