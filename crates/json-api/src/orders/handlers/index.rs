//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

/// List Orders Handler
///
/// Orders placed by the signed-in user, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders of the current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_ID, bearer, expect_session, make_order};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_list_orders_for_the_signed_in_user() -> TestResult {
        let mut mocks = Mocks::new();

        expect_session(&mut mocks.auth);

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|user| user.as_str() == TEST_USER_ID)
            .return_once(|_| Ok(vec![make_order("order_2"), make_order("order_1")]));

        let mut res = TestClient::get("http://example.com/orders")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await;

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.iter().map(|order| order.order_id.as_str()).collect::<Vec<_>>(),
            vec!["order_2", "order_1"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_guests_get_401() -> TestResult {
        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(Mocks::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
