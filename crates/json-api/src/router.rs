//! App Router

use salvo::Router;

use crate::{auth, carts, checkout, healthcheck, orders, products, wishlists};

/// Every route of the API. Login and signup are reachable without a session;
/// the rest run behind the bearer token middleware, which treats a missing
/// token as a guest.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("signup").post(auth::signup::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("auth/logout").post(auth::logout::handler))
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .push(Router::with_path("{product}").get(products::get::handler)),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::delete::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{key}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("wishlist")
                        .get(wishlists::get::handler)
                        .push(Router::with_path("{product}").post(wishlists::toggle::handler)),
                )
                .push(
                    Router::with_path("checkout")
                        .get(checkout::get::handler)
                        .post(checkout::create::handler),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{order_id}").get(orders::get::handler)),
                ),
        )
}
