//! Checkout service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Identity,
    domain::{
        carts::models::CartLineItem,
        checkout::{
            CheckoutError,
            form::CheckoutForm,
            pipeline::{CheckoutPipeline, CheckoutSession, PlacedOrder},
        },
        orders::records::OrderTotals,
    },
};

/// The cart as it would be ordered right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutQuote {
    pub items: Vec<CartLineItem>,
    pub totals: OrderTotals,
    /// The last checkout went through and the cart has not been refilled
    /// since. Items and totals are empty.
    pub completed: bool,
}

#[async_trait]
impl CheckoutService for CheckoutPipeline {
    async fn quote(&self, identity: Identity) -> Result<CheckoutQuote, CheckoutError> {
        let cart = self.carts().get_cart(identity.clone()).await?;
        let session = self.session(&identity).await;

        if session.should_leave(&cart) {
            return Err(CheckoutError::EmptyCart);
        }

        if cart.is_empty() {
            return Ok(CheckoutQuote {
                items: Vec::new(),
                totals: OrderTotals::default(),
                completed: true,
            });
        }

        if session.is_completed() {
            self.record_session(identity, CheckoutSession::default())
                .await;
        }

        Ok(CheckoutQuote {
            totals: self.totals(&cart),
            items: cart.items,
            completed: false,
        })
    }

    async fn checkout(
        &self,
        identity: Identity,
        form: CheckoutForm,
    ) -> Result<PlacedOrder, CheckoutError> {
        let details = form.validate()?;
        let mut session = CheckoutSession::default();

        let placed = self.run(identity.clone(), details, &mut session).await?;

        self.record_session(identity, session).await;

        Ok(placed)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Totals for the current cart of `identity`. An empty cart is an error
    /// unless the last checkout of `identity` completed.
    async fn quote(&self, identity: Identity) -> Result<CheckoutQuote, CheckoutError>;

    /// Validate the form and place the order.
    async fn checkout(
        &self,
        identity: Identity,
        form: CheckoutForm,
    ) -> Result<PlacedOrder, CheckoutError>;
}
