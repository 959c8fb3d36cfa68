//! Orders Data

use crate::{
    auth::UserId,
    domain::orders::{
        OrdersServiceError,
        records::{OrderId, OrderItem, OrderTotals, PaymentDetails, ShippingInfo},
    },
};

pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub user_id: Option<UserId>,
    pub totals: OrderTotals,
    pub order_status: String,
    pub order_items: Vec<OrderItem>,
    pub shipping_info: ShippingInfo,
    pub payment_details: PaymentDetails,
    pub notes: Option<String>,
}

impl NewOrder {
    /// Check the order is complete and its money fields add up.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::MissingRequiredData`] for blank required
    /// fields or no items, and [`OrdersServiceError::InvalidData`] when line or
    /// order totals do not match their parts.
    pub fn validate(&self) -> Result<(), OrdersServiceError> {
        let shipping = &self.shipping_info;

        let missing = self.order_id.is_blank()
            || self.order_items.is_empty()
            || [
                &shipping.name,
                &shipping.phone,
                &shipping.address,
                &shipping.city,
                &shipping.zip,
            ]
            .iter()
            .any(|field| field.trim().is_empty())
            || self
                .order_items
                .iter()
                .any(|item| item.product_id.is_blank() || item.name.trim().is_empty());

        if missing {
            return Err(OrdersServiceError::MissingRequiredData);
        }

        let mut subtotal: u64 = 0;

        for item in &self.order_items {
            let line_total = item.unit_price.checked_mul(u64::from(item.quantity));

            if item.quantity == 0 || line_total != Some(item.total_price) {
                return Err(OrdersServiceError::InvalidData);
            }

            subtotal = subtotal
                .checked_add(item.total_price)
                .ok_or(OrdersServiceError::InvalidData)?;
        }

        if subtotal != self.totals.subtotal || !self.totals.is_consistent() {
            return Err(OrdersServiceError::InvalidData);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test::helpers::new_order;

    use super::*;

    #[test]
    fn well_formed_orders_pass() {
        assert!(new_order("order_1", 500, 2).validate().is_ok());
    }

    #[test]
    fn blank_shipping_fields_are_missing_data() {
        let mut order = new_order("order_1", 500, 2);
        order.shipping_info.city = "  ".to_string();

        assert!(matches!(
            order.validate(),
            Err(OrdersServiceError::MissingRequiredData)
        ));
    }

    #[test]
    fn orders_without_items_are_missing_data() {
        let mut order = new_order("order_1", 500, 2);
        order.order_items.clear();

        assert!(matches!(
            order.validate(),
            Err(OrdersServiceError::MissingRequiredData)
        ));
    }

    #[test]
    fn mismatched_grand_total_is_invalid() {
        let mut order = new_order("order_1", 500, 2);
        order.totals.grand_total += 1;

        assert!(matches!(order.validate(), Err(OrdersServiceError::InvalidData)));
    }

    #[test]
    fn mismatched_line_total_is_invalid() {
        let mut order = new_order("order_1", 500, 2);
        order.order_items[0].total_price = 999;

        assert!(matches!(order.validate(), Err(OrdersServiceError::InvalidData)));
    }
}
