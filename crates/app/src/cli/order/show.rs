use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::orders::{OrdersService, PgOrdersService, records::OrderId},
};

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order id, e.g. `order_1700000000000_ab12cd34e`
    order_id: String,
}

pub(crate) async fn run(args: ShowOrderArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let order = PgOrdersService::new(Db::new(pool))
        .get_order(OrderId::new(args.order_id))
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    let shipping = &order.shipping_info;
    let payment = &order.payment_details;

    println!("order_id: {}", order.order_id);
    println!(
        "user_id: {}",
        order
            .user_id
            .as_ref()
            .map_or_else(|| "guest".to_string(), ToString::to_string)
    );
    println!("status: {}", order.order_status);
    println!("created_at: {}", order.created_at);
    println!(
        "ship_to: {}, {}, {}, {} ({})",
        shipping.name, shipping.address, shipping.city, shipping.zip, shipping.phone
    );
    println!(
        "payment: {} ({})",
        payment.payment_method.label(),
        payment.payment_status
    );

    for item in &order.order_items {
        println!(
            "item: {} x{} @ {} = {}",
            item.name, item.quantity, item.unit_price, item.total_price
        );
    }

    println!("subtotal: {}", order.totals.subtotal);
    println!("delivery_charge: {}", order.totals.delivery_charge);
    println!("grand_total: {}", order.totals.grand_total);

    Ok(())
}
