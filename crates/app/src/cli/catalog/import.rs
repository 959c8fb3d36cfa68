use std::path::PathBuf;

use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService, data::NewProduct},
};

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// JSON array of products; existing ids are overwritten
    #[arg(long)]
    file: PathBuf,
}

pub(crate) async fn run(args: ImportArgs) -> Result<(), String> {
    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let products: Vec<NewProduct> = serde_json::from_str(&contents)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let imported = PgProductsService::new(Db::new(pool))
        .import_products(products)
        .await
        .map_err(|error| format!("failed to import products: {error}"))?;

    println!("imported {imported} products");

    Ok(())
}
