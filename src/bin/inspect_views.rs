//! Prints the columns of the accounts-receivable reporting views.
//!
//! The views live in the database and change independently of this service;
//! run this after a schema change to check that the columns the API selects
//! still exist.

use cxc_reporting_api::db::{mask_dsn, Database};
use dotenvy::dotenv;
use std::env;

const REPORTING_VIEWS: [&str; 3] = [
    "v_cxc_resumen_clientes",
    "v_cxc_aging_clientes",
    "v_cxc_pendientes_detalle",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("DB_URL"))
        .map_err(|_| anyhow::anyhow!("DATABASE_URL or DB_URL must be set"))?;
    tracing::info!("Inspecting views on {}", mask_dsn(&database_url));

    let db = Database::new(&database_url).await?;

    for view in REPORTING_VIEWS {
        let columns: Vec<(String, String)> = sqlx::query_as(
            "SELECT column_name::text, data_type::text FROM information_schema.columns \
             WHERE table_schema = 'reporting' AND table_name = $1 ORDER BY ordinal_position",
        )
        .bind(view)
        .fetch_all(&db.pool)
        .await?;

        if columns.is_empty() {
            println!("reporting.{} (missing)", view);
            println!();
            continue;
        }

        println!("reporting.{}", view);
        for (col, type_) in columns {
            println!("  - {}: {}", col, type_);
        }
        println!();
    }

    Ok(())
}
