//! CLI administration tool for orders-api.
//!
//! Performs database checks, prints row counts and seeds demo data without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View row counts
//! cargo run --bin admin -- stats
//!
//! # Insert demo customers, items and orders
//! cargo run --bin admin -- seed --yes
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`).

use orders_api::config::{self, mask_connection_string};
use orders_api::domain::entities::{CustomerDraft, ItemDraft, NewOrderItem, OrderDraft};
use orders_api::domain::repositories::{CustomerRepository, ItemRepository, OrderRepository};
use orders_api::infrastructure::persistence::{
    PgCustomerRepository, PgItemRepository, PgOrderRepository,
};
use orders_api::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing orders-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show row counts
    Stats,

    /// Insert a small demo data set
    Seed {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Seed { yes } => handle_seed(pool, yes).await?,
        Commands::Db { action } => match action {
            DbAction::Check => check_database(&pool, &config.database_url).await?,
        },
    }

    Ok(())
}

/// Prints row counts of every table.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, table) in [
        ("Customers", "customers"),
        ("Items", "items"),
        ("Orders", "orders"),
        ("Order items", "order_items"),
    ] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await?;

        println!(
            "  {:<14} {}",
            format!("{}:", label).bright_white(),
            count.to_string().cyan().bold()
        );
    }

    println!();
    Ok(())
}

/// Inserts two customers, three items and one order per customer.
async fn handle_seed(pool: PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🌱 Seed demo data".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Insert demo customers, items and orders?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let pool = Arc::new(pool);
    let customers = PgCustomerRepository::new(pool.clone());
    let items = PgItemRepository::new(pool.clone());
    let orders = PgOrderRepository::new(pool);

    let mut item_ids = Vec::new();
    for (name, description) in [
        ("Bike", "Red city bike"),
        ("Helmet", "Adjustable, size M"),
        ("Bell", "Brass bell"),
    ] {
        let item = items
            .create(ItemDraft {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create item: {}", e))?;
        println!("  {} item {} ({})", "+".green(), item.name.cyan(), item.id);
        item_ids.push(item.id);
    }

    for (name, email) in [
        ("Ada Lovelace", "ada@example.com"),
        ("Alan Turing", "alan@example.com"),
    ] {
        let customer = customers
            .upsert(CustomerDraft {
                id: None,
                name: name.to_string(),
                email: email.to_string(),
                phone: None,
                address: None,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create customer: {}", e))?;
        println!("  {} customer {}", "+".green(), customer.name.cyan());

        let order = orders
            .upsert(OrderDraft {
                id: None,
                customer_id: customer.id,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create order: {}", e))?;

        let lines = item_ids
            .iter()
            .take(2)
            .map(|&item_id| NewOrderItem {
                item_id,
                quantity: 1,
            })
            .collect();

        let order = orders
            .add_items(order.id, lines)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to add order items: {}", e))?;
        println!(
            "  {} order {} with {} lines",
            "+".green(),
            order.id.to_string().bright_black(),
            order.order_items.len()
        );
    }

    println!();
    println!("{}", "✅ Demo data inserted".green().bold());
    println!();

    Ok(())
}

/// Connects and prints the server version.
async fn check_database(pool: &PgPool, database_url: &str) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());
    println!("  URL: {}", mask_connection_string(database_url).bright_black());

    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(pool)
        .await?;

    println!("{}", "✅ Database connection successful".green().bold());
    println!("  {}", version.bright_black());
    println!();

    Ok(())
}
