use bazaar::domain::purchases::{AddToCart, PurchaseListStatus};
use clap::{Args, Subcommand};

use crate::cli::{ApiArgs, describe_error};

#[derive(Debug, Args)]
pub(crate) struct PurchasesCommand {
    #[command(subcommand)]
    command: PurchasesSubcommand,
}

#[derive(Debug, Subcommand)]
enum PurchasesSubcommand {
    /// Put a product into the cart
    Add(AddPurchaseArgs),

    /// List purchases
    List(ListPurchasesArgs),
}

#[derive(Debug, Args)]
struct AddPurchaseArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Product identifier
    #[arg(long)]
    product_id: String,

    /// Number of units
    #[arg(long, default_value_t = 1)]
    buy_count: u32,
}

#[derive(Debug, Args)]
struct ListPurchasesArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Status code: 0 all, -1 in cart, 1 awaiting confirmation, 2 being
    /// collected, 3 in transit, 4 delivered, 5 cancelled
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    status: i8,
}

pub(crate) async fn run(command: PurchasesCommand) -> Result<(), String> {
    match command.command {
        PurchasesSubcommand::Add(args) => add(args).await,
        PurchasesSubcommand::List(args) => list(args).await,
    }
}

async fn add(args: AddPurchaseArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    let purchase = app
        .purchases
        .add_to_cart(AddToCart {
            product_id: args.product_id,
            buy_count: args.buy_count,
        })
        .await
        .map_err(|error| describe_error("failed to add to cart", &error))?;

    println!(
        "added {} x {} ({})",
        purchase.buy_count, purchase.product.name, purchase.id
    );

    Ok(())
}

async fn list(args: ListPurchasesArgs) -> Result<(), String> {
    let status = PurchaseListStatus::try_from(args.status)
        .map_err(|error| format!("invalid status filter: {error}"))?;

    let app = args.api.app_context().await?;

    let purchases = app
        .purchases
        .list_purchases(status)
        .await
        .map_err(|error| describe_error("failed to list purchases", &error))?;

    for purchase in &purchases {
        println!(
            "{}  {:?}  {} x {}",
            purchase.id, purchase.status, purchase.buy_count, purchase.product.name
        );
    }

    Ok(())
}
