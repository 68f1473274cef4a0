use bazaar::domain::products::{ProductListQuery, SortBy, SortOrder};
use clap::{Args, Subcommand};

use crate::cli::{ApiArgs, describe_error};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List catalog products
    List(ListProductsArgs),

    /// Show one product
    Show(ShowProductArgs),

    /// List categories
    Categories(CategoriesArgs),
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Page to fetch, 1-based
    #[arg(long)]
    page: Option<u32>,

    /// Page size
    #[arg(long)]
    limit: Option<u32>,

    /// Sort key
    #[arg(long, value_enum)]
    sort_by: Option<SortBy>,

    /// Sort direction
    #[arg(long, value_enum)]
    order: Option<SortOrder>,

    /// Category identifier to filter by
    #[arg(long)]
    category: Option<String>,

    /// Minimum rating, 1 to 5
    #[arg(long)]
    rating: Option<u32>,

    /// Minimum price
    #[arg(long)]
    price_min: Option<u64>,

    /// Maximum price
    #[arg(long)]
    price_max: Option<u64>,

    /// Full-text search term
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Args)]
struct ShowProductArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Product identifier
    id: String,
}

#[derive(Debug, Args)]
struct CategoriesArgs {
    #[command(flatten)]
    api: ApiArgs,
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list(args).await,
        ProductsSubcommand::Show(args) => show(args).await,
        ProductsSubcommand::Categories(args) => categories(args).await,
    }
}

async fn list(args: ListProductsArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    let query = ProductListQuery {
        page: args.page,
        limit: args.limit,
        order: args.order,
        sort_by: args.sort_by,
        category: args.category,
        exclude: None,
        rating_filter: args.rating,
        price_min: args.price_min,
        price_max: args.price_max,
        name: args.name,
    };

    let page = app
        .products
        .list_products(query)
        .await
        .map_err(|error| describe_error("failed to list products", &error))?;

    for product in &page.products {
        println!("{}  {}  {}", product.id, product.price, product.name);
    }
    println!(
        "page {} of {} ({} per page)",
        page.pagination.page, page.pagination.page_size, page.pagination.limit
    );

    Ok(())
}

async fn show(args: ShowProductArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    let product = app
        .products
        .get_product(&args.id)
        .await
        .map_err(|error| describe_error("failed to fetch product", &error))?;

    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("price_before_discount: {}", product.price_before_discount);
    println!("rating: {}", product.rating);
    println!("sold: {}", product.sold);
    println!("in_stock: {}", product.quantity);
    println!("category: {}", product.category.name);

    Ok(())
}

async fn categories(args: CategoriesArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    let categories = app
        .categories
        .list_categories()
        .await
        .map_err(|error| describe_error("failed to list categories", &error))?;

    for category in &categories {
        println!("{}  {}", category.id, category.name);
    }

    Ok(())
}
