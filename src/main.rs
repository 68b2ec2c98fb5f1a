// ==========================================
// 产品目录 - 命令行主入口
// ==========================================
// 用法: product-catalog [--config FILE] <command>
// ==========================================

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use product_catalog::config::AppConfig;
use product_catalog::{logging, AppState, Product, ProductFilter};

#[derive(Parser)]
#[command(
    name = "product-catalog",
    version,
    about = "Product catalog with Excel bulk import/export."
)]
struct Cli {
    /// JSON config file (default: built-in defaults + environment)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new product.
    Add(ProductArgs),
    /// Show one product.
    Get {
        id: String,
    },
    /// Replace an existing product.
    Update(ProductArgs),
    /// Delete a product.
    Delete {
        id: String,
    },
    /// List all products.
    List,
    /// Search products by name, category and price range.
    Search(FilterArgs),
    /// Import products from an .xlsx/.xls file.
    Import {
        /// Path to the spreadsheet
        file: PathBuf,
    },
    /// Export products to an .xlsx file.
    Export {
        /// Output path (default: <export_dir>/products_<millis>.xlsx)
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Adjust prices of several products.
    AdjustPrice {
        ids: Vec<String>,
        /// Amount added to each price
        #[arg(long, allow_hyphen_values = true, conflicts_with = "percent", required_unless_present = "percent")]
        by: Option<f64>,
        /// Percentage applied to each price
        #[arg(long, allow_hyphen_values = true)]
        percent: Option<f64>,
    },
    /// Set stock of several products.
    SetStock {
        ids: Vec<String>,
        #[arg(long)]
        stock: i32,
    },
}

#[derive(Args)]
struct ProductArgs {
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    stock: i32,
    #[arg(long)]
    category: String,
}

impl From<ProductArgs> for Product {
    fn from(args: ProductArgs) -> Self {
        Product {
            id: Some(args.id),
            name: Some(args.name),
            description: args.description,
            price: Some(args.price),
            stock: Some(args.stock),
            category: Some(args.category),
        }
    }
}

#[derive(Args)]
struct FilterArgs {
    /// Name contains (case-insensitive)
    #[arg(long)]
    name: Option<String>,
    /// Exact category
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
}

impl FilterArgs {
    fn into_filter(self) -> Option<ProductFilter> {
        let filter = ProductFilter {
            name: self.name,
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
        };
        (filter != ProductFilter::default()).then_some(filter)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env_overrides()?;

    logging::init_with_filter(&config.log_filter, cli.log_json);
    tracing::debug!("{} {}", product_catalog::APP_NAME, product_catalog::VERSION);

    let state = AppState::new(config).context("无法初始化AppState")?;
    run(&state, cli.command)
}

fn run(state: &AppState, command: Commands) -> Result<()> {
    let api = &state.product_api;

    match command {
        Commands::Add(args) => print_json(&api.add_product(args.into())?)?,
        Commands::Get { id } => print_json(&api.get_product(&id)?)?,
        Commands::Update(args) => print_json(&api.update_product(args.into())?)?,
        Commands::Delete { id } => {
            api.delete_product(&id)?;
            println!("deleted {}", id);
        }
        Commands::List => print_json(&api.list_products()?)?,
        Commands::Search(filter) => {
            let filter = filter.into_filter().unwrap_or_default();
            print_json(&api.search_products(&filter)?)?
        }
        Commands::Import { file } => {
            let outcome = api.import_products(&file);
            println!("{}", outcome);
            if outcome.is_fatal() {
                bail!("import of {} aborted", file.display());
            }
        }
        Commands::Export { output, filter } => {
            let filter = filter.into_filter();
            let prefix = if filter.is_some() { "filtered_products" } else { "products" };
            let path = output.unwrap_or_else(|| state.config.export_file_path(prefix));
            match &filter {
                Some(filter) => api.export_filtered(&path, filter)?,
                None => api.export_all(&path)?,
            }
            println!("{}", path.display());
        }
        Commands::AdjustPrice { ids, by, percent } => {
            let count = match (by, percent) {
                (Some(delta), _) => api.batch_update_price(&ids, delta)?,
                (None, Some(p)) => api.batch_update_price_by_percentage(&ids, p)?,
                (None, None) => bail!("either --by or --percent is required"),
            };
            println!("updated {} product(s)", count);
        }
        Commands::SetStock { ids, stock } => {
            let count = api.batch_update_stock(&ids, stock)?;
            println!("updated {} product(s)", count);
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
