//! CLI command tree.

use std::{path::PathBuf, sync::Arc};

use bazaar::{
    client::{ClientConfig, ClientError},
    context::AppContext,
    session::{FileCredentialStore, TracingNotifier},
};
use clap::{Args, Parser, Subcommand};

mod account;
mod auth;
mod products;
mod purchases;

#[derive(Debug, Parser)]
#[command(name = "bazaar", about = "Bazaar storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Auth(auth::AuthCommand),
    Products(products::ProductsCommand),
    Purchases(purchases::PurchasesCommand),
    Account(account::AccountCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Auth(command) => auth::run(command).await,
            Commands::Products(command) => products::run(command).await,
            Commands::Purchases(command) => purchases::run(command).await,
            Commands::Account(command) => account::run(command).await,
        }
    }
}

/// Connection arguments shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct ApiArgs {
    /// Storefront API base URL
    #[arg(long, env = "BAZAAR_API_URL")]
    base_url: String,

    /// JSON file holding the saved session
    #[arg(long, env = "BAZAAR_SESSION_FILE", default_value = ".bazaar-session.json")]
    session_file: PathBuf,
}

impl ApiArgs {
    pub(crate) async fn app_context(&self) -> Result<AppContext, String> {
        let store = Arc::new(FileCredentialStore::new(self.session_file.clone()));
        let notifier = Arc::new(TracingNotifier);

        AppContext::from_config(ClientConfig::new(self.base_url.as_str()), store, notifier)
            .await
            .map_err(|error| format!("failed to initialize client: {error}"))
    }
}

/// Render a client error for terminal output, spelling out per-field
/// messages when the backend rejected a form.
pub(crate) fn describe_error(context: &str, error: &ClientError) -> String {
    let fields = error.validation_messages();

    if fields.is_empty() {
        return format!("{context}: {error}");
    }

    let details: Vec<String> = fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect();

    format!("{context}: {}", details.join("; "))
}
