use bazaar::domain::auth::Credentials;
use clap::{Args, Subcommand};

use crate::cli::{ApiArgs, describe_error};

#[derive(Debug, Args)]
pub(crate) struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Open a session
    Login(CredentialArgs),

    /// Create an account and open a session
    Register(CredentialArgs),

    /// Close the current session
    Logout(LogoutArgs),
}

#[derive(Debug, Args)]
struct CredentialArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Account e-mail
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "BAZAAR_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct LogoutArgs {
    #[command(flatten)]
    api: ApiArgs,
}

pub(crate) async fn run(command: AuthCommand) -> Result<(), String> {
    match command.command {
        AuthSubcommand::Login(args) => login(args).await,
        AuthSubcommand::Register(args) => register(args).await,
        AuthSubcommand::Logout(args) => logout(args).await,
    }
}

async fn login(args: CredentialArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    let payload = app
        .auth
        .login(Credentials {
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| describe_error("login failed", &error))?;

    println!("logged in as {}", payload.user.email);
    println!("access token expires in {}s", payload.expires);

    Ok(())
}

async fn register(args: CredentialArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    let payload = app
        .auth
        .register(Credentials {
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| describe_error("registration failed", &error))?;

    println!("registered {}", payload.user.email);

    Ok(())
}

async fn logout(args: LogoutArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    app.auth
        .logout()
        .await
        .map_err(|error| describe_error("logout failed", &error))?;

    println!("logged out");

    Ok(())
}
