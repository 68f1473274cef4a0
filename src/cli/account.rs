use std::path::PathBuf;

use bazaar::domain::account::UpdateProfileBody;
use clap::{Args, Subcommand};
use jiff::Timestamp;

use crate::cli::{ApiArgs, describe_error};

#[derive(Debug, Args)]
pub(crate) struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    /// Show the authenticated user's profile
    Show(ShowAccountArgs),

    /// Update profile fields
    Update(UpdateAccountArgs),

    /// Upload an avatar image
    UploadAvatar(UploadAvatarArgs),
}

#[derive(Debug, Args)]
struct ShowAccountArgs {
    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Debug, Args)]
struct UpdateAccountArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New phone number
    #[arg(long)]
    phone: Option<String>,

    /// New postal address
    #[arg(long)]
    address: Option<String>,

    /// New date of birth (RFC 3339)
    #[arg(long)]
    date_of_birth: Option<String>,

    /// Avatar file name returned by upload-avatar
    #[arg(long)]
    avatar: Option<String>,

    /// Current password, required when changing it
    #[arg(long, hide_env_values = true, env = "BAZAAR_PASSWORD")]
    password: Option<String>,

    /// Replacement password
    #[arg(long)]
    new_password: Option<String>,
}

#[derive(Debug, Args)]
struct UploadAvatarArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Image file to upload
    #[arg(long)]
    file: PathBuf,
}

pub(crate) async fn run(command: AccountCommand) -> Result<(), String> {
    match command.command {
        AccountSubcommand::Show(args) => show(args).await,
        AccountSubcommand::Update(args) => update(args).await,
        AccountSubcommand::UploadAvatar(args) => upload_avatar(args).await,
    }
}

async fn show(args: ShowAccountArgs) -> Result<(), String> {
    let app = args.api.app_context().await?;

    let user = app
        .account
        .profile()
        .await
        .map_err(|error| describe_error("failed to fetch profile", &error))?;

    println!("email: {}", user.email);
    if let Some(name) = &user.name {
        println!("name: {name}");
    }
    if let Some(phone) = &user.phone {
        println!("phone: {phone}");
    }
    if let Some(address) = &user.address {
        println!("address: {address}");
    }
    println!("member_since: {}", user.created_at);

    Ok(())
}

async fn update(args: UpdateAccountArgs) -> Result<(), String> {
    let date_of_birth = parse_date_of_birth(args.date_of_birth.as_deref())?;

    let app = args.api.app_context().await?;

    let user = app
        .account
        .update_profile(UpdateProfileBody {
            name: args.name,
            phone: args.phone,
            address: args.address,
            date_of_birth,
            avatar: args.avatar,
            password: args.password,
            new_password: args.new_password,
        })
        .await
        .map_err(|error| describe_error("failed to update profile", &error))?;

    println!("profile updated for {}", user.email);

    Ok(())
}

async fn upload_avatar(args: UploadAvatarArgs) -> Result<(), String> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "avatar".to_owned());

    let app = args.api.app_context().await?;

    let stored = app
        .account
        .upload_avatar(&file_name, bytes)
        .await
        .map_err(|error| describe_error("failed to upload avatar", &error))?;

    println!("avatar stored as {stored}");
    println!("run account update --avatar {stored} to apply it");

    Ok(())
}

fn parse_date_of_birth(raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid date-of-birth timestamp: {error}"))
    })
    .transpose()
}
