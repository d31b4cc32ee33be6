//! Admin user management against the Postgres store

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use freeins_server::auth::{self, DEFAULT_BCRYPT_COST};
use freeins_server::models::UserSummary;
use freeins_server::ContentStore;

use super::connect_store;

#[derive(Parser, Debug)]
pub struct UserArgs {
    /// Postgres URL
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create an admin user
    Create(CreateArgs),
    /// List admin users (password hashes are never shown)
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Login email
    #[arg(long)]
    pub email: String,

    /// Login password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Display name
    #[arg(long, default_value = "Admin")]
    pub name: String,

    /// bcrypt work factor
    #[arg(long, default_value_t = DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: u32,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run_user(args: UserArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;
    let store = connect_store(&database_url).await?;

    match args.command {
        UserCommands::Create(create) => run_create(&store, create).await,
        UserCommands::List(list) => run_list(&store, list).await,
    }
}

async fn run_create(store: &dyn ContentStore, args: CreateArgs) -> Result<()> {
    let user = auth::register_user(store, &args.email, &args.password, &args.name, args.bcrypt_cost)
        .await
        .with_context(|| format!("Failed to create user {}", args.email))?;

    println!("Created user {} ({})", user.email, user.id);
    Ok(())
}

async fn run_list(store: &dyn ContentStore, args: ListArgs) -> Result<()> {
    let users: Vec<UserSummary> = store
        .list_users()
        .await
        .context("Failed to list users")?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("No users");
        return Ok(());
    }

    println!("{:<36}  {:<32}  NAME", "ID", "EMAIL");
    for user in users {
        println!("{:<36}  {:<32}  {}", user.id, user.email, user.name);
    }
    Ok(())
}
