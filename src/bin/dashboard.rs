//! `cointrack-dash` - terminal client for the cointrack API.
//!
//! Renders record tables and the two dashboard charts; every view re-fetches
//! from the backend, nothing is kept locally.

use clap::{Parser, Subcommand};

use cointrack::assets::dto::AssetPayload;
use cointrack::client::{view, ApiClient};
use cointrack::users::dto::UserPayload;

/// cointrack-dash - tables and charts over the cointrack API
#[derive(Debug, Parser)]
#[command(name = "cointrack-dash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides COINTRACK_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage user records
    #[command(subcommand)]
    Users(UsersCommand),

    /// Manage asset records
    #[command(subcommand)]
    Assets(AssetsCommand),

    /// Render both tables plus the kind and price-band charts
    Dashboard,
}

#[derive(Debug, Subcommand)]
enum UsersCommand {
    /// List all users
    List,
    /// Create a user
    Add { name: String },
    /// Replace a user's name
    Rename { id: i64, name: String },
    /// Delete a user
    Rm { id: i64 },
}

#[derive(Debug, Subcommand)]
enum AssetsCommand {
    /// List all assets
    List,
    /// Create an asset
    Add {
        name: String,
        #[arg(long)]
        owner: i64,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        price: f64,
    },
    /// Replace an asset's full field set
    Set {
        id: i64,
        name: String,
        #[arg(long)]
        owner: i64,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        price: f64,
    },
    /// Delete an asset
    Rm { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let base_url = cli
        .api_url
        .or_else(|| std::env::var("COINTRACK_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let api_key = std::env::var("API_KEY").ok();
    let client = ApiClient::new(base_url, api_key)?;

    match cli.command {
        Command::Users(cmd) => handle_users(&client, cmd).await,
        Command::Assets(cmd) => handle_assets(&client, cmd).await,
        Command::Dashboard => handle_dashboard(&client).await,
    }
}

async fn handle_users(client: &ApiClient, cmd: UsersCommand) -> anyhow::Result<()> {
    match cmd {
        UsersCommand::List => {
            let users = client.list_users().await?;
            print!("{}", view::render_users(&users));
        }
        UsersCommand::Add { name } => {
            let user = client.create_user(&UserPayload { name }).await?;
            println!("created user {} ({})", user.id, user.name);
        }
        UsersCommand::Rename { id, name } => {
            let user = client.update_user(id, &UserPayload { name }).await?;
            println!("updated user {} ({})", user.id, user.name);
        }
        UsersCommand::Rm { id } => {
            client.delete_user(id).await?;
            println!("deleted user {id}");
        }
    }
    Ok(())
}

async fn handle_assets(client: &ApiClient, cmd: AssetsCommand) -> anyhow::Result<()> {
    match cmd {
        AssetsCommand::List => {
            let assets = client.list_assets().await?;
            let users = client.list_users().await?;
            print!("{}", view::render_assets(&assets, &users));
        }
        AssetsCommand::Add {
            name,
            owner,
            symbol,
            kind,
            price,
        } => {
            let asset = client
                .create_asset(&AssetPayload {
                    name,
                    owner_id: owner,
                    symbol,
                    kind,
                    price,
                })
                .await?;
            println!("created asset {} ({})", asset.id, asset.symbol);
        }
        AssetsCommand::Set {
            id,
            name,
            owner,
            symbol,
            kind,
            price,
        } => {
            let asset = client
                .update_asset(
                    id,
                    &AssetPayload {
                        name,
                        owner_id: owner,
                        symbol,
                        kind,
                        price,
                    },
                )
                .await?;
            println!("updated asset {} ({})", asset.id, asset.symbol);
        }
        AssetsCommand::Rm { id } => {
            client.delete_asset(id).await?;
            println!("deleted asset {id}");
        }
    }
    Ok(())
}

async fn handle_dashboard(client: &ApiClient) -> anyhow::Result<()> {
    let users = client.list_users().await?;
    let assets = client.list_assets().await?;

    println!("USERS");
    print!("{}", view::render_users(&users));
    println!();
    println!("ASSETS");
    print!("{}", view::render_assets(&assets, &users));
    println!();
    print!("{}", view::bar_chart("assets by kind", &view::count_by_kind(&assets)));
    println!();
    print!(
        "{}",
        view::bar_chart("assets by price band", &view::count_by_price_band(&assets))
    );
    Ok(())
}
