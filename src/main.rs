//! Command-line entry point for poking the user-management API.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use user_api_client::{ApiClient, ApiResponse, Config, HealthStatus, NewUser, UserService};

/// User-management API client.
#[derive(Parser, Debug)]
#[command(name = "user-api")]
#[command(about = "Call the user-management REST API from the command line")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the API.
    #[arg(long, global = true, env = "API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users.
    List,

    /// Create a user.
    Create {
        /// Username of the new user.
        #[arg(long)]
        username: String,

        /// Email of the new user.
        #[arg(long)]
        email: String,
    },

    /// Delete a user by id.
    Delete {
        /// Id of the user to delete.
        id: String,
    },

    /// Check service health.
    Health,

    /// Print the resolved configuration.
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("user_api_client=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = Config::load()?;
    if let Some(api_url) = args.api_url.filter(|url| !url.trim().is_empty()) {
        config = config.with_api_url(api_url);
    }

    if matches!(args.command, Command::ShowConfig) {
        println!("API URL:  {}", config.base_url());
        println!("Timeout:  {}ms", config.api_timeout_ms);
        return Ok(());
    }

    let users = UserService::new(ApiClient::new(&config)?);

    let response = match args.command {
        Command::List => users.get_users().await?,
        Command::Create { username, email } => {
            users.create_user(&NewUser::new(username, email)).await?
        }
        Command::Delete { id } => users.delete_user(id).await?,
        Command::Health => {
            let response = users.health_check().await?;
            if let Ok(health) = response.json::<HealthStatus>() {
                info!(healthy = health.is_healthy(), database = ?health.database, "Health check");
            }
            response
        }
        Command::ShowConfig => return Ok(()),
    };

    print_response(&response)
}

fn print_response(response: &ApiResponse) -> anyhow::Result<()> {
    info!(status = response.status, "Request succeeded");
    println!("{}", serde_json::to_string_pretty(&response.data)?);
    Ok(())
}
