use anyhow::Context;
use clap::{Parser, Subcommand};
use memberhub_config::{load as load_config, AppConfig};
use memberhub_database::{prepare_database, run_migrations, MemberRepository};
use memberhub_gateway::build_router;
use memberhub_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "memberhub")]
#[command(about = "Member demo service (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Print the most recently registered members
    DumpMembers {
        /// Maximum number of rows to print
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config().context("failed to load configuration")?;
    let _telemetry =
        telemetry::init_telemetry(&config.telemetry).context("failed to initialise telemetry")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(&config).await,
        Commands::Migrate => migrate(&config).await,
        Commands::DumpMembers { limit } => dump_members(&config, limit).await,
    }
}

async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    info!("starting memberhub");

    let services = BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")?;

    let app = build_router(services.gateway_state());

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(memberhub_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("memberhub shut down");
    Ok(())
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = prepare_database(&config.database)
        .await
        .context("failed to connect to database")?;

    run_migrations(&pool).await?;
    pool.close().await;

    println!("Migrations applied");
    Ok(())
}

async fn dump_members(config: &AppConfig, limit: i64) -> anyhow::Result<()> {
    let pool = prepare_database(&config.database)
        .await
        .context("failed to connect to database")?;
    let repository = MemberRepository::new(pool.clone());

    let total = repository.count().await.context("failed to count members")?;
    let members = repository
        .list(limit)
        .await
        .context("failed to fetch members")?;

    println!("=== MEMBERS ===");
    if members.is_empty() {
        println!("No members found in database");
    } else {
        println!("Showing {} of {} members:", members.len(), total);
        println!(
            "{:<20} {:<20} {:<20} {:<30}",
            "User ID", "First Name", "Last Name", "Created At"
        );
        println!("{}", "-".repeat(92));

        for member in members {
            println!(
                "{:<20} {:<20} {:<20} {:<30}",
                member.user_id,
                member.first_name,
                member.last_name,
                member.created_at.to_rfc3339()
            );
        }
    }

    pool.close().await;
    Ok(())
}
