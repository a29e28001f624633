use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

use storerate_cli::admin::create_system_admin;
use storerate_cli::maintenance::{check_database, reset_database};
use storerate_cli::seeder::{self, SeedConfig};
use storerate_config::DatabaseConfig;
use storerate_db::{close_db_pool, init_db_pool, run_migrations};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "storerate-cli")]
#[command(about = "Store Rating CLI - Administrative tools for the Store Rating API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Drop all tables and types, then migrate from scratch
    Reset {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Check connectivity and report row counts
    Check,
    /// Create a new system administrator account
    CreateAdmin {
        /// Full name (20 to 60 letters and spaces)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Postal address
        #[arg(short = 'a', long)]
        address: Option<String>,
    },
    /// Seed the database with fake owners, stores, users and ratings
    Seed {
        /// Number of stores to create, each with its own owner
        #[arg(short = 's', long, default_value = "10")]
        stores: usize,

        /// Number of normal users
        #[arg(short = 'u', long, default_value = "50")]
        users: usize,

        /// Maximum ratings per normal user
        #[arg(short = 'r', long, default_value = "5")]
        ratings: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let mut config = DatabaseConfig::from_env();
    config.max_connections = 5;

    let pool = match init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Reset { yes } => handle_reset(&pool, yes).await,
        Commands::Check => handle_check(&pool).await,
        Commands::CreateAdmin {
            name,
            email,
            password,
            address,
        } => handle_create_admin(&pool, name, email, password, address).await,
        Commands::Seed {
            stores,
            users,
            ratings,
        } => handle_seed(&pool, stores, users, ratings).await,
    };

    close_db_pool(&pool).await;

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn handle_migrate(pool: &PgPool) -> CliResult {
    run_migrations(pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_reset(pool: &PgPool, yes: bool) -> CliResult {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("This deletes ALL users, stores and ratings. Continue?")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("Reset cancelled");
        return Ok(());
    }

    reset_database(pool).await?;
    println!("✅ Database reset and migrated");
    Ok(())
}

async fn handle_check(pool: &PgPool) -> CliResult {
    let report = check_database(pool).await?;

    println!("✅ Connected: {}", report.server_version);
    for (table, count) in &report.tables {
        match count {
            Some(count) => println!("   {:<8} {} rows", table, count),
            None => println!("   {:<8} missing", table),
        }
    }

    if !report.is_migrated() {
        println!("\n⚠️  Schema incomplete. Run `storerate-cli migrate`.");
    }
    Ok(())
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    address: Option<String>,
) -> CliResult {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Full name (20-60 characters)")
            .interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password (8-16 characters, one uppercase, one special)")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let address = match address {
        Some(address) => address,
        None => Input::new()
            .with_prompt("Address (optional)")
            .allow_empty(true)
            .interact_text()?,
    };

    let user_id = create_system_admin(pool, &name, &email, &password, Some(&address)).await?;

    println!("\n✅ System admin created successfully!");
    println!("   ID: {}", user_id);
    println!("   Email: {}", email.trim().to_lowercase());
    println!("   Name: {}", name.trim());
    Ok(())
}

async fn handle_seed(pool: &PgPool, stores: usize, users: usize, ratings: usize) -> CliResult {
    let config = SeedConfig::new(stores)
        .with_normal_users(users)
        .with_ratings_per_user(ratings);

    let summary = seeder::seed_all(pool, config).await?;
    println!(
        "   Owners: {}, stores: {}, users: {}, ratings: {}",
        summary.owners, summary.stores, summary.normal_users, summary.ratings
    );
    Ok(())
}
