use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use gradebook_cli::seeder::{self, DEMO_ACCOUNTS, SeedConfig};
use gradebook_config::{DatabaseConfig, PasswordConfig};
use gradebook_db::{PgPool, PgStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "gradebook-cli")]
#[command(about = "Gradebook CLI - Administrative tools for Gradebook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed demo accounts, a course, an enrollment and a grade
    Seed {
        /// Number of extra fake students to enroll in the demo course
        #[arg(short = 's', long, default_value = "0")]
        students: usize,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(pool, name, email, password).await,
        Commands::Seed { students } => handle_seed(pool, students).await,
        Commands::Migrate => handle_migrate(&pool).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    Ok(pool)
}

async fn handle_create_admin(
    pool: PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let store = PgStore::new(pool);
    let cost = PasswordConfig::from_env().bcrypt_cost;
    let admin = seeder::create_admin(&store, &name, &email, &password, cost).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", admin.email);
    println!("   Name: {}", admin.name);
    Ok(())
}

async fn handle_seed(pool: PgPool, students: usize) -> anyhow::Result<()> {
    let config = SeedConfig::default()
        .with_students(students)
        .with_password_cost(PasswordConfig::from_env().bcrypt_cost);
    let store = PgStore::new(pool);

    seeder::seed_all(&store, &config).await?;

    println!("\n✅ Database seeded successfully! You can now log in.");
    for account in &DEMO_ACCOUNTS {
        println!(
            "   {}: {} / {}",
            account.role, account.email, account.password
        );
    }
    Ok(())
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    run_migrations(pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}
