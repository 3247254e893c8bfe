//! qdrop: secure file upload CLI
//!
//! Commands:
//!   register             - register a new user (interactive prompts)
//!   upload <file> -u <user> - authenticate, encrypt, stage, and hand off
//!   config show          - display the merged active configuration
//!
//! The pipeline behind `upload` generates a fresh key per request, seals the
//! file with XChaCha20-Poly1305, stages `<basename>.enc`, persists the key to
//! the well-known key file, and reports the transfer outcome (succeeded,
//! failed, or skipped when transfer is disabled in config).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secrecy::SecretString;

use qdrop_core::config::QdropConfig;
use qdrop_core::TransferOutcome;
use qdrop_users::{NewUser, Session, UserStore};

#[derive(Parser, Debug)]
#[command(
    name = "qdrop",
    version,
    about = "Encrypt local files and stage them for upload",
    long_about = "qdrop: register users, encrypt files with one-time keys, \
                  and stage ciphertext for object-storage transfer"
)]
struct Cli {
    /// Path to qdrop.toml configuration file
    #[arg(long, short = 'c', env = "QDROP_CONFIG", default_value = "qdrop.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new user (prompts for all fields)
    Register {
        /// Username (unique, case-sensitive)
        username: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Mobile number
        #[arg(long)]
        mobile: String,
    },

    /// Encrypt a file and stage it for upload
    ///
    /// Transfer credentials are read from AWS_ACCESS_KEY_ID and
    /// AWS_SECRET_ACCESS_KEY environment variables when transfer is enabled.
    Upload {
        /// Local file to encrypt and stage
        file: PathBuf,
        /// Username to authenticate as
        #[arg(long, short = 'u')]
        username: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = QdropConfig::load(&cli.config)?;
    init_logging(&config.log.level, &config.log.format);

    match cli.command {
        Commands::Register {
            username,
            email,
            mobile,
        } => register(&config, username, email, mobile),
        Commands::Upload { file, username } => upload(&config, file, username).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
        },
    }
}

fn register(config: &QdropConfig, username: String, email: String, mobile: String) -> Result<()> {
    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if secrecy::ExposeSecret::expose_secret(&password)
        != secrecy::ExposeSecret::expose_secret(&confirm)
    {
        anyhow::bail!("passwords do not match");
    }

    let store = UserStore::new(&config.store.users_file);
    store
        .register(NewUser {
            username: username.clone(),
            password,
            email,
            mobile,
        })
        .with_context(|| format!("registering {username}"))?;

    println!("registered {username}");
    Ok(())
}

async fn upload(config: &QdropConfig, file: PathBuf, username: String) -> Result<()> {
    let store = UserStore::new(&config.store.users_file);
    let password = prompt_password("Password: ")?;

    // Credential mismatch is an outcome, not an error
    if !store.authenticate(&username, &password)? {
        anyhow::bail!("invalid credentials");
    }
    let session = Session::open(
        &username,
        Duration::from_secs(config.store.session_ttl_secs),
    );

    let (artifact, outcome) = qdrop_engine::run_upload(config, &session, &file)
        .await
        .with_context(|| format!("uploading {}", file.display()))?;

    println!("staged: {}", artifact.ciphertext_path.display());
    match outcome {
        TransferOutcome::Succeeded => {
            println!("transferred to bucket {}", config.transfer.bucket)
        }
        TransferOutcome::Failed { reason } => println!("transfer failed: {reason}"),
        TransferOutcome::Skipped => println!("transfer disabled, artifact left staged"),
    }
    Ok(())
}

fn prompt_password(prompt: &str) -> Result<SecretString> {
    let password = rpassword::prompt_password(prompt).context("reading password")?;
    Ok(SecretString::from(password))
}

fn init_logging(level: &str, format: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}
