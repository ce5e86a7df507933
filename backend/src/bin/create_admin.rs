//! Bootstrap an administrator account in the user directory.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig as _;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::DatabaseSettings;
use backend::domain::ports::{NewUserRequest, UserDirectory};
use backend::domain::{PlaintextPassword, UserDirectoryService, UserProfile};
use backend::outbound::persistence::{DbPool, DieselReferralRepository, DieselUserRepository};

/// `create-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-admin",
    about = "Create a staff superuser account in the directory",
    version
)]
struct CliArgs {
    /// Login email for the new administrator.
    #[arg(long = "email", value_name = "address")]
    email: String,
    /// Plaintext password; omitted leaves the account with an unusable
    /// password.
    #[arg(long = "password", value_name = "secret")]
    password: Option<String>,
    /// Job title.
    #[arg(long = "title", value_name = "text", default_value = "")]
    title: String,
    /// Given name.
    #[arg(long = "first-name", value_name = "name", default_value = "")]
    first_name: String,
    /// Family name.
    #[arg(long = "last-name", value_name = "name", default_value = "")]
    last_name: String,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let settings = resolve_settings(args.database_url.clone())?;
    let pool = DbPool::connect(&settings)
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let directory = UserDirectoryService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselReferralRepository::new(pool)),
        Arc::new(DefaultClock),
    );

    let password = args
        .password
        .map(PlaintextPassword::new)
        .transpose()
        .map_err(|error| io::Error::other(format!("invalid password: {error}")))?;

    let request = NewUserRequest {
        email: args.email,
        password,
        profile: UserProfile {
            title: args.title,
            first_name: args.first_name,
            last_name: args.last_name,
            age: None,
            dob: String::new(),
        },
    };

    let user = directory
        .create_superuser(request)
        .await
        .map_err(|error| io::Error::other(format!("create administrator: {error}")))?;

    info!(user_id = %user.id(), email = %user.email(), "administrator created");
    Ok(())
}

/// Prefer an explicit `--database-url` over environment-derived settings.
fn resolve_settings(database_url: Option<String>) -> io::Result<DatabaseSettings> {
    match database_url {
        Some(url) => Ok(DatabaseSettings::with_url(url)),
        None => DatabaseSettings::load_from_iter([OsString::from("create-admin")])
            .map_err(|error| io::Error::other(format!("load database settings: {error}"))),
    }
}
