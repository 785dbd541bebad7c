mod cli;
mod commands;
mod config;
mod observability;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, ResetCommands, SessionCommands, UserCommands};
use commands::App;
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();

    // Hashing needs no config or database
    if let Commands::HashPassword(args) = &cli.command {
        println!("{}", lenslocked_auth::password::hash_password(&args.password)?);
        return Ok(());
    }

    let cfg = config::loader::load_config(cli.config.as_deref())?;
    observability::init_tracing_with_level(&cfg.logging.level);
    let app = App::connect(cfg, format).await?;

    match &cli.command {
        Commands::Migrate => commands::migrate::run(&app).await?,
        Commands::Login(args) => commands::login::run(&app, args).await?,
        Commands::User(args) => match &args.command {
            UserCommands::Create(create) => commands::user::create(&app, create).await?,
        },
        Commands::Session(args) => match &args.command {
            SessionCommands::Create(selector) => commands::session::create(&app, selector).await?,
            SessionCommands::Whoami(token) => commands::session::whoami(&app, token).await?,
            SessionCommands::Revoke(token) => commands::session::revoke(&app, token).await?,
            SessionCommands::RevokeUser(selector) => {
                commands::session::revoke_user(&app, selector).await?;
            }
        },
        Commands::Reset(args) => match &args.command {
            ResetCommands::Request(request) => commands::reset::request(&app, request).await?,
            ResetCommands::Consume(consume) => commands::reset::consume(&app, consume).await?,
            ResetCommands::Purge => commands::reset::purge(&app).await?,
        },
        Commands::HashPassword(_) => {}
    }

    Ok(())
}
