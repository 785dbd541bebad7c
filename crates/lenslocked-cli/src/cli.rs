use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "lenslocked")]
#[command(about = "Lenslocked admin CLI: sessions, password resets and migrations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./lenslocked.toml when present)
    #[arg(short, long, global = true, env = "LENSLOCKED_CONFIG")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Check a password and issue a session
    Login(LoginArgs),
    /// Manage users
    User(UserArgs),
    /// Manage login sessions
    Session(SessionArgs),
    /// Manage password resets
    Reset(ResetArgs),
    /// Print the Argon2 hash of a password
    HashPassword(HashPasswordArgs),
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Password
    #[arg(long, env = "LENSLOCKED_PASSWORD")]
    pub password: String,
}

#[derive(clap::Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Create(UserCreateArgs),
}

#[derive(clap::Args)]
pub struct UserCreateArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Password
    #[arg(long, env = "LENSLOCKED_PASSWORD")]
    pub password: String,
}

#[derive(clap::Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Issue a session for a user, replacing any existing one
    Create(UserSelector),
    /// Show the user a session token belongs to
    Whoami(TokenArgs),
    /// End the session of a token
    Revoke(TokenArgs),
    /// End the session of a user
    RevokeUser(UserSelector),
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
pub struct UserSelector {
    /// User ID
    #[arg(long)]
    pub user_id: Option<i64>,
    /// User email
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(clap::Args)]
pub struct TokenArgs {
    /// Raw token
    #[arg(long, env = "LENSLOCKED_TOKEN")]
    pub token: String,
}

#[derive(clap::Args)]
pub struct ResetArgs {
    #[command(subcommand)]
    pub command: ResetCommands,
}

#[derive(Subcommand)]
pub enum ResetCommands {
    /// Issue a reset token for an email address
    Request(ResetRequestArgs),
    /// Redeem a reset token and set a new password
    Consume(ResetConsumeArgs),
    /// Delete expired reset tokens
    Purge,
}

#[derive(clap::Args)]
pub struct ResetRequestArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Email the reset link over SMTP instead of printing it
    #[arg(long)]
    pub send: bool,
}

#[derive(clap::Args)]
pub struct ResetConsumeArgs {
    /// Raw reset token
    #[arg(long, env = "LENSLOCKED_TOKEN")]
    pub token: String,
    /// New password
    #[arg(long, env = "LENSLOCKED_PASSWORD")]
    pub new_password: String,
}

#[derive(clap::Args)]
pub struct HashPasswordArgs {
    /// Password to hash
    pub password: String,
}
