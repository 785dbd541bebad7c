use anyhow::{Result, bail};
use lenslocked_auth::User;
use lenslocked_auth::password::{hash_password, verify_password};
use serde_json::json;

use super::App;
use crate::cli::LoginArgs;
use crate::output::print_record;

const INVALID_CREDENTIALS: &str = "invalid email or password";

pub async fn run(app: &App, args: &LoginArgs) -> Result<()> {
    let email = User::normalize_email(&args.email);
    let Some(user) = app.storage.users().find_by_email(&email).await? else {
        // Spend the same hashing time as a real check
        hash_password(&args.password)?;
        bail!(INVALID_CREDENTIALS);
    };

    if !verify_password(&args.password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "Login rejected");
        bail!(INVALID_CREDENTIALS);
    }

    let session = app.sessions().create(user.id).await?;
    print_record(
        &[
            ("user_id", json!(user.id)),
            ("email", json!(user.email)),
            ("token", json!(session.token)),
        ],
        app.format,
    );
    Ok(())
}
