use anyhow::Result;
use lenslocked_auth::password::hash_password;
use serde_json::json;

use super::App;
use crate::cli::UserCreateArgs;
use crate::output::{print_record, print_success};

pub async fn create(app: &App, args: &UserCreateArgs) -> Result<()> {
    let password_hash = hash_password(&args.password)?;
    let user = app.storage.users().create(&args.email, &password_hash).await?;

    print_success(&format!("Created user {}", user.id));
    print_record(
        &[("id", json!(user.id)), ("email", json!(user.email))],
        app.format,
    );
    Ok(())
}
