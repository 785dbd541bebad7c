use anyhow::Result;
use serde_json::json;

use super::{App, token_error};
use crate::cli::{TokenArgs, UserSelector};
use crate::output::{print_record, print_success};

pub async fn create(app: &App, selector: &UserSelector) -> Result<()> {
    let user = app.resolve_user(selector).await?;
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

pub async fn whoami(app: &App, args: &TokenArgs) -> Result<()> {
    let user = app
        .sessions()
        .authenticate(&args.token)
        .await
        .map_err(token_error)?;

    print_record(
        &[("user_id", json!(user.id)), ("email", json!(user.email))],
        app.format,
    );
    Ok(())
}

pub async fn revoke(app: &App, args: &TokenArgs) -> Result<()> {
    app.sessions().revoke(&args.token).await?;
    print_success("Session revoked");
    Ok(())
}

pub async fn revoke_user(app: &App, selector: &UserSelector) -> Result<()> {
    let user = app.resolve_user(selector).await?;
    app.sessions().revoke_user(user.id).await?;
    print_success(&format!("Sessions of user {} revoked", user.id));
    Ok(())
}
