use anyhow::{Context, Result};
use lenslocked_auth::email::reset_url;
use lenslocked_auth::password::hash_password;
use lenslocked_notifications::EmailService;
use serde_json::json;
use time::format_description::well_known::Rfc3339;

use super::{App, RESET_REQUESTED_MESSAGE, reset_request_error, token_error};
use crate::cli::{ResetConsumeArgs, ResetRequestArgs};
use crate::output::{print_record, print_success};

pub async fn request(app: &App, args: &ResetRequestArgs) -> Result<()> {
    let resets = app.resets()?;
    let reset = match resets.create(&args.email).await {
        // Mailing mode answers the same way whether or not the address is registered
        Err(err) if err.is_not_found() && args.send => {
            print_success(RESET_REQUESTED_MESSAGE);
            return Ok(());
        }
        result => result.map_err(reset_request_error)?,
    };
    let token = reset.token.as_deref().context("issued reset carries no token")?;
    let url = reset_url(&resets.config().reset_url, token)?;
    let expires_at = reset.expires_at.format(&Rfc3339)?;

    if args.send {
        let mailer = EmailService::new(&app.config.smtp)?;
        mailer.forgot_password(&args.email, &url).await?;
        print_success(RESET_REQUESTED_MESSAGE);
    } else {
        print_record(
            &[
                ("user_id", json!(reset.user_id)),
                ("token", json!(token)),
                ("url", json!(url.as_str())),
                ("expires_at", json!(expires_at)),
            ],
            app.format,
        );
    }
    Ok(())
}

pub async fn consume(app: &App, args: &ResetConsumeArgs) -> Result<()> {
    let user = app
        .resets()?
        .consume(&args.token)
        .await
        .map_err(token_error)?;

    let password_hash = hash_password(&args.new_password)?;
    app.storage
        .users()
        .update_password_hash(user.id, &password_hash)
        .await?;
    app.sessions().revoke_user(user.id).await?;

    print_success(&format!("Password updated for {}", user.email));
    Ok(())
}

pub async fn purge(app: &App) -> Result<()> {
    let purged = app.resets()?.purge_expired().await?;
    print_success(&format!("Purged {purged} expired reset(s)"));
    Ok(())
}
