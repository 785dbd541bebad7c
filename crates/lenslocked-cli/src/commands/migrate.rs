use anyhow::Result;
use lenslocked_auth_postgres::migrations;

use super::App;
use crate::output::print_success;

pub async fn run(app: &App) -> Result<()> {
    migrations::run(app.storage.pool()).await?;
    print_success(&format!("Applied {} embedded migration(s)", migrations::count()));
    Ok(())
}
