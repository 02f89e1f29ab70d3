use super::AppContext;
use anyhow::{Context, Result};

pub async fn run(ctx: &AppContext) -> Result<()> {
    println!("Fetching sessions...");
    ctx.usecase
        .refresh()
        .await
        .context("Failed to refresh sessions")?;

    let contents = ctx.current_contents().await?;
    tracing::info!(
        "[refresh] Stored {} sessions, {} speakers",
        contents.sessions.len(),
        contents.speakers.len()
    );
    println!(
        "✓ Stored {} sessions from {} speakers",
        contents.sessions.len(),
        contents.speakers.len()
    );
    Ok(())
}
