use super::AppContext;
use anyhow::{Context, Result};
use confsched_core::session::Session;

pub async fn run(ctx: &AppContext, session_id: &str) -> Result<()> {
    let contents = ctx.current_contents().await?;
    let session = contents
        .sessions
        .iter()
        .find(|s| s.id() == session_id)
        .with_context(|| format!("Session not found: {}", session_id))?;

    ctx.usecase.toggle_favorite(session).await?;
    tracing::info!(
        "[favorite] Toggled {} (was favorited: {})",
        session.id(),
        session.is_favorited()
    );

    if session.is_favorited() {
        println!("Removed {} from favorites", describe(session));
    } else {
        println!("★ Added {} to favorites", describe(session));
    }
    Ok(())
}

fn describe(session: &Session) -> String {
    format!("'{}' ({})", session.title().ja, session.id())
}
