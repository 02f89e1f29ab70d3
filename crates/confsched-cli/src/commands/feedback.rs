use super::AppContext;
use anyhow::{Context, Result, bail};
use clap::Args;
use confsched_core::feedback::SessionFeedback;

/// Ratings accepted by `feedback save`. Omitted values keep the stored ones.
#[derive(Args, Debug, Default)]
pub struct RatingArgs {
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub total: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub relevancy: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub as_expected: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub difficulty: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub knowledgeable: Option<u8>,
    #[arg(long)]
    pub comment: Option<String>,
}

impl RatingArgs {
    fn apply(self, feedback: &mut SessionFeedback) {
        let RatingArgs {
            total,
            relevancy,
            as_expected,
            difficulty,
            knowledgeable,
            comment,
        } = self;
        feedback.total_evaluation = total.unwrap_or(feedback.total_evaluation);
        feedback.relevancy = relevancy.unwrap_or(feedback.relevancy);
        feedback.as_expected = as_expected.unwrap_or(feedback.as_expected);
        feedback.difficulty = difficulty.unwrap_or(feedback.difficulty);
        feedback.knowledgeable = knowledgeable.unwrap_or(feedback.knowledgeable);
        if let Some(comment) = comment {
            feedback.comment = comment;
        }
    }
}

pub async fn show(ctx: &AppContext, session_id: &str) -> Result<()> {
    let feedback = ctx.usecase.session_feedback(session_id).await?;
    print_feedback(&feedback);
    Ok(())
}

pub async fn save(ctx: &AppContext, session_id: &str, ratings: RatingArgs) -> Result<()> {
    let mut feedback = ctx.usecase.session_feedback(session_id).await?;
    ratings.apply(&mut feedback);
    ctx.usecase.save_session_feedback(&feedback).await?;
    tracing::debug!("[feedback] Saved feedback for {}", session_id);

    println!("✓ Feedback saved");
    print_feedback(&feedback);
    Ok(())
}

pub async fn submit(ctx: &AppContext, session_id: &str) -> Result<()> {
    let contents = ctx.current_contents().await?;
    let session = contents
        .sessions
        .iter()
        .find(|s| s.id() == session_id)
        .with_context(|| format!("Session not found: {}", session_id))?;
    let Some(speech) = session.as_speech() else {
        bail!("Feedback can only be sent for talks, not '{}'", session.title().ja);
    };

    let feedback = ctx.usecase.session_feedback(session_id).await?;
    if feedback.submitted {
        println!("Feedback for {} was already submitted; sending again", session_id);
    }
    ctx.usecase
        .submit_session_feedback(speech, &feedback)
        .await
        .inspect_err(|e| {
            tracing::error!("[feedback] Submission for {} failed: {}", session_id, e);
        })
        .context("Failed to submit feedback")?;
    tracing::info!("[feedback] Submitted feedback for {}", session_id);

    println!("✓ Feedback submitted for '{}'", speech.title.ja);
    Ok(())
}

fn print_feedback(feedback: &SessionFeedback) {
    println!("Session:       {}", feedback.session_id);
    println!("Total:         {}", feedback.total_evaluation);
    println!("Relevancy:     {}", feedback.relevancy);
    println!("As expected:   {}", feedback.as_expected);
    println!("Difficulty:    {}", feedback.difficulty);
    println!("Knowledgeable: {}", feedback.knowledgeable);
    println!("Comment:       {}", feedback.comment);
    println!("Submitted:     {}", feedback.submitted);
}
