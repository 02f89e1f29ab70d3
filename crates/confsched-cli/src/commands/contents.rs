use super::AppContext;
use anyhow::Result;
use confsched_core::session::{Lang, Session, SessionContents};
use std::collections::BTreeSet;

pub async fn run(ctx: &AppContext, day: Option<i64>) -> Result<()> {
    let contents = ctx.current_contents().await?;

    let days: BTreeSet<i64> = contents.sessions.iter().map(Session::day_number).collect();
    for day_number in days.into_iter().filter(|d| day.is_none_or(|only| only == *d)) {
        println!("== Day {} ==", day_number + 1);
        for session in contents.sessions_on_day(day_number) {
            print_session(session);
        }
        println!();
    }

    print_facets(&contents);
    Ok(())
}

fn print_session(session: &Session) {
    let mark = if session.is_favorited() { "★" } else { " " };
    let speakers = session
        .as_speech()
        .map(|speech| {
            speech
                .speakers
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    println!(
        "{} {}-{} [{}] {} ({}) {}",
        mark,
        session.starts_at().format("%H:%M"),
        session.ends_at().format("%H:%M"),
        session.room().name.get(Lang::Ja),
        session.title().get(Lang::Ja),
        session.id(),
        speakers
    );
}

fn print_facets(contents: &SessionContents) {
    let rooms: Vec<&str> = contents.rooms.iter().map(|r| r.name.ja.as_str()).collect();
    let categories: Vec<&str> = contents.category.iter().map(|c| c.name.ja.as_str()).collect();
    let langs: Vec<String> = contents.langs.iter().map(ToString::to_string).collect();

    println!("Rooms:      {}", rooms.join(", "));
    println!("Categories: {}", categories.join(", "));
    println!("Languages:  {}", langs.join(", "));
    println!("Speakers:   {}", contents.speakers.len());
}
