//! Main application entry point (native).
//!
//! Plays one scripted round: log in, build a page, score it, save it and
//! print the leaderboard.

use dragstyle_core::scores::{LocalScoreStore, ScoreBackend, ScoreKeeper};
use dragstyle_core::scoring::DISPLAY_MAX;
use dragstyle_core::storage::FileStorage;
use dragstyle_core::{
    CanvasCommand, Color, Config, DropContext, ElementKind, GameSession, PointerEvent, ScoreReport,
};
use kurbo::{Point, Rect, Vec2};
use std::process::ExitCode;

const DEFAULT_PLAYER: &str = "Guest";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Drag to Style");

    let config = Config::from_env();
    let username = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_PLAYER.to_string());

    #[cfg(feature = "remote")]
    if let Some(url) = config.remote_url.clone() {
        log::info!("Using score service at {}", url);
        let keeper = ScoreKeeper::new(dragstyle_core::scores::RemoteScoreStore::new(url));
        return pollster::block_on(play_round(&keeper, &config, &username));
    }

    if let Some(url) = unusable_remote_url(&config) {
        log::warn!(
            "Ignoring score service {} (built without the `remote` feature); using local storage",
            url
        );
    }

    let storage = match FileStorage::new(&config.data_dir) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Cannot open data directory {}: {e}", config.data_dir.display());
            return ExitCode::FAILURE;
        }
    };
    log::info!("Storing scores in {}", config.data_dir.display());
    let keeper = ScoreKeeper::new(LocalScoreStore::new(storage));
    pollster::block_on(play_round(&keeper, &config, &username))
}

/// The configured score service URL, if this build cannot talk to it.
fn unusable_remote_url(config: &Config) -> Option<&str> {
    if cfg!(feature = "remote") {
        None
    } else {
        config.remote_url.as_deref()
    }
}

async fn play_round<B: ScoreBackend>(
    keeper: &ScoreKeeper<B>,
    config: &Config,
    username: &str,
) -> ExitCode {
    let mut session = GameSession::new();
    let player = match session.login(keeper.backend(), username).await {
        Ok(player) => player,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    println!("Welcome, {}!", player.username);
    if let Some(best) = keeper.highest_score(&player.id).await {
        println!("Your best so far: {best}");
    }

    build_page(&mut session);
    let report = session.check_score();
    print_report(&report);
    println!("\n{}\n", session.markup());

    match session.save_score(keeper.backend()).await {
        Ok((_, record)) => log::debug!("Saved record {}", record.id),
        Err(e) => {
            eprintln!("Could not save score: {e}");
            return ExitCode::FAILURE;
        }
    }

    let stats = keeper.user_stats(&player.id).await;
    println!(
        "Games: {}  Best: {}  Average: {}",
        stats.total_games,
        stats.highest_score.unwrap_or_default(),
        stats.average_score.unwrap_or_default(),
    );

    println!("\nLeaderboard");
    for (rank, row) in keeper.leaderboard(config.leaderboard_limit).await.iter().enumerate() {
        println!("{:>2}. {:<20} {:>4}", rank + 1, row.username, row.best_score);
    }

    session.request_end_session().confirm(&mut session);
    ExitCode::SUCCESS
}

/// Lay out a simple landing page the way a player would drag it together.
fn build_page(session: &mut GameSession) {
    let surface = Rect::new(0.0, 0.0, 800.0, 600.0);
    let drop = |x: f64, y: f64| DropContext::new(surface, Point::new(x, y), Vec2::ZERO);

    session.set_background(Color::rgb(0xf5, 0xf5, 0xf5));
    session.drop_new(ElementKind::Header, &drop(20.0, 20.0));
    session.drop_new(ElementKind::Nav, &drop(20.0, 90.0));
    let title = session.drop_new(ElementKind::H1, &drop(20.0, 150.0));
    session.apply(CanvasCommand::UpdateContent {
        id: title,
        content: "Welcome to my site".to_string(),
    });
    for (i, text) in ["About us", "Our work"].into_iter().enumerate() {
        let id = session.drop_new(ElementKind::Paragraph, &drop(20.0, 220.0 + 50.0 * i as f64));
        session.apply(CanvasCommand::UpdateContent {
            id,
            content: text.to_string(),
        });
    }
    let footer = session.drop_new(ElementKind::Footer, &drop(0.0, 0.0));

    // Stretch the footer a little taller.
    if session.begin_resize(footer, Point::new(800.0, 580.0)) {
        let position = Point::new(800.0, 600.0);
        session.handle_pointer(PointerEvent::Move { position });
        session.handle_pointer(PointerEvent::Up { position });
    }
}

fn print_report(report: &ScoreReport) {
    println!("Score: {}/{}  {}", report.total, DISPLAY_MAX, report.grade());
    for line in report.feedback_lines() {
        println!("  {line}");
    }
}
