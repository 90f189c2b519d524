//! End-to-end game rounds through the public API.

use chrono::{DateTime, Duration};
use dragstyle_core::markup;
use dragstyle_core::scores::{LocalScoreStore, ScoreKeeper};
use dragstyle_core::storage::{FileStorage, MemoryStorage};
use dragstyle_core::{
    CanvasElement, Color, DropContext, ElementKind, GameSession, ManualClock, ScoreBackend,
    scoring,
};
use kurbo::{Point, Rect, Vec2};
use pollster::block_on;

fn surface() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn drop_at(x: f64, y: f64) -> DropContext {
    DropContext::new(surface(), Point::new(x, y), Vec2::ZERO)
}

fn clock() -> ManualClock {
    let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
    ManualClock::with_step(start, Duration::seconds(1))
}

fn keeper() -> ScoreKeeper<LocalScoreStore<MemoryStorage>> {
    ScoreKeeper::new(LocalScoreStore::with_clock(MemoryStorage::new(), clock()))
}

#[test]
fn test_drop_header_at_pointer() {
    let mut session = GameSession::new();
    let id = session.drop_new(ElementKind::Header, &drop_at(120.0, 80.0));

    let element = session.canvas().get(id).unwrap();
    assert_eq!(element.kind, ElementKind::Header);
    assert_eq!(element.position, Point::new(120.0, 80.0));
}

#[test]
fn test_drop_footer_spans_surface() {
    let mut session = GameSession::new();
    let id = session.drop_new(ElementKind::Footer, &drop_at(400.0, 100.0));

    let footer = session.canvas().get(id).unwrap();
    assert_eq!(footer.position, Point::new(0.0, 500.0));
    assert_eq!(footer.size.width, Some(800.0));
    assert_eq!(footer.size.height, Some(80.0));
}

#[test]
fn test_complete_layout_scores_120() {
    let at = |kind, y| CanvasElement::new(kind, Point::new(20.0, y));
    let elements = vec![
        at(ElementKind::Header, 50.0),
        at(ElementKind::Nav, 110.0),
        at(ElementKind::H1, 160.0).with_content("Hi"),
        at(ElementKind::Paragraph, 220.0).with_content("a"),
        at(ElementKind::Paragraph, 260.0).with_content("b"),
        at(ElementKind::Paragraph, 300.0).with_content("c"),
        at(ElementKind::Footer, 450.0),
    ];

    let report = scoring::score(&elements);
    assert_eq!(report.total, 120);
    assert_eq!(
        report.feedback_lines(),
        vec![
            "✅ Header at top (+20 points)",
            "✅ Navigation included (+15 points)",
            "✅ Main heading with content (+15 points)",
            "✅ Content paragraphs (+30 points)",
            "✅ Footer at bottom (+20 points)",
            "✅ Good content variety (+10 points)",
            "✅ Customized content (+10 points)",
        ]
    );
}

#[test]
fn test_highest_and_average() {
    let keeper = keeper();
    block_on(keeper.save_score("u1", 80, Vec::new())).unwrap();
    block_on(keeper.save_score("u1", 95, Vec::new())).unwrap();

    assert_eq!(block_on(keeper.highest_score("u1")), Some(95));
    assert_eq!(block_on(keeper.user_stats("u1")).average_score, Some(88));
}

#[test]
fn test_leaderboard_orders_by_best() {
    let keeper = keeper();
    let low = block_on(keeper.create_or_get_user("Low")).unwrap();
    let high = block_on(keeper.create_or_get_user("High")).unwrap();
    block_on(keeper.save_score(&low.id, 95, Vec::new())).unwrap();
    block_on(keeper.save_score(&high.id, 99, Vec::new())).unwrap();

    let board = block_on(keeper.leaderboard(10));
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].username, "High");
    assert_eq!(board[0].best_score, 99);
    assert!(board.windows(2).all(|w| w[0].best_score >= w[1].best_score));
}

#[test]
fn test_same_user_any_case() {
    let store = LocalScoreStore::with_clock(MemoryStorage::new(), clock());
    let first = block_on(store.create_or_get_user("Alice")).unwrap();
    let second = block_on(store.create_or_get_user("alice")).unwrap();

    assert_eq!(first.id, second.id);
    assert!(second.last_login > first.last_login);
    assert_eq!(store.users().len(), 1);
}

#[test]
fn test_positions_stay_in_bounds() {
    let mut session = GameSession::new();
    let pointers = [(-50.0, -50.0), (0.0, 5.0), (9.0, 900.0), (400.0, 300.0)];
    for (x, y) in pointers {
        let id = session.drop_new(ElementKind::Button, &drop_at(x, y));
        let position = session.canvas().get(id).unwrap().position;
        assert!(position.x >= 10.0 && position.y >= 10.0);

        session.drop_existing(id, Vec2::new(-1000.0, -3.0));
        let position = session.canvas().get(id).unwrap().position;
        assert!(position.x >= 0.0 && position.y >= 0.0);
    }
}

#[test]
fn test_markup_follows_vertical_order() {
    let mut session = GameSession::new();
    session.set_background(Color::rgb(0x33, 0x66, 0x99));
    session.drop_new(ElementKind::Footer, &drop_at(0.0, 0.0));
    session.drop_new(ElementKind::H1, &drop_at(30.0, 200.0));
    session.drop_new(ElementKind::Header, &drop_at(30.0, 20.0));

    let doc = session.markup();
    assert!(doc.contains("background-color: #336699;"));
    let header = doc.find("<header>").unwrap();
    let h1 = doc.find("<h1>").unwrap();
    let footer = doc.find("<footer>").unwrap();
    assert!(header < h1 && h1 < footer);

    session.request_clear().confirm(&mut session);
    assert_eq!(session.markup(), markup::EMPTY_PLACEHOLDER);
}

#[test]
fn test_round_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let store = LocalScoreStore::with_clock(FileStorage::new(dir.path()).unwrap(), clock());
        let mut session = GameSession::new();
        block_on(session.login(&store, "Dee")).unwrap();
        session.drop_new(ElementKind::Header, &drop_at(40.0, 30.0));
        session.drop_new(ElementKind::Footer, &drop_at(0.0, 0.0));
        let (report, record) = block_on(session.save_score(&store)).unwrap();
        assert_eq!(report.total, 40);
        record
    };

    let reopened = LocalScoreStore::new(FileStorage::new(dir.path()).unwrap());
    let current = reopened.current_user().unwrap();
    assert_eq!(current.username, "Dee");

    let history = reopened.user_scores(&current.id);
    assert_eq!(history, vec![saved]);
    assert_eq!(history[0].layout_snapshot.len(), 2);
}
