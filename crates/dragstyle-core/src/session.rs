//! One player's game: canvas, gestures, page background and login.

use crate::canvas::{CanvasCommand, ElementStore};
use crate::confirm::{DestructiveAction, PendingConfirmation};
use crate::drag::DragEngine;
use crate::element::{CanvasElement, Color, ElementId, ElementKind};
use crate::input::{DropContext, PointerEvent};
use crate::markup;
use crate::scores::{ScoreBackend, ScoreRecord, User, ValidationError, validate_username};
use crate::scoring::{self, ScoreReport};
use crate::storage::StorageError;
use kurbo::{Point, Vec2};
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No player is logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// State of a single play session.
#[derive(Debug, Clone)]
pub struct GameSession {
    canvas: ElementStore,
    drag: DragEngine,
    background: Color,
    player: Option<User>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            canvas: ElementStore::new(),
            drag: DragEngine::new(),
            background: Color::white(),
            player: None,
        }
    }

    /// Validate `raw_username` and log the player in through `backend`.
    pub async fn login<B: ScoreBackend + ?Sized>(
        &mut self,
        backend: &B,
        raw_username: &str,
    ) -> Result<User, SessionError> {
        let username = validate_username(raw_username)?;
        let user = backend.create_or_get_user(&username).await?;
        self.player = Some(user.clone());
        Ok(user)
    }

    /// Resume a session for a user restored from storage.
    pub fn resume(&mut self, user: User) {
        self.player = Some(user);
    }

    pub fn player(&self) -> Option<&User> {
        self.player.as_ref()
    }

    pub fn canvas(&self) -> &ElementStore {
        &self.canvas
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Apply a non-destructive canvas command.
    ///
    /// `Clear` is ignored here; it goes through [`GameSession::request_clear`].
    pub fn apply(&mut self, command: CanvasCommand) {
        if matches!(command, CanvasCommand::Clear) {
            log::warn!("Clear requested without confirmation; ignored");
            return;
        }
        self.canvas = std::mem::take(&mut self.canvas).apply(command);
    }

    pub fn drop_new(&mut self, kind: ElementKind, ctx: &DropContext) -> ElementId {
        self.drag.drop_new(&mut self.canvas, kind, ctx)
    }

    pub fn drop_existing(&mut self, id: ElementId, delta: Vec2) {
        self.drag.drop_existing(&mut self.canvas, id, delta);
    }

    pub fn begin_resize(&mut self, id: ElementId, pointer: Point) -> bool {
        self.drag.begin_resize(&self.canvas, id, pointer)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.drag.handle_pointer(&mut self.canvas, event);
    }

    /// Score the current canvas.
    pub fn check_score(&self) -> ScoreReport {
        scoring::score(self.canvas.elements())
    }

    /// Markup for the whole canvas.
    pub fn markup(&self) -> String {
        markup::serialize(self.canvas.elements(), self.background)
    }

    /// Markup for one element, or `None` if it is not on the canvas.
    pub fn element_markup(&self, id: ElementId) -> Option<String> {
        self.canvas
            .get(id)
            .map(|element| markup::serialize_single(element, self.background))
    }

    /// Score the canvas and save the result with a snapshot of the layout.
    pub async fn save_score<B: ScoreBackend + ?Sized>(
        &self,
        backend: &B,
    ) -> Result<(ScoreReport, ScoreRecord), SessionError> {
        let player = self.player.as_ref().ok_or(SessionError::NotLoggedIn)?;
        let report = self.check_score();
        let snapshot: Vec<CanvasElement> = self.canvas.snapshot();
        let record = backend
            .save_score(&player.id, i64::from(report.total), snapshot)
            .await?;
        Ok((report, record))
    }

    pub fn request_clear(&self) -> PendingConfirmation {
        PendingConfirmation::new(DestructiveAction::ClearCanvas)
    }

    pub fn request_end_session(&self) -> PendingConfirmation {
        PendingConfirmation::new(DestructiveAction::EndSession)
    }

    pub(crate) fn clear_canvas(&mut self) {
        self.drag.end_resize();
        self.canvas.clear();
    }

    pub(crate) fn end(&mut self) {
        self.clear_canvas();
        self.background = Color::white();
        self.player = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::markup::EMPTY_PLACEHOLDER;
    use crate::scores::LocalScoreStore;
    use crate::storage::MemoryStorage;
    use chrono::DateTime;
    use kurbo::Rect;
    use pollster::block_on;

    fn backend() -> LocalScoreStore<MemoryStorage> {
        let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        LocalScoreStore::with_clock(MemoryStorage::new(), ManualClock::new(start))
    }

    fn ctx(x: f64, y: f64) -> DropContext {
        DropContext::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_login_validates() {
        let backend = backend();
        let mut session = GameSession::new();

        let err = block_on(session.login(&backend, "   ")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a username.");
        let err = block_on(session.login(&backend, &"x".repeat(21))).unwrap_err();
        assert_eq!(err.to_string(), "Username must be 20 characters or less.");
        assert!(session.player().is_none());

        let user = block_on(session.login(&backend, "  Alice ")).unwrap();
        assert_eq!(user.username, "Alice");
        assert_eq!(session.player(), Some(&user));
    }

    #[test]
    fn test_resume_from_stored_user() {
        let backend = backend();
        block_on(backend.create_or_get_user("Eve")).unwrap();

        let mut session = GameSession::new();
        session.resume(backend.current_user().unwrap());
        let (_, record) = block_on(session.save_score(&backend)).unwrap();
        assert_eq!(record.user_id, session.player().unwrap().id);
    }

    #[test]
    fn test_save_requires_login() {
        let backend = backend();
        let session = GameSession::new();
        let err = block_on(session.save_score(&backend)).unwrap_err();
        assert!(matches!(err, SessionError::NotLoggedIn));
        assert!(backend.scores().is_empty());
    }

    #[test]
    fn test_save_scores_current_canvas() {
        let backend = backend();
        let mut session = GameSession::new();
        block_on(session.login(&backend, "Bob")).unwrap();
        session.drop_new(ElementKind::Header, &ctx(20.0, 20.0));
        session.drop_new(ElementKind::Nav, &ctx(20.0, 120.0));

        let (report, record) = block_on(session.save_score(&backend)).unwrap();
        assert_eq!(report.total, 35);
        assert_eq!(record.score, 35);
        assert_eq!(record.layout_snapshot, session.canvas().snapshot());
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut session = GameSession::new();
        session.drop_new(ElementKind::Button, &ctx(20.0, 20.0));
        session.apply(CanvasCommand::Clear);
        assert_eq!(session.canvas().len(), 1);

        session.request_clear().confirm(&mut session);
        assert!(session.canvas().is_empty());
        assert_eq!(session.markup(), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_end_session_resets() {
        let backend = backend();
        let mut session = GameSession::new();
        block_on(session.login(&backend, "Cara")).unwrap();
        session.set_background(Color::black());
        let id = session.drop_new(ElementKind::Section, &ctx(50.0, 50.0));
        assert!(session.begin_resize(id, Point::new(250.0, 100.0)));

        session.request_end_session().confirm(&mut session);
        assert!(session.player().is_none());
        assert!(session.canvas().is_empty());
        assert!(!session.drag().is_resizing());
        assert_eq!(session.background(), Color::white());
    }

    #[test]
    fn test_element_markup() {
        let mut session = GameSession::new();
        let id = session.drop_new(ElementKind::H2, &ctx(20.0, 20.0));
        let doc = session.element_markup(id).unwrap();
        assert!(doc.contains("  <h2>Subheading</h2>"));
        assert!(session.element_markup(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_gesture_through_session() {
        let mut session = GameSession::new();
        let id = session.drop_new(ElementKind::Section, &ctx(50.0, 50.0));
        session.begin_resize(id, Point::new(100.0, 100.0));
        let position = Point::new(150.0, 110.0);
        session.handle_pointer(PointerEvent::Move { position });
        session.handle_pointer(PointerEvent::Up { position });

        let size = session.canvas().get(id).unwrap().size;
        assert_eq!(size.width, Some(250.0));
        assert_eq!(size.height, Some(60.0));
        assert!(!session.drag().is_resizing());
    }
}
