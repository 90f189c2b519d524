//! Drag to Style Core Library
//!
//! Platform-agnostic game logic for the Drag to Style design canvas: element
//! placement, markup generation, layout scoring and score persistence.

pub mod canvas;
pub mod clock;
pub mod config;
pub mod confirm;
pub mod drag;
pub mod element;
pub mod input;
pub mod markup;
pub mod scores;
pub mod scoring;
pub mod session;
pub mod storage;

pub use canvas::{CanvasCommand, ColorUpdate, ElementStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use confirm::{DestructiveAction, PendingConfirmation};
pub use drag::{DragEngine, ResizeGesture};
pub use element::{CanvasElement, Color, ElementId, ElementKind, ElementSize};
pub use input::{DropContext, PointerEvent};
pub use scores::{
    LeaderboardRow, LocalScoreStore, ScoreBackend, ScoreKeeper, ScoreRecord, User, UserStats,
    ValidationError,
};
pub use scoring::{Feedback, FeedbackLevel, Grade, ScoreReport};
pub use session::{GameSession, SessionError};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
