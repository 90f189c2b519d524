//! Two-step confirmation for irreversible session actions.

use crate::session::GameSession;
use serde::{Deserialize, Serialize};

/// An action that cannot be undone once performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestructiveAction {
    /// Remove every element from the canvas.
    ClearCanvas,
    /// Log the player out and reset the canvas.
    EndSession,
}

impl DestructiveAction {
    pub fn title(self) -> &'static str {
        match self {
            DestructiveAction::ClearCanvas => "Clear Canvas",
            DestructiveAction::EndSession => "End Session",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DestructiveAction::ClearCanvas => {
                "Remove all elements from the canvas? This cannot be undone."
            }
            DestructiveAction::EndSession => {
                "End this session? Your current layout will be discarded."
            }
        }
    }
}

/// A destructive action waiting for the player's answer.
///
/// Resolving consumes the value, so an action is performed at most once.
#[must_use = "a pending confirmation does nothing until confirmed"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingConfirmation {
    action: DestructiveAction,
    title: &'static str,
    message: &'static str,
}

impl PendingConfirmation {
    pub(crate) fn new(action: DestructiveAction) -> Self {
        Self {
            action,
            title: action.title(),
            message: action.message(),
        }
    }

    pub fn action(&self) -> DestructiveAction {
        self.action
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Perform the action on `session`.
    pub fn confirm(self, session: &mut GameSession) -> DestructiveAction {
        match self.action {
            DestructiveAction::ClearCanvas => session.clear_canvas(),
            DestructiveAction::EndSession => session.end(),
        }
        log::info!("{} confirmed", self.title);
        self.action
    }

    /// Abandon the action. Nothing changes.
    pub fn cancel(self) {
        log::debug!("{} cancelled", self.title);
    }
}
