//! Shared application state for axum handlers.

use std::sync::Arc;

use statusboard_app::ports::StatusSource;
use statusboard_app::services::board_service::BoardService;

/// Application state shared across all axum handlers.
///
/// Generic over the status source to avoid dynamic dispatch. `Clone` is
/// implemented manually so the source itself does not need to be `Clone`;
/// only the `Arc` is cloned.
pub struct AppState<S> {
    /// The live board and its use-cases.
    pub board_service: Arc<BoardService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            board_service: Arc::clone(&self.board_service),
        }
    }
}

impl<S> AppState<S>
where
    S: StatusSource + Send + Sync + 'static,
{
    /// Create a new application state owning the service.
    pub fn new(board_service: BoardService<S>) -> Self {
        Self {
            board_service: Arc::new(board_service),
        }
    }

    /// Create a new application state from a pre-wrapped service.
    ///
    /// Use this when the service is shared with the poller task.
    pub fn from_arc(board_service: Arc<BoardService<S>>) -> Self {
        Self { board_service }
    }
}
