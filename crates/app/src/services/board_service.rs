//! Board service: use-cases around the live board.

use tokio::sync::{RwLock, broadcast};

use statusboard_domain::board::{Board, BoardUpdate, TickReport};
use statusboard_domain::card::Card;
use statusboard_domain::detail::ServerDetail;
use statusboard_domain::error::{NotFoundError, StatusBoardError};
use statusboard_domain::record::ServerKey;

use crate::ports::StatusSource;

/// Capacity of the update channel; slow subscribers skip older boards.
const UPDATE_CAPACITY: usize = 16;

/// Owns the board and refreshes it from a [`StatusSource`].
pub struct BoardService<S> {
    source: S,
    board: RwLock<Board>,
    updates: broadcast::Sender<BoardUpdate>,
}

impl<S: StatusSource> BoardService<S> {
    /// Create a service with an empty board.
    pub fn new(source: S) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            source,
            board: RwLock::new(Board::new()),
            updates,
        }
    }

    /// The source this service polls.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one tick: fetch the payload and render it into the board.
    ///
    /// # Errors
    ///
    /// Returns the source error when the payload cannot be fetched or
    /// parsed. The board is left exactly as it was.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<TickReport, StatusBoardError> {
        let payload = self.source.fetch().await?;

        let mut board = self.board.write().await;
        let report = board.apply(&payload);
        if self.updates.receiver_count() > 0 {
            // fails only when every receiver dropped in the meantime
            let _ = self.updates.send(BoardUpdate {
                cards: board.cards().to_vec(),
                report: report.clone(),
                updated_at: board.updated_at(),
            });
        }
        drop(board);

        for failure in &report.failures {
            tracing::debug!(
                key = ?failure.key,
                reason = %failure.reason,
                "server record not rendered"
            );
        }
        Ok(report)
    }

    /// Copy of the whole board.
    pub async fn snapshot(&self) -> Board {
        self.board.read().await.clone()
    }

    /// Cards in slot order.
    pub async fn cards(&self) -> Vec<Card> {
        self.board.read().await.cards().to_vec()
    }

    /// Look up the card bound to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusBoardError::NotFound`] when no such server was seen.
    pub async fn card(&self, key: &ServerKey) -> Result<Card, StatusBoardError> {
        self.board
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| not_found(key))
    }

    /// Detail view of a clickable card.
    ///
    /// # Errors
    ///
    /// Returns [`StatusBoardError::NotFound`] when the server is unknown, or
    /// when its card is offline or degraded and has no detail to show.
    pub async fn detail(&self, key: &ServerKey) -> Result<ServerDetail, StatusBoardError> {
        self.card(key).await?.detail.ok_or_else(|| {
            NotFoundError {
                entity: "Server detail",
                id: key.to_string(),
            }
            .into()
        })
    }

    /// The board as it stands, shaped like a published update. The report
    /// is empty since no tick produced it.
    pub async fn current(&self) -> BoardUpdate {
        let board = self.board.read().await;
        BoardUpdate {
            cards: board.cards().to_vec(),
            report: TickReport::default(),
            updated_at: board.updated_at(),
        }
    }

    /// Receive a [`BoardUpdate`] after every successful tick.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardUpdate> {
        self.updates.subscribe()
    }
}

fn not_found(key: &ServerKey) -> StatusBoardError {
    NotFoundError {
        entity: "Server",
        id: key.to_string(),
    }
    .into()
}
