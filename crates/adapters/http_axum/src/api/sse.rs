//! Server-Sent Events (SSE) stream of board updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use statusboard_app::ports::StatusSource;

use crate::state::AppState;

/// `GET /api/board/stream`: one JSON `BoardUpdate` frame per successful tick.
///
/// A client joining after the first tick gets the current board straight
/// away, then one frame per tick. The stream continues until the client
/// disconnects. A subscriber that falls behind skips the boards it missed;
/// the next frame is always the full current board.
pub async fn stream<S>(
    State(state): State<AppState<S>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    S: StatusSource + Send + Sync + 'static,
{
    // subscribe first so no tick falls between the snapshot and the stream
    let updates = state.board_service.subscribe();
    let current = state.board_service.current().await;
    let initial = (!current.cards.is_empty()).then_some(current);

    let frames = tokio_stream::iter(initial.map(Ok::<_, BroadcastStreamRecvError>))
        .chain(BroadcastStream::new(updates))
        .filter_map(|result| match result {
            Ok(update) => match serde_json::to_string(&update) {
                Ok(json) => Some(Ok(Event::default().event("board").data(json))),
                Err(err) => {
                    tracing::warn!(%err, "failed to serialize board update for SSE stream");
                    None
                }
            },
            Err(BroadcastStreamRecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "SSE subscriber lagged, older boards dropped");
                None
            }
        });

    Sse::new(frames).keep_alive(KeepAlive::default())
}
