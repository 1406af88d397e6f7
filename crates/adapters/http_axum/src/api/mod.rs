//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod servers;
pub mod sse;

use axum::Router;
use axum::routing::get;

use statusboard_app::ports::StatusSource;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: StatusSource + Send + Sync + 'static,
{
    Router::new()
        .route("/servers", get(servers::list::<S>))
        .route("/servers/{key}", get(servers::get::<S>))
        .route("/servers/{key}/detail", get(servers::detail::<S>))
        .route("/board/stream", get(sse::stream::<S>))
}
