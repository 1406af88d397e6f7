//! Server-side rendered HTML pages (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod board;
#[allow(clippy::missing_errors_doc)]
pub mod detail;

use axum::Router;
use axum::routing::get;

use statusboard_app::ports::StatusSource;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: StatusSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(board::index::<S>))
        .route("/servers/{key}", get(detail::show::<S>))
}

/// Link to the detail page of `key`.
pub(crate) fn detail_href(key: &str) -> String {
    format!("/servers/{}", urlencoding::encode(key))
}
