//! Board page: every card in slot order.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use statusboard_app::poller::POLL_INTERVAL;
use statusboard_app::ports::StatusSource;
use statusboard_domain::card::Card;

use super::detail_href;
use crate::state::AppState;

/// A card plus the link to its detail page, when it has one.
pub struct CardRow {
    pub card: Card,
    pub href: Option<String>,
}

impl From<Card> for CardRow {
    fn from(card: Card) -> Self {
        let href = card
            .is_clickable()
            .then(|| detail_href(card.key.as_str()));
        Self { card, href }
    }
}

/// Board page template.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    refresh_seconds: u64,
    rows: Vec<CardRow>,
    updated_at: Option<String>,
}

impl IntoResponse for BoardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /`: the live board.
pub async fn index<S>(State(state): State<AppState<S>>) -> BoardTemplate
where
    S: StatusSource + Send + Sync + 'static,
{
    let board = state.board_service.snapshot().await;

    BoardTemplate {
        refresh_seconds: POLL_INTERVAL.as_secs(),
        updated_at: board
            .updated_at()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        rows: board.cards().iter().cloned().map(CardRow::from).collect(),
    }
}
