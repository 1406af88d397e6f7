//! JSON handlers for server cards.

use axum::Json;
use axum::extract::{Path, State};

use statusboard_app::ports::StatusSource;
use statusboard_domain::card::Card;
use statusboard_domain::detail::ServerDetail;
use statusboard_domain::record::ServerKey;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/servers`: every card in slot order.
pub async fn list<S>(State(state): State<AppState<S>>) -> Json<Vec<Card>>
where
    S: StatusSource + Send + Sync + 'static,
{
    Json(state.board_service.cards().await)
}

/// `GET /api/servers/{key}`: the card bound to one server.
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(key): Path<String>,
) -> Result<Json<Card>, ApiError>
where
    S: StatusSource + Send + Sync + 'static,
{
    let card = state.board_service.card(&ServerKey::new(key)).await?;
    Ok(Json(card))
}

/// `GET /api/servers/{key}/detail`: detail view of a clickable card.
pub async fn detail<S>(
    State(state): State<AppState<S>>,
    Path(key): Path<String>,
) -> Result<Json<ServerDetail>, ApiError>
where
    S: StatusSource + Send + Sync + 'static,
{
    let detail = state.board_service.detail(&ServerKey::new(key)).await?;
    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::router;
    use crate::testing::{online, refreshed_state};

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let state = refreshed_state(vec![
            online("alpha", 12),
            serde_json::json!({"name": "beta", "alias": "Beta"}),
        ])
        .await;
        let response = router::build(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_list_cards_in_slot_order() {
        let (status, body) = get_json("/api/servers").await;

        assert_eq!(status, StatusCode::OK);
        let cards = body.as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["id"], "table-item-0");
        assert_eq!(cards[0]["state"], "online");
        assert_eq!(cards[1]["key"], "beta");
        assert_eq!(cards[1]["state"], "offline");
    }

    #[tokio::test]
    async fn should_return_card_by_name() {
        let (status, body) = get_json("/api/servers/alpha").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cpu"]["label"], "12%");
        assert_eq!(body["status_label"], "Available");
    }

    #[tokio::test]
    async fn should_return_404_when_server_unknown() {
        let (status, body) = get_json("/api/servers/ghost").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Server ghost not found");
    }

    #[tokio::test]
    async fn should_return_detail_for_online_server() {
        let (status, body) = get_json("/api/servers/alpha/detail").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cpu"], "12%");
        assert_eq!(body["swap"], "None");
    }

    #[tokio::test]
    async fn should_return_404_for_detail_of_offline_server() {
        let (status, _) = get_json("/api/servers/beta/detail").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
