//! Detail page: the modal of one clickable card.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};

use statusboard_app::ports::StatusSource;
use statusboard_domain::detail::ServerDetail;
use statusboard_domain::record::ServerKey;

use crate::error::ApiError;
use crate::state::AppState;

/// Detail dialog template.
#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    detail: ServerDetail,
}

impl IntoResponse for DetailTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /servers/{key}`: detail of an online server.
pub async fn show<S>(
    State(state): State<AppState<S>>,
    Path(key): Path<String>,
) -> Result<DetailTemplate, ApiError>
where
    S: StatusSource + Send + Sync + 'static,
{
    let detail = state.board_service.detail(&ServerKey::new(key)).await?;
    Ok(DetailTemplate { detail })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::router;
    use crate::testing::{online, refreshed_state};

    async fn get(uri: &str) -> (StatusCode, String) {
        let state = refreshed_state(vec![
            online("eu node", 12),
            serde_json::json!({"name": "down"}),
        ])
        .await;
        let response = router::build(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn should_render_open_dialog_for_online_server() {
        let (status, body) = get("/servers/eu%20node").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<dialog open"));
        assert!(body.contains("<h2>eu node</h2>"));
        assert!(body.contains("25% (1MiB "));
        assert!(body.contains("25% (10MiB "));
        assert!(body.contains("40MiB)"));
        assert!(body.contains("rounded-rectangle"));
    }

    #[tokio::test]
    async fn should_return_404_when_card_not_clickable() {
        let (status, _) = get("/servers/down").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_404_when_server_unknown() {
        let (status, _) = get("/servers/ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
