//! Fixtures shared by the handler tests.

use std::future::Future;

use statusboard_app::ports::StatusSource;
use statusboard_app::services::board_service::BoardService;
use statusboard_domain::error::StatusBoardError;
use statusboard_domain::record::StatsPayload;

use crate::state::AppState;

/// Serves the same payload on every fetch.
pub struct StubSource {
    payload: StatsPayload,
}

impl StatusSource for StubSource {
    fn fetch(&self) -> impl Future<Output = Result<StatsPayload, StatusBoardError>> + Send {
        let payload = self.payload.clone();
        async move { Ok(payload) }
    }
}

pub fn online(name: &str, cpu: u32) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "alias": name.to_uppercase(),
        "type": "KVM",
        "location": "NL",
        "online4": true,
        "uptime": "3 天",
        "cpu": cpu,
        "memory_used": 1024,
        "memory_total": 4096,
        "hdd_used": 10,
        "hdd_total": 40,
        "network_rx": 1536,
        "network_tx": 0
    })
}

/// State whose source will serve `servers`; the board is still empty.
pub fn scripted_state(servers: Vec<serde_json::Value>) -> AppState<StubSource> {
    AppState::new(BoardService::new(StubSource {
        payload: StatsPayload {
            updated: Some(1_700_000_000),
            servers,
        },
    }))
}

/// State with one tick already applied.
pub async fn refreshed_state(servers: Vec<serde_json::Value>) -> AppState<StubSource> {
    let state = scripted_state(servers);
    state.board_service.refresh().await.unwrap();
    state
}
