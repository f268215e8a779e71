use std::sync::Arc;

use axum::{Json, extract::State, response::Html};

use crate::bridge::{
    app,
    state::BridgeState,
    types::{BridgeApiResponse, Connection, ProviderRequest, ProviderResponse},
};

pub(crate) async fn serve_index() -> Html<&'static str> {
    Html(app::INDEX_HTML)
}

/// Next provider request for the page to execute, oldest first.
pub(crate) async fn get_next_provider_request(
    State(state): State<Arc<BridgeState>>,
) -> Json<BridgeApiResponse<ProviderRequest>> {
    match state.read_next_request() {
        Some(request) => Json(BridgeApiResponse::Ok(request)),
        None => Json(BridgeApiResponse::error("No pending request")),
    }
}

/// Result or error the page observed for a pending request.
pub(crate) async fn post_provider_response(
    State(state): State<Arc<BridgeState>>,
    Json(response): Json<ProviderResponse>,
) -> Json<BridgeApiResponse<()>> {
    if !state.has_request(&response.id) {
        return Json(BridgeApiResponse::error("Unknown request id"));
    }
    state.add_response(response);
    Json(BridgeApiResponse::Ok(()))
}

pub(crate) async fn get_connection_info(
    State(state): State<Arc<BridgeState>>,
) -> Json<BridgeApiResponse<Option<Connection>>> {
    Json(BridgeApiResponse::Ok(state.get_connection()))
}

pub(crate) async fn post_connection_update(
    State(state): State<Arc<BridgeState>>,
    Json(connection): Json<Option<Connection>>,
) -> Json<BridgeApiResponse<()>> {
    state.set_connection(connection);
    Json(BridgeApiResponse::Ok(()))
}
