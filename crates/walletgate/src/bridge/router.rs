use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::bridge::{handlers, state::BridgeState};

pub(crate) fn build_router(state: Arc<BridgeState>) -> Router {
    let api = Router::new()
        .route("/provider/request", get(handlers::get_next_provider_request))
        .route("/provider/response", post(handlers::post_provider_response))
        .route("/connection", get(handlers::get_connection_info))
        .route("/connection", post(handlers::post_connection_update))
        .with_state(state);

    Router::new().route("/", get(handlers::serve_index)).nest("/api", api)
}
