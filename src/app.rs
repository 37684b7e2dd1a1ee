use axum::{response::Json as JsonResponse, routing::any, Router};
use tower_http::trace::TraceLayer;

use crate::{
  domains::relay::{model::HealthResponse, rest::relay_routes},
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/health", any(health_handler))
    .merge(relay_routes())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Liveness only; does not check the SMTP relay.
pub async fn health_handler() -> JsonResponse<HealthResponse> {
  JsonResponse(HealthResponse::default())
}
