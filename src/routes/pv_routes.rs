use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::pv_controller::{calculate_pv, read_root};
use crate::shared_state::AppState;

/// Build the public router: `/` and `/calculate`, open CORS and request tracing.
pub fn pv_routes(state: AppState) -> Router {
    // The mobile client calls from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(read_root))
        .route("/calculate", post(calculate_pv))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
