pub mod handlers;
pub mod types;

pub use handlers::AppState;

use crate::{
    Result,
    config::Config,
    model,
    specs::{CarSpecsLookup, HttpCarSpecsLookup},
};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::{any::Any, net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use types::ErrorResponse;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/model_info", get(handlers::model_info))
        .route("/predict_fare", post(handlers::predict_fare))
        .route("/estimate_pool_fare", post(handlers::estimate_pool_fare))
        .route("/car_specs", post(handlers::car_specs))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Internal error: {detail}"),
        }),
    )
        .into_response()
}

pub async fn run(config: Config) -> Result<()> {
    // A missing model keeps the service up; predictions answer "Model not loaded".
    let model = match model::load(&config.model).await {
        Ok(model) => {
            info!("Mileage model ready ({:?})", config.model.source);
            Some(model)
        }
        Err(e) => {
            warn!("Failed to load mileage model: {}", e);
            None
        }
    };

    let specs: Option<Arc<dyn CarSpecsLookup>> = match &config.specs_lookup {
        Some(lookup) => {
            info!("Car specs lookup configured at {}", lookup.url);
            Some(Arc::new(HttpCarSpecsLookup::new(lookup)?))
        }
        None => None,
    };

    let app = router(AppState::new(&config, model, specs));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
