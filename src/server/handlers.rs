use super::types::{
    ErrorResponse, ModelInfoResponse, PoolFareRequest, PoolFareResponse, PredictFareRequest,
    RootResponse,
};
use crate::{
    Error,
    config::{Config, ModelSource},
    estimator::{self, PoolFareQuery, TripEstimate},
    fare::{DepreciationParams, TripFareParams},
    model::{FeatureEncoder, MileageModel, TripFeatures},
    specs::{CarQuery, CarSpecs, CarSpecsLookup},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::{str::FromStr, sync::Arc};
use tracing::{error, info, warn};

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<dyn MileageModel>>,
    pub specs: Option<Arc<dyn CarSpecsLookup>>,
    pub encoder: Arc<FeatureEncoder>,
    pub trip_params: Arc<TripFareParams>,
    pub depreciation: Arc<DepreciationParams>,
    pub default_ratio: f64,
    pub model_source: ModelSource,
}

impl AppState {
    pub fn new(
        config: &Config,
        model: Option<Arc<dyn MileageModel>>,
        specs: Option<Arc<dyn CarSpecsLookup>>,
    ) -> Self {
        Self {
            model,
            specs,
            encoder: Arc::new(FeatureEncoder::new(
                config.model.layout,
                config.model.factors.clone(),
            )),
            trip_params: Arc::new(TripFareParams::from(&config.fare)),
            depreciation: Arc::new(DepreciationParams::from(&config.depreciation)),
            default_ratio: config.depreciation.default_ratio,
            model_source: config.model.source,
        }
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::ModelNotLoaded | Error::LookupUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        Error::Lookup(_) | Error::Network(_) => StatusCode::BAD_GATEWAY,
        e if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(label: &str, err: Error) -> HandlerError {
    let status = status_for(&err);
    let message = match err {
        Error::ModelNotLoaded => err.to_string(),
        other => format!("{label}: {other}"),
    };
    if status.is_server_error() {
        error!("{}", message);
    } else {
        warn!("{}", message);
    }
    (status, Json(ErrorResponse { error: message }))
}

/// Keeps the extractor's status but answers with the usual error body.
fn rejection_response(label: &str, rejection: JsonRejection) -> HandlerError {
    let message = format!("{label}: {}", rejection.body_text());
    warn!("{}", message);
    (rejection.status(), Json(ErrorResponse { error: message }))
}

/// Unknown category names fall back to the neutral factor instead of failing.
fn parse_category<T: FromStr<Err = Error>>(value: Option<&str>) -> Option<T> {
    let value = value?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Ignoring category: {}", e);
            None
        }
    }
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Fare & Mileage API is live".to_string(),
    })
}

pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let layout = state
        .model
        .as_ref()
        .map(|model| model.layout())
        .unwrap_or_else(|| state.encoder.layout());

    Json(ModelInfoResponse {
        loaded: state.model.is_some(),
        source: format!("{:?}", state.model_source).to_lowercase(),
        layout: format!("{layout:?}").to_lowercase(),
        features: layout
            .feature_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}

pub async fn predict_fare(
    State(state): State<AppState>,
    body: Result<Json<PredictFareRequest>, JsonRejection>,
) -> Result<Json<TripEstimate>, HandlerError> {
    let Json(request) = body.map_err(|e| rejection_response("Prediction error", e))?;
    info!(
        "Received fare prediction request: {} km at {} per litre",
        request.trip_distance_km, request.fuel_price_per_litre
    );

    let model = state
        .model
        .as_deref()
        .ok_or_else(|| error_response("Prediction error", Error::ModelNotLoaded))?;

    let trip = TripFeatures {
        trip_distance_km: request.trip_distance_km,
        claimed_mileage_kmpl: request.claimed_mileage_kmpl,
        fuel_price_per_litre: request.fuel_price_per_litre,
        vehicle_age: request.vehicle_age,
        car_type: parse_category(request.car_type.as_deref()),
        ride_type: parse_category(request.ride_type.as_deref()),
    };

    match estimator::predict_trip_fare(model, &state.encoder, &state.trip_params, &trip) {
        Ok(estimate) => {
            info!(
                "Predicted mileage {} km/l, fare {}",
                estimate.predicted_mileage, estimate.fare_estimate
            );
            Ok(Json(estimate))
        }
        Err(e) => Err(error_response("Prediction error", e)),
    }
}

pub async fn estimate_pool_fare(
    State(state): State<AppState>,
    body: Result<Json<PoolFareRequest>, JsonRejection>,
) -> Result<Json<PoolFareResponse>, HandlerError> {
    let Json(request) = body.map_err(|e| rejection_response("Fare estimation error", e))?;
    info!(
        "Received pool fare request: {} km, {} passengers",
        request.trip_distance_km, request.passengers
    );

    let car_type = parse_category(request.car_type.as_deref());
    let depreciation_ratio = request.depreciation_ratio.unwrap_or(state.default_ratio);
    let query = PoolFareQuery {
        trip_distance_km: request.trip_distance_km,
        fuel_price_per_litre: request.fuel_price_per_litre,
        passengers: request.passengers,
        fare_modifier: request.fare_modifier,
        depreciation_ratio,
        car_type,
        predicted_price: request.predicted_price,
        original_price: request.original_price,
        claimed_mileage_kmpl: request.claimed_mileage_kmpl,
        car: request.car,
    };

    let estimate = estimator::estimate_pool_fare(&query, state.specs.as_deref(), &state.depreciation)
        .await
        .map_err(|e| error_response("Fare estimation error", e))?;

    Ok(Json(PoolFareResponse {
        car_type: car_type.map(|c| c.to_string()),
        depreciation_ratio,
        estimate,
    }))
}

pub async fn car_specs(
    State(state): State<AppState>,
    body: Result<Json<CarQuery>, JsonRejection>,
) -> Result<Json<CarSpecs>, HandlerError> {
    let Json(query) = body.map_err(|e| rejection_response("Car specs error", e))?;
    info!("Received car specs request for {} {}", query.car_name, query.model);

    query
        .validate()
        .map_err(|e| error_response("Car specs error", e))?;
    let lookup = state
        .specs
        .as_deref()
        .ok_or_else(|| error_response("Car specs error", Error::LookupUnavailable))?;

    lookup
        .lookup(&query)
        .await
        .map(Json)
        .map_err(|e| error_response("Car specs error", e))
}
