use axum::http::StatusCode;
use axum_test::TestServer;
use fare_estimator::specs::CarSpecsLookup;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

mod common;

use common::{
    mocks::{MockSpecsLookup, dzire_specs},
    test_utils::{constant_model, create_test_app, create_test_config, sample_car_query},
};

fn server_with_lookup(lookup: Option<Arc<dyn CarSpecsLookup>>) -> TestServer {
    let app = create_test_app(&create_test_config(), Some(constant_model(10.0)), lookup);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_reference_pool_fare() {
    let server = server_with_lookup(None);

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 100.0,
            "fuel_price_per_litre": 100.0,
            "passengers": 2,
            "fare_modifier": 1.0,
            "depreciation_ratio": 0.0,
            "predicted_price": 900000.0,
            "original_price": 1000000.0,
            "claimed_mileage_kmpl": 20.0
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["adjusted_mileage"], 20.0);
    assert_eq!(body["capped_mileage"], 20.0);
    assert_eq!(body["fare"]["total_fare"], 595.0);
    assert_eq!(body["fare"]["per_head_fare"], 297.5);
    assert_eq!(body["depreciation"]["resale_estimate"], 810000.0);
    assert_eq!(body["depreciation"]["retained_percent"], 90.0);
}

#[tokio::test]
async fn test_category_floor_applies() {
    let server = server_with_lookup(None);

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 60.0,
            "fuel_price_per_litre": 100.0,
            "passengers": 3,
            "car_type": "Sedan",
            "predicted_price": 600000.0,
            "original_price": 1000000.0,
            "claimed_mileage_kmpl": 24.0
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["car_type"], "Sedan");
    assert_eq!(body["depreciation_ratio"], 1.0);
    assert_eq!(body["adjusted_mileage"], 16.44);
    assert_eq!(body["capped_mileage"], 20.0);
    assert_eq!(body["fare"]["total_fare"], 438.0);
    assert_eq!(body["fare"]["per_head_fare"], 146.0);
}

#[tokio::test]
async fn test_zero_passengers_is_null_not_error() {
    let server = server_with_lookup(None);

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 60.0,
            "fuel_price_per_litre": 100.0,
            "passengers": 0,
            "predicted_price": 600000.0,
            "original_price": 1000000.0,
            "claimed_mileage_kmpl": 24.0
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["fare"], Value::Null);
}

#[tokio::test]
async fn test_zero_original_price_is_null_not_error() {
    let server = server_with_lookup(None);

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 60.0,
            "fuel_price_per_litre": 100.0,
            "passengers": 2,
            "predicted_price": 600000.0,
            "original_price": 0.0,
            "claimed_mileage_kmpl": 24.0
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["depreciation"], Value::Null);
    assert_eq!(body["adjusted_mileage"], Value::Null);
    assert_eq!(body["fare"], Value::Null);
}

#[tokio::test]
async fn test_zero_claimed_mileage_is_null_even_with_floor() {
    let server = server_with_lookup(None);

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 60.0,
            "fuel_price_per_litre": 100.0,
            "passengers": 2,
            "car_type": "SUV",
            "predicted_price": 600000.0,
            "original_price": 1000000.0,
            "claimed_mileage_kmpl": 0.0
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["adjusted_mileage"], Value::Null);
    assert_eq!(body["capped_mileage"], Value::Null);
    assert_eq!(body["fare"], Value::Null);
}

#[tokio::test]
async fn test_missing_data_without_car_is_unprocessable() {
    let server = server_with_lookup(None);

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 60.0,
            "fuel_price_per_litre": 100.0,
            "predicted_price": 600000.0
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Fare estimation error:")
    );
}

#[tokio::test]
async fn test_specs_are_looked_up_for_missing_values() {
    let lookup = Arc::new(MockSpecsLookup::new().with_specs(dzire_specs()));
    let server = server_with_lookup(Some(lookup.clone()));

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 100.0,
            "fuel_price_per_litre": 100.0,
            "passengers": 2,
            "predicted_price": 900000.0,
            "car": sample_car_query()
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["original_price"], 1000000.0);
    assert_eq!(body["claimed_mileage_kmpl"], 23.8);
    assert_eq!(body["fare"]["total_fare"], 595.0);
    assert_eq!(lookup.get_queries(), vec![sample_car_query()]);
}

#[tokio::test]
async fn test_explicit_values_skip_lookup() {
    let lookup = Arc::new(MockSpecsLookup::new().with_specs(dzire_specs()));
    let server = server_with_lookup(Some(lookup.clone()));

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 100.0,
            "fuel_price_per_litre": 100.0,
            "predicted_price": 900000.0,
            "original_price": 1000000.0,
            "claimed_mileage_kmpl": 20.0,
            "car": sample_car_query()
        }))
        .await;

    response.assert_status_ok();
    assert!(lookup.get_queries().is_empty());
}

#[tokio::test]
async fn test_lookup_failure_is_bad_gateway() {
    let lookup = Arc::new(
        MockSpecsLookup::new().with_error("No search result found or Serper failed.".to_string()),
    );
    let server = server_with_lookup(Some(lookup));

    let response = server
        .post("/estimate_pool_fare")
        .json(&json!({
            "trip_distance_km": 100.0,
            "fuel_price_per_litre": 100.0,
            "predicted_price": 900000.0,
            "car": sample_car_query()
        }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("No search result found"));
}

#[tokio::test]
async fn test_car_specs_route_without_lookup() {
    let server = server_with_lookup(None);

    let response = server.post("/car_specs").json(&sample_car_query()).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_car_specs_route_returns_numbers() {
    let lookup = Arc::new(MockSpecsLookup::new().with_specs(dzire_specs()));
    let server = server_with_lookup(Some(lookup));

    let response = server.post("/car_specs").json(&sample_car_query()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "original_price": 1000000.0,
            "claimed_mileage_kmpl": 23.8,
            "engine_cc": 1197.0,
            "max_power_bhp": 88.5
        })
    );
}
