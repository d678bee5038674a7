//! Request-level orchestration: validation, model invocation, spec lookup
//! and the fare arithmetic.

use crate::{
    Error, Result,
    fare::{self, CarType, DepreciationParams, FareInputs, PoolFareBreakdown, TripFareParams},
    model::{FeatureEncoder, MileageModel, TripFeatures},
    specs::{CarQuery, CarSpecs, CarSpecsLookup},
};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripEstimate {
    pub predicted_mileage: f64,
    pub fare_estimate: f64,
    pub fuel_used_litres: f64,
}

/// Inputs of the depreciation-aware pool fare.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolFareQuery {
    pub trip_distance_km: f64,
    pub fuel_price_per_litre: f64,
    pub passengers: u32,
    pub fare_modifier: f64,
    pub depreciation_ratio: f64,
    pub car_type: Option<CarType>,
    pub predicted_price: f64,
    pub original_price: Option<f64>,
    pub claimed_mileage_kmpl: Option<f64>,
    pub car: Option<CarQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolFareEstimate {
    pub original_price: f64,
    pub claimed_mileage_kmpl: f64,
    #[serde(flatten)]
    pub breakdown: PoolFareBreakdown,
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

/// Predicts mileage for `trip`, clips it into the plausible band and prices the trip.
pub fn predict_trip_fare(
    model: &dyn MileageModel,
    encoder: &FeatureEncoder,
    params: &TripFareParams,
    trip: &TripFeatures,
) -> Result<TripEstimate> {
    require_positive("trip_distance_km", trip.trip_distance_km)?;
    require_positive("fuel_price_per_litre", trip.fuel_price_per_litre)?;
    if let Some(claimed) = trip.claimed_mileage_kmpl {
        require_positive("claimed_mileage_kmpl", claimed)?;
    }

    let features = encoder.encode(trip)?;
    let raw = model.predict(&features)?;
    if !raw.is_finite() {
        return Err(Error::model(format!("model produced a non-finite mileage: {raw}")));
    }
    let mileage = params.clip_mileage(raw);
    debug!("Predicted mileage {:.3} km/l, clipped to {:.3}", raw, mileage);

    let trip_fare = params
        .trip_fare(trip.trip_distance_km, mileage, trip.fuel_price_per_litre)
        .ok_or_else(|| Error::internal("clipped mileage is not positive"))?;

    Ok(TripEstimate {
        predicted_mileage: fare::round2(mileage),
        fare_estimate: trip_fare.fare,
        fuel_used_litres: trip_fare.fuel_used_litres,
    })
}

/// Resolves missing car data through `lookup` and runs the pool fare pipeline.
///
/// Zero mileage, original price or passengers make the affected parts of
/// the breakdown `None`; they are not errors.
pub async fn estimate_pool_fare(
    query: &PoolFareQuery,
    lookup: Option<&dyn CarSpecsLookup>,
    params: &DepreciationParams,
) -> Result<PoolFareEstimate> {
    require_positive("trip_distance_km", query.trip_distance_km)?;
    require_positive("fuel_price_per_litre", query.fuel_price_per_litre)?;
    require_positive("fare_modifier", query.fare_modifier)?;
    require_non_negative("predicted_price", query.predicted_price)?;
    if !(0.0..=1.0).contains(&query.depreciation_ratio) {
        return Err(Error::invalid_input(format!(
            "depreciation_ratio must be within [0, 1], got {}",
            query.depreciation_ratio
        )));
    }

    let (original_price, claimed_mileage) =
        match (query.original_price, query.claimed_mileage_kmpl) {
            (Some(price), Some(mileage)) => (price, mileage),
            (price, mileage) => {
                let specs = resolve_specs(query.car.as_ref(), lookup).await?;
                (
                    price.unwrap_or(specs.original_price),
                    mileage.unwrap_or(specs.claimed_mileage_kmpl),
                )
            }
        };
    require_non_negative("original_price", original_price)?;
    require_non_negative("claimed_mileage_kmpl", claimed_mileage)?;

    let inputs = FareInputs::new(
        query.trip_distance_km,
        claimed_mileage,
        query.fuel_price_per_litre,
        original_price,
        query.predicted_price,
        query.passengers,
    )
    .with_fare_modifier(query.fare_modifier);

    let breakdown = fare::pool_fare(&inputs, query.car_type, query.depreciation_ratio, params);
    match breakdown.fare {
        Some(split) => info!(
            "Pool fare computed: total {:.2}, per head {:.2}",
            split.total_fare, split.per_head_fare
        ),
        None => warn!("Pool fare not computable for the given inputs"),
    }

    Ok(PoolFareEstimate {
        original_price,
        claimed_mileage_kmpl: claimed_mileage,
        breakdown,
    })
}

async fn resolve_specs(
    car: Option<&CarQuery>,
    lookup: Option<&dyn CarSpecsLookup>,
) -> Result<CarSpecs> {
    let car = car.ok_or_else(|| {
        Error::invalid_input(
            "original_price and claimed_mileage_kmpl are required when no car is given",
        )
    })?;
    car.validate()?;
    let lookup = lookup.ok_or(Error::LookupUnavailable)?;
    lookup.lookup(car).await
}
