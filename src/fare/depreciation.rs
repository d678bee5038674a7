//! Depreciation-adjusted pool fare arithmetic.
//!
//! Every function here is pure. A `None` result means "not computable" and
//! is surfaced to callers as a null value, never as a fault.

use super::types::{CarType, round2};
use crate::config::{CategoryFloorConfig, DepreciationConfig};
use serde::Serialize;

/// Constants of the depreciation model.
#[derive(Debug, Clone, PartialEq)]
pub struct DepreciationParams {
    /// Share of the predicted price counted as realisable resale value.
    pub resale_discount: f64,
    pub floors: CategoryFloors,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFloors {
    pub hatchback: f64,
    pub sedan: f64,
    pub suv: f64,
}

/// Inputs of [`calculate_fare`].
#[derive(Debug, Clone, PartialEq)]
pub struct FareInputs {
    pub distance_km: f64,
    pub mileage_kmpl: f64,
    pub fuel_price_per_litre: f64,
    pub original_price: f64,
    pub predicted_price: f64,
    pub fare_modifier: f64,
    pub passengers: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareSplit {
    pub total_fare: f64,
    pub per_head_fare: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepreciationSummary {
    pub resale_estimate: f64,
    pub depreciated_value: f64,
    pub depreciation_percent: f64,
    pub retained_percent: f64,
}

/// Every intermediate of the category-capped pool fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoolFareBreakdown {
    pub depreciation: Option<DepreciationSummary>,
    pub depreciation_multiplier: Option<f64>,
    pub adjusted_mileage: Option<f64>,
    pub capped_mileage: Option<f64>,
    pub fare: Option<FareSplit>,
}

impl Default for DepreciationParams {
    fn default() -> Self {
        Self::from(&DepreciationConfig::default())
    }
}

impl From<&DepreciationConfig> for DepreciationParams {
    fn from(config: &DepreciationConfig) -> Self {
        Self {
            resale_discount: config.resale_discount,
            floors: CategoryFloors::from(&config.floors),
        }
    }
}

impl From<&CategoryFloorConfig> for CategoryFloors {
    fn from(config: &CategoryFloorConfig) -> Self {
        Self {
            hatchback: config.hatchback,
            sedan: config.sedan,
            suv: config.suv,
        }
    }
}

impl CategoryFloors {
    pub fn floor(&self, car_type: CarType) -> f64 {
        match car_type {
            CarType::Hatchback => self.hatchback,
            CarType::Sedan => self.sedan,
            CarType::Suv => self.suv,
        }
    }
}

impl FareInputs {
    /// Inputs with the neutral fare modifier of `1.0`.
    pub fn new(
        distance_km: f64,
        mileage_kmpl: f64,
        fuel_price_per_litre: f64,
        original_price: f64,
        predicted_price: f64,
        passengers: u32,
    ) -> Self {
        Self {
            distance_km,
            mileage_kmpl,
            fuel_price_per_litre,
            original_price,
            predicted_price,
            fare_modifier: 1.0,
            passengers,
        }
    }

    pub fn with_fare_modifier(mut self, fare_modifier: f64) -> Self {
        self.fare_modifier = fare_modifier;
        self
    }
}

/// `1 + (1 - predicted * discount / original)`, floored at zero.
///
/// Grows above 1 as the discounted resale value falls below the original
/// price. Returns `None` for a zero or non-finite original price.
pub fn depreciation_multiplier(
    original_price: f64,
    predicted_price: f64,
    resale_discount: f64,
) -> Option<f64> {
    if original_price == 0.0 || !original_price.is_finite() || !predicted_price.is_finite() {
        return None;
    }
    let multiplier = 1.0 + (1.0 - (predicted_price * resale_discount / original_price));
    Some(multiplier.max(0.0))
}

/// Dials a raw multiplier between "ignore depreciation" (`ratio = 0`) and
/// "full depreciation" (`ratio = 1`).
pub fn scaled_multiplier(raw_multiplier: f64, ratio: f64) -> f64 {
    1.0 + ratio.clamp(0.0, 1.0) * (raw_multiplier - 1.0)
}

/// `None` when the mileage is not positive or the multiplier is zero.
pub fn adjusted_mileage(mileage_kmpl: f64, multiplier: f64) -> Option<f64> {
    if !(mileage_kmpl > 0.0) || multiplier == 0.0 {
        return None;
    }
    Some(mileage_kmpl / multiplier)
}

/// Raises `mileage_kmpl` to the class floor; no cap when the class is unknown.
pub fn capped_mileage(floors: &CategoryFloors, car_type: Option<CarType>, mileage_kmpl: f64) -> f64 {
    match car_type {
        Some(car_type) => mileage_kmpl.max(floors.floor(car_type)),
        None => mileage_kmpl,
    }
}

/// Total and per-passenger fare, both rounded to two decimals.
pub fn calculate_fare(inputs: &FareInputs, resale_discount: f64) -> Option<FareSplit> {
    if !(inputs.mileage_kmpl > 0.0) || !(inputs.original_price > 0.0) || inputs.passengers == 0 {
        return None;
    }
    let multiplier =
        depreciation_multiplier(inputs.original_price, inputs.predicted_price, resale_discount)?;

    let total = (inputs.distance_km / inputs.mileage_kmpl)
        * inputs.fuel_price_per_litre
        * multiplier
        * inputs.fare_modifier;
    if !total.is_finite() {
        return None;
    }
    let per_head = total / f64::from(inputs.passengers);

    Some(FareSplit {
        total_fare: round2(total),
        per_head_fare: round2(per_head),
    })
}

pub fn depreciation_summary(
    original_price: f64,
    predicted_price: f64,
    resale_discount: f64,
) -> Option<DepreciationSummary> {
    if !(original_price > 0.0) {
        return None;
    }
    let depreciated_value = original_price - predicted_price;
    Some(DepreciationSummary {
        resale_estimate: round2(predicted_price * resale_discount),
        depreciated_value: round2(depreciated_value),
        depreciation_percent: round2(depreciated_value / original_price * 100.0),
        retained_percent: round2(predicted_price / original_price * 100.0),
    })
}

/// Runs the full category-capped pipeline.
///
/// The claimed mileage is deflated by the ratio-scaled multiplier, raised
/// to the class floor, and then priced by [`calculate_fare`], which applies
/// the unscaled multiplier on top.
pub fn pool_fare(
    inputs: &FareInputs,
    car_type: Option<CarType>,
    depreciation_ratio: f64,
    params: &DepreciationParams,
) -> PoolFareBreakdown {
    let raw = depreciation_multiplier(
        inputs.original_price,
        inputs.predicted_price,
        params.resale_discount,
    );
    let multiplier = raw.map(|raw| scaled_multiplier(raw, depreciation_ratio));
    let adjusted = multiplier.and_then(|m| adjusted_mileage(inputs.mileage_kmpl, m));
    let capped = adjusted.map(|mileage| capped_mileage(&params.floors, car_type, mileage));

    let fare = capped.and_then(|mileage| {
        let capped_inputs = FareInputs {
            mileage_kmpl: mileage,
            ..inputs.clone()
        };
        calculate_fare(&capped_inputs, params.resale_discount)
    });

    PoolFareBreakdown {
        depreciation: depreciation_summary(
            inputs.original_price,
            inputs.predicted_price,
            params.resale_discount,
        ),
        depreciation_multiplier: multiplier,
        adjusted_mileage: adjusted.map(round2),
        capped_mileage: capped.map(round2),
        fare,
    }
}
