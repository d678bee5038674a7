use crate::{
    Error, Result,
    config::{FactorConfig, FeatureLayout},
    fare::{CarType, RideType},
};

/// One trip as seen by the mileage regression.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFeatures {
    pub trip_distance_km: f64,
    pub claimed_mileage_kmpl: Option<f64>,
    pub fuel_price_per_litre: f64,
    pub vehicle_age: u32,
    pub car_type: Option<CarType>,
    pub ride_type: Option<RideType>,
}

/// Turns a [`TripFeatures`] into the numeric vector a model was fit on.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    layout: FeatureLayout,
    factors: FactorConfig,
}

impl FeatureLayout {
    pub fn width(&self) -> usize {
        match self {
            Self::Categorical => 5,
            Self::Claimed => 4,
        }
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        match self {
            Self::Categorical => &[
                "vehicle_age",
                "traffic_factor",
                "ride_type_factor",
                "car_type_factor",
                "weather_factor",
            ],
            Self::Claimed => &[
                "trip_distance_km",
                "claimed_mileage_kmpl",
                "fuel_price_per_litre",
                "vehicle_age",
            ],
        }
    }
}

impl FeatureEncoder {
    pub fn new(layout: FeatureLayout, factors: FactorConfig) -> Self {
        Self { layout, factors }
    }

    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    pub fn factors(&self) -> &FactorConfig {
        &self.factors
    }

    /// Unknown or missing car types weigh 1.0.
    pub fn car_type_factor(&self, car_type: Option<CarType>) -> f64 {
        match car_type {
            Some(CarType::Hatchback) => self.factors.car_type.hatchback,
            Some(CarType::Sedan) => self.factors.car_type.sedan,
            Some(CarType::Suv) => self.factors.car_type.suv,
            None => 1.0,
        }
    }

    /// Unknown or missing ride types weigh 1.0.
    pub fn ride_type_factor(&self, ride_type: Option<RideType>) -> f64 {
        match ride_type {
            Some(RideType::Shared) => self.factors.ride_type.shared,
            Some(RideType::Exclusive) => self.factors.ride_type.exclusive,
            None => 1.0,
        }
    }

    pub fn encode(&self, trip: &TripFeatures) -> Result<Vec<f64>> {
        let age = f64::from(trip.vehicle_age);
        match self.layout {
            FeatureLayout::Categorical => Ok(vec![
                age,
                self.factors.traffic,
                self.ride_type_factor(trip.ride_type),
                self.car_type_factor(trip.car_type),
                self.factors.weather,
            ]),
            FeatureLayout::Claimed => {
                let claimed = trip.claimed_mileage_kmpl.ok_or_else(|| {
                    Error::invalid_input("claimed_mileage_kmpl is required by the loaded model")
                })?;
                Ok(vec![
                    trip.trip_distance_km,
                    claimed,
                    trip.fuel_price_per_litre,
                    age,
                ])
            }
        }
    }
}
