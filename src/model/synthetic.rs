//! Deterministic synthetic training data for the in-process model.
//!
//! Used when no artifact is shipped. The underlying relation is linear, so a
//! model fit on this grid reproduces it for any factor configuration.

use super::linear::Sample;
use crate::config::FeatureLayout;

const AGES: std::ops::RangeInclusive<u32> = 0..=15;
const CAR_FACTORS: [f64; 4] = [1.0, 1.1, 1.2, 1.3];
const RIDE_FACTORS: [f64; 2] = [1.0, 1.2];
const TRAFFIC_FACTORS: [f64; 4] = [1.0, 1.1, 1.2, 1.3];
const WEATHER_FACTORS: [f64; 2] = [1.0, 1.1];

const DISTANCES: [f64; 5] = [5.0, 20.0, 50.0, 100.0, 250.0];
const CLAIMED: [f64; 5] = [10.0, 14.0, 18.0, 22.0, 26.0];
const FUEL_PRICES: [f64; 3] = [90.0, 100.0, 110.0];

/// Expected mileage for the categorical layout.
pub fn categorical_mileage(age: f64, traffic: f64, ride: f64, car: f64, weather: f64) -> f64 {
    24.0 - 0.45 * age - 6.0 * (traffic - 1.0) - 5.0 * (ride - 1.0) - 8.0 * (car - 1.0)
        - 3.0 * (weather - 1.0)
}

/// Expected mileage for the claimed-mileage layout.
pub fn claimed_mileage(distance: f64, claimed: f64, _fuel_price: f64, age: f64) -> f64 {
    1.5 + 0.9 * claimed - 0.35 * age - 0.004 * distance
}

pub fn dataset(layout: FeatureLayout) -> Vec<Sample> {
    let mut samples = Vec::new();
    match layout {
        FeatureLayout::Categorical => {
            for age in AGES {
                let age = f64::from(age);
                for traffic in TRAFFIC_FACTORS {
                    for ride in RIDE_FACTORS {
                        for car in CAR_FACTORS {
                            for weather in WEATHER_FACTORS {
                                let y = categorical_mileage(age, traffic, ride, car, weather);
                                samples.push((vec![age, traffic, ride, car, weather], y));
                            }
                        }
                    }
                }
            }
        }
        FeatureLayout::Claimed => {
            for distance in DISTANCES {
                for claimed in CLAIMED {
                    for fuel_price in FUEL_PRICES {
                        for age in AGES.step_by(2) {
                            let age = f64::from(age);
                            let y = claimed_mileage(distance, claimed, fuel_price, age);
                            samples.push((vec![distance, claimed, fuel_price, age], y));
                        }
                    }
                }
            }
        }
    }
    samples
}
