use super::types::round2;
use crate::config::FareConfig;
use serde::Serialize;

/// Mileage band and fare floor applied to model predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFareParams {
    pub mileage_floor: f64,
    pub mileage_ceiling: f64,
    pub minimum_fare: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripFare {
    pub fuel_used_litres: f64,
    pub fare: f64,
}

impl Default for TripFareParams {
    fn default() -> Self {
        Self::from(&FareConfig::default())
    }
}

impl From<&FareConfig> for TripFareParams {
    fn from(config: &FareConfig) -> Self {
        Self {
            mileage_floor: config.mileage_floor,
            mileage_ceiling: config.mileage_ceiling,
            minimum_fare: config.minimum_fare,
        }
    }
}

impl TripFareParams {
    pub fn clip_mileage(&self, mileage_kmpl: f64) -> f64 {
        mileage_kmpl.clamp(self.mileage_floor, self.mileage_ceiling)
    }

    /// `max(minimum_fare, distance / mileage * fuel_price)`; `None` for a
    /// non-positive mileage.
    pub fn trip_fare(
        &self,
        distance_km: f64,
        mileage_kmpl: f64,
        fuel_price_per_litre: f64,
    ) -> Option<TripFare> {
        if !(mileage_kmpl > 0.0) {
            return None;
        }
        let fuel_used = distance_km / mileage_kmpl;
        let fare = (fuel_used * fuel_price_per_litre).max(self.minimum_fare);

        Some(TripFare {
            fuel_used_litres: round2(fuel_used),
            fare: round2(fare),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_reference_trip_fare() {
        let fare = TripFareParams::default().trip_fare(50.0, 10.0, 100.0).unwrap();

        assert_eq!(fare.fuel_used_litres, 5.0);
        assert_eq!(fare.fare, 500.0);
    }

    #[test]
    fn test_short_trip_hits_minimum_fare() {
        let fare = TripFareParams::default().trip_fare(2.0, 20.0, 100.0).unwrap();

        assert_eq!(fare.fuel_used_litres, 0.1);
        assert_eq!(fare.fare, 40.0);
    }

    #[test]
    fn test_zero_mileage_is_not_computable() {
        assert_eq!(TripFareParams::default().trip_fare(10.0, 0.0, 100.0), None);
    }

    #[rstest]
    #[case(3.0, 8.0)]
    #[case(8.0, 8.0)]
    #[case(14.2, 14.2)]
    #[case(25.0, 25.0)]
    #[case(41.0, 25.0)]
    fn test_clip_mileage(#[case] predicted: f64, #[case] expected: f64) {
        assert_eq!(TripFareParams::default().clip_mileage(predicted), expected);
    }

    #[test]
    fn test_custom_band() {
        let params = TripFareParams {
            mileage_floor: 8.0,
            mileage_ceiling: 22.0,
            minimum_fare: 0.0,
        };
        assert_eq!(params.clip_mileage(24.0), 22.0);
        assert_eq!(params.trip_fare(1.0, 20.0, 100.0).unwrap().fare, 5.0);
    }
}
