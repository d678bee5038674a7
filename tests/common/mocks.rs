use async_trait::async_trait;
use fare_estimator::{
    Error, Result,
    specs::{CarQuery, CarSpecs, CarSpecsLookup},
};
use std::sync::{Arc, Mutex};

/// Mock car specs lookup for testing
#[derive(Debug, Default)]
pub struct MockSpecsLookup {
    pub specs: Option<CarSpecs>,
    pub error: Option<String>,
    pub queries: Arc<Mutex<Vec<CarQuery>>>,
}

impl MockSpecsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specs(mut self, specs: CarSpecs) -> Self {
        self.specs = Some(specs);
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_queries(&self) -> Vec<CarQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CarSpecsLookup for MockSpecsLookup {
    async fn lookup(&self, query: &CarQuery) -> Result<CarSpecs> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(ref error) = self.error {
            return Err(Error::lookup(error.clone()));
        }

        self.specs
            .ok_or_else(|| Error::lookup("No mock specs available"))
    }
}

pub fn dzire_specs() -> CarSpecs {
    CarSpecs {
        original_price: 1_000_000.0,
        claimed_mileage_kmpl: 23.8,
        engine_cc: 1197.0,
        max_power_bhp: 88.5,
    }
}
