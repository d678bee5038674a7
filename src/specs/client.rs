use super::types::{CarQuery, CarSpecs, LookupResponse};
use crate::{Error, Result, config::SpecsLookupConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait CarSpecsLookup: Send + Sync {
    async fn lookup(&self, query: &CarQuery) -> Result<CarSpecs>;
}

/// Client for the external car-specs service (`POST <url>` with a [`CarQuery`]).
pub struct HttpCarSpecsLookup {
    client: reqwest::Client,
    url: String,
}

impl HttpCarSpecsLookup {
    pub fn new(config: &SpecsLookupConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl CarSpecsLookup for HttpCarSpecsLookup {
    async fn lookup(&self, query: &CarQuery) -> Result<CarSpecs> {
        debug!(
            "Looking up specs for {} {} {} {} {}",
            query.car_name, query.model, query.year, query.fuel_type, query.variant
        );

        let response = self.client.post(&self.url).json(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Car specs service answered with status {}", status);
            return Err(Error::lookup(format!("service returned {status}")));
        }

        match response.json::<LookupResponse>().await? {
            LookupResponse::Failure { error } => {
                warn!("Car specs service reported an error: {}", error);
                Err(Error::lookup(error))
            }
            LookupResponse::Success { result } => CarSpecs::try_from(result),
        }
    }
}
