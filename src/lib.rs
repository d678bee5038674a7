pub mod config;
pub mod error;
pub mod estimator;
pub mod fare;
pub mod model;
pub mod server;
pub mod specs;

pub use error::{Error, Result};
