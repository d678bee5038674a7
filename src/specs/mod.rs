mod client;
mod extract;
mod types;

pub use client::*;
pub use extract::*;
pub use types::*;
