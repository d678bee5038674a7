mod depreciation;
mod trip;
mod types;

pub use depreciation::*;
pub use trip::*;
pub use types::*;
