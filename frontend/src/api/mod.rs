mod auth;
pub mod client;
mod sensors;
pub mod types;

pub use client::*;
pub use sensors::SensorQuery;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
