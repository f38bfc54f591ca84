// === PUBLIC CONTRACT ===
// Only the contract module is meant for other modules to consume.
pub mod contract;

pub use contract::{client, error, model};

// === INTERNAL MODULES ===
// Exposed for comprehensive testing; external consumers should stick to
// the `contract` module.
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
