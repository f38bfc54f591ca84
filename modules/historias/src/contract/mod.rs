pub mod client;
pub mod error;
pub mod model;

pub use client::HistoriasApi;
pub use error::HistoriasError;
pub use model::*;
