// Application layer - orchestration between the bill ledger and its adapters.
// The ledger decides; storage mirrors what it decided.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
