//! Domain layer for confsched: session and feedback models, the record
//! assembler, the contents aggregator and the traits of every data source.

pub mod config;
pub mod error;
pub mod feedback;
pub mod repository;
pub mod session;
pub mod stream;

// Re-export common error type
pub use error::ConfschedError;
