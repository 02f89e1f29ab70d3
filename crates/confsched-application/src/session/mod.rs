//! Session application services.
//!
//! This module contains the merge pipeline and the refresh coordinator.

mod merger;
mod refresh;

pub use merger::{SessionList, SessionMerger};
pub use refresh::RefreshCoordinator;
