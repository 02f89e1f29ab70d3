//! Application layer for confsched.
//!
//! Coordinates the domain and infrastructure layers: the reactive session
//! merge, feedback handling and remote refresh.

pub mod feedback_service;
pub mod session;
pub mod session_usecase;

pub use feedback_service::FeedbackService;
pub use session::{RefreshCoordinator, SessionList, SessionMerger};
pub use session_usecase::SessionUseCase;
