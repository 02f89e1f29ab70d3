//! Repository trait re-exports.
//!
//! Centralized access to every data source trait.

pub use crate::feedback::FeedbackApi;
pub use crate::session::{ConferenceStore, FavoriteStore, SessionApi};
