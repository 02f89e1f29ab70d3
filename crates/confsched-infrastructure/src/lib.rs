pub mod config_service;
pub mod dto;
pub mod http_feedback_api;
pub mod http_session_api;
pub mod json_conference_store;
pub mod json_favorite_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http_feedback_api::HttpFeedbackApi;
pub use crate::http_session_api::HttpSessionApi;
pub use crate::json_conference_store::JsonConferenceStore;
pub use crate::json_favorite_store::JsonFavoriteStore;
pub use crate::paths::{ConfschedPaths, ServiceType};
