//! Data Transfer Objects for the remote APIs.

pub mod api_response;

pub use api_response::ApiResponseDto;
