pub mod api_key;
pub mod response;

pub use api_key::{require_api_key, Requirement};
pub use response::{ApiResponse, ApiResult};
