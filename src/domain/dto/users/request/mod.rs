
pub mod create_user;
pub mod auth_request;

pub use auth_request::{LoginRequest, OAuthCallbackQuery, UpdateRoleRequest};
pub use create_user::{DriverDetails, RegisterRequest, TouristDetails};
