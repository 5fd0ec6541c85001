
pub mod google_user;

pub use google_user::GoogleUserInfo;
