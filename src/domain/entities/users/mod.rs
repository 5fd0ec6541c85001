
pub mod user;

pub use user::{NewUser, Role, User};
