pub mod error_handlers;
pub mod home_handlers;
