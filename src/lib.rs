pub mod advice;
pub mod api;
pub mod core;
pub mod session;
