pub mod api;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod services;
pub mod session;
