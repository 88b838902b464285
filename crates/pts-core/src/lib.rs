pub mod api;
pub mod config;
pub mod logging;
pub mod retry;
