pub mod config;
pub mod core;
pub mod logging;
pub mod terminal;
pub mod user_config;
