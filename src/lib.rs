pub mod config;
pub mod extract;
pub mod fetch;
pub mod record;
pub mod render;
pub mod watch;
