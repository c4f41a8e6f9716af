//! Command implementations

mod auth;
mod config;
mod onboard;
mod plan;
mod repo;
mod session;

pub use auth::auth;
pub use config::config;
pub use onboard::onboard;
pub use plan::plan;
pub use repo::repo;
