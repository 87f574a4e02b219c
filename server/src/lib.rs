pub mod app;
pub mod config;

pub use app::{ApiDoc, build, connect_store, router};
pub use config::{AppConfig, ConfigError, StoreBackend};
