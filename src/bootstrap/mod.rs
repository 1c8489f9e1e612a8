//! Process bootstrap: configuration, logging, wiring and the daemon loop.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config, ConfigError};
pub use run::run_daemon;
pub use wiring::{wire_daemon, WiredDaemon, WiringError};
