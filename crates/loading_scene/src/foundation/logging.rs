//! Logger setup for binaries embedding the scene

pub use log::{debug, error, info, trace, warn};

/// Install `env_logger`, honouring `RUST_LOG` and defaulting to `info`
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).format_timestamp_millis().try_init().is_err() {
        log::debug!("Logger already installed");
    }
}
