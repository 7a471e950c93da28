//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the display configuration (store name, currency, latency).
#[inline]
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
