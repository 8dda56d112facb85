//! Browser console logging
//!
//! Gesture events are recorded with `tracing`; without a subscriber they are
//! forwarded to the `log` facade, which `wasm-logger` prints to the console.

use log::Level;

/// Install the panic hook and console logger
pub fn init(level: Level) {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(level));

    tracing::info!("Logging initialized - level: {}", level);
}

/// Initialize with default settings
pub fn init_default() {
    init(Level::Info);
}
