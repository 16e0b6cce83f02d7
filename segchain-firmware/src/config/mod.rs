//! Board configuration loading
//!
//! The board file is compiled into the image and parsed at boot. build.rs
//! has already checked it, so a parse failure here means the two parsers
//! disagree; the firmware then runs on the built-in defaults.

use defmt::*;

use segchain_core::config::{parse_board_config, BoardConfig};

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../board.toml");

/// Parse the embedded board file, falling back to defaults
pub fn load_board_config() -> BoardConfig {
    match parse_board_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded board.toml ({} bytes)", EMBEDDED_CONFIG.len());
            config
        }
        Err(e) => {
            error!("board.toml rejected: {}, using defaults", e);
            BoardConfig::default()
        }
    }
}

/// Log the effective configuration
pub fn log_board_config(config: &BoardConfig) {
    let bus = &config.bus;
    info!(
        "Bus: sck=gpio{} mosi=gpio{} miso=gpio{} frame=gpio{}{}",
        bus.sck.pin,
        bus.mosi.pin,
        bus.miso.pin,
        bus.frame.pin,
        if bus.frame.inverted { " (active high)" } else { "" }
    );
    info!(
        "Bus: divisor={} mode={} bit_order={}",
        bus.spi.divisor.get(),
        bus.spi.mode,
        bus.spi.bit_order
    );
    info!(
        "Display: start={} interval={}ms intro={}",
        config.display.start, config.display.interval_ms, config.display.intro
    );
}
