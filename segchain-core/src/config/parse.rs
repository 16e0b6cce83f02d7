//! Minimal parser for `board.toml`
//!
//! Handles only the subset the board file uses. It does NOT support the
//! whole of TOML.
//!
//! Supported:
//! - `[bus]`, `[display]`, `[buttons]` section headers
//! - `key = value` with quoted strings, integers (`_` separators allowed)
//!   and booleans
//! - Comments (`# ...`), including trailing comments
//!
//! Unknown sections and keys are rejected so typos fail loudly.

use segchain_hal::{BitOrder, ClockDivisor, Mode};

use super::types::{BoardConfig, PinConfig, MAX_GPIO};
use crate::app::{COUNTER_MAX, MAX_INTERVAL_MS};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header (line number, 1-based)
    InvalidSection(usize),
    /// Key not valid in its section
    UnknownKey(usize),
    /// Value has the wrong type or is out of range
    InvalidValue(usize),
    /// Pin string not of the form `gpioN` with optional `!`/`^` prefixes
    InvalidPin(usize),
    /// Clock divisor not even or below 2
    InvalidDivisor(usize),
    /// Same GPIO assigned twice
    DuplicatePin(u8),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bus,
    Display,
    Buttons,
}

/// Parse board configuration text
///
/// Keys left out keep their [`BoardConfig::default`] values.
pub fn parse_board_config(input: &str) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line).ok_or(ConfigError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue(line_no))?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    check_pins(&config)?;
    Ok(config)
}

fn apply_value(
    config: &mut BoardConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Bus, "sck") => config.bus.sck = parse_pin(value, line)?,
        (Section::Bus, "mosi") => config.bus.mosi = parse_pin(value, line)?,
        (Section::Bus, "miso") => config.bus.miso = parse_pin(value, line)?,
        (Section::Bus, "frame") => config.bus.frame = parse_pin(value, line)?,
        (Section::Bus, "divisor") => {
            let raw: u8 = parse_int(value, line)?;
            config.bus.spi.divisor =
                ClockDivisor::new(raw).ok_or(ConfigError::InvalidDivisor(line))?;
        }
        (Section::Bus, "mode") => {
            let raw: u8 = parse_int(value, line)?;
            config.bus.spi.mode = Mode::from_number(raw).ok_or(ConfigError::InvalidValue(line))?;
        }
        (Section::Bus, "bit_order") => {
            config.bus.spi.bit_order = match parse_string(value) {
                "msb" => BitOrder::MsbFirst,
                "lsb" => BitOrder::LsbFirst,
                _ => return Err(ConfigError::InvalidValue(line)),
            };
        }

        (Section::Display, "start") => {
            let start: u32 = parse_int(value, line)?;
            if start > COUNTER_MAX {
                return Err(ConfigError::InvalidValue(line));
            }
            config.display.start = start;
        }
        (Section::Display, "interval_ms") => {
            let interval = parse_nonzero(value, line)?;
            if interval > MAX_INTERVAL_MS {
                return Err(ConfigError::InvalidValue(line));
            }
            config.display.interval_ms = interval;
        }
        (Section::Display, "intro") => config.display.intro = parse_bool(value, line)?,
        (Section::Display, "intro_step_ms") => {
            config.display.intro_step_ms = parse_int(value, line)?;
        }
        (Section::Display, "intro_hold_ms") => {
            config.display.intro_hold_ms = parse_int(value, line)?;
        }

        (Section::Buttons, "mirror_to_leds") => {
            config.buttons.mirror_to_leds = parse_bool(value, line)?;
        }

        _ => return Err(ConfigError::UnknownKey(line)),
    }
    Ok(())
}

/// Parse a section header like `[bus]`
fn parse_section_header(line: &str) -> Option<Section> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    match name {
        "bus" => Some(Section::Bus),
        "display" => Some(Section::Display),
        "buttons" => Some(Section::Buttons),
        _ => None,
    }
}

/// Drop a `#` comment unless it sits inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str, line: usize) -> Result<T, ConfigError> {
    let mut digits = [0u8; 16];
    let mut len = 0;
    for b in value.bytes().filter(|&b| b != b'_') {
        *digits.get_mut(len).ok_or(ConfigError::InvalidValue(line))? = b;
        len += 1;
    }
    core::str::from_utf8(&digits[..len])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(ConfigError::InvalidValue(line))
}

fn parse_nonzero(value: &str, line: usize) -> Result<u32, ConfigError> {
    match parse_int(value, line)? {
        0 => Err(ConfigError::InvalidValue(line)),
        n => Ok(n),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str, line: usize) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue(line)),
    }
}

/// Parse a pin string like "gpio17", "!gpio17", "^gpio16"
fn parse_pin(value: &str, line: usize) -> Result<PinConfig, ConfigError> {
    let mut s = parse_string(value);
    let mut pin = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            pin.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pin.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    pin.pin = s
        .strip_prefix("gpio")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|&n| n <= MAX_GPIO)
        .ok_or(ConfigError::InvalidPin(line))?;

    Ok(pin)
}

/// Reject configs that wire two bus signals to the same GPIO
fn check_pins(config: &BoardConfig) -> Result<(), ConfigError> {
    let mut used: u32 = 0;
    for pin in config.bus.pins() {
        let mask = 1u32 << pin;
        if used & mask != 0 {
            return Err(ConfigError::DuplicatePin(pin));
        }
        used |= mask;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Shift-register chain on SPI1
[bus]
sck = "gpio10"
mosi = "gpio11"
miso = "^gpio12"   # buttons, pulled up
frame = "gpio13"
divisor = 64
mode = 0
bit_order = "msb"

[display]
start = 12_345
interval_ms = 250
intro = false

[buttons]
mirror_to_leds = true
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_board_config(SAMPLE).unwrap();

        assert_eq!(config.bus.pins(), [10, 11, 12, 13]);
        assert!(config.bus.miso.pull_up);
        assert!(!config.bus.frame.inverted);
        assert_eq!(config.bus.spi.divisor.get(), 64);
        assert_eq!(config.bus.spi.mode, Mode::Mode0);
        assert_eq!(config.bus.spi.bit_order, BitOrder::MsbFirst);

        assert_eq!(config.display.start, 12_345);
        assert_eq!(config.display.interval_ms, 250);
        assert!(!config.display.intro);
        // Untouched keys keep defaults
        assert_eq!(config.display.intro_step_ms, 400);
        assert_eq!(config.display.intro_hold_ms, 3000);

        assert!(config.buttons.mirror_to_leds);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_board_config(""), Ok(BoardConfig::default()));
        assert_eq!(
            parse_board_config("# nothing here\n\n"),
            Ok(BoardConfig::default())
        );
    }

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio11", 1).unwrap();
        assert_eq!(pin.pin, 11);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        let pin = parse_pin("\"^!gpio5\"", 1).unwrap();
        assert_eq!(pin.pin, 5);
        assert!(pin.inverted);
        assert!(pin.pull_up);

        assert_eq!(parse_pin("gpio30", 7), Err(ConfigError::InvalidPin(7)));
        assert_eq!(parse_pin("pa3", 7), Err(ConfigError::InvalidPin(7)));
    }

    #[test]
    fn test_unknown_section() {
        let result = parse_board_config("[bus]\n[motors]\n");
        assert_eq!(result, Err(ConfigError::InvalidSection(2)));
    }

    #[test]
    fn test_unknown_key() {
        let result = parse_board_config("[display]\nbrightness = 3\n");
        assert_eq!(result, Err(ConfigError::UnknownKey(2)));

        // Keys outside any section are rejected too
        let result = parse_board_config("start = 5\n");
        assert_eq!(result, Err(ConfigError::UnknownKey(1)));
    }

    #[test]
    fn test_odd_divisor() {
        let result = parse_board_config("[bus]\ndivisor = 3\n");
        assert_eq!(result, Err(ConfigError::InvalidDivisor(2)));
    }

    #[test]
    fn test_start_out_of_range() {
        let result = parse_board_config("[display]\nstart = 100000\n");
        assert_eq!(result, Err(ConfigError::InvalidValue(2)));
    }

    #[test]
    fn test_zero_interval() {
        let result = parse_board_config("[display]\ninterval_ms = 0\n");
        assert_eq!(result, Err(ConfigError::InvalidValue(2)));
    }

    #[test]
    fn test_interval_too_long() {
        let result = parse_board_config("[display]\ninterval_ms = 3000000000\n");
        assert_eq!(result, Err(ConfigError::InvalidValue(2)));

        let config = parse_board_config("[display]\ninterval_ms = 2147483647\n").unwrap();
        assert_eq!(config.display.interval_ms, MAX_INTERVAL_MS);
    }

    #[test]
    fn test_duplicate_pin() {
        let result = parse_board_config("[bus]\nframe = \"gpio18\"\n");
        assert_eq!(result, Err(ConfigError::DuplicatePin(18)));
    }

    #[test]
    fn test_hash_inside_string() {
        assert_eq!(strip_comment("a = \"x#y\" # c"), "a = \"x#y\" ");
    }
}
