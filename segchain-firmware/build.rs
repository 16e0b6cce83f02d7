//! Build script for segchain-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Board {
    #[serde(default)]
    bus: Bus,
    #[serde(default)]
    display: Display,
    #[serde(default)]
    #[allow(dead_code)]
    buttons: Buttons,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Bus {
    sck: Option<String>,
    mosi: Option<String>,
    miso: Option<String>,
    frame: Option<String>,
    divisor: Option<i64>,
    mode: Option<i64>,
    bit_order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct Display {
    start: Option<i64>,
    interval_ms: Option<i64>,
    intro: Option<bool>,
    intro_step_ms: Option<i64>,
    intro_hold_ms: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct Buttons {
    mirror_to_leds: Option<bool>,
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml as its configuration.            ║\n\
            ║  Please create one in the segchain-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax, types and unknown keys
    let board: Board = match toml::from_str(&config_content) {
        Ok(board) => board,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_bus(&board.bus, &mut errors);
    validate_display(&board.display, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pin number from "gpioN" with optional "!" and "^" prefixes
fn pin_number(s: &str) -> Option<u8> {
    let s = s.trim_start_matches(['!', '^']);
    let n: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    (n <= 29).then_some(n)
}

fn validate_bus(bus: &Bus, errors: &mut Vec<String>) {
    let pins = [
        ("sck", bus.sck.as_deref().unwrap_or("gpio18"), 2),
        ("mosi", bus.mosi.as_deref().unwrap_or("gpio19"), 3),
        ("miso", bus.miso.as_deref().unwrap_or("gpio16"), 0),
        ("frame", bus.frame.as_deref().unwrap_or("gpio17"), u8::MAX),
    ];

    let mut seen = Vec::new();
    let mut blocks = Vec::new();
    for (name, value, role) in pins {
        let Some(n) = pin_number(value) else {
            errors.push(format!("[bus] {} = '{}' is not a valid pin", name, value));
            continue;
        };
        if seen.contains(&n) {
            errors.push(format!("[bus] {} reuses gpio{}", name, n));
        }
        seen.push(n);

        // Clock and data pins have fixed SPI roles: RX, CSn, SCK, TX
        if role != u8::MAX {
            if n % 4 != role {
                errors.push(format!("[bus] gpio{} cannot carry {}", n, name));
            }
            blocks.push((n / 8) % 2);
        }
    }
    if blocks.windows(2).any(|w| w[0] != w[1]) {
        errors.push("[bus] sck, mosi and miso must share one SPI block".to_string());
    }

    if let Some(d) = bus.divisor {
        if !(2..=254).contains(&d) || d % 2 != 0 {
            errors.push("[bus] divisor must be even and 2-254".to_string());
        }
    }
    if let Some(m) = bus.mode {
        if !(0..=3).contains(&m) {
            errors.push("[bus] mode must be 0-3".to_string());
        }
    }
    if let Some(order) = &bus.bit_order {
        if order != "msb" && order != "lsb" {
            errors.push("[bus] bit_order must be 'msb' or 'lsb'".to_string());
        }
    }
}

fn validate_display(display: &Display, errors: &mut Vec<String>) {
    if let Some(start) = display.start {
        if !(0..=99_999).contains(&start) {
            errors.push("[display] start must be 0-99999".to_string());
        }
    }
    if let Some(interval) = display.interval_ms {
        if !(1..=i64::from(i32::MAX)).contains(&interval) {
            errors.push("[display] interval_ms must be 1-2147483647".to_string());
        }
    }
    for (name, value) in [
        ("intro_step_ms", display.intro_step_ms),
        ("intro_hold_ms", display.intro_hold_ms),
    ] {
        if let Some(v) = value {
            if !(0..=i64::from(u32::MAX)).contains(&v) {
                errors.push(format!("[display] {} out of range", name));
            }
        }
    }
}
