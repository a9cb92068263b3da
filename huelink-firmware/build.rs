//! Build script for huelink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates strip.toml and turns it into constants and pin macros

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use huelink_core::config::{AckStyle, PinConfig, StripConfig};

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate strip.toml
fn load_config() -> StripConfig {
    println!("cargo:rerun-if-changed=strip.toml");

    let config_path = Path::new("strip.toml");

    if !config_path.exists() {
        fail(
            "strip.toml not found",
            "The firmware requires a strip.toml next to Cargo.toml.\n\
             Copy the one from the repository and adjust pins and pixel count.",
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read strip.toml", &e.to_string()),
    };

    let config: StripConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid strip.toml", &e.to_string()),
    };

    if let Err(e) = config.validate() {
        fail("strip.toml failed validation", &e.to_string());
    }

    if let Some(pin) = config.status_pin {
        if config.usable_status_pin().is_none() {
            println!(
                "cargo:warning=status_pin gpio{} is unusable (reserved or shared with data_pin); building without a status LED",
                pin.pin
            );
        }
    }
    if config.data_pin.inverted {
        println!("cargo:warning=data_pin inversion is ignored; WS2812 data is always active-high");
    }

    println!(
        "cargo:warning=strip.toml validated: {} pixels on gpio{}",
        config.pixel_count, config.data_pin.pin
    );

    config
}

/// Write `strip_config.rs` into OUT_DIR
fn generate_config(config: &StripConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let status = config.usable_status_pin();

    let mut code = String::new();
    writeln!(code, "// Generated by build.rs from strip.toml").unwrap();
    writeln!(code).unwrap();
    writeln!(code, "pub const PIXEL_COUNT: usize = {};", config.pixel_count).unwrap();
    writeln!(code).unwrap();
    writeln!(code, "pub const STRIP: StripConfig = StripConfig {{").unwrap();
    writeln!(code, "    pixel_count: {},", config.pixel_count).unwrap();
    writeln!(code, "    data_pin: {},", pin_literal(&PinConfig::new(config.data_pin.pin))).unwrap();
    match status {
        Some(pin) => writeln!(code, "    status_pin: Some({}),", pin_literal(&pin)).unwrap(),
        None => writeln!(code, "    status_pin: None,").unwrap(),
    }
    writeln!(code, "    brightness: {:?},", config.brightness).unwrap();
    writeln!(code, "    heartbeat_interval_ms: {},", config.heartbeat_interval_ms).unwrap();
    match config.ack {
        AckStyle::Pulse { hold_ms } => {
            writeln!(code, "    ack: AckStyle::Pulse {{ hold_ms: {} }},", hold_ms).unwrap()
        }
        AckStyle::Toggle => writeln!(code, "    ack: AckStyle::Toggle,").unwrap(),
    }
    writeln!(code, "    poll_timeout_ms: {},", config.poll_timeout_ms).unwrap();
    writeln!(code, "    input_mode: InputMode::{:?},", config.input_mode).unwrap();
    writeln!(code, "}};").unwrap();
    writeln!(code).unwrap();

    // PIO needs the concrete pin type, so pins are taken by field name
    writeln!(code, "macro_rules! strip_data_pin {{").unwrap();
    writeln!(code, "    ($p:ident) => {{ $p.PIN_{} }};", config.data_pin.pin).unwrap();
    writeln!(code, "}}").unwrap();
    writeln!(code).unwrap();
    writeln!(code, "macro_rules! status_pin {{").unwrap();
    match status {
        Some(pin) => writeln!(
            code,
            "    ($p:ident) => {{ Some(::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_{})) }};",
            pin.pin
        )
        .unwrap(),
        None => writeln!(
            code,
            "    ($p:ident) => {{ None::<::embassy_rp::Peri<'static, ::embassy_rp::gpio::AnyPin>> }};"
        )
        .unwrap(),
    }
    writeln!(code, "}}").unwrap();

    fs::write(out_dir.join("strip_config.rs"), code).unwrap();
}

fn pin_literal(pin: &PinConfig) -> String {
    format!("PinConfig {{ pin: {}, inverted: {} }}", pin.pin, pin.inverted)
}

/// Abort the build with a boxed diagnostic
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64}║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
