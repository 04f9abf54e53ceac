//! This build script copies the `memory.x` file from the crate root into
//! a directory where the linker can always find it at build time, and makes
//! sure the face configuration in `config/face_config.json` exists and is valid.
//!
//! The linker script handling only applies when building the firmware for the
//! bare-metal target, host builds (and `cargo test`) skip it.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::print_stdout)]
#![allow(clippy::panic)]

use std::{
    env, fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

/// Defaults written to `config/face_config.json` when the file is missing.
const DEFAULT_FACE_CONFIG: &str = r#"{
    "clock_mode_24h": false,
    "browse_tick_hz": 1,
    "edit_tick_hz": 4
}
"#;

fn main() {
    face_config();
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("none") {
        memory_x();
    }
}

/// Validate `config/face_config.json`, or create it with default values if it doesn't exist.
/// The firmware embeds the file and parses it at startup, so a broken file should fail the build
/// rather than silently fall back to defaults on the device.
fn face_config() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR environment variable not set");
    let config_path = Path::new(&manifest_dir).join("config/face_config.json");
    println!("cargo:rerun-if-changed=config/face_config.json");

    let config_contents = if config_path.exists() {
        fs::read_to_string(&config_path).expect("Could not read face_config.json file")
    } else {
        println!("face_config.json not found, creating with default values");
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).expect("Could not create config directory");
        }
        fs::write(&config_path, DEFAULT_FACE_CONFIG)
            .expect("Could not write default face_config.json file");
        DEFAULT_FACE_CONFIG.to_string()
    };

    let config: serde_json::Value =
        serde_json::from_str(&config_contents).expect("Could not parse face_config.json file");
    config["clock_mode_24h"]
        .as_bool()
        .expect("clock_mode_24h not found in face_config.json file");
    for key in ["browse_tick_hz", "edit_tick_hz"] {
        let hz = config[key]
            .as_u64()
            .unwrap_or_else(|| panic!("{key} not found in face_config.json file"));
        assert!(
            (1..=128).contains(&hz) && hz.is_power_of_two(),
            "{key} in face_config.json must be a power of two between 1 and 128, got {hz}"
        );
    }
}

/// Handle the `memory.x` linker script
fn memory_x() {
    // Put `memory.x` in our output directory and ensure it's
    // on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // By default, Cargo will re-run a build script whenever
    // any file in the project changes. By specifying `memory.x`
    // here, we ensure the build script is only re-run when
    // `memory.x` is changed.
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
